use serde::{Deserialize, Serialize};

use super::{Notebook, Settings, Task, Template};
use crate::templates;

/// Root aggregate of everything persisted in the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default)]
    pub notebooks: Vec<Notebook>,
    #[serde(default)]
    pub settings: Settings,
    /// Study-kind templates, built-ins first
    #[serde(default = "templates::builtin_study_templates")]
    pub templates: Vec<Template>,
    #[serde(default = "templates::builtin_planner_templates")]
    pub planner_templates: Vec<Template>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            notebooks: Vec::new(),
            settings: Settings::default(),
            templates: templates::builtin_study_templates(),
            planner_templates: templates::builtin_planner_templates(),
            tasks: Vec::new(),
        }
    }
}

impl AppData {
    pub fn note_count(&self) -> usize {
        self.notebooks.iter().map(|nb| nb.notes.len()).sum()
    }

    /// Study and planner templates in display order.
    pub fn all_templates(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter().chain(self.planner_templates.iter())
    }
}
