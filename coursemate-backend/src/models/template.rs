use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Which picker a template shows up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TemplateKind {
    /// Note-taking structures (Cornell, Frayer, ...)
    Study,
    /// Organizational layouts (daily planner, trackers, ...)
    Planner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
}

impl TemplateSection {
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: placeholder.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sections: Vec<TemplateSection>,
    pub kind: TemplateKind,
    #[serde(default)]
    pub builtin: bool,
}

impl Template {
    /// Render the skeleton inserted into note content: one `Label:` line per
    /// section followed by its placeholder, sections separated by a blank line.
    pub fn render(&self) -> String {
        self.sections
            .iter()
            .map(|s| {
                let label = s.label.trim_end();
                let heading = if label.ends_with(':') {
                    label.to_string()
                } else {
                    format!("{}:", label)
                };
                if s.placeholder.is_empty() {
                    heading
                } else {
                    format!("{}\n{}", heading, s.placeholder)
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// User-supplied template definition for create/update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateDefinition {
    pub name: String,
    pub sections: Vec<TemplateSection>,
    pub kind: TemplateKind,
}
