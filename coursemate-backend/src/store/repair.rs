//! Load-time repair of a decoded document.
//!
//! Deterministic: the first-seen entity with a given id wins and later
//! duplicates are dropped. Built-in templates are always reset to seed data.

use std::collections::HashSet;

use crate::models::{AppData, Template, TemplateKind};
use crate::notes::tags::canonicalize_tags;
use crate::templates;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RepairReport {
    pub ids_assigned: usize,
    pub duplicates_dropped: usize,
    pub invalid_notebooks_dropped: usize,
    pub templates_reseeded: bool,
    pub tag_lists_canonicalized: usize,
    /// Fields reset to their default because their value did not decode
    pub fields_reset: usize,
    /// Entities dropped because they could not be decoded at all
    pub undecodable_dropped: usize,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self == &RepairReport::default()
    }
}

/// Generate a UUID v4 that is not in `taken`.
pub fn fresh_id(taken: &HashSet<String>) -> String {
    loop {
        let id = uuid::Uuid::new_v4().to_string();
        if !taken.contains(&id) {
            return id;
        }
    }
}

pub fn repair(data: &mut AppData) -> RepairReport {
    let mut report = RepairReport::default();
    repair_templates(data, &mut report);
    repair_notebooks(data, &mut report);
    repair_tasks(data, &mut report);
    report
}

fn repair_templates(data: &mut AppData, report: &mut RepairReport) {
    let loaded_study = std::mem::take(&mut data.templates);
    let loaded_planner = std::mem::take(&mut data.planner_templates);

    let mut study = templates::builtin_study_templates();
    let mut planner = templates::builtin_planner_templates();
    let builtin_ids: HashSet<String> = study.iter().chain(planner.iter()).map(|t| t.id.clone()).collect();
    let mut seen = builtin_ids.clone();

    for template in loaded_study.iter().chain(loaded_planner.iter()) {
        if builtin_ids.contains(&template.id) {
            if !template.builtin {
                log::warn!(
                    "[STORE] Dropping template {:?} whose id {} belongs to a built-in",
                    template.name,
                    template.id
                );
                report.duplicates_dropped += 1;
            }
            continue;
        }
        let mut template: Template = template.clone();
        if template.id.trim().is_empty() {
            template.id = fresh_id(&seen);
            report.ids_assigned += 1;
        }
        if !seen.insert(template.id.clone()) {
            log::warn!("[STORE] Dropping duplicate template id {}", template.id);
            report.duplicates_dropped += 1;
            continue;
        }
        template.builtin = false;
        match template.kind {
            TemplateKind::Study => study.push(template),
            TemplateKind::Planner => planner.push(template),
        }
    }

    report.templates_reseeded = study != loaded_study || planner != loaded_planner;
    data.templates = study;
    data.planner_templates = planner;
}

fn repair_notebooks(data: &mut AppData, report: &mut RepairReport) {
    let mut notebook_ids: HashSet<String> = HashSet::new();
    let mut note_ids: HashSet<String> = HashSet::new();

    for mut notebook in std::mem::take(&mut data.notebooks) {
        if notebook.code.trim().is_empty() {
            log::warn!(
                "[STORE] Dropping notebook {:?} with empty course code ({} notes)",
                notebook.title,
                notebook.notes.len()
            );
            report.invalid_notebooks_dropped += 1;
            continue;
        }
        if notebook.id.trim().is_empty() {
            notebook.id = fresh_id(&notebook_ids);
            report.ids_assigned += 1;
        }
        if !notebook_ids.insert(notebook.id.clone()) {
            log::warn!("[STORE] Dropping duplicate notebook id {}", notebook.id);
            report.duplicates_dropped += 1;
            continue;
        }

        for mut note in std::mem::take(&mut notebook.notes) {
            if note.id.trim().is_empty() {
                note.id = fresh_id(&note_ids);
                report.ids_assigned += 1;
            }
            if !note_ids.insert(note.id.clone()) {
                log::warn!(
                    "[STORE] Dropping duplicate note id {} in notebook {}",
                    note.id,
                    notebook.id
                );
                report.duplicates_dropped += 1;
                continue;
            }
            let canonical = canonicalize_tags(&note.tags);
            if canonical != note.tags {
                note.tags = canonical;
                report.tag_lists_canonicalized += 1;
            }
            notebook.notes.push(note);
        }

        data.notebooks.push(notebook);
    }
}

fn repair_tasks(data: &mut AppData, report: &mut RepairReport) {
    let mut task_ids: HashSet<String> = HashSet::new();
    for mut task in std::mem::take(&mut data.tasks) {
        if task.id.trim().is_empty() {
            task.id = fresh_id(&task_ids);
            report.ids_assigned += 1;
        }
        if !task_ids.insert(task.id.clone()) {
            log::warn!("[STORE] Dropping duplicate task id {}", task.id);
            report.duplicates_dropped += 1;
            continue;
        }
        data.tasks.push(task);
    }
}
