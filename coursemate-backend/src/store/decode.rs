//! Section-by-section decoding of a merged data document.
//!
//! A bad value only costs the smallest unit that contains it: an invalid
//! field is reset to its default, an entity that cannot be decoded at all is
//! dropped. Everything else the file holds is kept.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::models::{AppData, Note, Notebook, Settings, Task, Template};
use crate::templates;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecodeStats {
    pub fields_reset: usize,
    pub entities_dropped: usize,
}

/// Decode a document whose root is a JSON object. Never fails.
pub fn decode_app_data(mut root: Map<String, Value>, stats: &mut DecodeStats) -> AppData {
    let notebooks = section_items(root.remove("notebooks"), "notebooks", stats)
        .map(|items| {
            items
                .into_iter()
                .filter_map(|item| decode_notebook(item, stats))
                .collect()
        })
        .unwrap_or_default();

    let settings = match root.remove("settings") {
        Some(value) => {
            let base = serde_json::to_value(Settings::default()).unwrap_or(Value::Null);
            decode_lenient(value, &base, "settings", stats).unwrap_or_default()
        }
        None => Settings::default(),
    };

    let templates = section_items(root.remove("templates"), "templates", stats)
        .map(|items| decode_strict_list::<Template>(items, "template", stats))
        .unwrap_or_else(templates::builtin_study_templates);
    let planner_templates = section_items(root.remove("plannerTemplates"), "plannerTemplates", stats)
        .map(|items| decode_strict_list::<Template>(items, "template", stats))
        .unwrap_or_else(templates::builtin_planner_templates);

    let task_base = empty_entity::<Task>();
    let tasks = section_items(root.remove("tasks"), "tasks", stats)
        .map(|items| {
            items
                .into_iter()
                .filter_map(|item| decode_lenient(item, &task_base, "task", stats))
                .collect()
        })
        .unwrap_or_default();

    AppData {
        notebooks,
        settings,
        templates,
        planner_templates,
        tasks,
    }
}

/// Items of an array section. A missing or null section yields `None`
/// silently; any other non-array value is counted as a reset field.
fn section_items(value: Option<Value>, name: &str, stats: &mut DecodeStats) -> Option<Vec<Value>> {
    match value? {
        Value::Array(items) => Some(items),
        Value::Null => None,
        other => {
            log::warn!("[STORE] Ignoring {}: expected a list, found {}", name, kind_of(&other));
            stats.fields_reset += 1;
            None
        }
    }
}

fn decode_notebook(value: Value, stats: &mut DecodeStats) -> Option<Notebook> {
    let Value::Object(mut object) = value else {
        log::warn!("[STORE] Dropping notebook entry that is not an object");
        stats.entities_dropped += 1;
        return None;
    };
    let notes = object.remove("notes");

    let mut notebook: Notebook =
        decode_lenient(Value::Object(object), &empty_entity::<Notebook>(), "notebook", stats)?;

    let note_base = empty_entity::<Note>();
    notebook.notes = section_items(notes, "notebook notes", stats)
        .map(|items| {
            items
                .into_iter()
                .filter_map(|item| decode_lenient(item, &note_base, "note", stats))
                .collect()
        })
        .unwrap_or_default();
    Some(notebook)
}

/// Decode each item on its own, dropping the ones that do not decode.
fn decode_strict_list<T: DeserializeOwned>(items: Vec<Value>, what: &str, stats: &mut DecodeStats) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log::warn!("[STORE] Dropping undecodable {}: {}", what, e);
                stats.entities_dropped += 1;
                None
            }
        })
        .collect()
}

/// Decode `value`, resetting any field that does not decode to its value in
/// `base`. `base` must itself be a valid encoding of `T`.
fn decode_lenient<T: DeserializeOwned>(
    value: Value,
    base: &Value,
    what: &str,
    stats: &mut DecodeStats,
) -> Option<T> {
    if let Ok(decoded) = serde_json::from_value::<T>(value.clone()) {
        return Some(decoded);
    }
    let (Value::Object(fields), Value::Object(base)) = (value, base) else {
        log::warn!("[STORE] Dropping {} entry that is not an object", what);
        stats.entities_dropped += 1;
        return None;
    };

    let mut accepted = base.clone();
    for (key, field) in fields {
        let mut candidate = accepted.clone();
        candidate.insert(key.clone(), field);
        if serde_json::from_value::<T>(Value::Object(candidate.clone())).is_ok() {
            accepted = candidate;
        } else {
            log::warn!("[STORE] Reset invalid {} field {:?} to its default", what, key);
            stats.fields_reset += 1;
        }
    }

    match serde_json::from_value(Value::Object(accepted)) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            log::warn!("[STORE] Dropping undecodable {}: {}", what, e);
            stats.entities_dropped += 1;
            None
        }
    }
}

/// The encoding of an entity decoded from `{}`, i.e. with every field defaulted.
fn empty_entity<T: DeserializeOwned + serde::Serialize>() -> Value {
    serde_json::from_value::<T>(Value::Object(Map::new()))
        .ok()
        .and_then(|entity| serde_json::to_value(entity).ok())
        .unwrap_or_else(|| Value::Object(Map::new()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FontSize, Theme};
    use serde_json::json;

    fn decode(value: Value) -> (AppData, DecodeStats) {
        let mut stats = DecodeStats::default();
        let Value::Object(root) = value else { panic!("test document must be an object") };
        (decode_app_data(root, &mut stats), stats)
    }

    #[test]
    fn test_invalid_settings_field_resets_only_that_field() {
        let (data, stats) = decode(json!({
            "settings": {"theme": "Forest Theme", "fontSize": "Large", "quoteTimerSecs": -5}
        }));
        assert_eq!(data.settings.theme, Theme::CourseMate);
        assert_eq!(data.settings.font_size, FontSize::Large);
        assert_eq!(data.settings.quote_timer_secs, 30);
        assert_eq!(stats.fields_reset, 2);
        assert_eq!(stats.entities_dropped, 0);
    }

    #[test]
    fn test_null_notes_keep_the_notebook() {
        let (data, stats) = decode(json!({
            "notebooks": [
                {"id": "a", "code": "BIO1", "title": "Biology", "notes": null},
                {"id": "b", "code": "CHEM1", "title": "Chemistry", "notes": [{"id": "n", "content": "atoms"}]}
            ]
        }));
        assert_eq!(data.notebooks.len(), 2);
        assert!(data.notebooks[0].notes.is_empty());
        assert_eq!(data.notebooks[1].notes[0].content, "atoms");
        assert_eq!(stats, DecodeStats::default());
    }

    #[test]
    fn test_bad_note_fields_and_entries() {
        let (data, stats) = decode(json!({
            "notebooks": [{"id": "a", "code": "BIO1", "notes": [
                {"id": "n1", "content": "cells", "createdAt": "yesterday"},
                42,
                {"id": "n2", "content": "mitosis"}
            ]}]
        }));
        let notes = &data.notebooks[0].notes;
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].content, "cells");
        assert_eq!(stats.fields_reset, 1);
        assert_eq!(stats.entities_dropped, 1);
    }

    #[test]
    fn test_template_missing_kind_is_dropped() {
        let (data, stats) = decode(json!({
            "templates": [
                {"id": "t1", "name": "No Kind", "sections": [{"label": "A"}]},
                {"id": "t2", "name": "Lab Report", "kind": "study", "sections": [{"label": "Hypothesis"}]}
            ]
        }));
        assert_eq!(data.templates.len(), 1);
        assert_eq!(data.templates[0].name, "Lab Report");
        assert_eq!(stats.entities_dropped, 1);
    }

    #[test]
    fn test_non_list_section_is_reset() {
        let (data, stats) = decode(json!({"notebooks": "oops", "tasks": [{"text": "read", "done": "yes"}]}));
        assert!(data.notebooks.is_empty());
        assert_eq!(data.tasks.len(), 1);
        assert!(!data.tasks[0].done);
        assert_eq!(stats.fields_reset, 2);
    }
}
