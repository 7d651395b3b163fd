use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course or topic holding an ordered list of notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    #[serde(default)]
    pub id: String,
    /// Course code, unique across notebooks ignoring case
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Notebook {
    pub fn new(id: String, code: &str, title: &str) -> Self {
        Self {
            id,
            code: code.trim().to_string(),
            title: title.trim().to_string(),
            instructor: None,
            notes: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn note(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == note_id)
    }

    pub fn note_mut(&mut self, note_id: &str) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == note_id)
    }

    pub fn note_index(&self, note_id: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.id == note_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub content: String,
    /// Soft reference; the template may since have been deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Canonical hashtags derived from `content`
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Display title: the first non-empty line with heading markers stripped.
    pub fn title(&self) -> String {
        self.content
            .lines()
            .map(|l| l.trim().trim_start_matches('#').trim())
            .find(|l| !l.is_empty())
            .map(|l| l.to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whitespace-separated words in the content
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// A to-do entry on the root task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_with(content: &str) -> Note {
        let now = Utc::now();
        Note {
            id: "n1".to_string(),
            content: content.to_string(),
            template_id: None,
            tags: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_note_title_uses_first_non_empty_line() {
        assert_eq!(note_with("\n\n# Week 3 Lecture\nbody").title(), "Week 3 Lecture");
        assert_eq!(note_with("Title: \n\nQuestion").title(), "Title:");
        assert_eq!(note_with("   \n").title(), "Untitled");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(note_with("").word_count(), 0);
        assert_eq!(note_with("  \n\t ").word_count(), 0);
        assert_eq!(note_with("Title:\n\n- mitosis  has\tfour phases #exam").word_count(), 7);
    }

    #[test]
    fn test_notebook_new_trims_fields() {
        let nb = Notebook::new("id".to_string(), "  CS101 ", " Intro to CS ");
        assert_eq!(nb.code, "CS101");
        assert_eq!(nb.title, "Intro to CS");
        assert!(nb.notes.is_empty());
    }

    #[test]
    fn test_optional_fields_skip_when_absent() {
        let json = serde_json::to_value(note_with("x")).unwrap();
        assert!(json.get("templateId").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
