//! Read-only queries over the in-memory model. Nothing here persists.

use std::collections::HashMap;

use crate::models::{Note, Notebook, Template};
use crate::notes::tags::normalize_tag;
use crate::store::DataStore;

/// A note together with the notebook that owns it.
#[derive(Debug, Clone, Copy)]
pub struct NoteHit<'a> {
    pub notebook: &'a Notebook,
    pub note: &'a Note,
}

impl DataStore {
    /// Case-insensitive substring search over note titles, content and tags.
    /// A blank query matches nothing.
    pub fn search_notes(&self, query: &str) -> Vec<NoteHit<'_>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.all_notes()
            .filter(|(_, note)| {
                note.title().to_lowercase().contains(&needle)
                    || note.content.to_lowercase().contains(&needle)
                    || note.tags.iter().any(|t| t.contains(&needle))
            })
            .map(|(notebook, note)| NoteHit { notebook, note })
            .collect()
    }

    /// Most recently edited notes first.
    pub fn recent_notes(&self, limit: usize) -> Vec<NoteHit<'_>> {
        let mut hits: Vec<NoteHit<'_>> = self
            .all_notes()
            .map(|(notebook, note)| NoteHit { notebook, note })
            .collect();
        hits.sort_by(|a, b| b.note.updated_at.cmp(&a.note.updated_at));
        hits.truncate(limit);
        hits
    }

    /// Every tag in use with its note count, most used first, ties by tag.
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (_, note) in self.all_notes() {
            for tag in &note.tags {
                *counts.entry(tag.as_str()).or_default() += 1;
            }
        }
        let mut counts: Vec<(String, usize)> =
            counts.into_iter().map(|(tag, n)| (tag.to_string(), n)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// Notes carrying `tag`. Accepts the tag with or without `#` and in any case.
    pub fn notes_with_tag(&self, tag: &str) -> Vec<NoteHit<'_>> {
        let normalized = normalize_tag(tag);
        if normalized.is_empty() {
            return Vec::new();
        }
        let tag = format!("#{}", normalized);
        self.all_notes()
            .filter(|(_, note)| note.has_tag(&tag))
            .map(|(notebook, note)| NoteHit { notebook, note })
            .collect()
    }

    /// Notebooks whose title or course code contains `query`, ignoring case.
    /// A blank query returns every notebook.
    pub fn search_notebooks(&self, query: &str) -> Vec<&Notebook> {
        let needle = query.trim().to_lowercase();
        self.notebooks()
            .iter()
            .filter(|nb| {
                needle.is_empty()
                    || nb.title.to_lowercase().contains(&needle)
                    || nb.code.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn resolve_template(&self, id: &str) -> Option<&Template> {
        self.template(id)
    }

    /// The template a note was created from, or `None` if it has none or it was deleted.
    pub fn render_note_template(&self, note: &Note) -> Option<String> {
        let id = note.template_id.as_deref()?;
        self.resolve_template(id).map(Template::render)
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::test_support::temp_store;

    #[test]
    fn test_search_notes_matches_title_content_and_tags() {
        let (_dir, mut store) = temp_store();
        let nb = store.create_notebook("CS101", "Intro").unwrap();
        store.add_note(&nb.id, "# Recursion\nbase case first", None).unwrap();
        store.add_note(&nb.id, "Sorting #Exam Prep", None).unwrap();
        store.add_note(&nb.id, "unrelated", None).unwrap();

        assert_eq!(store.search_notes("RECURSION").len(), 1);
        assert_eq!(store.search_notes("exam-prep").len(), 1);
        assert_eq!(store.search_notes("e").len(), 3);
        assert!(store.search_notes("  ").is_empty());
    }

    #[test]
    fn test_recent_notes_orders_by_update() {
        let (_dir, mut store) = temp_store();
        let nb = store.create_notebook("CS101", "Intro").unwrap();
        let first = store.add_note(&nb.id, "first", None).unwrap();
        store.add_note(&nb.id, "second", None).unwrap();
        store.update_note(&first.id, "first, edited").unwrap();

        let recent = store.recent_notes(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].note.id, first.id);
        assert_eq!(recent[0].notebook.id, nb.id);
    }

    #[test]
    fn test_tag_counts_and_lookup() {
        let (_dir, mut store) = temp_store();
        let a = store.create_notebook("CS101", "Intro").unwrap();
        let b = store.create_notebook("MA201", "Calculus").unwrap();
        store.add_note(&a.id, "#exam #week1", None).unwrap();
        store.add_note(&b.id, "#exam #algebra", None).unwrap();

        let counts = store.tag_counts();
        assert_eq!(counts[0], ("#exam".to_string(), 2));
        assert_eq!(counts[1], ("#algebra".to_string(), 1));
        assert_eq!(store.notes_with_tag("EXAM").len(), 2);
        assert_eq!(store.notes_with_tag("#week1").len(), 1);
        assert!(store.notes_with_tag("#").is_empty());
    }

    #[test]
    fn test_search_notebooks() {
        let (_dir, mut store) = temp_store();
        store.create_notebook("CS101", "Intro to Programming").unwrap();
        store.create_notebook("MA201", "Calculus").unwrap();

        assert_eq!(store.search_notebooks("cs1").len(), 1);
        assert_eq!(store.search_notebooks("calc")[0].code, "MA201");
        assert_eq!(store.search_notebooks("").len(), 2);
    }

    #[test]
    fn test_render_note_template_handles_dangling_reference() {
        let (_dir, mut store) = temp_store();
        let nb = store.create_notebook("CS101", "Intro").unwrap();
        let mut note = store.add_note(&nb.id, "", Some("5w1h")).unwrap();

        assert!(store.render_note_template(&note).is_some());
        note.template_id = Some("gone".to_string());
        assert!(store.render_note_template(&note).is_none());
        assert!(store.resolve_template("gone").is_none());
    }
}
