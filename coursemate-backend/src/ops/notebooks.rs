use serde::Deserialize;

use super::required;
use crate::error::{StoreError, StoreResult};
use crate::models::Notebook;
use crate::store::DataStore;

/// Partial notebook edit. `instructor: Some("")` clears the instructor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookUpdate {
    pub code: Option<String>,
    pub title: Option<String>,
    pub instructor: Option<String>,
}

impl DataStore {
    pub fn create_notebook(&mut self, code: &str, title: &str) -> StoreResult<Notebook> {
        let code = required("course code", code)?;
        let title = required("title", title)?;
        self.ensure_code_free(&code, None)?;

        let notebook = Notebook::new(self.new_notebook_id(), &code, &title);
        self.insert_notebook(notebook.clone());
        log::info!("[STORE] Created notebook {} ({})", notebook.code, notebook.id);
        self.persist();
        Ok(notebook)
    }

    pub fn update_notebook(&mut self, id: &str, update: NotebookUpdate) -> StoreResult<Notebook> {
        if self.notebook(id).is_none() {
            return Err(StoreError::not_found("notebook", id));
        }
        let code = update.code.as_deref().map(|c| required("course code", c)).transpose()?;
        let title = update.title.as_deref().map(|t| required("title", t)).transpose()?;
        if let Some(code) = &code {
            self.ensure_code_free(code, Some(id))?;
        }

        let notebook = self
            .notebook_mut(id)
            .ok_or_else(|| StoreError::not_found("notebook", id))?;
        if let Some(code) = code {
            notebook.code = code;
        }
        if let Some(title) = title {
            notebook.title = title;
        }
        if let Some(instructor) = update.instructor {
            let instructor = instructor.trim();
            notebook.instructor = (!instructor.is_empty()).then(|| instructor.to_string());
        }
        let updated = notebook.clone();
        self.persist();
        Ok(updated)
    }

    /// Delete a notebook together with all of its notes.
    pub fn delete_notebook(&mut self, id: &str) -> StoreResult<Notebook> {
        let removed = self
            .remove_notebook(id)
            .ok_or_else(|| StoreError::not_found("notebook", id))?;
        log::info!(
            "[STORE] Deleted notebook {} with {} notes",
            removed.code,
            removed.notes.len()
        );
        self.persist();
        Ok(removed)
    }

    fn ensure_code_free(&self, code: &str, except_id: Option<&str>) -> StoreResult<()> {
        match self.notebook_by_code(code) {
            Some(existing) if Some(existing.id.as_str()) != except_id => Err(StoreError::validation(
                format!("a notebook with course code {} already exists", existing.code),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_support::{reload, temp_store};

    #[test]
    fn test_create_notebook_persists_trimmed() {
        let (_dir, mut store) = temp_store();
        let nb = store.create_notebook("  CS101 ", " Intro ").unwrap();
        assert_eq!(nb.code, "CS101");
        assert_eq!(nb.title, "Intro");
        assert!(!store.is_dirty());

        let reloaded = reload(&store);
        assert_eq!(reloaded.notebook(&nb.id).unwrap().title, "Intro");
    }

    #[test]
    fn test_blank_code_rejected_without_change() {
        let (_dir, mut store) = temp_store();
        store.create_notebook("CS101", "Intro").unwrap();

        let err = store.create_notebook("   ", "Biology").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.notebooks().len(), 1);
        assert!(store.create_notebook("BIO1", "").unwrap_err().is_validation());
    }

    #[test]
    fn test_duplicate_code_is_case_insensitive() {
        let (_dir, mut store) = temp_store();
        store.create_notebook("CS101", "Intro").unwrap();
        assert!(store.create_notebook("cs101", "Other").unwrap_err().is_validation());
    }

    #[test]
    fn test_update_notebook() {
        let (_dir, mut store) = temp_store();
        let a = store.create_notebook("CS101", "Intro").unwrap();
        store.create_notebook("MA201", "Calculus").unwrap();

        let updated = store
            .update_notebook(
                &a.id,
                NotebookUpdate {
                    code: Some("cs101".to_string()),
                    instructor: Some(" Dr. Ada ".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.code, "cs101");
        assert_eq!(updated.instructor.as_deref(), Some("Dr. Ada"));

        let clash = NotebookUpdate { code: Some("ma201".to_string()), ..Default::default() };
        assert!(store.update_notebook(&a.id, clash).unwrap_err().is_validation());
        assert!(store.update_notebook("missing", NotebookUpdate::default()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_notebook_cascades() {
        let (_dir, mut store) = temp_store();
        let nb = store.create_notebook("CS101", "Intro").unwrap();
        let note = store.add_note(&nb.id, "hello", None).unwrap();

        store.delete_notebook(&nb.id).unwrap();
        assert!(store.find_note(&note.id).is_none());
        assert!(store.delete_notebook(&nb.id).unwrap_err().is_not_found());
        assert_eq!(reload(&store).data().note_count(), 0);
    }

    #[test]
    fn test_delete_notebook_leaves_other_notebooks_alone() {
        let (_dir, mut store) = temp_store();
        let doomed = store.create_notebook("CS101", "Intro").unwrap();
        let kept = store.create_notebook("MA201", "Calculus").unwrap();
        let gone = store.add_note(&doomed.id, "pointers", None).unwrap();
        let limits = store.add_note(&kept.id, "limits #exam", None).unwrap();
        let series = store.add_note(&kept.id, "series", None).unwrap();

        let removed = store.delete_notebook(&doomed.id).unwrap();
        assert_eq!(removed.notes.len(), 1);

        assert_eq!(store.notebook(&kept.id).unwrap().notes, vec![limits.clone(), series.clone()]);
        assert!(store.find_note(&gone.id).is_none());

        let reloaded = reload(&store);
        assert!(reloaded.notebook(&doomed.id).is_none());
        assert_eq!(reloaded.notebooks().len(), 1);
        assert_eq!(reloaded.notebook(&kept.id).unwrap().notes, vec![limits, series]);
        assert!(reloaded.find_note(&gone.id).is_none());
    }
}
