use std::path::Path;

use chrono::Utc;

use crate::error::{StoreError, StoreResult};
use crate::models::{Note, Notebook};
use crate::notes::{compose::apply_template, extract_tags};
use crate::store::{DataStore, file_ops};

impl DataStore {
    /// Add a note to a notebook, optionally seeded from a template.
    pub fn add_note(
        &mut self,
        notebook_id: &str,
        content: &str,
        template_id: Option<&str>,
    ) -> StoreResult<Note> {
        if self.notebook(notebook_id).is_none() {
            return Err(StoreError::not_found("notebook", notebook_id));
        }
        let content = match template_id {
            Some(tid) => {
                let template = self
                    .template(tid)
                    .ok_or_else(|| StoreError::not_found("template", tid))?;
                apply_template(content, template)
            }
            None => content.to_string(),
        };

        let now = Utc::now();
        let note = Note {
            id: self.new_note_id(),
            tags: extract_tags(&content),
            content,
            template_id: template_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        };

        self.notebook_mut(notebook_id)
            .ok_or_else(|| StoreError::not_found("notebook", notebook_id))?
            .notes
            .push(note.clone());
        log::debug!("[STORE] Added note {} to notebook {}", note.id, notebook_id);
        self.persist();
        Ok(note)
    }

    /// Replace a note's content, re-deriving its tags.
    pub fn update_note(&mut self, note_id: &str, new_content: &str) -> StoreResult<Note> {
        let note = self
            .note_mut(note_id)
            .ok_or_else(|| StoreError::not_found("note", note_id))?;
        note.content = new_content.to_string();
        note.tags = extract_tags(new_content);
        note.updated_at = Utc::now();
        let updated = note.clone();
        self.persist();
        Ok(updated)
    }

    /// Move a note between notebooks, keeping its id, content, tags and
    /// timestamps. It is appended to the destination. Same-notebook moves
    /// change nothing.
    pub fn move_note(&mut self, note_id: &str, from_id: &str, to_id: &str) -> StoreResult<()> {
        let from = self
            .notebook_index(from_id)
            .ok_or_else(|| StoreError::not_found("notebook", from_id))?;
        let to = self
            .notebook_index(to_id)
            .ok_or_else(|| StoreError::not_found("notebook", to_id))?;
        let position = self.notebooks()[from]
            .note_index(note_id)
            .ok_or_else(|| StoreError::not_found("note", note_id))?;

        if from == to {
            return Ok(());
        }

        let notebooks = &mut self.data_mut().notebooks;
        let note = notebooks[from].notes.remove(position);
        notebooks[to].notes.push(note);
        log::debug!("[STORE] Moved note {} from {} to {}", note_id, from_id, to_id);
        self.persist();
        Ok(())
    }

    pub fn delete_note(&mut self, notebook_id: &str, note_id: &str) -> StoreResult<Note> {
        let notebook = self
            .notebook_mut(notebook_id)
            .ok_or_else(|| StoreError::not_found("notebook", notebook_id))?;
        let index = notebook
            .note_index(note_id)
            .ok_or_else(|| StoreError::not_found("note", note_id))?;
        let removed = notebook.notes.remove(index);
        self.persist();
        Ok(removed)
    }

    /// Write a note to a plain-text file: a short header naming its notebook,
    /// title, tags and last edit, a rule, then the content. The store itself
    /// is not touched.
    pub fn export_note(&self, note_id: &str, path: &Path) -> StoreResult<()> {
        let (notebook, note) = self
            .find_note(note_id)
            .ok_or_else(|| StoreError::not_found("note", note_id))?;
        file_ops::write_atomic(path, render_export(notebook, note).as_bytes())?;
        log::info!("[STORE] Exported note {} to {}", note_id, path.display());
        Ok(())
    }
}

fn render_export(notebook: &Notebook, note: &Note) -> String {
    format!(
        "Notebook: {} - {}\nTitle: {}\nTags: {}\nWords: {}\nUpdated: {}\n{}\n\n{}",
        notebook.code,
        notebook.title,
        note.title(),
        note.tags.join(", "),
        note.word_count(),
        note.updated_at.format("%Y-%m-%d %H:%M"),
        "-".repeat(40),
        note.content
    )
}
