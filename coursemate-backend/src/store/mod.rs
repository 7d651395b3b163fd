//! DataStore: the single owner of the application data file
//!
//! Loads the JSON document once (merged over defaults and repaired), hands
//! out typed access to the in-memory model, and writes complete snapshots
//! back with an atomic replace.

pub mod decode;
pub mod file_ops;
pub mod merge;
pub mod repair;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::models::{AppData, Note, Notebook, Task, Template, TemplateKind};

pub use repair::RepairReport;

/// How a load ended up producing its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file yet; defaults were used.
    Fresh,
    /// The file was read, merged and repaired.
    Loaded { defaults_inserted: usize, repairs: RepairReport },
    /// The file could not be used; defaults were used instead.
    Fallback { reason: String },
}

pub struct DataStore {
    path: PathBuf,
    data: AppData,
    dirty: bool,
    save_warning: Option<String>,
    outcome: LoadOutcome,
}

impl DataStore {
    /// Load the data file at `path`. Never fails: a missing, unreadable or
    /// malformed file yields default data and the reason is logged.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let (data, dirty, outcome) = match file_ops::read_data_file(&path) {
            Ok(None) => {
                log::info!("[STORE] No data file at {}, starting fresh", path.display());
                (AppData::default(), true, LoadOutcome::Fresh)
            }
            Ok(Some(text)) => match decode(&text) {
                Ok((data, defaults_inserted, repairs)) => {
                    let dirty = defaults_inserted > 0 || !repairs.is_clean();
                    if repairs.undecodable_dropped > 0 {
                        copy_aside(&path);
                    }
                    if dirty {
                        log::info!(
                            "[STORE] Repaired data file on load: {} defaults inserted, {:?}",
                            defaults_inserted,
                            repairs
                        );
                    }
                    (data, dirty, LoadOutcome::Loaded { defaults_inserted, repairs })
                }
                Err(e) => {
                    let reason = format!("malformed data file: {}", e);
                    log::warn!("[STORE] {} ({}), using defaults", reason, path.display());
                    back_up(&path);
                    (AppData::default(), true, LoadOutcome::Fallback { reason })
                }
            },
            Err(e) => {
                // Leave the unreadable file alone and keep the store clean so
                // nothing overwrites it until the user changes something.
                let reason = format!("could not read data file: {}", e);
                log::warn!("[STORE] {} ({}), using defaults", reason, path.display());
                (AppData::default(), false, LoadOutcome::Fallback { reason })
            }
        };

        Self {
            path,
            data,
            dirty,
            save_warning: None,
            outcome,
        }
    }

    /// Wrap already-built data without touching disk. The store starts dirty.
    pub fn with_data(path: impl Into<PathBuf>, data: AppData) -> Self {
        Self {
            path: path.into(),
            data,
            dirty: true,
            save_warning: None,
            outcome: LoadOutcome::Fresh,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Serialize the whole model and atomically replace the data file.
    ///
    /// On failure the in-memory data and dirty flag are kept so a later save
    /// can retry.
    pub fn save(&mut self) -> StoreResult<()> {
        match self.write_snapshot() {
            Ok(()) => {
                self.dirty = false;
                self.save_warning = None;
                log::debug!("[STORE] Saved {}", self.path.display());
                Ok(())
            }
            Err(e) => {
                log::warn!("[STORE] Failed to save {}: {}", self.path.display(), e);
                Err(e)
            }
        }
    }

    fn write_snapshot(&self) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(&self.data)?;
        file_ops::write_atomic(&self.path, &bytes)?;
        Ok(())
    }

    /// Save only if something changed since the last successful save.
    /// Returns whether a write happened.
    pub fn flush_if_dirty(&mut self) -> StoreResult<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// The message of the last failed persist, if no save has succeeded since.
    pub fn take_save_warning(&mut self) -> Option<String> {
        self.save_warning.take()
    }

    pub fn save_warning(&self) -> Option<&str> {
        self.save_warning.as_deref()
    }

    /// Mark the model changed and try to write it. A failure is recorded as
    /// a save warning instead of failing the mutation that already happened.
    pub(crate) fn persist(&mut self) {
        self.dirty = true;
        if let Err(e) = self.save() {
            self.save_warning = Some(e.to_string());
        }
    }

    pub(crate) fn data_mut(&mut self) -> &mut AppData {
        &mut self.data
    }

    // --- Notebooks ---

    pub fn notebooks(&self) -> &[Notebook] {
        &self.data.notebooks
    }

    pub fn notebook(&self, id: &str) -> Option<&Notebook> {
        self.data.notebooks.iter().find(|nb| nb.id == id)
    }

    pub fn notebook_mut(&mut self, id: &str) -> Option<&mut Notebook> {
        self.data.notebooks.iter_mut().find(|nb| nb.id == id)
    }

    pub fn notebook_index(&self, id: &str) -> Option<usize> {
        self.data.notebooks.iter().position(|nb| nb.id == id)
    }

    /// Notebook whose code matches `code` ignoring case and surrounding whitespace.
    pub fn notebook_by_code(&self, code: &str) -> Option<&Notebook> {
        let code = code.trim().to_lowercase();
        self.data
            .notebooks
            .iter()
            .find(|nb| nb.code.trim().to_lowercase() == code)
    }

    pub fn insert_notebook(&mut self, notebook: Notebook) {
        self.data.notebooks.push(notebook);
    }

    pub fn remove_notebook(&mut self, id: &str) -> Option<Notebook> {
        let index = self.notebook_index(id)?;
        Some(self.data.notebooks.remove(index))
    }

    // --- Notes ---

    /// Find a note anywhere, with the notebook that owns it.
    pub fn find_note(&self, note_id: &str) -> Option<(&Notebook, &Note)> {
        self.data
            .notebooks
            .iter()
            .find_map(|nb| nb.note(note_id).map(|note| (nb, note)))
    }

    /// `(notebook index, note index)` of a note.
    pub fn locate_note(&self, note_id: &str) -> Option<(usize, usize)> {
        self.data
            .notebooks
            .iter()
            .enumerate()
            .find_map(|(i, nb)| nb.note_index(note_id).map(|j| (i, j)))
    }

    pub fn note_mut(&mut self, note_id: &str) -> Option<&mut Note> {
        let (i, j) = self.locate_note(note_id)?;
        self.data.notebooks.get_mut(i)?.notes.get_mut(j)
    }

    pub fn all_notes(&self) -> impl Iterator<Item = (&Notebook, &Note)> {
        self.data
            .notebooks
            .iter()
            .flat_map(|nb| nb.notes.iter().map(move |note| (nb, note)))
    }

    // --- Templates ---

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.data.all_templates().find(|t| t.id == id)
    }

    pub fn templates(&self, kind: TemplateKind) -> &[Template] {
        match kind {
            TemplateKind::Study => &self.data.templates,
            TemplateKind::Planner => &self.data.planner_templates,
        }
    }

    pub fn templates_mut(&mut self, kind: TemplateKind) -> &mut Vec<Template> {
        match kind {
            TemplateKind::Study => &mut self.data.templates,
            TemplateKind::Planner => &mut self.data.planner_templates,
        }
    }

    /// Remove a template from whichever collection holds it.
    pub fn remove_template(&mut self, id: &str) -> Option<Template> {
        for kind in [TemplateKind::Study, TemplateKind::Planner] {
            let list = self.templates_mut(kind);
            if let Some(index) = list.iter().position(|t| t.id == id) {
                return Some(list.remove(index));
            }
        }
        None
    }

    // --- Tasks ---

    pub fn tasks(&self) -> &[Task] {
        &self.data.tasks
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.data.tasks.iter_mut().find(|t| t.id == id)
    }

    // --- Ids ---

    pub fn new_notebook_id(&self) -> String {
        let taken: HashSet<String> = self.data.notebooks.iter().map(|nb| nb.id.clone()).collect();
        repair::fresh_id(&taken)
    }

    pub fn new_note_id(&self) -> String {
        let taken: HashSet<String> = self.all_notes().map(|(_, n)| n.id.clone()).collect();
        repair::fresh_id(&taken)
    }

    pub fn new_template_id(&self) -> String {
        let taken: HashSet<String> = self.data.all_templates().map(|t| t.id.clone()).collect();
        repair::fresh_id(&taken)
    }

    pub fn new_task_id(&self) -> String {
        let taken: HashSet<String> = self.data.tasks.iter().map(|t| t.id.clone()).collect();
        repair::fresh_id(&taken)
    }
}

/// Parse, merge over defaults, decode and repair. Only unparsable JSON or a
/// non-object root fails; bad values inside are reset or dropped.
fn decode(text: &str) -> StoreResult<(AppData, usize, RepairReport)> {
    let mut value: Value = serde_json::from_str(text)?;
    let defaults = serde_json::to_value(AppData::default())?;
    let inserted = merge::merge_defaults(&mut value, &defaults);
    let Value::Object(root) = value else {
        return Err(StoreError::validation("data file root is not a JSON object"));
    };

    let mut stats = decode::DecodeStats::default();
    let mut data = decode::decode_app_data(root, &mut stats);
    let mut report = repair::repair(&mut data);
    report.fields_reset = stats.fields_reset;
    report.undecodable_dropped = stats.entities_dropped;
    Ok((data, inserted, report))
}

/// Keep a copy of the file as loaded when decoding had to drop entries, so
/// the repaired snapshot written later does not lose them for good.
fn copy_aside(path: &Path) {
    let backup = file_ops::backup_path(path);
    match fs::copy(path, &backup) {
        Ok(_) => log::warn!("[STORE] Kept a copy of the original data file at {}", backup.display()),
        Err(e) => log::warn!("[STORE] Could not copy {} aside: {}", path.display(), e),
    }
}

/// Move an unusable data file aside so the next save does not destroy it.
fn back_up(path: &Path) {
    let backup = file_ops::backup_path(path);
    match fs::rename(path, &backup) {
        Ok(()) => log::warn!("[STORE] Moved unreadable data file to {}", backup.display()),
        Err(e) => log::warn!("[STORE] Could not back up {}: {}", path.display(), e),
    }
}
