//! Domain operations over a [`DataStore`](crate::store::DataStore).
//!
//! Mutating operations validate first, apply in memory, then persist. A
//! failed persist leaves the operation successful and is reported through
//! `DataStore::take_save_warning`.

pub mod assist;
pub mod notebooks;
pub mod notes;
pub mod queries;
pub mod settings;
pub mod tasks;
pub mod templates;

pub use notebooks::NotebookUpdate;

use crate::error::{StoreError, StoreResult};

/// Trimmed copy of `value`, or a validation error naming `field` when blank.
pub(crate) fn required(field: &str, value: &str) -> StoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}
