//! CourseMate data layer: notebooks, notes, templates, tasks and settings
//! persisted to a single JSON file, plus a bridge to a local Ollama model.

pub mod ai;
pub mod config;
pub mod error;
pub mod models;
pub mod notes;
pub mod ops;
pub mod store;
pub mod templates;

pub use ai::{AiBridge, OllamaClient, PromptKind};
pub use config::Config;
pub use error::{AiError, AssistError, StoreError, StoreResult};
pub use ops::NotebookUpdate;
pub use store::{DataStore, LoadOutcome};
