//! Note content helpers: hashtag extraction and template application.
//!
//! Tags are never edited by hand: they are re-derived from note content on
//! every save.

pub mod compose;
pub mod tags;

pub use tags::extract_tags;
