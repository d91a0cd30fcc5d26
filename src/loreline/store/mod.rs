//! # Storage Layer
//!
//! The [`DataStore`] trait is the only thing the command layer knows about
//! persistence. Stores hold two things: the note collection and the calendar.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files in a data directory
//! - [`memory::InMemoryStore`]: no persistence, used by tests
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── notes.json      # Every note (JSON array), rewritten on each mutation
//! ├── calendar.json   # The calendar configuration
//! └── config.json     # Application settings (see config.rs)
//! ```
//!
//! The collection is always written whole; there are no partial updates.

use crate::calendar::CalendarConfig;
use crate::error::Result;
use crate::model::Note;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for note storage.
pub trait DataStore {
    /// Save a note (create or replace by id)
    fn save_note(&mut self, note: &Note) -> Result<()>;

    /// Get a note by ID
    fn get_note(&self, id: &Uuid) -> Result<Note>;

    /// List every note, in stored order
    fn list_notes(&self) -> Result<Vec<Note>>;

    /// Remove a note permanently
    fn delete_note(&mut self, id: &Uuid) -> Result<()>;

    /// Current calendar, defaults when none was saved
    fn load_calendar(&self) -> Result<CalendarConfig>;

    /// Replace the calendar wholesale
    fn save_calendar(&mut self, calendar: &CalendarConfig) -> Result<()>;
}
