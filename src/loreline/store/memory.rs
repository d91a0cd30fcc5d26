use super::DataStore;
use crate::calendar::CalendarConfig;
use crate::error::{LorelineError, Result};
use crate::model::Note;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    notes: Vec<Note>,
    calendar: Option<CalendarConfig>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryStore {
    fn save_note(&mut self, note: &Note) -> Result<()> {
        match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => *existing = note.clone(),
            None => self.notes.push(note.clone()),
        }
        Ok(())
    }

    fn get_note(&self, id: &Uuid) -> Result<Note> {
        self.notes
            .iter()
            .find(|n| &n.id == id)
            .cloned()
            .ok_or(LorelineError::NoteNotFound(*id))
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self.notes.clone())
    }

    fn delete_note(&mut self, id: &Uuid) -> Result<()> {
        let before = self.notes.len();
        self.notes.retain(|n| &n.id != id);
        if self.notes.len() == before {
            return Err(LorelineError::NoteNotFound(*id));
        }
        Ok(())
    }

    fn load_calendar(&self) -> Result<CalendarConfig> {
        Ok(self.calendar.clone().unwrap_or_default())
    }

    fn save_calendar(&mut self, calendar: &CalendarConfig) -> Result<()> {
        self.calendar = Some(calendar.clone());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::calendar::{Granularity, Relative, TemporalPoint};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_year(mut self, title: &str, year: i64, relative: Relative) -> Self {
            let date = TemporalPoint {
                year: Some(year),
                relative,
                ..Default::default()
            };
            let note = Note::new(title.to_string(), Granularity::Year, date);
            self.store.save_note(&note).unwrap();
            self
        }

        pub fn with_note(mut self, note: Note) -> Self {
            self.store.save_note(&note).unwrap();
            self
        }

        pub fn with_pinned(mut self, title: &str, year: i64) -> Self {
            let date = TemporalPoint {
                year: Some(year),
                ..Default::default()
            };
            let mut note = Note::new(title.to_string(), Granularity::Year, date);
            note.is_pinned = true;
            self.store.save_note(&note).unwrap();
            self
        }
    }
}
