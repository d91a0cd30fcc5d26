use super::DataStore;
use crate::calendar::CalendarConfig;
use crate::error::{LorelineError, Result};
use crate::model::Note;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const NOTES_FILENAME: &str = "notes.json";
const CALENDAR_FILENAME: &str = "calendar.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_calendar(&self) -> bool {
        self.root.join(CALENDAR_FILENAME).exists()
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(LorelineError::Io)?;
        }
        Ok(())
    }

    fn load_notes(&self) -> Result<Vec<Note>> {
        let data_file = self.root.join(NOTES_FILENAME);
        if !data_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&data_file).map_err(LorelineError::Io)?;
        if content.trim().is_empty() {
            tracing::warn!(path = %data_file.display(), "empty notes file, treating as no notes");
            return Ok(Vec::new());
        }
        let notes: Vec<Note> =
            serde_json::from_str(&content).map_err(LorelineError::Serialization)?;
        tracing::debug!(count = notes.len(), "loaded notes");
        Ok(notes)
    }

    fn write_notes(&self, notes: &[Note]) -> Result<()> {
        self.ensure_dir()?;
        let data_file = self.root.join(NOTES_FILENAME);
        let content = serde_json::to_string_pretty(notes).map_err(LorelineError::Serialization)?;
        fs::write(data_file, content).map_err(LorelineError::Io)?;
        tracing::debug!(count = notes.len(), "saved notes");
        Ok(())
    }
}

impl DataStore for FileStore {
    fn save_note(&mut self, note: &Note) -> Result<()> {
        let mut notes = self.load_notes()?;
        match notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => *existing = note.clone(),
            None => notes.push(note.clone()),
        }
        self.write_notes(&notes)
    }

    fn get_note(&self, id: &Uuid) -> Result<Note> {
        self.load_notes()?
            .into_iter()
            .find(|n| &n.id == id)
            .ok_or(LorelineError::NoteNotFound(*id))
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        self.load_notes()
    }

    fn delete_note(&mut self, id: &Uuid) -> Result<()> {
        let mut notes = self.load_notes()?;
        let before = notes.len();
        notes.retain(|n| &n.id != id);
        if notes.len() == before {
            return Err(LorelineError::NoteNotFound(*id));
        }
        self.write_notes(&notes)
    }

    fn load_calendar(&self) -> Result<CalendarConfig> {
        let path = self.root.join(CALENDAR_FILENAME);
        if !path.exists() {
            return Ok(CalendarConfig::default());
        }
        let content = fs::read_to_string(path).map_err(LorelineError::Io)?;
        let calendar: CalendarConfig =
            serde_json::from_str(&content).map_err(LorelineError::Serialization)?;
        Ok(calendar)
    }

    fn save_calendar(&mut self, calendar: &CalendarConfig) -> Result<()> {
        calendar.validate()?;
        self.ensure_dir()?;
        let path = self.root.join(CALENDAR_FILENAME);
        let content =
            serde_json::to_string_pretty(calendar).map_err(LorelineError::Serialization)?;
        fs::write(path, content).map_err(LorelineError::Io)?;
        tracing::info!(months = calendar.months.len(), "calendar saved");
        Ok(())
    }
}
