use crate::calendar::{CalendarConfig, Granularity, Relative, TemporalPoint};
use crate::config::LorelineConfig;
use crate::error::{LorelineError, Result};
use crate::index::{DisplayNote, NoteSelector};
use crate::model::Note;
use crate::timeline::{build_timeline, Period};
use std::path::PathBuf;

pub mod calendar;
pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod helpers;
pub mod init;
pub mod pinning;
pub mod tags;
pub mod timeline;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub struct LorelinePaths {
    pub data_dir: PathBuf,
}

impl LorelinePaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Owned snapshot behind a timeline view; periods borrow from it.
#[derive(Debug, Clone)]
pub struct TimelineView {
    pub level: Granularity,
    pub notes: Vec<Note>,
    pub calendar: CalendarConfig,
}

impl TimelineView {
    pub fn periods(&self) -> Vec<Period<'_>> {
        build_timeline(&self.notes, self.level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<DisplayNote>,
    pub calendar: Option<CalendarConfig>,
    pub config: Option<LorelineConfig>,
    pub timeline: Option<TimelineView>,
    pub export_text: Option<String>,
    pub export_path: Option<PathBuf>,
    pub tags: Vec<TagCount>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_calendar(mut self, calendar: CalendarConfig) -> Self {
        self.calendar = Some(calendar);
        self
    }

    pub fn with_config(mut self, config: LorelineConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Date fields as typed by a user; every field is optional.
#[derive(Debug, Clone, Default)]
pub struct DateInput {
    pub era: Option<String>,
    pub millennium: Option<i64>,
    pub century: Option<i64>,
    pub decade: Option<i64>,
    pub year: Option<i64>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub relative: Option<Relative>,
}

impl DateInput {
    pub fn is_empty(&self) -> bool {
        self.era.is_none()
            && self.millennium.is_none()
            && self.century.is_none()
            && self.decade.is_none()
            && self.year.is_none()
            && self.month.is_none()
            && self.day.is_none()
            && self.relative.is_none()
    }

    /// Finest level named by the given fields; days and months count as years.
    pub fn finest_level(&self) -> Option<Granularity> {
        if self.year.is_some() || self.month.is_some() || self.day.is_some() {
            Some(Granularity::Year)
        } else if self.decade.is_some() {
            Some(Granularity::Decade)
        } else if self.century.is_some() {
            Some(Granularity::Century)
        } else if self.millennium.is_some() {
            Some(Granularity::Millennium)
        } else if self.era.is_some() {
            Some(Granularity::Era)
        } else {
            None
        }
    }

    /// Overlays the given fields onto `base`.
    ///
    /// A negative year typed without an explicit marker means "before the
    /// union", as legacy records did.
    pub fn apply_to(&self, base: &TemporalPoint) -> TemporalPoint {
        let mut point = base.clone();
        if let Some(era) = &self.era {
            point.era = Some(era.trim().to_string()).filter(|e| !e.is_empty());
        }
        if self.millennium.is_some() {
            point.millennium = self.millennium;
        }
        if self.century.is_some() {
            point.century = self.century;
        }
        if self.decade.is_some() {
            point.decade = self.decade;
        }
        if self.month.is_some() {
            point.month = self.month;
        }
        if self.day.is_some() {
            point.day = self.day;
        }
        if let Some(year) = self.year {
            point.year = Some(year.saturating_abs());
            if year < 0 && self.relative.is_none() {
                point.relative = Relative::Before;
            }
        }
        if let Some(relative) = self.relative {
            point.relative = relative;
        }
        point
    }
}

/// Fields of a new note, as collected by a UI.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub description: Option<String>,
    pub level: Granularity,
    pub date: DateInput,
    pub tags: Vec<String>,
    pub weight: Option<f64>,
    pub images: Vec<String>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, level: Granularity) -> Self {
        Self {
            title: title.into(),
            description: None,
            level,
            date: DateInput::default(),
            tags: Vec::new(),
            weight: None,
            images: Vec::new(),
        }
    }

    pub fn with_date(mut self, date: DateInput) -> Self {
        self.date = date;
        self
    }
}

/// Partial edit of one note. `None` leaves the field untouched.
#[derive(Debug, Clone)]
pub struct NoteUpdate {
    pub selector: NoteSelector,
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<Granularity>,
    pub date: DateInput,
    pub clear_date: bool,
    pub tags: Option<Vec<String>>,
    pub weight: Option<f64>,
}

impl NoteUpdate {
    pub fn new(selector: NoteSelector) -> Self {
        Self {
            selector,
            title: None,
            description: None,
            level: None,
            date: DateInput::default(),
            clear_date: false,
            tags: None,
            weight: None,
        }
    }
}

/// Trimmed title, or an error when nothing is left.
pub(crate) fn clean_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(LorelineError::Api("Title cannot be empty".into()));
    }
    Ok(title.to_string())
}
