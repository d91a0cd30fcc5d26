//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all loreline operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (user-typed indexes, ranges and search words become
//!   [`NoteSelector`]s; a missing granularity falls back to the configured one)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no I/O formatting and never prints.
//!
//! ## Generic Over DataStore
//!
//! `LorelineApi<S: DataStore>` is generic over the storage backend:
//! - Production: `LorelineApi<FileStore>`
//! - Testing: `LorelineApi<InMemoryStore>`
//!
//! API tests check dispatch and argument handling only. Command logic is
//! tested in the command modules.

use crate::calendar::Granularity;
use crate::commands;
use crate::config::LorelineConfig;
use crate::error::{LorelineError, Result};
use crate::index::{parse_index_or_range, NoteSelector};
use crate::store::DataStore;
use crate::timeline::ExportOptions;

/// The main API facade for loreline operations.
///
/// All UI clients (CLI, tests, anything else) go through this type.
pub struct LorelineApi<S: DataStore> {
    store: S,
    paths: commands::LorelinePaths,
}

impl<S: DataStore> LorelineApi<S> {
    pub fn new(store: S, paths: commands::LorelinePaths) -> Self {
        Self { store, paths }
    }

    pub fn create_note(&mut self, input: NewNote) -> Result<CmdResult> {
        commands::create::run(&mut self.store, input)
    }

    pub fn get_notes(&self, filter: &NoteFilter) -> Result<CmdResult> {
        commands::get::run(&self.store, filter)
    }

    pub fn view_notes<I: AsRef<str>>(&self, inputs: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::view::run(&self.store, &selectors)
    }

    pub fn update_notes(&mut self, updates: &[NoteUpdate]) -> Result<CmdResult> {
        commands::update::run(&mut self.store, updates)
    }

    pub fn delete_notes<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn pin_notes<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::pinning::pin(&mut self.store, &selectors)
    }

    pub fn unpin_notes<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::pinning::unpin(&mut self.store, &selectors)
    }

    /// Period tree at `level`, or at the configured default level.
    pub fn timeline(&self, level: Option<Granularity>, filter: &NoteFilter) -> Result<CmdResult> {
        let level = match level {
            Some(level) => level,
            None => self.load_config()?.default_level,
        };
        commands::timeline::run(&self.store, level, filter)
    }

    /// Exports with `options`, or with the options stored in the config.
    pub fn export(
        &self,
        filter: &NoteFilter,
        options: Option<ExportOptions>,
        target: ExportTarget,
    ) -> Result<CmdResult> {
        let options = match options {
            Some(options) => options,
            None => self.load_config()?.export_options(),
        };
        commands::export::run(&self.store, filter, &options, target)
    }

    pub fn tags(&self) -> Result<CmdResult> {
        commands::tags::run(&self.store)
    }

    pub fn calendar(&mut self, action: CalendarAction) -> Result<CmdResult> {
        commands::calendar::run(&mut self.store, action)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn load_config(&self) -> Result<LorelineConfig> {
        LorelineConfig::load(&self.paths.data_dir)
    }

    pub fn init(&self) -> Result<CmdResult> {
        commands::init::run(&self.paths)
    }

    pub fn paths(&self) -> &commands::LorelinePaths {
        &self.paths
    }
}

/// Turns user input into selectors.
///
/// When every input is an index or a range (`3`, `p1`, `2-4`), they are
/// expanded in order. Otherwise all inputs are joined into one title search.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<NoteSelector>> {
    if inputs.is_empty() {
        return Err(LorelineError::Api("No notes selected".into()));
    }

    let parsed: std::result::Result<Vec<_>, _> = inputs
        .iter()
        .map(|s| parse_index_or_range(s.as_ref().trim()))
        .collect();

    match parsed {
        Ok(groups) => Ok(groups
            .into_iter()
            .flatten()
            .map(NoteSelector::Index)
            .collect()),
        Err(_) => {
            let term = inputs
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<&str>>()
                .join(" ");
            Ok(vec![NoteSelector::Title(term)])
        }
    }
}

pub use crate::commands::calendar::CalendarAction;
pub use crate::commands::config::ConfigAction;
pub use crate::commands::export::ExportTarget;
pub use crate::commands::get::NoteFilter;
pub use crate::commands::{
    CmdMessage, CmdResult, DateInput, LorelinePaths, MessageLevel, NewNote, NoteUpdate, TagCount,
    TimelineView,
};
