use crate::calendar::Granularity;
use crate::commands::{CmdMessage, CmdResult, TimelineView};
use crate::error::Result;
use crate::store::DataStore;

use super::get::{filtered_notes, NoteFilter};

/// Snapshot of the filtered notes, ready to be expanded into periods at `level`.
pub fn run<S: DataStore>(store: &S, level: Granularity, filter: &NoteFilter) -> Result<CmdResult> {
    let notes = filtered_notes(store, filter)?;
    let calendar = store.load_calendar()?;
    tracing::debug!(count = notes.len(), %level, "building timeline");

    let mut result = CmdResult::default();
    if notes.is_empty() {
        result.add_message(CmdMessage::info("No notes to show."));
    }
    result.timeline = Some(TimelineView {
        level,
        notes,
        calendar,
    });
    Ok(result)
}
