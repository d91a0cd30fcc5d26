use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::DataStore;

use super::helpers::notes_by_selectors;

pub fn run<S: DataStore>(store: &S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    let notes = notes_by_selectors(store, selectors)?;
    let calendar = store.load_calendar()?;
    Ok(CmdResult::default()
        .with_listed_notes(notes)
        .with_calendar(calendar))
}
