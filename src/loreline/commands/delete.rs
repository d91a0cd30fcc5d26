use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::DataStore;

use super::helpers::resolve_selectors;

pub fn run<S: DataStore>(store: &mut S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (display_index, id) in resolved {
        let note = store.get_note(&id)?;
        store.delete_note(&id)?;
        tracing::info!(%id, "note deleted");
        result.add_message(CmdMessage::success(format!(
            "Note deleted ({}): {}",
            display_index, note.title
        )));
        result.affected_notes.push(note);
    }

    Ok(result)
}
