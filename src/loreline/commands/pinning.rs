use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::DataStore;

use super::helpers::resolve_selectors;

pub fn pin<S: DataStore>(store: &mut S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    pin_state(store, selectors, true)
}

pub fn unpin<S: DataStore>(store: &mut S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    pin_state(store, selectors, false)
}

fn pin_state<S: DataStore>(
    store: &mut S,
    selectors: &[NoteSelector],
    is_pinned: bool,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (display_index, id) in resolved {
        let mut note = store.get_note(&id)?;
        let verb = if is_pinned { "pinned" } else { "unpinned" };
        if note.is_pinned == is_pinned {
            result.add_message(CmdMessage::info(format!(
                "Note already {} ({}): {}",
                verb, display_index, note.title
            )));
            continue;
        }
        note.is_pinned = is_pinned;
        store.save_note(&note)?;

        result.add_message(CmdMessage::success(format!(
            "Note {} ({}): {}",
            verb, display_index, note.title
        )));
        result.affected_notes.push(note);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Relative;
    use crate::commands::helpers::indexed_notes;
    use crate::index::DisplayIndex;
    use crate::store::memory::fixtures::StoreFixture;
    use std::slice;

    #[test]
    fn pinning_assigns_p_index() {
        let mut store = StoreFixture::new()
            .with_year("A", 1, Relative::After)
            .with_year("B", 2, Relative::After)
            .store;

        let sel = NoteSelector::Index(DisplayIndex::Regular(2));
        pin(&mut store, slice::from_ref(&sel)).unwrap();

        let indexed = indexed_notes(&store).unwrap();
        assert_eq!(indexed[0].index, DisplayIndex::Pinned(1));
        assert_eq!(indexed[0].note.title, "B");
    }

    #[test]
    fn unpinning_removes_pinned_flag() {
        let mut store = StoreFixture::new().with_pinned("A", 1).store;
        let sel = NoteSelector::Index(DisplayIndex::Pinned(1));
        let result = unpin(&mut store, slice::from_ref(&sel)).unwrap();
        assert_eq!(result.affected_notes.len(), 1);

        let indexed = indexed_notes(&store).unwrap();
        assert!(indexed
            .iter()
            .all(|dn| !matches!(dn.index, DisplayIndex::Pinned(_))));
    }

    #[test]
    fn pinning_twice_is_reported_not_repeated() {
        let mut store = StoreFixture::new().with_pinned("A", 1).store;
        let sel = NoteSelector::Index(DisplayIndex::Regular(1));
        let result = pin(&mut store, slice::from_ref(&sel)).unwrap();
        assert!(result.affected_notes.is_empty());
        assert!(result.messages[0].content.contains("already pinned"));
    }
}
