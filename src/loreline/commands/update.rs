use crate::calendar::TemporalPoint;
use crate::commands::{clean_title, CmdMessage, CmdResult, NoteUpdate};
use crate::error::Result;
use crate::model::{normalize_tags, sanitize_weight, Note};
use crate::store::DataStore;
use std::slice;

use super::helpers::resolve_selectors;

pub fn run<S: DataStore>(store: &mut S, updates: &[NoteUpdate]) -> Result<CmdResult> {
    // Resolve everything up front; edited dates can shift later indexes.
    let mut targets = Vec::with_capacity(updates.len());
    for update in updates {
        targets.push((update, resolve_selectors(store, slice::from_ref(&update.selector))?));
    }

    let mut result = CmdResult::default();
    for (update, resolved) in targets {
        for (display_index, id) in resolved {
            let mut note = store.get_note(&id)?;
            apply(&mut note, update)?;
            store.save_note(&note)?;
            tracing::info!(%id, "note updated");

            result.add_message(CmdMessage::success(format!(
                "Note updated ({}): {}",
                display_index, note.title
            )));
            result.affected_notes.push(note);
        }
    }

    Ok(result)
}

fn apply(note: &mut Note, update: &NoteUpdate) -> Result<()> {
    if let Some(title) = &update.title {
        note.title = clean_title(title)?;
    }
    if let Some(description) = &update.description {
        note.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
    }
    if let Some(level) = update.level {
        note.level = level;
    }
    let base = if update.clear_date {
        TemporalPoint::default()
    } else {
        note.date.clone()
    };
    note.date = update.date.apply_to(&base);
    if let Some(tags) = &update.tags {
        note.tags = normalize_tags(tags);
    }
    if let Some(weight) = update.weight {
        note.weight = sanitize_weight(weight);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Granularity, Relative};
    use crate::commands::DateInput;
    use crate::index::{DisplayIndex, NoteSelector};
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn updates_selected_fields_only() {
        let mut store = StoreFixture::new()
            .with_year("Treaty", 1, Relative::After)
            .store;
        let mut update = NoteUpdate::new(NoteSelector::Index(DisplayIndex::Regular(1)));
        update.description = Some("Signed at dawn.".into());
        update.date = DateInput {
            era: Some("Gold".into()),
            ..Default::default()
        };
        update.tags = Some(vec!["peace".into()]);
        run(&mut store, &[update]).unwrap();

        let note = store.list_notes().unwrap().remove(0);
        assert_eq!(note.title, "Treaty");
        assert_eq!(note.description.as_deref(), Some("Signed at dawn."));
        assert_eq!(note.date.era.as_deref(), Some("Gold"));
        assert_eq!(note.date.year, Some(1));
        assert_eq!(note.tags, vec!["peace"]);
    }

    #[test]
    fn clear_date_resets_before_applying() {
        let mut store = StoreFixture::new()
            .with_year("Treaty", 30, Relative::Before)
            .store;
        let mut update = NoteUpdate::new(NoteSelector::Title("treaty".into()));
        update.clear_date = true;
        update.level = Some(Granularity::Century);
        update.date.century = Some(2);
        run(&mut store, &[update]).unwrap();

        let note = store.list_notes().unwrap().remove(0);
        assert_eq!(note.date.year, None);
        assert_eq!(note.date.relative, Relative::After);
        assert_eq!(note.date.century, Some(2));
        assert_eq!(note.level, Granularity::Century);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut store = StoreFixture::new()
            .with_year("Treaty", 1, Relative::After)
            .store;
        let mut update = NoteUpdate::new(NoteSelector::Index(DisplayIndex::Regular(1)));
        update.title = Some(" ".into());
        assert!(run(&mut store, &[update]).is_err());
        assert_eq!(store.list_notes().unwrap()[0].title, "Treaty");
    }
}
