use crate::error::{LorelineError, Result};
use crate::index::{index_notes, DisplayIndex, DisplayNote, NoteSelector};
use crate::store::DataStore;
use uuid::Uuid;

pub fn indexed_notes<S: DataStore>(store: &S) -> Result<Vec<DisplayNote>> {
    let notes = store.list_notes()?;
    Ok(index_notes(notes))
}

/// Resolves selectors to `(index, id)` pairs.
///
/// Title selectors pick every note whose title contains the term, using the
/// note's regular index. A selector matching nothing is an error.
pub fn resolve_selectors<S: DataStore>(
    store: &S,
    selectors: &[NoteSelector],
) -> Result<Vec<(DisplayIndex, Uuid)>> {
    let indexed = indexed_notes(store)?;
    let mut resolved: Vec<(DisplayIndex, Uuid)> = Vec::new();

    for selector in selectors {
        match selector {
            NoteSelector::Index(idx) => {
                let dn = indexed
                    .iter()
                    .find(|dn| &dn.index == idx)
                    .ok_or_else(|| LorelineError::Api(format!("Index {} not found", idx)))?;
                resolved.push((idx.clone(), dn.note.id));
            }
            NoteSelector::Title(term) => {
                let term_lower = term.to_lowercase();
                let before = resolved.len();
                for dn in indexed.iter().filter(|dn| {
                    matches!(dn.index, DisplayIndex::Regular(_))
                        && dn.note.title.to_lowercase().contains(&term_lower)
                }) {
                    if !resolved.iter().any(|(_, id)| *id == dn.note.id) {
                        resolved.push((dn.index.clone(), dn.note.id));
                    }
                }
                if resolved.len() == before {
                    return Err(LorelineError::Api(format!(
                        "No notes found matching {}",
                        selector
                    )));
                }
            }
        }
    }

    Ok(resolved)
}

pub fn notes_by_selectors<S: DataStore>(
    store: &S,
    selectors: &[NoteSelector],
) -> Result<Vec<DisplayNote>> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut notes = Vec::with_capacity(resolved.len());
    for (index, id) in resolved {
        let note = store.get_note(&id)?;
        notes.push(DisplayNote { note, index });
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Relative;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn resolves_indexes_and_titles() {
        let store = StoreFixture::new()
            .with_year("First Treaty", 1, Relative::After)
            .with_year("Second Treaty", 7, Relative::After)
            .with_pinned("War", 3)
            .store;

        let by_index = resolve_selectors(&store, &[NoteSelector::Index(DisplayIndex::Pinned(1))])
            .unwrap();
        assert_eq!(by_index.len(), 1);

        let by_title = notes_by_selectors(&store, &[NoteSelector::Title("treaty".into())]).unwrap();
        let titles: Vec<_> = by_title.iter().map(|dn| dn.note.title.as_str()).collect();
        assert_eq!(titles, vec!["First Treaty", "Second Treaty"]);
    }

    #[test]
    fn unknown_selector_errors() {
        let store = StoreFixture::new()
            .with_year("A", 1, Relative::After)
            .store;
        assert!(resolve_selectors(&store, &[NoteSelector::Index(DisplayIndex::Regular(9))]).is_err());
        assert!(resolve_selectors(&store, &[NoteSelector::Title("zzz".into())]).is_err());
    }
}
