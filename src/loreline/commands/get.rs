use crate::calendar::Granularity;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{DisplayIndex, DisplayNote};
use crate::model::Note;
use crate::store::DataStore;

use super::helpers::indexed_notes;

/// View options chosen by the user. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    pub search_term: Option<String>,
    /// A note must carry every one of these tags.
    pub tags: Vec<String>,
    pub level: Option<Granularity>,
    pub pinned_only: bool,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        if self.pinned_only && !note.is_pinned {
            return false;
        }
        if let Some(level) = self.level {
            if note.level != level {
                return false;
            }
        }
        if !self.tags.iter().all(|t| note.has_tag(t)) {
            return false;
        }
        match self.search_term.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => matches_term(note, &term.to_lowercase()),
        }
    }
}

fn matches_term(note: &Note, term_lower: &str) -> bool {
    note.title.to_lowercase().contains(term_lower)
        || note
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(term_lower))
        || note
            .date
            .era
            .as_deref()
            .is_some_and(|e| e.to_lowercase().contains(term_lower))
        || note.tags.iter().any(|t| t.to_lowercase().contains(term_lower))
}

pub fn run<S: DataStore>(store: &S, filter: &NoteFilter) -> Result<CmdResult> {
    let indexed = indexed_notes(store)?;
    let filtered: Vec<DisplayNote> = indexed
        .into_iter()
        .filter(|dn| !filter.pinned_only || matches!(dn.index, DisplayIndex::Pinned(_)))
        .filter(|dn| filter.matches(&dn.note))
        .collect();
    tracing::debug!(count = filtered.len(), ?filter, "notes listed");

    let calendar = store.load_calendar()?;
    Ok(CmdResult::default()
        .with_listed_notes(filtered)
        .with_calendar(calendar))
}

/// Notes passing `filter`, without display indexes.
pub fn filtered_notes<S: DataStore>(store: &S, filter: &NoteFilter) -> Result<Vec<Note>> {
    Ok(store
        .list_notes()?
        .into_iter()
        .filter(|n| filter.matches(n))
        .collect())
}
