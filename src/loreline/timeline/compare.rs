use crate::model::Note;
use std::cmp::Ordering;

/// Orders notes chronologically by effective year.
///
/// Era, millennium, century, decade, month and day are not consulted, so two
/// notes in the same (or no) year compare equal.
pub fn compare(a: &Note, b: &Note) -> Ordering {
    a.date.effective_year().cmp(&b.date.effective_year())
}

/// Stable chronological sort.
pub fn sort_notes<N: std::borrow::Borrow<Note>>(notes: &mut [N]) {
    notes.sort_by(|a, b| compare(a.borrow(), b.borrow()));
}
