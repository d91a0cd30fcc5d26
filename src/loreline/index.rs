//! # Display Indexes
//!
//! Notes are identified by UUIDs in storage, which nobody wants to type. The
//! CLI addresses them by short display indexes instead:
//!
//! - `1`, `2`, ...: every note, in chronological order (see [`crate::timeline::compare`])
//! - `p1`, `p2`, ...: pinned notes only, in the same order
//!
//! A pinned note therefore carries two indexes. Regular indexes never skip
//! pinned notes, so `3` means the same note whether or not anything is pinned.

use crate::model::Note;
use crate::timeline::sort_notes;
use std::str::FromStr;

/// A user-facing index for a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisplayIndex {
    Pinned(usize),
    Regular(usize),
}

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayIndex::Pinned(i) => write!(f, "p{}", i),
            DisplayIndex::Regular(i) => write!(f, "{}", i),
        }
    }
}

/// A user input to select notes, either by index or by a search term for the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSelector {
    Index(DisplayIndex),
    Title(String),
}

impl std::fmt::Display for NoteSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteSelector::Index(idx) => write!(f, "{}", idx),
            NoteSelector::Title(t) => write!(f, "\"{}\"", t),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayNote {
    pub note: Note,
    pub index: DisplayIndex,
}

/// Assigns display indexes. Pinned entries come first, then every note.
pub fn index_notes(mut notes: Vec<Note>) -> Vec<DisplayNote> {
    sort_notes(&mut notes);

    let mut results = Vec::with_capacity(notes.len());

    let mut pinned_idx = 1;
    for note in notes.iter().filter(|n| n.is_pinned) {
        results.push(DisplayNote {
            note: note.clone(),
            index: DisplayIndex::Pinned(pinned_idx),
        });
        pinned_idx += 1;
    }

    for (i, note) in notes.into_iter().enumerate() {
        results.push(DisplayNote {
            note,
            index: DisplayIndex::Regular(i + 1),
        });
    }

    results
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix('p') {
            if let Ok(n) = rest.parse() {
                return Ok(DisplayIndex::Pinned(n));
            }
        }
        if let Ok(n) = s.parse() {
            return Ok(DisplayIndex::Regular(n));
        }
        Err(format!("Invalid index format: {}", s))
    }
}

/// Parses a single index (`3`, `p1`) or a range (`3-5`, `p1-p3`).
///
/// Both ends of a range must be the same kind and start must not exceed end.
/// Whether the indexes exist is checked later, during resolution.
pub fn parse_index_or_range(s: &str) -> Result<Vec<DisplayIndex>, String> {
    if let Some(dash_pos) = s.find('-') {
        if dash_pos > 0 {
            let start = DisplayIndex::from_str(&s[..dash_pos])?;
            let end = DisplayIndex::from_str(&s[dash_pos + 1..])?;
            return expand_range(start, end);
        }
    }

    DisplayIndex::from_str(s).map(|idx| vec![idx])
}

fn expand_range(start: DisplayIndex, end: DisplayIndex) -> Result<Vec<DisplayIndex>, String> {
    match (&start, &end) {
        (DisplayIndex::Regular(s), DisplayIndex::Regular(e)) => {
            if s > e {
                return Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    s, e
                ));
            }
            Ok((*s..=*e).map(DisplayIndex::Regular).collect())
        }
        (DisplayIndex::Pinned(s), DisplayIndex::Pinned(e)) => {
            if s > e {
                return Err(format!(
                    "Invalid range: start (p{}) must be <= end (p{})",
                    s, e
                ));
            }
            Ok((*s..=*e).map(DisplayIndex::Pinned).collect())
        }
        _ => Err(format!(
            "Invalid range: cannot mix index types ({} and {})",
            start, end
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Granularity, Relative, TemporalPoint};

    fn make_note(title: &str, year: i64, relative: Relative, pinned: bool) -> Note {
        let date = TemporalPoint {
            year: Some(year),
            relative,
            ..Default::default()
        };
        let mut n = Note::new(title.to_string(), Granularity::Year, date);
        n.is_pinned = pinned;
        n
    }

    #[test]
    fn regular_indexes_follow_chronology() {
        let notes = vec![
            make_note("Founding", 5, Relative::After, false),
            make_note("Old War", 20, Relative::Before, true),
            make_note("Treaty", 1, Relative::After, false),
        ];
        let indexed = index_notes(notes);

        let regular: Vec<_> = indexed
            .iter()
            .filter(|dn| matches!(dn.index, DisplayIndex::Regular(_)))
            .map(|dn| dn.note.title.as_str())
            .collect();
        assert_eq!(regular, vec!["Old War", "Treaty", "Founding"]);

        assert_eq!(indexed[0].index, DisplayIndex::Pinned(1));
        assert_eq!(indexed[0].note.title, "Old War");
    }

    #[test]
    fn pinned_note_has_both_indexes() {
        let notes = vec![
            make_note("A", 1, Relative::After, false),
            make_note("B", 2, Relative::After, true),
        ];
        let indexed = index_notes(notes);
        let b_entries: Vec<_> = indexed.iter().filter(|dn| dn.note.title == "B").collect();
        assert_eq!(b_entries.len(), 2);
        assert!(b_entries.iter().any(|dn| dn.index == DisplayIndex::Pinned(1)));
        assert!(b_entries.iter().any(|dn| dn.index == DisplayIndex::Regular(2)));
    }

    #[test]
    fn test_parsing() {
        assert_eq!(DisplayIndex::from_str("1"), Ok(DisplayIndex::Regular(1)));
        assert_eq!(DisplayIndex::from_str("p3"), Ok(DisplayIndex::Pinned(3)));
        assert!(DisplayIndex::from_str("").is_err());
        assert!(DisplayIndex::from_str("p").is_err());
        assert!(DisplayIndex::from_str("d1").is_err());
        assert!(DisplayIndex::from_str("12a").is_err());
    }

    #[test]
    fn test_parse_ranges() {
        assert_eq!(
            parse_index_or_range("2-4"),
            Ok(vec![
                DisplayIndex::Regular(2),
                DisplayIndex::Regular(3),
                DisplayIndex::Regular(4)
            ])
        );
        assert_eq!(
            parse_index_or_range("p1-p2"),
            Ok(vec![DisplayIndex::Pinned(1), DisplayIndex::Pinned(2)])
        );
        assert_eq!(parse_index_or_range("7"), Ok(vec![DisplayIndex::Regular(7)]));
    }

    #[test]
    fn test_parse_range_errors() {
        assert!(parse_index_or_range("5-3")
            .unwrap_err()
            .contains("must be <= end"));
        assert!(parse_index_or_range("1-p3")
            .unwrap_err()
            .contains("cannot mix index types"));
        assert!(parse_index_or_range("-5").is_err());
        assert!(parse_index_or_range("3-").is_err());
    }
}
