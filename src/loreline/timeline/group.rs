use super::compare::{compare, sort_notes};
use crate::calendar::{Granularity, TemporalPoint};
use crate::model::Note;
use std::collections::HashMap;

/// Stands in for an absent field inside grouping keys.
pub const PLACEHOLDER: &str = "?";
pub const KEY_DELIMITER: &str = "|";

/// One bucket of the flat pass.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub key: String,
    pub notes: Vec<&'a Note>,
}

impl<'a> Group<'a> {
    /// The note whose date stands for the whole group.
    pub fn first(&self) -> Option<&'a Note> {
        self.notes.first().copied()
    }
}

/// Key fragment for a single level, `"?"` when the field is absent.
///
/// Years are keyed by their signed effective value so that the same number on
/// both sides of the union lands in different buckets.
pub fn field_key(point: &TemporalPoint, level: Granularity) -> String {
    let value = match level {
        Granularity::Era => point.era.clone(),
        Granularity::Millennium => point.millennium.map(|m| m.to_string()),
        Granularity::Century => point.century.map(|c| c.to_string()),
        Granularity::Decade => point.decade.map(|d| d.to_string()),
        Granularity::Year => point.year.map(|_| point.effective_year().to_string()),
    };
    value.unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Cumulative key: every field from the era down to `level`.
///
/// Decades share the century key; decade buckets only appear one level down,
/// in [`super::expand`].
pub fn group_key(point: &TemporalPoint, level: Granularity) -> String {
    let effective = match level {
        Granularity::Decade => Granularity::Century,
        other => other,
    };
    Granularity::ALL
        .iter()
        .filter(|l| **l <= effective)
        .map(|l| field_key(point, *l))
        .collect::<Vec<_>>()
        .join(KEY_DELIMITER)
}

/// Flat pass: buckets notes by [`group_key`], in chronological group order.
pub fn group<'a, I>(notes: I, level: Granularity) -> Vec<Group<'a>>
where
    I: IntoIterator<Item = &'a Note>,
{
    partition(notes, |note| group_key(&note.date, level))
        .into_iter()
        .map(|(key, notes)| Group { key, notes })
        .collect()
}

/// Splits notes into keyed buckets.
///
/// Input is stably sorted first, so each bucket's first member is its earliest
/// note and ties keep insertion order. Buckets are then ordered by comparing
/// first members, and members stay sorted.
pub(crate) fn partition<'a, I, F>(notes: I, key_of: F) -> Vec<(String, Vec<&'a Note>)>
where
    I: IntoIterator<Item = &'a Note>,
    F: Fn(&Note) -> String,
{
    let mut sorted: Vec<&'a Note> = notes.into_iter().collect();
    sort_notes(&mut sorted);

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<&'a Note>)> = Vec::new();
    for note in sorted {
        let key = key_of(note);
        match slots.get(&key) {
            Some(&slot) => buckets[slot].1.push(note),
            None => {
                slots.insert(key.clone(), buckets.len());
                buckets.push((key, vec![note]));
            }
        }
    }

    buckets.sort_by(|(_, a), (_, b)| compare(a[0], b[0]));
    for (_, members) in buckets.iter_mut() {
        sort_notes(members);
    }
    buckets
}
