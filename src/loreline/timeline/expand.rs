//! Recursive period tree.
//!
//! Each root level has a fixed descent chain. Every step of the chain splits
//! the current notes by that level's own field (ancestry is already fixed by
//! the recursion, so no cumulative key is needed). The trailing `Year` step
//! buckets by signed year and orders each bucket by weight. A `Year` root has
//! nothing left to descend into and renders as a flat weight-ordered list.
//!
//! ```text
//! Era        -> Millennium, Century, Decade, Year
//! Millennium -> Century, Decade, Year
//! Century    -> Decade, Year
//! Decade     -> Decade, Year
//! Year       -> (flat)
//! ```

use super::format::format_or_placeholder;
use super::group::{field_key, group, partition};
use crate::calendar::{CalendarConfig, Granularity, TemporalPoint};
use crate::model::Note;

/// A header in the tree and everything under it.
#[derive(Debug, Clone)]
pub struct Period<'a> {
    pub level: Granularity,
    pub key: String,
    /// Date of the earliest member; its `level` field names the period.
    pub point: TemporalPoint,
    pub children: Subtree<'a>,
}

impl Period<'_> {
    pub fn label(&self, calendar: &CalendarConfig) -> String {
        format_or_placeholder(&self.point, calendar, self.level)
    }
}

/// Notes sharing one signed year, heaviest first.
#[derive(Debug, Clone)]
pub struct YearBucket<'a> {
    pub key: String,
    pub point: TemporalPoint,
    pub notes: Vec<&'a Note>,
}

impl YearBucket<'_> {
    pub fn label(&self, calendar: &CalendarConfig) -> String {
        format_or_placeholder(&self.point, calendar, Granularity::Year)
    }
}

#[derive(Debug, Clone)]
pub enum Subtree<'a> {
    Periods(Vec<Period<'a>>),
    Years(Vec<YearBucket<'a>>),
    Notes(Vec<&'a Note>),
}

impl<'a> Subtree<'a> {
    /// Every note under this subtree, in display order.
    pub fn notes(&self) -> Vec<&'a Note> {
        match self {
            Subtree::Periods(periods) => periods.iter().flat_map(|p| p.children.notes()).collect(),
            Subtree::Years(years) => years.iter().flat_map(|y| y.notes.iter().copied()).collect(),
            Subtree::Notes(notes) => notes.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Subtree::Periods(periods) => periods.is_empty(),
            Subtree::Years(years) => years.is_empty(),
            Subtree::Notes(notes) => notes.is_empty(),
        }
    }
}

pub fn descent_chain(root: Granularity) -> &'static [Granularity] {
    use Granularity::*;
    match root {
        Era => &[Millennium, Century, Decade, Year],
        Millennium => &[Century, Decade, Year],
        Century => &[Decade, Year],
        Decade => &[Decade, Year],
        Year => &[],
    }
}

/// Expands the members of one `root`-level group into its period tree.
pub fn expand<'a, I>(root: Granularity, notes: I) -> Subtree<'a>
where
    I: IntoIterator<Item = &'a Note>,
{
    let notes: Vec<&'a Note> = notes.into_iter().collect();
    if root == Granularity::Year {
        return Subtree::Notes(by_weight(notes));
    }
    descend(descent_chain(root), notes)
}

fn descend<'a>(chain: &[Granularity], notes: Vec<&'a Note>) -> Subtree<'a> {
    match chain.split_first() {
        None | Some((Granularity::Year, _)) => Subtree::Years(year_buckets(notes)),
        Some((level, rest)) => {
            let level = *level;
            let periods = partition(notes, |note| field_key(&note.date, level))
                .into_iter()
                .map(|(key, members)| Period {
                    level,
                    key,
                    point: members[0].date.clone(),
                    children: descend(rest, members),
                })
                .collect();
            Subtree::Periods(periods)
        }
    }
}

fn year_buckets(notes: Vec<&Note>) -> Vec<YearBucket<'_>> {
    partition(notes, |note| field_key(&note.date, Granularity::Year))
        .into_iter()
        .map(|(key, members)| YearBucket {
            key,
            point: members[0].date.clone(),
            notes: by_weight(members),
        })
        .collect()
}

fn by_weight(mut notes: Vec<&Note>) -> Vec<&Note> {
    notes.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    notes
}

/// Flat pass at `level`, then each group expanded underneath its header.
///
/// Decade views group by century (see [`super::group::group_key`]), so their
/// top headers are labelled as centuries.
pub fn build_timeline<'a, I>(notes: I, level: Granularity) -> Vec<Period<'a>>
where
    I: IntoIterator<Item = &'a Note>,
{
    let header_level = match level {
        Granularity::Decade => Granularity::Century,
        other => other,
    };
    group(notes, level)
        .into_iter()
        .map(|g| Period {
            level: header_level,
            point: g.notes[0].date.clone(),
            children: expand(level, g.notes.iter().copied()),
            key: g.key,
        })
        .collect()
}
