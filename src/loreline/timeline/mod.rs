//! # Timeline Engine
//!
//! The ordering and grouping core. Everything here is a pure function over a
//! borrowed snapshot of notes: no store access, no I/O, no failure modes.
//!
//! - [`compare`]: the single ordering every sort in loreline uses. It looks at
//!   the effective (signed) year and nothing else; notes sharing a year are
//!   equal and keep their input order under stable sorts.
//! - [`format`]: one-level labels ("Século 3 (III)", "20 a.U.", ...).
//! - [`group`]: the flat pass. Buckets notes under cumulative keys so that
//!   equal centuries in different eras stay apart.
//! - [`expand`]: the recursive pass that builds the nested period tree shown
//!   by `loreline timeline`.
//! - [`export`]: plain-text rendering of a whole collection.
//!
//! Callers always pass the full current collection; nothing is cached between
//! calls.

pub mod compare;
pub mod expand;
pub mod export;
pub mod format;
pub mod group;

pub use compare::{compare, sort_notes};
pub use expand::{build_timeline, descent_chain, expand, Period, Subtree, YearBucket};
pub use export::{build_export_text, ExportGroupBy, ExportOptions};
pub use format::{
    date_label, day_month_label, format, format_or_placeholder, placeholder_label, point_label,
    roman_numeral,
};
pub use group::{group, group_key, Group};
