use super::compare::sort_notes;
use super::format::{date_label, format_or_placeholder};
use super::group::{field_key, partition};
use crate::calendar::{CalendarConfig, Granularity};
use crate::model::Note;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shown in place of the date line for notes without any date field.
pub const UNDATED_LABEL: &str = "Sem data";
const BLOCK_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportGroupBy {
    #[default]
    None,
    Era,
    Millennium,
    Century,
    Decade,
}

impl ExportGroupBy {
    pub fn level(&self) -> Option<Granularity> {
        match self {
            ExportGroupBy::None => None,
            ExportGroupBy::Era => Some(Granularity::Era),
            ExportGroupBy::Millennium => Some(Granularity::Millennium),
            ExportGroupBy::Century => Some(Granularity::Century),
            ExportGroupBy::Decade => Some(Granularity::Decade),
        }
    }
}

impl fmt::Display for ExportGroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level() {
            Some(level) => write!(f, "{}", level),
            None => f.write_str("none"),
        }
    }
}

impl FromStr for ExportGroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("none") {
            return Ok(ExportGroupBy::None);
        }
        match s.parse::<Granularity>()? {
            Granularity::Era => Ok(ExportGroupBy::Era),
            Granularity::Millennium => Ok(ExportGroupBy::Millennium),
            Granularity::Century => Ok(ExportGroupBy::Century),
            Granularity::Decade => Ok(ExportGroupBy::Decade),
            Granularity::Year => Err("Exports cannot be grouped by year".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub include_description: bool,
    pub include_tags: bool,
    pub group_by: ExportGroupBy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_description: true,
            include_tags: false,
            group_by: ExportGroupBy::None,
        }
    }
}

/// Renders the notes as plain text, chronologically, optionally under group headers.
pub fn build_export_text<'a, I>(notes: I, calendar: &CalendarConfig, options: &ExportOptions) -> String
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut sorted: Vec<&Note> = notes.into_iter().collect();
    sort_notes(&mut sorted);

    match options.group_by.level() {
        None => render_blocks(&sorted, calendar, options),
        Some(level) => partition(sorted, |note| field_key(&note.date, level))
            .into_iter()
            .map(|(_, members)| {
                let label = format_or_placeholder(&members[0].date, calendar, level);
                format!("{}\n{}", label, render_blocks(&members, calendar, options))
            })
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR),
    }
}

fn render_blocks(notes: &[&Note], calendar: &CalendarConfig, options: &ExportOptions) -> String {
    notes
        .iter()
        .map(|note| render_block(note, calendar, options))
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

fn render_block(note: &Note, calendar: &CalendarConfig, options: &ExportOptions) -> String {
    let date = date_label(&note.date, calendar, &[Granularity::Year]);
    let mut lines = vec![
        if date.is_empty() {
            UNDATED_LABEL.to_string()
        } else {
            date
        },
        note.title.clone(),
    ];
    if options.include_description {
        if let Some(description) = note.description.as_deref().filter(|d| !d.trim().is_empty()) {
            lines.push(description.to_string());
        }
    }
    if options.include_tags && !note.tags.is_empty() {
        lines.push(format!("Tags: {}", note.tags.join(", ")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Relative, TemporalPoint};

    fn note(title: &str, era: Option<&str>, year: i64, relative: Relative) -> Note {
        Note::new(
            title.into(),
            Granularity::Year,
            TemporalPoint {
                era: era.map(String::from),
                year: Some(year),
                relative,
                ..Default::default()
            },
        )
    }

    fn sample() -> Vec<Note> {
        vec![
            note("Founding", Some("Gold"), 5, Relative::After)
                .with_description("The city is founded.")
                .with_tags(["city", "origins"]),
            note("Old War", None, 20, Relative::Before),
            note("Treaty", Some("Gold"), 1, Relative::After),
        ]
    }

    #[test]
    fn flat_export_in_chronological_order() {
        let notes = sample();
        let text = build_export_text(&notes, &CalendarConfig::default(), &ExportOptions::default());
        assert_eq!(
            text,
            "20 a.U.\nOld War\n\n1\nTreaty\n\n5\nFounding\nThe city is founded."
        );
    }

    #[test]
    fn tags_and_descriptions_follow_options() {
        let notes = sample();
        let options = ExportOptions {
            include_description: false,
            include_tags: true,
            group_by: ExportGroupBy::None,
        };
        let text = build_export_text(&notes, &CalendarConfig::default(), &options);
        assert!(text.contains("Tags: city, origins"));
        assert!(!text.contains("The city is founded."));
    }

    #[test]
    fn grouped_export_uses_placeholder_labels() {
        let notes = sample();
        let options = ExportOptions {
            group_by: ExportGroupBy::Era,
            ..Default::default()
        };
        let text = build_export_text(&notes, &CalendarConfig::default(), &options);
        assert_eq!(
            text,
            "Sem Era\n20 a.U.\nOld War\n\nGold\n1\nTreaty\n\n5\nFounding\nThe city is founded."
        );
    }

    #[test]
    fn decade_groups_ignore_the_century() {
        let dated = |title: &str, century: i64, decade: i64, year: i64| {
            Note::new(
                title.into(),
                Granularity::Year,
                TemporalPoint {
                    century: Some(century),
                    decade: Some(decade),
                    year: Some(year),
                    ..Default::default()
                },
            )
        };
        let notes = vec![
            dated("Harvest", 4, 2, 410),
            dated("Flood", 4, 3, 430),
            dated("Comet", 5, 2, 520),
        ];
        let options = ExportOptions {
            include_description: false,
            group_by: ExportGroupBy::Decade,
            ..Default::default()
        };
        let text = build_export_text(&notes, &CalendarConfig::default(), &options);
        assert_eq!(
            text,
            "Década 2\n410\nHarvest\n\n520\nComet\n\nDécada 3\n430\nFlood"
        );
    }

    #[test]
    fn undated_notes_get_placeholder_date_line() {
        let notes = vec![Note::new("Lost".into(), Granularity::Era, TemporalPoint::default())];
        let options = ExportOptions {
            group_by: ExportGroupBy::Millennium,
            ..Default::default()
        };
        let text = build_export_text(&notes, &CalendarConfig::default(), &options);
        assert_eq!(text, "Milênio ?\nSem data\nLost");
    }

    #[test]
    fn export_is_deterministic() {
        let notes = sample();
        let options = ExportOptions {
            include_tags: true,
            group_by: ExportGroupBy::Century,
            ..Default::default()
        };
        let cal = CalendarConfig::default();
        assert_eq!(
            build_export_text(&notes, &cal, &options),
            build_export_text(&notes, &cal, &options)
        );
    }

    #[test]
    fn empty_collection_exports_empty_text() {
        let notes: Vec<Note> = Vec::new();
        assert_eq!(
            build_export_text(&notes, &CalendarConfig::default(), &ExportOptions::default()),
            ""
        );
    }

    #[test]
    fn group_by_parses() {
        assert_eq!("none".parse::<ExportGroupBy>(), Ok(ExportGroupBy::None));
        assert_eq!("Century".parse::<ExportGroupBy>(), Ok(ExportGroupBy::Century));
        assert!("year".parse::<ExportGroupBy>().is_err());
    }
}
