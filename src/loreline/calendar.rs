//! # Calendar Model
//!
//! Loreline dates live on an invented calendar. This module holds the two value
//! types the rest of the crate reads from:
//!
//! - [`CalendarConfig`]: month names and lengths, week-day names and the three
//!   scale constants. Only the month names are ever consulted (when rendering a
//!   day/month label); the configuration never affects ordering.
//! - [`TemporalPoint`]: a sparse, loosely-filled date. Every field is optional
//!   and independent, so a point may carry a century without a millennium, or
//!   a year without anything else. It is a label, not a coordinate: nothing
//!   here carries 13 months into a year or checks a day against its month.
//!
//! [`Granularity`] names the five display resolutions, coarsest first.

use crate::error::{LorelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display resolution of a note or a view, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Granularity {
    Era,
    Millennium,
    Century,
    Decade,
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 5] = [
        Granularity::Era,
        Granularity::Millennium,
        Granularity::Century,
        Granularity::Decade,
        Granularity::Year,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Era => "era",
            Granularity::Millennium => "millennium",
            Granularity::Century => "century",
            Granularity::Decade => "decade",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "era" => Ok(Granularity::Era),
            "millennium" | "mil" => Ok(Granularity::Millennium),
            "century" | "cen" => Ok(Granularity::Century),
            "decade" | "dec" => Ok(Granularity::Decade),
            "year" => Ok(Granularity::Year),
            other => Err(format!("Unknown granularity: {}", other)),
        }
    }
}

/// Whether a year counts backward from the union (the reference epoch) or forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relative {
    Before,
    #[default]
    After,
}

impl FromStr for Relative {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "before" | "b" | "au" | "a.u." => Ok(Relative::Before),
            "after" | "a" | "du" | "d.u." => Ok(Relative::After),
            other => Err(format!("Unknown relative marker: {}", other)),
        }
    }
}

/// A partially-specified point on the configured calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredPoint")]
pub struct TemporalPoint {
    pub era: Option<String>,
    pub millennium: Option<i64>,
    pub century: Option<i64>,
    pub decade: Option<i64>,
    pub year: Option<i64>,
    /// 1-based index into [`CalendarConfig::months`].
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub relative: Relative,
}

impl TemporalPoint {
    /// Signed year used for all ordering: zero when the year is absent or zero.
    pub fn effective_year(&self) -> i64 {
        match self.year {
            None | Some(0) => 0,
            Some(year) => match self.relative {
                Relative::Before => -year.saturating_abs(),
                Relative::After => year,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.era.is_none()
            && self.millennium.is_none()
            && self.century.is_none()
            && self.decade.is_none()
            && self.year.is_none()
            && self.month.is_none()
            && self.day.is_none()
    }
}

/// On-disk shape of a [`TemporalPoint`].
///
/// Records written before the relative flag existed stored years before the
/// union as negative numbers. Those load as `Before` with the magnitude kept.
#[derive(Deserialize)]
struct StoredPoint {
    #[serde(default)]
    era: Option<String>,
    #[serde(default)]
    millennium: Option<i64>,
    #[serde(default)]
    century: Option<i64>,
    #[serde(default)]
    decade: Option<i64>,
    #[serde(default)]
    year: Option<i64>,
    #[serde(default)]
    month: Option<u32>,
    #[serde(default)]
    day: Option<u32>,
    #[serde(default)]
    relative: Option<Relative>,
}

impl From<StoredPoint> for TemporalPoint {
    fn from(raw: StoredPoint) -> Self {
        let (year, relative) = match (raw.year, raw.relative) {
            (year, Some(relative)) => (year, relative),
            (Some(year), None) if year < 0 => {
                tracing::debug!(year, "legacy negative year, reading as before the union");
                (Some(year.saturating_abs()), Relative::Before)
            }
            (year, None) => (year, Relative::After),
        };

        Self {
            era: raw.era.filter(|e| !e.trim().is_empty()),
            millennium: raw.millennium,
            century: raw.century,
            decade: raw.decade,
            year,
            month: raw.month,
            day: raw.day,
            relative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    pub name: String,
    pub days: u32,
}

impl Month {
    pub fn new(name: impl Into<String>, days: u32) -> Self {
        Self {
            name: name.into(),
            days,
        }
    }
}

/// Structure of the invented calendar. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_week_days")]
    pub week_days: Vec<String>,

    #[serde(default = "default_months")]
    pub months: Vec<Month>,

    #[serde(default = "default_years_per_century")]
    pub years_per_century: u32,

    #[serde(default = "default_centuries_per_millennium")]
    pub centuries_per_millennium: u32,

    #[serde(default = "default_decades_per_century")]
    pub decades_per_century: u32,
}

fn default_week_days() -> Vec<String> {
    [
        "Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado",
    ]
    .iter()
    .map(|d| d.to_string())
    .collect()
}

fn default_months() -> Vec<Month> {
    [
        "Janeiro",
        "Fevereiro",
        "Março",
        "Abril",
        "Maio",
        "Junho",
        "Julho",
        "Agosto",
        "Setembro",
        "Outubro",
        "Novembro",
        "Dezembro",
    ]
    .iter()
    .map(|name| Month::new(*name, 30))
    .collect()
}

fn default_years_per_century() -> u32 {
    100
}

fn default_centuries_per_millennium() -> u32 {
    10
}

fn default_decades_per_century() -> u32 {
    10
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_days: default_week_days(),
            months: default_months(),
            years_per_century: default_years_per_century(),
            centuries_per_millennium: default_centuries_per_millennium(),
            decades_per_century: default_decades_per_century(),
        }
    }
}

impl CalendarConfig {
    /// Name of the 1-based month index, if the calendar has such a month.
    pub fn month_name(&self, index: u32) -> Option<&str> {
        let slot = usize::try_from(index).ok()?.checked_sub(1)?;
        self.months.get(slot).map(|m| m.name.as_str())
    }

    pub fn days_in_year(&self) -> u64 {
        self.months.iter().map(|m| u64::from(m.days)).sum()
    }

    pub fn validate(&self) -> Result<()> {
        for (i, month) in self.months.iter().enumerate() {
            if month.name.trim().is_empty() {
                return Err(LorelineError::InvalidCalendar(format!(
                    "month {} has an empty name",
                    i + 1
                )));
            }
            if month.days < 1 {
                return Err(LorelineError::InvalidCalendar(format!(
                    "month {} must have at least one day",
                    month.name
                )));
            }
        }
        if self.week_days.iter().any(|d| d.trim().is_empty()) {
            return Err(LorelineError::InvalidCalendar(
                "week day names cannot be empty".to_string(),
            ));
        }
        let scales = [
            ("years per century", self.years_per_century),
            ("centuries per millennium", self.centuries_per_millennium),
            ("decades per century", self.decades_per_century),
        ];
        for (label, value) in scales {
            if value < 1 {
                return Err(LorelineError::InvalidCalendar(format!(
                    "{} must be positive",
                    label
                )));
            }
        }
        Ok(())
    }

    /// Returns a new calendar with `month` appended.
    pub fn with_month(&self, month: Month) -> Result<Self> {
        let mut next = self.clone();
        next.months.push(month);
        next.validate()?;
        Ok(next)
    }

    /// Returns a new calendar without the month named `name` (case-insensitive).
    pub fn without_month(&self, name: &str) -> Result<Self> {
        let wanted = name.trim().to_lowercase();
        let mut next = self.clone();
        let before = next.months.len();
        next.months.retain(|m| m.name.to_lowercase() != wanted);
        if next.months.len() == before {
            return Err(LorelineError::InvalidCalendar(format!(
                "no month named {}",
                name
            )));
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_year_signs() {
        let mut point = TemporalPoint {
            year: Some(50),
            relative: Relative::Before,
            ..Default::default()
        };
        assert_eq!(point.effective_year(), -50);

        point.relative = Relative::After;
        assert_eq!(point.effective_year(), 50);

        point.year = Some(0);
        point.relative = Relative::Before;
        assert_eq!(point.effective_year(), 0);

        point.year = None;
        assert_eq!(point.effective_year(), 0);
    }

    #[test]
    fn effective_year_saturates_at_extremes() {
        let mut point = TemporalPoint {
            year: Some(i64::MIN),
            relative: Relative::Before,
            ..Default::default()
        };
        assert_eq!(point.effective_year(), -i64::MAX);

        point.year = Some(i64::MAX);
        assert_eq!(point.effective_year(), -i64::MAX);

        point.year = Some(i64::MIN);
        point.relative = Relative::After;
        assert_eq!(point.effective_year(), i64::MIN);
    }

    #[test]
    fn legacy_minimum_year_loads_saturated() {
        let point: TemporalPoint =
            serde_json::from_str(r#"{"year": -9223372036854775808}"#).unwrap();
        assert_eq!(point.year, Some(i64::MAX));
        assert_eq!(point.relative, Relative::Before);
        assert_eq!(point.effective_year(), -i64::MAX);
    }

    #[test]
    fn legacy_negative_year_loads_as_before() {
        let point: TemporalPoint = serde_json::from_str(r#"{"year": -120}"#).unwrap();
        assert_eq!(point.year, Some(120));
        assert_eq!(point.relative, Relative::Before);
        assert_eq!(point.effective_year(), -120);
    }

    #[test]
    fn missing_relative_defaults_to_after() {
        let point: TemporalPoint = serde_json::from_str(r#"{"year": 7, "era": "Gold"}"#).unwrap();
        assert_eq!(point.relative, Relative::After);
        assert_eq!(point.era.as_deref(), Some("Gold"));
    }

    #[test]
    fn explicit_relative_is_kept() {
        let point: TemporalPoint =
            serde_json::from_str(r#"{"year": 7, "relative": "before"}"#).unwrap();
        assert_eq!(point.relative, Relative::Before);

        let json = serde_json::to_string(&point).unwrap();
        let back: TemporalPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn month_name_tolerates_dangling_index() {
        let cal = CalendarConfig::default();
        assert_eq!(cal.month_name(1), Some("Janeiro"));
        assert_eq!(cal.month_name(12), Some("Dezembro"));
        assert_eq!(cal.month_name(0), None);
        assert_eq!(cal.month_name(13), None);
    }

    #[test]
    fn validate_rejects_bad_months() {
        let mut cal = CalendarConfig::default();
        cal.months.push(Month::new("  ", 10));
        assert!(cal.validate().is_err());

        let mut cal = CalendarConfig::default();
        cal.months.push(Month::new("Vazio", 0));
        assert!(cal.validate().is_err());

        let mut cal = CalendarConfig::default();
        cal.years_per_century = 0;
        assert!(cal.validate().is_err());

        assert!(CalendarConfig::default().validate().is_ok());
    }

    #[test]
    fn month_edits_produce_new_calendar() {
        let cal = CalendarConfig::default();
        let grown = cal.with_month(Month::new("Trezembro", 5)).unwrap();
        assert_eq!(grown.months.len(), 13);
        assert_eq!(cal.months.len(), 12);
        assert_eq!(grown.days_in_year(), 365);

        let shrunk = grown.without_month("trezembro").unwrap();
        assert_eq!(shrunk, cal);
        assert!(cal.without_month("Nope").is_err());
    }

    #[test]
    fn granularity_parses_names() {
        assert_eq!("Century".parse::<Granularity>(), Ok(Granularity::Century));
        assert_eq!("mil".parse::<Granularity>(), Ok(Granularity::Millennium));
        assert!("week".parse::<Granularity>().is_err());
        assert!(Granularity::Era < Granularity::Year);
    }
}
