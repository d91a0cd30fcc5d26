use crate::calendar::{CalendarConfig, Granularity, Relative, TemporalPoint};

/// Joins multi-level labels.
pub const LABEL_SEPARATOR: &str = " · ";
/// Appended to years counted backward from the union.
pub const BEFORE_UNION_SUFFIX: &str = " a.U.";
pub const DECADE_PREFIX: &str = "Década ";
pub const CENTURY_PREFIX: &str = "Século ";
pub const MILLENNIUM_SUFFIX: &str = "º milênio";

const ROMAN_TABLE: [(i64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Largest value written in standard Roman notation.
pub const ROMAN_MAX: i64 = 3999;

/// Renders one level of `point`. Absent fields give an empty string.
///
/// The calendar is accepted for symmetry with [`date_label`]; no single level
/// reads it today.
pub fn format(point: &TemporalPoint, _calendar: &CalendarConfig, level: Granularity) -> String {
    match level {
        Granularity::Era => point.era.clone().unwrap_or_default(),
        Granularity::Millennium => point
            .millennium
            .map(|m| format!("{}{}", m, MILLENNIUM_SUFFIX))
            .unwrap_or_default(),
        Granularity::Century => point
            .century
            .map(|c| format!("{}{} ({})", CENTURY_PREFIX, c, roman_numeral(c)))
            .unwrap_or_default(),
        Granularity::Decade => point
            .decade
            .map(|d| format!("{}{}", DECADE_PREFIX, d))
            .unwrap_or_default(),
        Granularity::Year => point.year.map(|y| year_text(y, point.relative)).unwrap_or_default(),
    }
}

fn year_text(year: i64, relative: Relative) -> String {
    match relative {
        Relative::Before => format!("{}{}", year, BEFORE_UNION_SUFFIX),
        Relative::After => year.to_string(),
    }
}

/// Header used when a period's field is absent.
pub fn placeholder_label(level: Granularity) -> &'static str {
    match level {
        Granularity::Era => "Sem Era",
        Granularity::Millennium => "Milênio ?",
        Granularity::Century => "Século ?",
        Granularity::Decade => "Década ?",
        Granularity::Year => "Ano ?",
    }
}

/// [`format`], falling back to [`placeholder_label`].
pub fn format_or_placeholder(
    point: &TemporalPoint,
    calendar: &CalendarConfig,
    level: Granularity,
) -> String {
    let label = format(point, calendar, level);
    if label.is_empty() {
        placeholder_label(level).to_string()
    } else {
        label
    }
}

/// Subtractive Roman numeral. Values outside `1..=ROMAN_MAX` come back as
/// plain decimals.
pub fn roman_numeral(value: i64) -> String {
    if value <= 0 || value > ROMAN_MAX {
        return value.to_string();
    }
    let mut rest = value;
    let mut out = String::new();
    for (amount, symbol) in ROMAN_TABLE {
        while rest >= amount {
            out.push_str(symbol);
            rest -= amount;
        }
    }
    out
}

/// `"12 de Março"`, `"12"` when the month index is dangling, `"Março"` without a day.
pub fn day_month_label(point: &TemporalPoint, calendar: &CalendarConfig) -> String {
    let month = point.month.and_then(|m| calendar.month_name(m));
    match (point.day, month) {
        (Some(day), Some(month)) => format!("{} de {}", day, month),
        (Some(day), None) => day.to_string(),
        (None, Some(month)) => month.to_string(),
        (None, None) => String::new(),
    }
}

/// Joins the non-empty fragments of the selected levels.
pub fn date_label(point: &TemporalPoint, calendar: &CalendarConfig, levels: &[Granularity]) -> String {
    let fragments: Vec<String> = levels
        .iter()
        .map(|level| {
            if *level == Granularity::Year {
                year_with_day_month(point, calendar)
            } else {
                format(point, calendar, *level)
            }
        })
        .filter(|f| !f.is_empty())
        .collect();
    fragments.join(LABEL_SEPARATOR)
}

/// Full label of a point from the era down to `level`.
pub fn point_label(point: &TemporalPoint, calendar: &CalendarConfig, level: Granularity) -> String {
    let levels: Vec<Granularity> = Granularity::ALL
        .iter()
        .copied()
        .filter(|l| *l <= level)
        .collect();
    date_label(point, calendar, &levels)
}

fn year_with_day_month(point: &TemporalPoint, calendar: &CalendarConfig) -> String {
    let year = format(point, calendar, Granularity::Year);
    let day_month = day_month_label(point, calendar);
    match (day_month.is_empty(), year.is_empty()) {
        (true, _) => year,
        (false, true) => day_month,
        (false, false) => format!("{}, {}", day_month, year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CalendarConfig {
        CalendarConfig::default()
    }

    #[test]
    fn century_label_with_roman() {
        let point = TemporalPoint {
            century: Some(3),
            ..Default::default()
        };
        assert_eq!(format(&point, &cfg(), Granularity::Century), "Século 3 (III)");
    }

    #[test]
    fn roman_numerals() {
        assert_eq!(roman_numeral(19), "XIX");
        assert_eq!(roman_numeral(4), "IV");
        assert_eq!(roman_numeral(9), "IX");
        assert_eq!(roman_numeral(39), "XXXIX");
        assert_eq!(roman_numeral(1994), "MCMXCIV");
        assert_eq!(roman_numeral(0), "0");
        assert_eq!(roman_numeral(-3), "-3");
    }

    #[test]
    fn roman_numerals_stop_at_ceiling() {
        assert_eq!(roman_numeral(ROMAN_MAX), "MMMCMXCIX");
        assert_eq!(roman_numeral(ROMAN_MAX + 1), "4000");
        assert_eq!(roman_numeral(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn huge_century_falls_back_to_decimal() {
        let point = TemporalPoint {
            century: Some(5_000_000_000_000),
            ..Default::default()
        };
        assert_eq!(
            format(&point, &cfg(), Granularity::Century),
            "Século 5000000000000 (5000000000000)"
        );
    }

    #[test]
    fn non_positive_century_falls_back_to_decimal() {
        let point = TemporalPoint {
            century: Some(-2),
            ..Default::default()
        };
        assert_eq!(format(&point, &cfg(), Granularity::Century), "Século -2 (-2)");
    }

    #[test]
    fn year_suffix_only_before_union() {
        let mut point = TemporalPoint {
            year: Some(20),
            relative: Relative::Before,
            ..Default::default()
        };
        assert_eq!(format(&point, &cfg(), Granularity::Year), "20 a.U.");
        point.relative = Relative::After;
        assert_eq!(format(&point, &cfg(), Granularity::Year), "20");
    }

    #[test]
    fn absent_fields_render_empty() {
        let point = TemporalPoint::default();
        for level in Granularity::ALL {
            assert_eq!(format(&point, &cfg(), level), "");
        }
    }

    #[test]
    fn placeholders_for_absent_fields() {
        let point = TemporalPoint::default();
        assert_eq!(format_or_placeholder(&point, &cfg(), Granularity::Era), "Sem Era");
        assert_eq!(
            format_or_placeholder(&point, &cfg(), Granularity::Millennium),
            "Milênio ?"
        );
    }

    #[test]
    fn other_levels() {
        let point = TemporalPoint {
            era: Some("Era do Ferro".into()),
            millennium: Some(2),
            decade: Some(4),
            ..Default::default()
        };
        assert_eq!(format(&point, &cfg(), Granularity::Era), "Era do Ferro");
        assert_eq!(format(&point, &cfg(), Granularity::Millennium), "2º milênio");
        assert_eq!(format(&point, &cfg(), Granularity::Decade), "Década 4");
    }

    #[test]
    fn day_month_tolerates_dangling_month() {
        let mut point = TemporalPoint {
            day: Some(12),
            month: Some(3),
            ..Default::default()
        };
        assert_eq!(day_month_label(&point, &cfg()), "12 de Março");
        point.month = Some(40);
        assert_eq!(day_month_label(&point, &cfg()), "12");
    }

    #[test]
    fn point_label_composes_levels() {
        let point = TemporalPoint {
            era: Some("Gold".into()),
            century: Some(5),
            year: Some(20),
            month: Some(1),
            day: Some(2),
            relative: Relative::Before,
            ..Default::default()
        };
        assert_eq!(
            point_label(&point, &cfg(), Granularity::Year),
            "Gold · Século 5 (V) · 2 de Janeiro, 20 a.U."
        );
        assert_eq!(point_label(&point, &cfg(), Granularity::Century), "Gold · Século 5 (V)");
    }
}
