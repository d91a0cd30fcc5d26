use chrono::{DateTime, Utc};
use colored::Colorize;
use loreline::api::{CmdMessage, MessageLevel, TagCount, TimelineView};
use loreline::calendar::CalendarConfig;
use loreline::config::{LorelineConfig, CONFIG_KEYS};
use loreline::index::{DisplayIndex, DisplayNote};
use loreline::model::Note;
use loreline::timeline::{point_label, Period, Subtree};
use std::fmt::Write;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const DATE_WIDTH: usize = 34;
const TIME_WIDTH: usize = 14;
const PIN_MARKER: &str = "⚲";
const INDENT: &str = "  ";
const NOTE_BULLET: &str = "•";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn render_note_list(notes: &[DisplayNote], calendar: &CalendarConfig) -> String {
    let mut out = String::new();
    if notes.is_empty() {
        out.push_str("No notes found.\n");
        return out;
    }

    let mut last_was_pinned = false;
    for dn in notes {
        let is_pinned_entry = matches!(dn.index, DisplayIndex::Pinned(_));
        if last_was_pinned && !is_pinned_entry {
            out.push('\n');
        }
        last_was_pinned = is_pinned_entry;

        let idx_str = format!("{}. ", dn.index);
        let left_prefix = if is_pinned_entry {
            format!("  {} ", PIN_MARKER)
        } else {
            "    ".to_string()
        };
        let right_suffix = if dn.note.is_pinned && !is_pinned_entry {
            format!("{} ", PIN_MARKER)
        } else {
            "  ".to_string()
        };

        let date = pad_to_width(
            &truncate_to_width(&point_label(&dn.note.date, calendar, dn.note.level), DATE_WIDTH),
            DATE_WIDTH,
        );
        let fixed_width =
            left_prefix.width() + idx_str.width() + DATE_WIDTH + 1 + right_suffix.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title = pad_to_width(&truncate_to_width(&dn.note.title, available), available);

        let idx_colored = match dn.index {
            DisplayIndex::Pinned(_) => idx_str.yellow(),
            DisplayIndex::Regular(_) => idx_str.normal(),
        };

        let _ = writeln!(
            out,
            "{}{}{} {}{}{}",
            left_prefix,
            idx_colored,
            date.cyan(),
            title,
            right_suffix,
            format_time_ago(dn.note.created_at).dimmed()
        );
    }
    out
}

pub(super) fn render_full_notes(notes: &[DisplayNote], calendar: &CalendarConfig) -> String {
    let mut out = String::new();
    for (i, dn) in notes.iter().enumerate() {
        if i > 0 {
            out.push_str("\n================================\n\n");
        }
        let note = &dn.note;
        let _ = writeln!(out, "{} {}", dn.index.to_string().yellow(), note.title.bold());
        let _ = writeln!(out, "--------------------------------");
        let date = point_label(&note.date, calendar, note.level);
        let _ = writeln!(
            out,
            "{} ({})",
            if date.is_empty() { "-".to_string() } else { date },
            note.level
        );
        if let Some(description) = &note.description {
            let _ = writeln!(out, "\n{}", description);
        }
        if !note.tags.is_empty() {
            let _ = writeln!(out, "\nTags: {}", note.tags.join(", "));
        }
        if note.weight != 1.0 {
            let _ = writeln!(out, "Weight: {}", note.weight);
        }
        if !note.images.is_empty() {
            let _ = writeln!(out, "Images: {}", note.images.len());
        }
    }
    out
}

pub(super) fn render_timeline(view: &TimelineView) -> String {
    let mut out = String::new();
    for period in view.periods() {
        render_period(&mut out, &period, &view.calendar, 0);
    }
    out
}

fn render_period(out: &mut String, period: &Period<'_>, calendar: &CalendarConfig, depth: usize) {
    let label = period.label(calendar);
    let styled = if depth == 0 {
        label.bold().to_string()
    } else {
        label.cyan().to_string()
    };
    let _ = writeln!(out, "{}{}", INDENT.repeat(depth), styled);
    render_subtree(out, &period.children, calendar, depth + 1);
}

fn render_subtree(out: &mut String, subtree: &Subtree<'_>, calendar: &CalendarConfig, depth: usize) {
    match subtree {
        Subtree::Periods(periods) => {
            for period in periods {
                render_period(out, period, calendar, depth);
            }
        }
        Subtree::Years(years) => {
            for bucket in years {
                let _ = writeln!(out, "{}{}", INDENT.repeat(depth), bucket.label(calendar).cyan());
                for note in &bucket.notes {
                    render_note_line(out, note, depth + 1);
                }
            }
        }
        Subtree::Notes(notes) => {
            for note in notes {
                render_note_line(out, note, depth);
            }
        }
    }
}

fn render_note_line(out: &mut String, note: &Note, depth: usize) {
    let pin = if note.is_pinned {
        format!(" {}", PIN_MARKER)
    } else {
        String::new()
    };
    let tags = if note.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", note.tags.join(", "))
    };
    let _ = writeln!(
        out,
        "{}{} {}{}{}",
        INDENT.repeat(depth),
        NOTE_BULLET,
        note.title,
        pin.yellow(),
        tags.dimmed()
    );
}

pub(super) fn render_tags(tags: &[TagCount]) -> String {
    if tags.is_empty() {
        return "No tags.\n".to_string();
    }
    let width = tags.iter().map(|t| t.name.width()).max().unwrap_or(0);
    let mut out = String::new();
    for tag in tags {
        let _ = writeln!(out, "{}  {}", pad_to_width(&tag.name, width), tag.count);
    }
    out
}

pub(super) fn render_calendar(calendar: &CalendarConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Months".bold());
    for (i, month) in calendar.months.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {} ({} days)", i + 1, month.name, month.days);
    }
    let _ = writeln!(out, "{}", "Week days".bold());
    let _ = writeln!(out, "  {}", calendar.week_days.join(", "));
    let _ = writeln!(out, "{}", "Scale".bold());
    let _ = writeln!(out, "  years per century: {}", calendar.years_per_century);
    let _ = writeln!(
        out,
        "  centuries per millennium: {}",
        calendar.centuries_per_millennium
    );
    let _ = writeln!(out, "  decades per century: {}", calendar.decades_per_century);
    let _ = writeln!(out, "  days per year: {}", calendar.days_in_year());
    out
}

pub(super) fn render_config(config: &LorelineConfig) -> String {
    let mut out = String::new();
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            let _ = writeln!(out, "{} = {}", key, value);
        }
    }
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
