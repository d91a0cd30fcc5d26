use crate::calendar::{CalendarConfig, Month};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LorelineError, Result};
use crate::store::DataStore;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum CalendarAction {
    Show,
    /// Replace the whole calendar with the JSON document at this path.
    Replace(PathBuf),
    AddMonth { name: String, days: u32 },
    RemoveMonth(String),
}

pub fn run<S: DataStore>(store: &mut S, action: CalendarAction) -> Result<CmdResult> {
    let current = store.load_calendar()?;
    match action {
        CalendarAction::Show => Ok(CmdResult::default().with_calendar(current)),
        CalendarAction::Replace(path) => {
            let content = fs::read_to_string(&path).map_err(LorelineError::Io)?;
            let calendar: CalendarConfig =
                serde_json::from_str(&content).map_err(LorelineError::Serialization)?;
            save(store, calendar, format!("Calendar replaced from {}", path.display()))
        }
        CalendarAction::AddMonth { name, days } => {
            let name = name.trim().to_string();
            if current
                .months
                .iter()
                .any(|m| m.name.eq_ignore_ascii_case(&name))
            {
                return Err(LorelineError::InvalidCalendar(format!(
                    "month {} already exists",
                    name
                )));
            }
            let calendar = current.with_month(Month::new(name.clone(), days))?;
            save(store, calendar, format!("Month {} added ({} days)", name, days))
        }
        CalendarAction::RemoveMonth(name) => {
            let calendar = current.without_month(&name)?;
            if calendar.months.len() + 1 < current.months.len() {
                tracing::warn!(%name, "removed more than one month with the same name");
            }
            save(store, calendar, format!("Month {} removed", name.trim()))
        }
    }
}

fn save<S: DataStore>(store: &mut S, calendar: CalendarConfig, message: String) -> Result<CmdResult> {
    calendar.validate()?;
    store.save_calendar(&calendar)?;
    let mut result = CmdResult::default().with_calendar(calendar);
    result.add_message(CmdMessage::success(message));
    Ok(result)
}
