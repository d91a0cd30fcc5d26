use crate::commands::{CmdMessage, CmdResult, LorelinePaths};
use crate::config::LorelineConfig;
use crate::error::Result;
use crate::store::fs::FileStore;
use crate::store::DataStore;
use std::fs;

/// Creates the data directory, writing a default calendar and config where
/// none exist yet. Existing files are left alone.
pub fn run(paths: &LorelinePaths) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    fs::create_dir_all(dir)?;

    let mut store = FileStore::new(dir.clone());
    if !store.has_calendar() {
        let calendar = store.load_calendar()?;
        store.save_calendar(&calendar)?;
    }
    if !dir.join(crate::config::CONFIG_FILENAME).exists() {
        LorelineConfig::default().save(dir)?;
    }
    tracing::info!(path = %dir.display(), "data directory initialized");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized loreline store at {}",
        dir.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarConfig, Month};

    #[test]
    fn creates_directory_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = LorelinePaths::new(dir.path().join("lore"));
        run(&paths).unwrap();

        assert!(paths.data_dir.join("calendar.json").exists());
        assert!(paths.data_dir.join("config.json").exists());
    }

    #[test]
    fn keeps_existing_calendar() {
        let dir = tempfile::tempdir().unwrap();
        let paths = LorelinePaths::new(dir.path().to_path_buf());
        let mut store = FileStore::new(paths.data_dir.clone());
        let custom = CalendarConfig::default()
            .with_month(Month::new("Festa", 5))
            .unwrap();
        store.save_calendar(&custom).unwrap();

        run(&paths).unwrap();
        assert_eq!(store.load_calendar().unwrap(), custom);
    }
}
