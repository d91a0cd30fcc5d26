use crate::api::{LorelineApi, LorelinePaths};
use crate::config::LorelineConfig;
use crate::error::{LorelineError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides the data directory, mainly for tests and portable setups.
pub const HOME_ENV: &str = "LORELINE_HOME";

pub struct LorelineContext {
    pub api: LorelineApi<FileStore>,
    pub config: LorelineConfig,
}

/// `$LORELINE_HOME` when set and non-empty, else the platform data directory.
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "loreline", "loreline")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| LorelineError::Store("Could not determine data directory".into()))
}

pub fn initialize() -> Result<LorelineContext> {
    let data_dir = resolve_data_dir()?;
    initialize_at(data_dir)
}

pub fn initialize_at(data_dir: PathBuf) -> Result<LorelineContext> {
    let config = match LorelineConfig::load(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable config, using defaults");
            LorelineConfig::default()
        }
    };
    tracing::debug!(path = %data_dir.display(), "using data directory");

    let store = FileStore::new(data_dir.clone());
    let api = LorelineApi::new(store, LorelinePaths::new(data_dir));
    Ok(LorelineContext { api, config })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_reads_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = LorelineConfig::default();
        config.set("default-level", "decade").unwrap();
        config.save(dir.path()).unwrap();

        let ctx = initialize_at(dir.path().to_path_buf()).unwrap();
        assert_eq!(ctx.config, config);
        assert_eq!(ctx.api.paths().data_dir, dir.path());
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{ nope").unwrap();
        let ctx = initialize_at(dir.path().to_path_buf()).unwrap();
        assert_eq!(ctx.config, LorelineConfig::default());
    }
}
