use crate::calendar::Granularity;
use crate::error::{LorelineError, Result};
use crate::timeline::{ExportGroupBy, ExportOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by [`LorelineConfig::get`] and [`LorelineConfig::set`].
pub const CONFIG_KEYS: [&str; 4] = [
    "default-level",
    "export-description",
    "export-tags",
    "export-group-by",
];

/// Application settings, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LorelineConfig {
    /// Granularity used by `timeline` when none is given
    #[serde(default = "default_level")]
    pub default_level: Granularity,

    #[serde(default = "default_true")]
    pub export_description: bool,

    #[serde(default)]
    pub export_tags: bool,

    #[serde(default)]
    pub export_group_by: ExportGroupBy,
}

fn default_level() -> Granularity {
    Granularity::Century
}

fn default_true() -> bool {
    true
}

impl Default for LorelineConfig {
    fn default() -> Self {
        Self {
            default_level: default_level(),
            export_description: true,
            export_tags: false,
            export_group_by: ExportGroupBy::None,
        }
    }
}

impl LorelineConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LorelineError::Io)?;
        let config: LorelineConfig =
            serde_json::from_str(&content).map_err(LorelineError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LorelineError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(LorelineError::Serialization)?;
        fs::write(config_path, content).map_err(LorelineError::Io)?;
        Ok(())
    }

    /// Export options seeded from the stored defaults
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            include_description: self.export_description,
            include_tags: self.export_tags,
            group_by: self.export_group_by,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-level" => Some(self.default_level.to_string()),
            "export-description" => Some(self.export_description.to_string()),
            "export-tags" => Some(self.export_tags.to_string()),
            "export-group-by" => Some(self.export_group_by.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "default-level" => self.default_level = value.parse()?,
            "export-description" => self.export_description = parse_bool(value)?,
            "export-tags" => self.export_tags = parse_bool(value)?,
            "export-group-by" => self.export_group_by = value.parse()?,
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("Expected true or false, got {}", other)),
    }
}
