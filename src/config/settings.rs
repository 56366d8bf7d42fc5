//! User settings for txn-series
//!
//! Manages the extraction rules (which event values feed the aggregator),
//! the concept tagging rules, tooltip rendering, the default reporting
//! window, and the log level.

use serde::{Deserialize, Serialize};

use super::paths::SeriesPaths;
use crate::error::SeriesError;
use crate::series::{ExtractionRules, TaggingRules};

/// Tooltip rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipSettings {
    /// Prefix of the link placed on the ID cell; the event id is appended
    #[serde(default = "default_link_base")]
    pub link_base: String,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            link_base: default_link_base(),
        }
    }
}

/// Default reporting window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettings {
    /// Window length in days when no explicit start is given
    #[serde(default = "default_window_days")]
    pub size_days: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            size_days: default_window_days(),
        }
    }
}

/// User settings for txn-series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Value names and tag prefixes read from each event
    #[serde(default)]
    pub extraction: ExtractionRules,

    /// Group and entity rules applied to events after loading
    #[serde(default)]
    pub tagging: TaggingRules,

    /// Tooltip rendering
    #[serde(default)]
    pub tooltip: TooltipSettings,

    /// Default reporting window
    #[serde(default)]
    pub window: WindowSettings,

    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_link_base() -> String {
    "/eboa_nav/query-event-links/".to_string()
}

fn default_window_days() -> u32 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            extraction: ExtractionRules::default(),
            tagging: TaggingRules::default(),
            tooltip: TooltipSettings::default(),
            window: WindowSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SeriesPaths) -> Result<Self, SeriesError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SeriesError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SeriesError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SeriesPaths) -> Result<(), SeriesError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SeriesError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            SeriesError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.extraction.amount, "amount");
        assert_eq!(settings.extraction.group_prefix, "group.");
        assert_eq!(settings.tooltip.link_base, "/eboa_nav/query-event-links/");
        assert_eq!(settings.window.size_days, 30);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeriesPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.extraction.concept = "description".to_string();
        settings.window.size_days = 90;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.extraction.concept, "description");
        assert_eq!(loaded.window.size_days, 90);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeriesPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"log_level": "debug"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.extraction, ExtractionRules::default());
        assert!(loaded.tagging.is_empty());
    }

    #[test]
    fn test_tagging_rules_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeriesPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"tagging": {
                "groups": [{"name": "Food", "rules": [{"match": "MERCADONA", "amount": "<0"}]}],
                "entities": [{"name": "Mercadona", "matching_strings": ["MERCADONA"]}]
            }}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.tagging.groups[0].name, "Food");
        assert_eq!(loaded.tagging.groups[0].rules[0].amount, crate::series::SignCondition::Negative);
        assert_eq!(loaded.tagging.entities[0].matching_strings, vec!["MERCADONA"]);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeriesPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, SeriesError::Config(_)));
    }
}
