//! Path management for txn-series
//!
//! Provides XDG-compliant path resolution for the configuration directory.
//!
//! ## Path Resolution Order
//!
//! 1. `TXN_SERIES_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/txn-series` or `~/.config/txn-series`
//! 3. Windows: `%APPDATA%\txn-series`

use std::path::PathBuf;

use crate::error::SeriesError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "TXN_SERIES_CONFIG_DIR";

/// Manages all paths used by txn-series
#[derive(Debug, Clone)]
pub struct SeriesPaths {
    /// Base directory for configuration
    base_dir: PathBuf,
}

impl SeriesPaths {
    /// Create a new SeriesPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override, the XDG variables nor the
    /// home directory can be determined.
    pub fn new() -> Result<Self, SeriesError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SeriesPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/txn-series/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), SeriesError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            SeriesError::Io(format!("Failed to create config directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SeriesError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join("txn-series"));
        }
    }

    let home = std::env::var("HOME")
        .map_err(|_| SeriesError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("txn-series"))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SeriesError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SeriesError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("txn-series"))
}
