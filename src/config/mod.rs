//! Configuration module for txn-series
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SeriesPaths;
pub use settings::{Settings, TooltipSettings, WindowSettings};
