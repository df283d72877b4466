//! Configuration for the gazekit toolkit.
//!
//! Header-skip counts and the media offset are instrument-export settings
//! that vary between studies; they live here as named values rather than
//! literals scattered through the readers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default header lines before the first data line of a sample log.
pub const DEFAULT_SAMPLE_HEADER_LINES: usize = 19;
/// Default header lines before the first data line of a fixation log.
pub const DEFAULT_FIXATION_HEADER_LINES: usize = 19;
/// Default header lines before the first data line of an event log.
pub const DEFAULT_EVENT_HEADER_LINES: usize = 19;
/// Default extra header lines some exporter versions append to event logs.
pub const DEFAULT_EXTRA_HEADER_LINES: usize = 8;

/// Toolkit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Header lines to skip in sample logs
    pub sample_header_lines: usize,

    /// Header lines to skip in fixation logs
    pub fixation_header_lines: usize,

    /// Header lines to skip in event logs
    pub event_header_lines: usize,

    /// Additional header lines appended to event logs by some exporters
    pub extra_header_lines: usize,

    /// Top-left corner of the studied interface window, (0, 0) when the
    /// interface was full screen
    pub media_offset: (i64, i64),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_header_lines: DEFAULT_SAMPLE_HEADER_LINES,
            fixation_header_lines: DEFAULT_FIXATION_HEADER_LINES,
            event_header_lines: DEFAULT_EVENT_HEADER_LINES,
            extra_header_lines: DEFAULT_EXTRA_HEADER_LINES,
            media_offset: (0, 0),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gazekit")
            .join("config.json")
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
