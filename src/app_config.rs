use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;
use crate::gloss::width::{CodepointRange, WidthTable};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Tier marker conventions
    #[serde(default)]
    pub tiers: TierConfig,

    /// Column layout settings
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Display width overrides
    #[serde(default)]
    pub width: WidthConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Tier marker conventions of the input dialect
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TierConfig {
    /// Recognized tier markers, in the order they cycle through a record
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,

    /// Text separating a marker from the first field
    #[serde(default = "default_marker_delimiter")]
    pub marker_delimiter: String,

    /// Leave records untouched unless they carry every configured marker
    #[serde(default)]
    pub require_complete_records: bool,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            markers: default_markers(),
            marker_delimiter: default_marker_delimiter(),
            require_complete_records: false,
        }
    }
}

impl TierConfig {
    /// Position of `marker` in the record cycle
    pub fn cycle_position(&self, marker: &str) -> Option<usize> {
        self.markers.iter().position(|m| m == marker)
    }
}

/// Column layout settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Minimum gap between columns, in display columns
    #[serde(default = "default_spacing")]
    pub spacing: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
        }
    }
}

/// Display width overrides for scripts the Unicode tables get wrong,
/// typically Private Use Area characters of field-linguistics fonts
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WidthConfig {
    /// Ranges to treat as zero-width combining marks
    #[serde(default)]
    pub combining_mark_ranges: Vec<CodepointRange>,

    /// Ranges to treat as double-width
    #[serde(default)]
    pub wide_ranges: Vec<CodepointRange>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_markers() -> Vec<String> {
    // Toolbox interlinear standard: text, morpheme break, gloss, part of speech
    ["\\t", "\\mb", "\\gl", "\\ps"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_marker_delimiter() -> String {
    " ".to_string()
}

fn default_spacing() -> usize {
    1
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tiers.markers.is_empty() {
            return Err(ConfigError::NoMarkers);
        }

        let mut seen = HashSet::new();
        for marker in &self.tiers.markers {
            if marker.is_empty() || marker.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidMarker(marker.clone()));
            }
            if !seen.insert(marker.as_str()) {
                return Err(ConfigError::DuplicateMarker(marker.clone()));
            }
        }

        let delimiter = &self.tiers.marker_delimiter;
        if delimiter.is_empty() || delimiter.contains(['\n', '\r']) {
            return Err(ConfigError::InvalidDelimiter(delimiter.clone()));
        }

        if self.layout.spacing == 0 {
            return Err(ConfigError::InvalidSpacing(self.layout.spacing));
        }

        for range in self.width.combining_mark_ranges.iter().chain(&self.width.wide_ranges) {
            CodepointRange::new(range.start, range.end)?;
        }

        Ok(())
    }

    /// Build the codepoint classifier for this configuration
    pub fn width_table(&self) -> WidthTable {
        WidthTable::new(
            self.width.combining_mark_ranges.clone(),
            self.width.wide_ranges.clone(),
        )
    }

    /// Load configuration from a JSON file, or `None` if it does not exist
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Some(config))
    }

    /// Save configuration as pretty-printed JSON
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        crate::file_utils::FileManager::write_to_file(path, &json)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            tiers: TierConfig::default(),
            layout: LayoutConfig::default(),
            width: WidthConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
