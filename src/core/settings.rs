//! Declarative renderer and logger configuration
//!
//! Everything here is plain `serde` data. Styles are written as definition
//! strings (`"bold red"`) and level thresholds as names (`"warning"`), so an
//! invalid value is rejected while the settings are being loaded.

use super::error::Result;
use super::log_level::LogLevel;
use super::style::Style;
use super::timestamp::TimestampFormat;
use colored::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A user-supplied highlight rule, tried before the built-in ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightRuleConfig {
    pub name: String,
    pub pattern: String,
    pub style: Style,
}

/// Everything needed to build the standard four-column renderer
///
/// # Example
///
/// ```
/// use rust_rich_logger::RendererConfig;
///
/// let config: RendererConfig = serde_json::from_str(
///     r#"{ "level_styles": { "info": "bold green" }, "use_colors": false }"#,
/// ).unwrap();
/// assert!(!config.use_colors);
/// assert!(config.highlight);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub timestamp_format: TimestampFormat,
    pub timestamp_style: Style,
    /// Replaces the built-in level table when non-empty
    pub level_styles: BTreeMap<String, Style>,
    pub message_style: Style,
    pub key_style: Style,
    pub value_style: Style,
    /// Run the built-in highlight rules over unstyled message text
    pub highlight: bool,
    pub highlight_rules: Vec<HighlightRuleConfig>,
    pub emoji: bool,
    pub use_colors: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            timestamp_style: Style::new().dim().fg(Color::Cyan),
            level_styles: BTreeMap::new(),
            message_style: Style::new().fg(Color::White),
            key_style: Style::new().fg(Color::Cyan),
            value_style: Style::new().fg(Color::Magenta),
            highlight: true,
            highlight_rules: Vec::new(),
            emoji: true,
            use_colors: true,
        }
    }
}

impl RendererConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Threshold plus renderer configuration, as loaded from a settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub min_level: LogLevel,
    pub renderer: RendererConfig,
}

impl LoggerSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
