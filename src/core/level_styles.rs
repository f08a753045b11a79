//! Severity name to style lookup
//!
//! The table is built once at configuration time and only read afterwards,
//! so it can be shared behind an `Arc` by every render call.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::style::{Style, NEUTRAL};
use colored::Color;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct LevelStyles {
    styles: HashMap<String, Style>,
    width: usize,
}

impl LevelStyles {
    /// Build a table from `(name, style)` pairs; names are matched case-insensitively
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Style)>,
        K: Into<String>,
    {
        let styles: HashMap<String, Style> = entries
            .into_iter()
            .map(|(name, style)| (name.into().to_lowercase(), style))
            .collect();

        // Every LogLevel belongs to the vocabulary even without an entry,
        // so a level missing from the table still pads to the same column.
        let width = styles
            .keys()
            .map(|name| name.chars().count())
            .chain(LogLevel::ALL.iter().map(|level| level.name().len()))
            .max()
            .unwrap_or(0);

        Self { styles, width }
    }

    /// Build a table from style definition strings
    pub fn from_definitions<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let parsed = entries
            .into_iter()
            .map(|(name, definition)| {
                let name = name.into();
                if name.trim().is_empty() {
                    return Err(LoggerError::config("LevelStyles", "empty level name"));
                }
                Ok((name, Style::parse(definition.as_ref())?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(parsed))
    }

    /// Style for a severity name; unknown names get the neutral style
    pub fn style_for(&self, name: &str) -> &Style {
        self.styles.get(&name.to_lowercase()).unwrap_or(&NEUTRAL)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(&name.to_lowercase())
    }

    /// Width of the widest known severity name
    pub fn max_name_width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for LevelStyles {
    fn default() -> Self {
        Self::new([
            ("critical", Style::new().reverse().bold().fg(Color::Red)),
            ("exception", Style::new().bold().fg(Color::Red)),
            ("error", Style::new().bold().fg(Color::Red)),
            ("warn", Style::new().bold().fg(Color::Yellow)),
            ("warning", Style::new().bold().fg(Color::Yellow)),
            ("info", Style::new().fg(Color::Blue)),
            ("debug", Style::new().dim().fg(Color::Blue)),
            ("notset", Style::new().dim()),
        ])
    }
}
