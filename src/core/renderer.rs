//! Line rendering
//!
//! A [`LineRenderer`] owns an ordered list of [`Column`]s. For each event it
//! runs the column whose key matches each named value, then the default
//! column over every field no column consumed, in the order the fields were
//! bound. Column outputs are joined with one space; empty columns add no
//! separator. The whole line is assembled before anything is written.

use super::error::Result;
use super::formatters::{
    ColumnFormatter, KeyValueFormatter, LevelFormatter, MessageFormatter, TimestampFormatter,
};
use super::highlighter::{Highlighter, HighlightRule};
use super::level_styles::LevelStyles;
use super::log_event::LogEvent;
use super::markup::MarkupParser;
use super::settings::RendererConfig;
use super::span::StyledText;
use std::fmt;
use std::sync::Arc;

/// One segment of the output line
///
/// A column with an empty key is the default column: it renders every field
/// not consumed by a keyed column.
pub struct Column {
    key: String,
    formatter: Box<dyn ColumnFormatter>,
}

impl Column {
    pub fn new<F>(key: impl Into<String>, formatter: F) -> Self
    where
        F: ColumnFormatter + 'static,
    {
        Self {
            key: key.into(),
            formatter: Box::new(formatter),
        }
    }

    /// Column for every field no keyed column consumes
    pub fn remaining<F>(formatter: F) -> Self
    where
        F: ColumnFormatter + 'static,
    {
        Self::new("", formatter)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_default(&self) -> bool {
        self.key.is_empty()
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("key", &self.key).finish()
    }
}

/// Fixed, ordered set of columns turning events into lines
#[derive(Debug)]
pub struct LineRenderer {
    columns: Vec<Column>,
    use_colors: bool,
}

impl LineRenderer {
    /// Renderer with a custom column layout
    ///
    /// # Example
    ///
    /// ```
    /// use rust_rich_logger::{Column, KeyValueFormatter, LevelFormatter, LevelStyles};
    /// use rust_rich_logger::{LineRenderer, LogEvent, LogLevel, MessageFormatter};
    /// use std::sync::Arc;
    ///
    /// // No timestamp column: the timestamp lands with the other fields
    /// let renderer = LineRenderer::new(vec![
    ///     Column::new("level", LevelFormatter::new(Arc::new(LevelStyles::default()))),
    ///     Column::new("event", MessageFormatter::default()),
    ///     Column::remaining(KeyValueFormatter::default()),
    /// ])
    /// .with_colors(false);
    ///
    /// let event = LogEvent::new(LogLevel::Info, "ready").with_field("port", 8080);
    /// let line = renderer.render(&event);
    /// assert!(line.starts_with("INFO      ready timestamp="));
    /// assert!(line.ends_with(" port=8080"));
    /// ```
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            use_colors: true,
        }
    }

    /// Standard layout: timestamp, level, message, remaining key/value pairs
    pub fn from_config(config: &RendererConfig) -> Result<Self> {
        let level_styles = if config.level_styles.is_empty() {
            LevelStyles::default()
        } else {
            LevelStyles::new(config.level_styles.clone())
        };

        let mut rules = config
            .highlight_rules
            .iter()
            .map(|rule| HighlightRule::new(&rule.name, &rule.pattern, rule.style.clone()))
            .collect::<Result<Vec<_>>>()?;
        if config.highlight {
            rules.extend(super::highlighter::default_rules());
        }

        let parser =
            MarkupParser::new(Arc::new(Highlighter::new(rules))).with_emoji(config.emoji);

        let columns = vec![
            Column::new(
                "timestamp",
                TimestampFormatter::new(
                    config.timestamp_format.clone(),
                    config.timestamp_style.clone(),
                ),
            ),
            Column::new("level", LevelFormatter::new(Arc::new(level_styles))),
            Column::new(
                "event",
                MessageFormatter::new(parser, config.message_style.clone()),
            ),
            Column::remaining(KeyValueFormatter::new(
                Some(config.key_style.clone()),
                config.value_style.clone(),
            )),
        ];

        Ok(Self::new(columns).with_colors(config.use_colors))
    }

    /// Emit bare text without escape sequences when `false`
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column outputs in order, empty columns dropped
    pub fn render_columns(&self, event: &LogEvent) -> Vec<StyledText> {
        let mut fields: Vec<_> = event.to_fields().into_iter().map(Some).collect();
        let mut parts = Vec::with_capacity(self.columns.len() + event.fields.len());

        for column in self.columns.iter().filter(|column| !column.is_default()) {
            let slot = fields
                .iter_mut()
                .find(|slot| matches!(slot, Some((key, _)) if *key == column.key));
            if let Some((key, value)) = slot.and_then(Option::take) {
                parts.push(column.formatter.format(key, &value));
            }
        }

        if let Some(default) = self.columns.iter().find(|column| column.is_default()) {
            for (key, value) in fields.into_iter().flatten() {
                parts.push(default.formatter.format(key, &value));
            }
        }

        parts.retain(|part| !part.is_empty());
        parts
    }

    /// Render one complete line, without the line terminator
    pub fn render(&self, event: &LogEvent) -> String {
        self.render_columns(event)
            .iter()
            .map(|part| part.render(self.use_colors))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new(vec![
            Column::new("timestamp", TimestampFormatter::default()),
            Column::new("level", LevelFormatter::new(Arc::new(LevelStyles::default()))),
            Column::new("event", MessageFormatter::default()),
            Column::remaining(KeyValueFormatter::default()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, LogLevel, Style};
    use chrono::{Local, TimeZone};

    fn event(level: LogLevel, message: &str) -> LogEvent {
        let at = Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        LogEvent::new(level, message).with_timestamp(at)
    }

    #[test]
    fn test_default_layout_plain() {
        let renderer = LineRenderer::default().with_colors(false);
        let line = renderer.render(&event(LogLevel::Info, "Starting application"));
        assert_eq!(line, "2025-01-08 10:30:45 INFO      Starting application");
    }

    #[test]
    fn test_default_layout_ansi() {
        let renderer = LineRenderer::default();
        let line = renderer.render(&event(LogLevel::Error, "boom").with_field("code", 7));
        assert_eq!(
            line,
            "\x1b[2;36m2025-01-08 10:30:45\x1b[0m \x1b[1;31mERROR\x1b[0m     boom \
             \x1b[36mcode\x1b[0m=\x1b[35m7\x1b[0m"
        );
    }

    #[test]
    fn test_fields_render_in_bound_order() {
        let renderer = LineRenderer::default().with_colors(false);
        let line = renderer.render(
            &event(LogLevel::Info, "m")
                .with_field("c", 3)
                .with_field("a", 1)
                .with_field("b", 2),
        );
        assert!(line.ends_with(" m c=3 a=1 b=2"), "{}", line);
    }

    #[test]
    fn test_empty_message_adds_no_separator() {
        let renderer = LineRenderer::default().with_colors(false);
        let line = renderer.render(&event(LogLevel::Info, ""));
        assert_eq!(line, "2025-01-08 10:30:45 INFO     ");
    }

    #[test]
    fn test_columns_only_consume_their_key() {
        let renderer = LineRenderer::new(vec![
            Column::new("event", MessageFormatter::default()),
            Column::remaining(KeyValueFormatter::default()),
        ])
        .with_colors(false);

        let line = renderer.render(&event(LogLevel::Debug, "hello"));
        assert!(line.starts_with("hello timestamp=2025-01-08 10:30:45 level=debug"));
    }

    #[test]
    fn test_without_default_column_extra_fields_are_dropped() {
        let renderer =
            LineRenderer::new(vec![Column::new("event", MessageFormatter::default())])
                .with_colors(false);
        let line = renderer.render(&event(LogLevel::Info, "only").with_field("x", 1));
        assert_eq!(line, "only");
    }

    #[test]
    fn test_closure_column() {
        let renderer = LineRenderer::new(vec![Column::new(
            "level",
            |_: &str, value: &FieldValue| {
                StyledText::styled(format!("<{}>", value), Style::new().bold())
            },
        )])
        .with_colors(false);
        assert_eq!(renderer.render(&event(LogLevel::Warning, "x")), "<warning>");
    }

    #[test]
    fn test_from_config_custom_rule_takes_priority() {
        let mut config = RendererConfig::default();
        config.use_colors = true;
        config.highlight_rules.push(crate::core::settings::HighlightRuleConfig {
            name: "ticket".to_string(),
            pattern: r"\bOPS-\d+\b".to_string(),
            style: Style::new().reverse(),
        });
        let renderer = LineRenderer::from_config(&config).expect("valid config");

        let parts = renderer.render_columns(&event(LogLevel::Info, "fixed OPS-42"));
        let message = &parts[2];
        assert_eq!(message.spans()[1].text, "OPS-42");
        assert_eq!(message.spans()[1].style, Style::new().reverse());
    }

    #[test]
    fn test_from_config_rejects_bad_rule() {
        let mut config = RendererConfig::default();
        config.highlight_rules.push(crate::core::settings::HighlightRuleConfig {
            name: "broken".to_string(),
            pattern: "(".to_string(),
            style: Style::new(),
        });
        assert!(LineRenderer::from_config(&config).is_err());
    }
}
