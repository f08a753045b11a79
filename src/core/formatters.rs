//! Column formatters
//!
//! Each column of a rendered line is produced by one [`ColumnFormatter`]: a
//! pure function from a named field to styled text. None of them fail; a value
//! they do not expect is rendered through its `Display` form instead.

use super::level_styles::LevelStyles;
use super::log_context::FieldValue;
use super::markup::MarkupParser;
use super::span::StyledText;
use super::style::Style;
use super::timestamp::TimestampFormat;
use colored::Color;
use std::sync::Arc;

pub trait ColumnFormatter: Send + Sync {
    fn format(&self, key: &str, value: &FieldValue) -> StyledText;
}

impl<F> ColumnFormatter for F
where
    F: Fn(&str, &FieldValue) -> StyledText + Send + Sync,
{
    fn format(&self, key: &str, value: &FieldValue) -> StyledText {
        self(key, value)
    }
}

/// Renders the event instant with a fixed format and a single style
#[derive(Debug, Clone)]
pub struct TimestampFormatter {
    format: TimestampFormat,
    style: Style,
}

impl TimestampFormatter {
    pub fn new(format: TimestampFormat, style: Style) -> Self {
        Self { format, style }
    }
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self::new(TimestampFormat::default(), Style::new().dim().fg(Color::Cyan))
    }
}

impl ColumnFormatter for TimestampFormatter {
    fn format(&self, _key: &str, value: &FieldValue) -> StyledText {
        let text = match value {
            FieldValue::Timestamp(ts) => self.format.format(ts),
            other => other.to_string(),
        };
        StyledText::styled(text, self.style.clone())
    }
}

/// Upper-cased severity name, styled from the level table and padded with
/// unstyled spaces to the widest known name
#[derive(Debug, Clone)]
pub struct LevelFormatter {
    styles: Arc<LevelStyles>,
}

impl LevelFormatter {
    pub fn new(styles: Arc<LevelStyles>) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &LevelStyles {
        &self.styles
    }
}

impl ColumnFormatter for LevelFormatter {
    fn format(&self, _key: &str, value: &FieldValue) -> StyledText {
        let name = value.to_string();
        let style = self.styles.style_for(&name).clone();
        let mut out = StyledText::styled(name.to_uppercase(), style);
        out.pad_to(self.styles.max_name_width());
        out
    }
}

/// Decorations shared by the message and key/value columns
#[derive(Debug, Clone, Default)]
struct Frame {
    key_style: Option<Style>,
    width: usize,
    prefix: String,
    postfix: String,
}

impl Frame {
    fn wrap(&self, key: &str, body: StyledText) -> StyledText {
        let mut out = StyledText::new();
        out.push_plain(self.prefix.as_str());
        if let Some(ref key_style) = self.key_style {
            out.push(key, key_style.clone());
            out.push_plain("=");
        }
        out.append(body);
        out.push_plain(self.postfix.as_str());
        out
    }

    /// Generic fallback: `Display` form, padded, in one style
    fn scalar(&self, value: &FieldValue, style: &Style) -> StyledText {
        let text = value.to_string();
        let missing = self.width.saturating_sub(text.chars().count());
        StyledText::styled(format!("{}{}", text, " ".repeat(missing)), style.clone())
    }
}

/// Message column: strings go through markup and highlighting, pre-styled
/// text is emitted verbatim, any other value uses the fallback style
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    parser: MarkupParser,
    value_style: Style,
    frame: Frame,
}

impl MessageFormatter {
    pub fn new(parser: MarkupParser, value_style: Style) -> Self {
        Self {
            parser,
            value_style,
            frame: Frame::default(),
        }
    }

    /// Render `key=` before the message
    #[must_use]
    pub fn with_key_style(mut self, style: Style) -> Self {
        self.frame.key_style = Some(style);
        self
    }

    /// Minimum width for fallback-rendered values
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.frame.width = width;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.frame.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.frame.postfix = postfix.into();
        self
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new(MarkupParser::default(), Style::new().fg(Color::White))
    }
}

impl ColumnFormatter for MessageFormatter {
    fn format(&self, key: &str, value: &FieldValue) -> StyledText {
        let body = match value {
            FieldValue::String(markup) => self.parser.parse(markup),
            FieldValue::Styled(text) => text.clone(),
            other => self.frame.scalar(other, &self.value_style),
        };
        self.frame.wrap(key, body)
    }
}

/// `key=value` column with one style for keys and another for values
#[derive(Debug, Clone)]
pub struct KeyValueFormatter {
    value_style: Style,
    frame: Frame,
}

impl KeyValueFormatter {
    /// `key_style` of `None` renders the bare value
    pub fn new(key_style: Option<Style>, value_style: Style) -> Self {
        Self {
            value_style,
            frame: Frame {
                key_style,
                ..Frame::default()
            },
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.frame.width = width;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.frame.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.frame.postfix = postfix.into();
        self
    }
}

impl Default for KeyValueFormatter {
    fn default() -> Self {
        Self::new(
            Some(Style::new().fg(Color::Cyan)),
            Style::new().fg(Color::Magenta),
        )
    }
}

impl ColumnFormatter for KeyValueFormatter {
    fn format(&self, key: &str, value: &FieldValue) -> StyledText {
        let body = match value {
            FieldValue::Styled(text) => text.clone(),
            other => self.frame.scalar(other, &self.value_style),
        };
        self.frame.wrap(key, body)
    }
}
