//! Styled text as an ordered run of spans

use super::style::Style;
use std::fmt;

/// A contiguous run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    pub text: String,
    pub style: Style,
}

impl StyleSpan {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::new())
    }

    pub fn render(&self) -> String {
        self.style.render(&self.text)
    }
}

/// Ordered sequence of [`StyleSpan`]s
///
/// Adjacent pushes with an equal style are merged and empty text is dropped,
/// so the span list is always the minimal one for its content.
///
/// # Example
///
/// ```
/// use rust_rich_logger::{Style, StyledText};
///
/// let mut text = StyledText::new();
/// text.push("status: ", Style::new());
/// text.push("ok", Style::parse("bold green").unwrap());
///
/// assert_eq!(text.plain(), "status: ok");
/// assert_eq!(text.to_ansi(), "status: \x1b[1;32mok\x1b[0m");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    spans: Vec<StyleSpan>,
}

impl StyledText {
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// Single span of `text` in `style`
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        let mut out = Self::new();
        out.push(text, style);
        out
    }

    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.spans.last_mut() {
            if last.style == style {
                last.text.push_str(&text);
                return;
            }
        }
        self.spans.push(StyleSpan { text, style });
    }

    pub fn push_plain(&mut self, text: impl Into<String>) {
        self.push(text, Style::new());
    }

    pub fn push_span(&mut self, span: StyleSpan) {
        self.push(span.text, span.style);
    }

    pub fn append(&mut self, other: StyledText) {
        for span in other.spans {
            self.push_span(span);
        }
    }

    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    pub fn into_spans(self) -> Vec<StyleSpan> {
        self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Text without any styling
    pub fn plain(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Visible width in characters
    pub fn width(&self) -> usize {
        self.spans.iter().map(|span| span.text.chars().count()).sum()
    }

    /// Pad with unstyled spaces up to `width` characters
    pub fn pad_to(&mut self, width: usize) {
        let missing = width.saturating_sub(self.width());
        if missing > 0 {
            self.push_plain(" ".repeat(missing));
        }
    }

    /// Rewrite every span's text, keeping styles
    pub fn map_text(self, f: impl Fn(&str) -> String) -> Self {
        let mut out = Self::new();
        for span in self.spans {
            out.push(f(&span.text), span.style);
        }
        out
    }

    /// ANSI encoding: every styled span is followed by a reset
    pub fn to_ansi(&self) -> String {
        self.spans.iter().map(StyleSpan::render).collect()
    }

    /// ANSI encoding, or the plain text when `use_colors` is off
    pub fn render(&self, use_colors: bool) -> String {
        if use_colors {
            self.to_ansi()
        } else {
            self.plain()
        }
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::styled(text, Style::new())
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::styled(text, Style::new())
    }
}

impl FromIterator<StyleSpan> for StyledText {
    fn from_iter<I: IntoIterator<Item = StyleSpan>>(iter: I) -> Self {
        let mut out = Self::new();
        for span in iter {
            out.push_span(span);
        }
        out
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain())
    }
}
