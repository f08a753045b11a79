//! Automatic highlighting of scalar patterns in plain text
//!
//! A [`Highlighter`] holds an ordered list of [`HighlightRule`]s. Rules are
//! tried in declaration order; each one may only claim text no earlier rule
//! has claimed, and within the unclaimed text it takes leftmost matches.
//! Text no rule claims is returned with the neutral style.

use super::error::{LoggerError, Result};
use super::span::StyledText;
use super::style::Style;
use colored::Color;
use regex::Regex;
use std::sync::OnceLock;

/// Pattern and the style applied to its matches
#[derive(Debug, Clone)]
pub struct HighlightRule {
    name: String,
    regex: Regex,
    style: Style,
}

impl HighlightRule {
    /// Compile a rule
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_rich_logger::{HighlightRule, Style};
    ///
    /// let rule = HighlightRule::new("ticket", r"\bJIRA-\d+\b", Style::parse("bold").unwrap());
    /// assert!(rule.is_ok());
    /// assert!(HighlightRule::new("broken", r"(", Style::new()).is_err());
    /// ```
    pub fn new(name: impl Into<String>, pattern: &str, style: Style) -> Result<Self> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|source| LoggerError::InvalidPattern {
            rule: name.clone(),
            source,
        })?;
        Ok(Self { name, regex, style })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

// Hex group of an IPv6 address
const H: &str = "[0-9a-fA-F]{1,4}";

/// Built-in rule grammar, highest priority first
fn builtin_patterns() -> Vec<(&'static str, String, Style)> {
    let ipv6 = [
        format!(r"\b(?:{H}:){{7}}{H}\b"),
        format!(r"\b{H}:(?::{H}){{1,6}}\b"),
        format!(r"\b(?:{H}:){{1,2}}(?::{H}){{1,5}}\b"),
        format!(r"\b(?:{H}:){{1,3}}(?::{H}){{1,4}}\b"),
        format!(r"\b(?:{H}:){{1,4}}(?::{H}){{1,3}}\b"),
        format!(r"\b(?:{H}:){{1,5}}(?::{H}){{1,2}}\b"),
        format!(r"\b(?:{H}:){{1,6}}:{H}\b"),
        format!(r"\b(?:{H}:){{1,7}}:"),
        format!(r"::(?:{H}:){{0,6}}{H}\b"),
    ]
    .join("|");

    let address = Style::new().bold().fg(Color::BrightGreen);

    vec![
        (
            "url",
            r"\b(?:https?|wss?|ftp|file)://[-0-9a-zA-Z$_+!(),.?/;:&=%#~@]*".to_string(),
            Style::new().underline().fg(Color::BrightBlue),
        ),
        (
            "uuid",
            r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b"
                .to_string(),
            Style::new().fg(Color::BrightYellow),
        ),
        (
            "eui64",
            r"\b[0-9a-fA-F]{2}(?:[:-][0-9a-fA-F]{2}){7}\b".to_string(),
            address.clone(),
        ),
        (
            "eui48",
            r"\b[0-9a-fA-F]{2}(?:[:-][0-9a-fA-F]{2}){5}\b".to_string(),
            address.clone(),
        ),
        ("ipv6", ipv6, address.clone()),
        (
            "ipv4",
            r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b".to_string(),
            address,
        ),
        (
            "tag",
            r"</?[A-Za-z][\w.:-]*(?:\s[^<>]*)?/?>".to_string(),
            Style::new().bold().fg(Color::BrightMagenta),
        ),
        (
            "path",
            r"\B/[-\w.+]+(?:/[-\w.+]*)*".to_string(),
            Style::new().fg(Color::Magenta),
        ),
        (
            "str",
            r#""(?:[^"\\\n]|\\.)*""#.to_string(),
            Style::new().fg(Color::Green),
        ),
        (
            "bool_true",
            r"\b(?:True|true)\b".to_string(),
            Style::new().italic().fg(Color::BrightGreen),
        ),
        (
            "bool_false",
            r"\b(?:False|false)\b".to_string(),
            Style::new().italic().fg(Color::BrightRed),
        ),
        (
            "none",
            r"\b(?:None|null)\b".to_string(),
            Style::new().italic().fg(Color::Magenta),
        ),
        (
            "number_complex",
            r"(?:\B-)?\b[0-9]+(?:\.[0-9]+)?(?:[eE][-+]?[0-9]+)?(?:[-+][0-9]+(?:\.[0-9]+)?)?j\b"
                .to_string(),
            Style::new().bold().fg(Color::Cyan),
        ),
        (
            "number",
            r"\b0x[0-9a-fA-F]+\b|(?:\B-)?\b[0-9]+(?:\.[0-9]+)?(?:[eE][-+]?[0-9]+)?\b".to_string(),
            Style::new().bold().fg(Color::Cyan),
        ),
    ]
}

/// The built-in rule set, compiled once per process
pub fn default_rules() -> Vec<HighlightRule> {
    static RULES: OnceLock<Vec<HighlightRule>> = OnceLock::new();
    RULES
        .get_or_init(|| {
            builtin_patterns()
                .into_iter()
                .map(|(name, pattern, style)| {
                    HighlightRule::new(name, &pattern, style)
                        .expect("built-in highlight patterns compile")
                })
                .collect()
        })
        .clone()
}

/// Ordered, stateless set of highlight rules
#[derive(Debug, Clone)]
pub struct Highlighter {
    rules: Vec<HighlightRule>,
}

impl Highlighter {
    pub fn new(rules: Vec<HighlightRule>) -> Self {
        Self { rules }
    }

    /// Highlighter that leaves all text unstyled
    pub fn disabled() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    /// Split `text` into spans; concatenating the spans reproduces `text`
    ///
    /// # Example
    ///
    /// ```
    /// use rust_rich_logger::Highlighter;
    ///
    /// let spans = Highlighter::default().highlight("ping 10.0.0.1 ok");
    /// assert_eq!(spans.plain(), "ping 10.0.0.1 ok");
    /// assert_eq!(spans.spans()[1].text, "10.0.0.1");
    /// ```
    pub fn highlight(&self, text: &str) -> StyledText {
        let claims = self.claim(text);

        let mut out = StyledText::new();
        let mut start = 0;
        while start < text.len() {
            let owner = claims[start];
            let end = claims[start..]
                .iter()
                .position(|claim| *claim != owner)
                .map_or(text.len(), |len| start + len);
            let style = owner.map_or_else(Style::new, |idx| self.rules[idx].style.clone());
            out.push(&text[start..end], style);
            start = end;
        }
        out
    }

    /// Per-byte owning rule index
    fn claim(&self, text: &str) -> Vec<Option<usize>> {
        let mut claims: Vec<Option<usize>> = vec![None; text.len()];

        for (idx, rule) in self.rules.iter().enumerate() {
            let mut pos = 0;
            while pos < text.len() {
                if claims[pos].is_some() {
                    pos += 1;
                    continue;
                }
                let gap_end = claims[pos..]
                    .iter()
                    .position(Option::is_some)
                    .map_or(text.len(), |len| pos + len);

                match rule.regex.find_at(text, pos) {
                    Some(m) if m.start() < gap_end => {
                        if !m.is_empty() && m.end() <= gap_end {
                            claims[m.start()..m.end()].fill(Some(idx));
                            pos = m.end();
                        } else {
                            // Overlaps claimed text; retry just after its start.
                            pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
                        }
                    }
                    _ => pos = gap_end,
                }
            }
        }

        claims
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(default_rules())
    }
}
