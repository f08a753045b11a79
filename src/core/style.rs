//! Text styles and their ANSI encoding
//!
//! A [`Style`] is a set of SGR attributes plus optional foreground/background
//! colours and an optional hyperlink. Styles are written in configuration and
//! markup as space separated definitions such as `"bold red on white"`.

use super::error::{LoggerError, Result};
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BOLD: u8 = 1 << 0;
const DIM: u8 = 1 << 1;
const ITALIC: u8 = 1 << 2;
const UNDERLINE: u8 = 1 << 3;
const BLINK: u8 = 1 << 4;
const REVERSE: u8 = 1 << 5;
const STRIKE: u8 = 1 << 6;

/// (flag, SGR code, canonical name, abbreviation)
const ATTRIBUTES: [(u8, &str, &str, &str); 7] = [
    (BOLD, "1", "bold", "b"),
    (DIM, "2", "dim", "d"),
    (ITALIC, "3", "italic", "i"),
    (UNDERLINE, "4", "underline", "u"),
    (BLINK, "5", "blink", "blink"),
    (REVERSE, "7", "reverse", "r"),
    (STRIKE, "9", "strike", "s"),
];

/// Sequence closing every styled region
pub const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Style {
    color: Option<Color>,
    bgcolor: Option<Color>,
    attributes: u8,
    link: Option<String>,
}

/// Style with no attributes; renders text untouched
pub static NEUTRAL: Style = Style::new();

impl Style {
    pub const fn new() -> Self {
        Self {
            color: None,
            bgcolor: None,
            attributes: 0,
            link: None,
        }
    }

    /// Parse a style definition such as `"bold bright_red on #202020"`
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_rich_logger::Style;
    ///
    /// let style = Style::parse("bold red").unwrap();
    /// assert_eq!(style.render("ALERT"), "\x1b[1;31mALERT\x1b[0m");
    /// assert!(Style::parse("shiny").is_err());
    /// ```
    pub fn parse(definition: &str) -> Result<Self> {
        let mut style = Style::new();
        let mut words = definition.split_whitespace().peekable();

        while let Some(word) = words.next() {
            if let Some(url) = word.strip_prefix("link=") {
                style.link = Some(url.to_string());
                continue;
            }

            let lower = word.to_lowercase();
            match lower.as_str() {
                "none" | "default" => {}
                "on" => {
                    let name = words.next().ok_or_else(|| {
                        LoggerError::invalid_style(definition, "'on' must be followed by a color")
                    })?;
                    let name = join_bright(name, &mut words);
                    style.bgcolor = Some(parse_color(&name).ok_or_else(|| {
                        LoggerError::invalid_style(definition, format!("unknown color '{}'", name))
                    })?);
                }
                _ => {
                    if let Some(flag) = attribute_flag(&lower) {
                        style.attributes |= flag;
                        continue;
                    }
                    let name = join_bright(&lower, &mut words);
                    let color = parse_color(&name).ok_or_else(|| {
                        LoggerError::invalid_style(
                            definition,
                            format!("unknown style word '{}'", name),
                        )
                    })?;
                    style.color = Some(color);
                }
            }
        }

        Ok(style)
    }

    #[must_use]
    pub fn fg(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn on(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.with_attribute(BOLD)
    }

    #[must_use]
    pub fn dim(self) -> Self {
        self.with_attribute(DIM)
    }

    #[must_use]
    pub fn italic(self) -> Self {
        self.with_attribute(ITALIC)
    }

    #[must_use]
    pub fn underline(self) -> Self {
        self.with_attribute(UNDERLINE)
    }

    #[must_use]
    pub fn blink(self) -> Self {
        self.with_attribute(BLINK)
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        self.with_attribute(REVERSE)
    }

    #[must_use]
    pub fn strike(self) -> Self {
        self.with_attribute(STRIKE)
    }

    #[must_use]
    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    fn with_attribute(mut self, flag: u8) -> Self {
        self.attributes |= flag;
        self
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn bgcolor(&self) -> Option<Color> {
        self.bgcolor
    }

    pub fn link_url(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn is_bold(&self) -> bool {
        self.attributes & BOLD != 0
    }

    /// True when rendering with this style emits no escape sequences
    pub fn is_null(&self) -> bool {
        self.color.is_none() && self.bgcolor.is_none() && self.attributes == 0 && self.link.is_none()
    }

    /// Layer `other` on top of this style. Colours and link in `other` win,
    /// attributes accumulate.
    #[must_use]
    pub fn combine(&self, other: &Style) -> Style {
        Style {
            color: other.color.or(self.color),
            bgcolor: other.bgcolor.or(self.bgcolor),
            attributes: self.attributes | other.attributes,
            link: other.link.clone().or_else(|| self.link.clone()),
        }
    }

    /// SGR parameter list, e.g. `"1;31"`
    pub fn sgr_codes(&self) -> String {
        let mut codes: Vec<String> = ATTRIBUTES
            .iter()
            .filter(|(flag, ..)| self.attributes & flag != 0)
            .map(|(_, code, ..)| (*code).to_string())
            .collect();
        if let Some(color) = self.color {
            codes.push(color.to_fg_str().into_owned());
        }
        if let Some(color) = self.bgcolor {
            codes.push(color.to_bg_str().into_owned());
        }
        codes.join(";")
    }

    /// Wrap `text` in this style's escape sequences, ending with a reset
    pub fn render(&self, text: &str) -> String {
        if self.is_null() || text.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + 16);
        if let Some(ref url) = self.link {
            out.push_str("\x1b]8;;");
            out.push_str(url);
            out.push_str("\x1b\\");
        }
        let codes = self.sgr_codes();
        if codes.is_empty() {
            out.push_str(text);
        } else {
            out.push_str("\x1b[");
            out.push_str(&codes);
            out.push('m');
            out.push_str(text);
            out.push_str(RESET);
        }
        if self.link.is_some() {
            out.push_str("\x1b]8;;\x1b\\");
        }
        out
    }
}

fn attribute_flag(word: &str) -> Option<u8> {
    ATTRIBUTES
        .iter()
        .find(|(_, _, name, abbrev)| *name == word || *abbrev == word)
        .map(|(flag, ..)| *flag)
}

/// Accept `bright red` written as two words
fn join_bright<'a, I>(word: &str, words: &mut std::iter::Peekable<I>) -> String
where
    I: Iterator<Item = &'a str>,
{
    if word.eq_ignore_ascii_case("bright") {
        if let Some(next) = words.next() {
            return format!("bright_{}", next.to_lowercase());
        }
    }
    word.to_lowercase()
}

fn parse_color(name: &str) -> Option<Color> {
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::TrueColor {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        });
    }
    Color::from_str(&name.replace('_', " ")).ok()
}

fn color_name(color: &Color) -> String {
    let name = match color {
        Color::Black => "black",
        Color::Red => "red",
        Color::Green => "green",
        Color::Yellow => "yellow",
        Color::Blue => "blue",
        Color::Magenta => "magenta",
        Color::Cyan => "cyan",
        Color::White => "white",
        Color::BrightBlack => "bright_black",
        Color::BrightRed => "bright_red",
        Color::BrightGreen => "bright_green",
        Color::BrightYellow => "bright_yellow",
        Color::BrightBlue => "bright_blue",
        Color::BrightMagenta => "bright_magenta",
        Color::BrightCyan => "bright_cyan",
        Color::BrightWhite => "bright_white",
        Color::TrueColor { r, g, b } => return format!("#{:02x}{:02x}{:02x}", r, g, b),
    };
    name.to_string()
}

/// Canonical definition string; parses back to an equal style
impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<String> = ATTRIBUTES
            .iter()
            .filter(|(flag, ..)| self.attributes & flag != 0)
            .map(|(_, _, name, _)| (*name).to_string())
            .collect();
        if let Some(ref color) = self.color {
            words.push(color_name(color));
        }
        if let Some(ref color) = self.bgcolor {
            words.push(format!("on {}", color_name(color)));
        }
        if let Some(ref url) = self.link {
            words.push(format!("link={}", url));
        }
        if words.is_empty() {
            return write!(f, "none");
        }
        write!(f, "{}", words.join(" "))
    }
}

impl FromStr for Style {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Style::parse(s)
    }
}

impl TryFrom<String> for Style {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self> {
        Style::parse(&value)
    }
}

impl From<Style> for String {
    fn from(style: Style) -> Self {
        style.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attributes_and_colors() {
        let style = Style::parse("reverse bold red").unwrap();
        assert!(style.is_bold());
        assert_eq!(style.color(), Some(Color::Red));
        assert_eq!(style.sgr_codes(), "1;7;31");
    }

    #[test]
    fn test_parse_bright_and_background() {
        let style = Style::parse("bright_green on blue").unwrap();
        assert_eq!(style.color(), Some(Color::BrightGreen));
        assert_eq!(style.bgcolor(), Some(Color::Blue));

        let spaced = Style::parse("bright green").unwrap();
        assert_eq!(spaced.color(), Some(Color::BrightGreen));
    }

    #[test]
    fn test_parse_hex_color() {
        let style = Style::parse("#ff8800").unwrap();
        assert_eq!(
            style.color(),
            Some(Color::TrueColor {
                r: 0xff,
                g: 0x88,
                b: 0x00
            })
        );
        assert!(Style::parse("#ff88").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_words() {
        let err = Style::parse("bold sparkly").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidStyle { .. }));
        assert!(Style::parse("on").is_err());
    }

    #[test]
    fn test_parse_link_keeps_case() {
        let style = Style::parse("link=https://Example.com/A").unwrap();
        assert_eq!(style.link_url(), Some("https://Example.com/A"));
    }

    #[test]
    fn test_render_wraps_and_resets() {
        let style = Style::new().dim().fg(Color::Cyan);
        assert_eq!(style.render("12:00"), "\x1b[2;36m12:00\x1b[0m");
    }

    #[test]
    fn test_null_style_renders_plain() {
        assert!(NEUTRAL.is_null());
        assert_eq!(NEUTRAL.render("plain"), "plain");
        assert!(Style::parse("").unwrap().is_null());
        assert!(Style::parse("none").unwrap().is_null());
    }

    #[test]
    fn test_render_link() {
        let style = Style::new().link("https://example.com");
        assert_eq!(
            style.render("site"),
            "\x1b]8;;https://example.com\x1b\\site\x1b]8;;\x1b\\"
        );
    }

    #[test]
    fn test_combine_layers_styles() {
        let base = Style::parse("bold red").unwrap();
        let top = Style::parse("italic blue").unwrap();
        let combined = base.combine(&top);
        assert_eq!(combined.color(), Some(Color::Blue));
        assert_eq!(combined.sgr_codes(), "1;3;34");
    }

    #[test]
    fn test_display_roundtrip() {
        let style = Style::parse("bold underline bright_blue on #102030").unwrap();
        let reparsed = Style::parse(&style.to_string()).unwrap();
        assert_eq!(style, reparsed);
    }
}
