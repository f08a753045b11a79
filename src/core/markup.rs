//! Inline markup parsing
//!
//! Messages may carry `[style]text[/style]` tags. Tagged regions keep the
//! author's style and are never highlighted; everything else is handed to the
//! [`Highlighter`]. Tag syntax follows these rules:
//!
//! - a tag body starts with a lowercase letter, `#` or `/`, so `[INFO]` or
//!   `[1, 2]` stay literal;
//! - `[/]` closes the most recent open tag, `[/name]` the innermost open tag
//!   written as `[name]`;
//! - an opening tag that is never closed, a closing tag with nothing to close
//!   and a tag whose body is not a valid style are all literal text;
//! - `\[` is a literal bracket.

use super::emoji;
use super::highlighter::Highlighter;
use super::span::StyledText;
use super::style::Style;
use std::sync::Arc;

#[derive(Debug)]
enum Token {
    Text(String),
    Open { tag: String, style: Style, raw: String },
    Close { tag: Option<String>, raw: String },
}

impl Token {
    fn raw(&self) -> &str {
        match self {
            Token::Text(text) => text,
            Token::Open { raw, .. } | Token::Close { raw, .. } => raw,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarkupParser {
    highlighter: Arc<Highlighter>,
    emoji: bool,
}

impl MarkupParser {
    pub fn new(highlighter: Arc<Highlighter>) -> Self {
        Self {
            highlighter,
            emoji: true,
        }
    }

    /// Enable or disable `:name:` emoji substitution
    #[must_use]
    pub fn with_emoji(mut self, emoji: bool) -> Self {
        self.emoji = emoji;
        self
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Parse `markup` into styled spans
    ///
    /// # Example
    ///
    /// ```
    /// use rust_rich_logger::MarkupParser;
    ///
    /// let parser = MarkupParser::default();
    /// let text = parser.parse("[bold red]ALERT![/bold red] disk at 91%");
    ///
    /// assert_eq!(text.plain(), "ALERT! disk at 91%");
    /// assert_eq!(text.spans()[0].style.sgr_codes(), "1;31");
    /// ```
    pub fn parse(&self, markup: &str) -> StyledText {
        let tokens = self.tokenize(markup);
        let partners = pair_tags(&tokens);

        let mut out = StyledText::new();
        let mut plain = String::new();
        let mut active: Vec<(usize, &Style)> = Vec::new();

        for (idx, token) in tokens.iter().enumerate() {
            match (token, partners[idx]) {
                (Token::Open { style, .. }, Some(_)) => active.push((idx, style)),
                (Token::Close { .. }, Some(open)) => active.retain(|(opened, _)| *opened != open),
                (Token::Open { .. } | Token::Close { .. }, None) => {
                    // Unpaired tags are literal text, kept out of highlighting
                    let style = active
                        .iter()
                        .fold(Style::new(), |acc, (_, style)| acc.combine(style));
                    self.flush_plain(&mut plain, &mut out);
                    out.push(token.raw(), style);
                }
                _ => {
                    let style = active
                        .iter()
                        .fold(Style::new(), |acc, (_, style)| acc.combine(style));
                    if style.is_null() {
                        plain.push_str(token.raw());
                    } else {
                        self.flush_plain(&mut plain, &mut out);
                        out.push(token.raw(), style);
                    }
                }
            }
        }
        self.flush_plain(&mut plain, &mut out);

        out
    }

    fn flush_plain(&self, plain: &mut String, out: &mut StyledText) {
        if !plain.is_empty() {
            out.append(self.highlighter.highlight(plain));
            plain.clear();
        }
    }

    fn tokenize(&self, markup: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut pos = 0;

        while let Some(offset) = markup[pos..].find(['[', '\\']) {
            let at = pos + offset;
            text.push_str(&markup[pos..at]);

            if markup[at..].starts_with("\\[") {
                text.push('[');
                pos = at + 2;
                continue;
            }
            if markup[at..].starts_with('\\') {
                text.push('\\');
                pos = at + 1;
                continue;
            }

            match parse_tag(&markup[at..]) {
                Some((token, len)) => {
                    self.push_text(&mut tokens, &mut text);
                    tokens.push(token);
                    pos = at + len;
                }
                None => {
                    text.push('[');
                    pos = at + 1;
                }
            }
        }
        text.push_str(&markup[pos..]);
        self.push_text(&mut tokens, &mut text);

        tokens
    }

    fn push_text(&self, tokens: &mut Vec<Token>, text: &mut String) {
        if text.is_empty() {
            return;
        }
        let content = std::mem::take(text);
        let content = if self.emoji {
            emoji::replace(&content)
        } else {
            content
        };
        tokens.push(Token::Text(content));
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new(Arc::new(Highlighter::default()))
    }
}

/// Recognize a tag at the start of `input` (which begins with `[`).
/// Returns the token and the number of bytes it spans.
fn parse_tag(input: &str) -> Option<(Token, usize)> {
    let body_end = input[1..].find([']', '['])? + 1;
    if !input[body_end..].starts_with(']') {
        return None;
    }
    let body = &input[1..body_end];
    let raw = input[..=body_end].to_string();
    let len = body_end + 1;

    let first = body.chars().next()?;
    if !(first.is_ascii_lowercase() || first == '#' || first == '/') {
        return None;
    }

    if let Some(name) = body.strip_prefix('/') {
        let name = name.trim();
        let tag = (!name.is_empty()).then(|| name.to_string());
        return Some((Token::Close { tag, raw }, len));
    }

    let style = Style::parse(body).ok()?;
    let tag = body.trim().to_string();
    Some((Token::Open { tag, style, raw }, len))
}

/// `[/link]` closes `[link=...]`
fn closes(open_tag: &str, name: &str) -> bool {
    open_tag == name || open_tag.split('=').next().is_some_and(|key| key.trim() == name)
}

/// Match closing tags to opening tags; `partners[i]` is the index of the
/// token paired with token `i`, `None` for text and unpaired tags.
fn pair_tags(tokens: &[Token]) -> Vec<Option<usize>> {
    let mut partners = vec![None; tokens.len()];
    let mut open: Vec<usize> = Vec::new();

    for (idx, token) in tokens.iter().enumerate() {
        match token {
            Token::Open { .. } => open.push(idx),
            Token::Close { tag, .. } => {
                let found = match tag {
                    None => open.len().checked_sub(1),
                    Some(name) => open.iter().rposition(|&candidate| {
                        matches!(&tokens[candidate], Token::Open { tag, .. } if closes(tag, name))
                    }),
                };
                if let Some(stack_pos) = found {
                    let opener = open.remove(stack_pos);
                    partners[opener] = Some(idx);
                    partners[idx] = Some(opener);
                }
            }
            Token::Text(_) => {}
        }
    }

    partners
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> MarkupParser {
        MarkupParser::default()
    }

    fn styled_texts(text: &StyledText) -> Vec<(String, String)> {
        text.spans()
            .iter()
            .filter(|span| !span.style.is_null())
            .map(|span| (span.text.clone(), span.style.to_string()))
            .collect()
    }

    #[test]
    fn test_explicit_style_is_not_highlighted() {
        let text = parser().parse("[bold]42[/bold]");
        assert_eq!(text.spans().len(), 1);
        assert_eq!(text.spans()[0].text, "42");
        assert_eq!(text.spans()[0].style, Style::new().bold());
    }

    #[test]
    fn test_plain_regions_are_highlighted() {
        let text = parser().parse("[italic]host[/italic] 192.168.1.1");
        let styled = styled_texts(&text);
        assert_eq!(styled[0], ("host".to_string(), "italic".to_string()));
        assert_eq!(styled[1].0, "192.168.1.1");
    }

    #[test]
    fn test_generic_close_tag() {
        let text = parser().parse("[red]a[/] b");
        assert_eq!(text.plain(), "a b");
        assert_eq!(styled_texts(&text), vec![("a".to_string(), "red".to_string())]);
    }

    #[test]
    fn test_nested_styles_combine() {
        let text = parser().parse("[bold][red]x[/red]y[/bold]");
        assert_eq!(
            styled_texts(&text),
            vec![
                ("x".to_string(), "bold red".to_string()),
                ("y".to_string(), "bold".to_string()),
            ]
        );
    }

    #[test]
    fn test_same_tag_nesting_closes_innermost() {
        let text = parser().parse("[bold]a[bold]b[/bold]c[/bold]");
        assert_eq!(text.plain(), "abc");
        assert_eq!(text.spans().len(), 1);
    }

    #[test]
    fn test_unterminated_tag_is_literal() {
        let text = parser().parse("[bold]never closed");
        assert_eq!(text.plain(), "[bold]never closed");
        assert!(text.spans().iter().all(|span| span.style.is_null()));

        let text = parser().parse("open [bold without bracket");
        assert_eq!(text.plain(), "open [bold without bracket");
    }

    #[test]
    fn test_stray_close_is_literal() {
        let text = parser().parse("done[/bold]");
        assert_eq!(text.plain(), "done[/bold]");
        assert!(text.spans().iter().all(|span| span.style.is_null()));

        let text = parser().parse("[bold]x[/red] y[/bold]");
        assert_eq!(text.plain(), "x[/red] y");
        assert!(text.spans().iter().all(|span| span.style == Style::new().bold()));
    }

    #[test]
    fn test_non_style_brackets_stay_literal() {
        assert_eq!(parser().parse("[INFO] x").plain(), "[INFO] x");
        assert_eq!(parser().parse("list [1, 2]").plain(), "list [1, 2]");
        assert_eq!(parser().parse("[sparkly]x[/sparkly]").plain(), "[sparkly]x[/sparkly]");
    }

    #[test]
    fn test_escaped_bracket() {
        let text = parser().parse(r"\[bold]literal\[/bold]");
        assert_eq!(text.plain(), "[bold]literal[/bold]");
    }

    #[test]
    fn test_link_tag() {
        let text = parser().parse("Visit our [link=https://map4.jp]website[/link]!");
        assert_eq!(text.plain(), "Visit our website!");
        let link = text
            .spans()
            .iter()
            .find(|span| span.text == "website")
            .expect("link span");
        assert_eq!(link.style.link_url(), Some("https://map4.jp"));
    }

    #[test]
    fn test_emoji_substitution() {
        assert_eq!(parser().parse(":fire: :boom:").plain(), "🔥 💥");
        assert_eq!(
            parser().with_emoji(false).parse(":fire:").plain(),
            ":fire:"
        );
    }

    #[test]
    fn test_empty_message() {
        assert!(parser().parse("").is_empty());
    }

    #[test]
    fn test_null_style_region_is_highlighted() {
        let text = parser().parse("[none]42[/none]");
        assert_eq!(text.plain(), "42");
        assert!(text.spans()[0].style.is_bold());
    }
}
