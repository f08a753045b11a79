//! `:name:` emoji codes

const EMOJI_VARIANT: char = '\u{FE0F}';
const TEXT_VARIANT: char = '\u{FE0E}';

/// Sorted by name for binary search
static EMOJI: &[(&str, &str)] = &[
    ("+1", "👍"),
    ("-1", "👎"),
    ("bell", "🔔"),
    ("bomb", "💣"),
    ("boom", "💥"),
    ("bug", "🐛"),
    ("check_mark", "✔"),
    ("clock", "🕐"),
    ("cloud", "☁"),
    ("construction", "🚧"),
    ("cross_mark", "❌"),
    ("exclamation", "❗"),
    ("eyes", "👀"),
    ("fire", "🔥"),
    ("gear", "⚙"),
    ("heart", "❤"),
    ("hourglass", "⌛"),
    ("information", "ℹ"),
    ("key", "🔑"),
    ("laptop", "💻"),
    ("lock", "🔒"),
    ("mag", "🔍"),
    ("memo", "📝"),
    ("package", "📦"),
    ("question", "❓"),
    ("rocket", "🚀"),
    ("scream", "😱"),
    ("skull", "💀"),
    ("smile", "😄"),
    ("snail", "🐌"),
    ("sparkles", "✨"),
    ("star", "⭐"),
    ("stop_sign", "🛑"),
    ("tada", "🎉"),
    ("thumbs_down", "👎"),
    ("thumbs_up", "👍"),
    ("unlock", "🔓"),
    ("warning", "⚠"),
    ("wrench", "🔧"),
    ("x", "❌"),
    ("zap", "⚡"),
];

pub fn lookup(name: &str) -> Option<&'static str> {
    EMOJI
        .binary_search_by(|(key, _)| (*key).cmp(name))
        .ok()
        .map(|idx| EMOJI[idx].1)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')
}

/// Resolve a code body such as `warning-emoji` to its replacement
fn resolve(code: &str) -> Option<String> {
    let (name, variant) = if let Some(name) = code.strip_suffix("-emoji") {
        (name, Some(EMOJI_VARIANT))
    } else if let Some(name) = code.strip_suffix("-text") {
        (name, Some(TEXT_VARIANT))
    } else {
        (code, None)
    };

    let mut out = lookup(&name.to_lowercase())?.to_string();
    out.extend(variant);
    Some(out)
}

/// Replace every known `:name:` code; unknown codes stay as written
pub fn replace(text: &str) -> String {
    if !text.contains(':') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(':') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let body_len = after.find(|c: char| !is_name_char(c)).unwrap_or(after.len());

        if body_len > 0 && after[body_len..].starts_with(':') {
            if let Some(emoji) = resolve(&after[..body_len]) {
                out.push_str(&emoji);
                rest = &after[body_len + 1..];
                continue;
            }
        }

        // Not a code; the closing colon may still open the next one.
        out.push(':');
        rest = after;
    }
    out.push_str(rest);
    out
}
