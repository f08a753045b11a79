//! Structured key-value fields
//!
//! This module provides:
//! - `FieldValue`: one bound value (plain text, pre-styled text or a scalar)
//! - `LogContext`: an insertion-ordered set of fields

use super::span::StyledText;
use chrono::{DateTime, Local};
use std::fmt;

/// Value type for structured logging fields
///
/// Text goes through markup and highlighting when it lands in the message
/// column; `Styled` text is rendered exactly as given; every other variant is
/// rendered through its `Display` form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Styled(StyledText),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Local>),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Styled(text) => write!(f, "{}", text),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Escape line breaks and tabs in text so one event stays one line
    #[must_use]
    pub fn sanitized(self) -> Self {
        match self {
            FieldValue::String(s) => FieldValue::String(sanitize(&s)),
            FieldValue::Styled(text) => FieldValue::Styled(text.map_text(sanitize)),
            other => other,
        }
    }
}

/// Replaces newlines, carriage returns and tabs with escape sequences so a
/// message cannot forge extra log lines.
pub(crate) fn sanitize(text: &str) -> String {
    if !text.contains(['\n', '\r', '\t']) {
        return text.to_string();
    }
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<StyledText> for FieldValue {
    fn from(text: StyledText) -> Self {
        FieldValue::Styled(text)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::UInt(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::UInt(u as u64)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::UInt(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<DateTime<Local>> for FieldValue {
    fn from(ts: DateTime<Local>) -> Self {
        FieldValue::Timestamp(ts)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Insertion-ordered key-value fields
///
/// Setting a key that is already present replaces its value in place, so
/// fields always render in the order they were first bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    fields: Vec<(String, FieldValue)>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.add_field(key, value);
        self
    }

    /// Add a field to the context (mutable version)
    ///
    /// Keys are sanitized here so no path into a context can carry a line
    /// break into the rendered `key=value` pair.
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = sanitize(&key.into());
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let idx = self.fields.iter().position(|(existing, _)| existing == key)?;
        Some(self.fields.remove(idx).1)
    }

    /// Overlay `other`: its values win, new keys are appended in its order
    pub fn merge(&mut self, other: LogContext) {
        for (key, value) in other.fields {
            self.add_field(key, value);
        }
    }

    /// Get all fields
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Format fields as unstyled key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for LogContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = LogContext::new();
        for (key, value) in iter {
            ctx.add_field(key, value);
        }
        ctx
    }
}
