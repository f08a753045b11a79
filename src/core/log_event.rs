//! Log event structure

use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use chrono::{DateTime, Local};

/// One log call, ready to be rendered
///
/// Text in the message and in every field is sanitized on construction so a
/// rendered event always fits on a single line. This applies to pre-styled
/// [`FieldValue::Styled`] values too: their spans are otherwise used verbatim,
/// but line breaks in their text are still escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
    pub message: FieldValue,
    pub fields: LogContext,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<FieldValue>) -> Self {
        Self {
            level,
            timestamp: Local::now(),
            message: message.into().sanitized(),
            fields: LogContext::new(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.add_field(key, value.into().sanitized());
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: LogContext) -> Self {
        for (key, value) in context.fields().iter().cloned() {
            self.fields.add_field(key, value.sanitized());
        }
        self
    }

    /// Every named value of the event in render order: the timestamp, the
    /// level name, the message, then the bound fields as bound.
    pub fn to_fields(&self) -> Vec<(&str, FieldValue)> {
        let mut all = Vec::with_capacity(self.fields.len() + 3);
        all.push(("timestamp", FieldValue::Timestamp(self.timestamp)));
        all.push(("level", FieldValue::String(self.level.name().to_string())));
        all.push(("event", self.message.clone()));
        all.extend(self.fields.iter().map(|(key, value)| (key, value.clone())));
        all
    }
}
