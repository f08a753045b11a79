//! Error types for the logger system
//!
//! Only configuration can fail. Rendering and emitting an event absorb every
//! per-event problem locally, so none of these variants ever reach a log call site.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Unknown severity name supplied as a threshold
    #[error("Unknown level: '{name}'")]
    InvalidLevel { name: String },

    /// Style definition that could not be parsed
    #[error("Invalid style '{definition}': {message}")]
    InvalidStyle { definition: String, message: String },

    /// Highlight rule whose pattern does not compile
    #[error("Invalid highlight pattern for rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error while loading settings
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an unknown level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel { name: name.into() }
    }

    /// Create an invalid style error
    pub fn invalid_style(definition: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidStyle {
            definition: definition.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_level("VERBOSE");
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));

        let err = LoggerError::config("LevelStyles", "empty vocabulary");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::invalid_style("bold mauve", "unknown color 'mauve'");
        assert!(matches!(err, LoggerError::InvalidStyle { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_level("VERBOSE");
        assert_eq!(err.to_string(), "Unknown level: 'VERBOSE'");

        let err = LoggerError::invalid_style("bold mauve", "unknown color 'mauve'");
        assert_eq!(
            err.to_string(),
            "Invalid style 'bold mauve': unknown color 'mauve'"
        );

        let err = LoggerError::writer("pipe closed");
        assert_eq!(err.to_string(), "Writer error: pipe closed");
    }

    #[test]
    fn test_pattern_error_keeps_source() {
        use std::error::Error;

        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = LoggerError::InvalidPattern {
            rule: "custom".to_string(),
            source,
        };

        assert!(err.to_string().contains("custom"));
        assert!(err.source().is_some());
    }
}
