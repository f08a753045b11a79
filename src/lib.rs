//! # Rust Rich Logger
//!
//! Leveled, structured logging rendered as aligned, colour-styled terminal
//! lines.
//!
//! ## Features
//!
//! - **Columns**: timestamp, padded level, message and `key=value` fields,
//!   each produced by a pluggable [`ColumnFormatter`]
//! - **Markup**: `[bold red]...[/]` tags and `:emoji:` codes inside messages
//! - **Highlighting**: numbers, addresses, UUIDs, URLs, paths and literals
//!   are styled automatically in unmarked text
//! - **Thread Safe**: one complete line per write, shared immutable renderer
//!
//! ```
//! use rust_rich_logger::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder().sink(sink.clone()).colors(false).build();
//!
//! logger.bind("peer", "10.0.0.7").info("[bold]connected[/bold]");
//! assert!(sink.lines()[0].ends_with("INFO      connected peer=10.0.0.7"));
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        FieldValue, LogContext, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerError,
        LoggerMetrics, LoggerSettings, RendererConfig, Result, Sink, Style, StyledText,
        TimestampFormat,
    };
    pub use crate::sinks::{ConsoleSink, MemorySink, WriterSink};
}

pub use crate::core::{
    emoji, join_message, Column, ColumnFormatter, FieldValue, HighlightRule,
    HighlightRuleConfig, Highlighter, KeyValueFormatter, LevelFormatter, LevelStyles, LineRenderer,
    LogContext, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    LoggerSettings, MarkupParser, MessageFormatter, RendererConfig, Result, Sink, Style, StyleSpan,
    StyledText, TimestampFormat, TimestampFormatter,
};
pub use sinks::{ConsoleSink, MemorySink, WriterSink};
