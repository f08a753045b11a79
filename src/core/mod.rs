//! Core logger types and the rendering pipeline

pub mod emoji;
pub mod error;
pub mod formatters;
pub mod highlighter;
pub mod level_styles;
pub mod log_context;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod markup;
pub mod metrics;
pub mod renderer;
pub mod settings;
pub mod sink;
pub mod span;
pub mod style;
pub mod timestamp;

pub use error::{LoggerError, Result};
pub use formatters::{
    ColumnFormatter, KeyValueFormatter, LevelFormatter, MessageFormatter, TimestampFormatter,
};
pub use highlighter::{HighlightRule, Highlighter};
pub use level_styles::LevelStyles;
pub use log_context::{FieldValue, LogContext};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use logger::{join_message, Logger, LoggerBuilder};
pub use markup::MarkupParser;
pub use metrics::LoggerMetrics;
pub use renderer::{Column, LineRenderer};
pub use settings::{HighlightRuleConfig, LoggerSettings, RendererConfig};
pub use sink::Sink;
pub use span::{StyleSpan, StyledText};
pub use style::{Style, NEUTRAL, RESET};
pub use timestamp::TimestampFormat;
