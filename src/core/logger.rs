//! Main logger implementation

use super::{
    error::{LoggerError, Result},
    log_context::{FieldValue, LogContext},
    log_event::LogEvent,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    renderer::LineRenderer,
    settings::{LoggerSettings, RendererConfig},
    sink::Sink,
};
use crate::sinks::ConsoleSink;
use std::fmt::{self, Display};
use std::sync::Arc;

/// Logger handle
///
/// Cloning a logger, or binding a field with [`Logger::bind`], yields a new
/// handle that shares the renderer, sinks and metrics of the original.
#[derive(Clone)]
pub struct Logger {
    min_level: LogLevel,
    renderer: Arc<LineRenderer>,
    sinks: Arc<[Box<dyn Sink>]>,
    context: LogContext,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with the standard layout writing to stdout
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Fields bound to this handle
    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn renderer(&self) -> &LineRenderer {
        &self.renderer
    }

    /// New handle with one more bound field
    ///
    /// Binding a key that is already bound replaces its value but keeps its
    /// position.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_rich_logger::prelude::*;
    ///
    /// let sink = MemorySink::new();
    /// let logger = Logger::builder().sink(sink.clone()).colors(false).build();
    ///
    /// let request = logger.bind("request_id", "r-42").bind("user", "alice");
    /// request.info("handled");
    /// assert!(sink.lines()[0].ends_with("handled request_id=r-42 user=alice"));
    /// ```
    #[must_use]
    pub fn bind(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Logger {
        let mut bound = self.clone();
        bound.context.add_field(key, value);
        bound
    }

    /// New handle with every field of `context` bound
    #[must_use]
    pub fn bind_all(&self, context: LogContext) -> Logger {
        let mut bound = self.clone();
        bound.context.merge(context);
        bound
    }

    pub fn log(&self, level: LogLevel, message: impl Into<FieldValue>) {
        self.log_with_fields(level, message, LogContext::new());
    }

    /// Log with per-call fields layered over the bound ones
    pub fn log_with_fields(
        &self,
        level: LogLevel,
        message: impl Into<FieldValue>,
        fields: LogContext,
    ) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let mut context = self.context.clone();
        context.merge(fields);
        let event = LogEvent::new(level, message).with_context(context);
        self.emit(&event);
    }

    /// Render `event` and hand the line to every sink
    ///
    /// The threshold is not consulted. Sink failures and panics are reported
    /// on stderr and counted; they never reach the caller.
    pub fn emit(&self, event: &LogEvent) {
        let line = self.renderer.render(event);
        if Self::write_all_sinks(&self.sinks, &line) {
            self.metrics.record_write_failure();
        } else {
            self.metrics.record_emitted();
        }
    }

    pub fn render(&self, event: &LogEvent) -> String {
        self.renderer.render(event)
    }

    /// Write one line to each sink with per-sink panic isolation
    ///
    /// Returns `true` if any sink failed.
    fn write_all_sinks(sinks: &[Box<dyn Sink>], line: &str) -> bool {
        let mut has_error = false;

        for (idx, sink) in sinks.iter().enumerate() {
            let result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write_line(line)));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Sink #{} ({}) failed: {}",
                        idx,
                        sink.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} ({}) panicked: {}. \
                         Other sinks continue to function.",
                        idx,
                        sink.name(),
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        has_error
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_rich_logger::prelude::*;
    ///
    /// let logger = Logger::builder().sink(MemorySink::new()).build();
    /// logger.debug("below the default threshold");
    /// logger.info("written");
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.filtered_count(), 1);
    /// assert_eq!(metrics.emitted_count(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Flush every sink, returning the first error after trying them all
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for sink in self.sinks.iter() {
            if let Err(e) = sink.flush() {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Warning, message);
    }

    /// Alias for [`Logger::warning`]
    #[inline]
    pub fn warn(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Critical, message);
    }

    /// Alias for [`Logger::critical`]
    #[inline]
    pub fn fatal(&self, message: impl Into<FieldValue>) {
        self.log(LogLevel::Critical, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .field(
                "sinks",
                &self.sinks.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("context", &self.context)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Join message parts with `sep`, the way a variadic log call builds its message
///
/// # Example
///
/// ```
/// use rust_rich_logger::join_message;
///
/// assert_eq!(join_message(["retry", "3", "of", "5"], " "), "retry 3 of 5");
/// assert_eq!(join_message([1, 2, 3], ", "), "1, 2, 3");
/// ```
pub fn join_message<I>(parts: I, sep: &str) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    parts
        .into_iter()
        .map(|part| part.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Builder for creating Logger instances with fluent API
///
/// # Example
///
/// ```
/// use rust_rich_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .sink(ConsoleSink::stderr())
///     .build();
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    renderer: Option<LineRenderer>,
    use_colors: Option<bool>,
    sinks: Vec<Box<dyn Sink>>,
}

impl LoggerBuilder {
    /// Create a new LoggerBuilder with default settings
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::default(),
            renderer: None,
            use_colors: None,
            sinks: Vec::new(),
        }
    }

    /// Set the minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the minimum log level by name, e.g. `"WARN"`
    pub fn try_min_level(mut self, name: &str) -> Result<Self> {
        self.min_level = name.parse()?;
        Ok(self)
    }

    /// Add a sink; without any, lines go to stdout
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Use a custom renderer
    #[must_use = "builder methods return a new value"]
    pub fn renderer(mut self, renderer: LineRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Build the standard renderer from `config`
    pub fn config(mut self, config: &RendererConfig) -> Result<Self> {
        self.renderer = Some(LineRenderer::from_config(config)?);
        Ok(self)
    }

    /// Apply loaded settings: threshold and renderer
    pub fn settings(self, settings: &LoggerSettings) -> Result<Self> {
        self.min_level(settings.min_level).config(&settings.renderer)
    }

    /// Force colors on or off, overriding the renderer's own switch
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.use_colors = Some(use_colors);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut renderer = self.renderer.unwrap_or_default();
        if let Some(use_colors) = self.use_colors {
            renderer = renderer.with_colors(use_colors);
        }

        let mut sinks = self.sinks;
        if sinks.is_empty() {
            sinks.push(Box::new(ConsoleSink::stdout()));
        }

        Logger {
            min_level: self.min_level,
            renderer: Arc::new(renderer),
            sinks: sinks.into(),
            context: LogContext::new(),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_rich_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .colors(false)
    ///     .build();
    /// assert!(logger.is_enabled(LogLevel::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Logger configured from settings, writing to stdout
    pub fn from_settings(settings: &LoggerSettings) -> Result<Logger> {
        Ok(LoggerBuilder::new().settings(settings)?.build())
    }
}

impl TryFrom<&LoggerSettings> for Logger {
    type Error = LoggerError;

    fn try_from(settings: &LoggerSettings) -> Result<Self> {
        Logger::from_settings(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{MemorySink, WriterSink};
    use std::io;

    struct PanickingSink;

    impl Sink for PanickingSink {
        fn write_line(&self, _line: &str) -> Result<()> {
            panic!("sink exploded");
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn capture(level: LogLevel) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .min_level(level)
            .sink(sink.clone())
            .colors(false)
            .build();
        (logger, sink)
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().build();
        assert_eq!(logger.min_level(), LogLevel::Info);
        assert!(logger.renderer().use_colors());
        assert!(logger.context().is_empty());
    }

    #[test]
    fn test_threshold_filters_before_rendering() {
        let (logger, sink) = capture(LogLevel::Warning);

        logger.debug("no");
        logger.info("no");
        logger.warn("yes");
        logger.critical("yes");

        assert_eq!(sink.len(), 2);
        assert_eq!(logger.metrics().filtered_count(), 2);
        assert_eq!(logger.metrics().emitted_count(), 2);
    }

    #[test]
    fn test_try_min_level() {
        let builder = Logger::builder().try_min_level("FATAL").expect("known level");
        assert_eq!(builder.build().min_level(), LogLevel::Critical);

        let err = Logger::builder().try_min_level("loud").err().expect("unknown");
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
    }

    #[test]
    fn test_level_methods_map_to_levels() {
        let (logger, sink) = capture(LogLevel::NotSet);

        logger.debug("d");
        logger.info("i");
        logger.warning("w");
        logger.error("e");
        logger.fatal("f");

        let levels: Vec<String> = sink
            .lines()
            .iter()
            .map(|line| line.split_whitespace().nth(2).unwrap_or_default().to_string())
            .collect();
        assert_eq!(levels, vec!["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]);
    }

    #[test]
    fn test_bind_shares_sink_and_keeps_order() {
        let (logger, sink) = capture(LogLevel::Info);
        let bound = logger.bind("b", 1).bind("a", 2).bind("b", 3);

        bound.info("x");
        logger.info("y");

        let lines = sink.lines();
        assert!(lines[0].ends_with(" x b=3 a=2"), "{}", lines[0]);
        assert!(lines[1].ends_with(" y"), "{}", lines[1]);
        assert_eq!(logger.metrics().emitted_count(), 2);
    }

    #[test]
    fn test_call_fields_override_bound_fields() {
        let (logger, sink) = capture(LogLevel::Info);
        let bound = logger.bind("user", "alice").bind("attempt", 1);

        bound.log_with_fields(
            LogLevel::Info,
            "retry",
            LogContext::new().with_field("attempt", 2).with_field("delay_ms", 250),
        );

        assert!(sink.lines()[0].ends_with("retry user=alice attempt=2 delay_ms=250"));
    }

    #[test]
    fn test_multiline_message_stays_on_one_line() {
        let (logger, sink) = capture(LogLevel::Info);
        logger.info("first\nINFO forged");
        assert_eq!(sink.len(), 1);
        assert!(sink.lines()[0].ends_with("first\\nINFO forged"));
    }

    #[test]
    fn test_panicking_sink_is_isolated() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .sink(PanickingSink)
            .sink(sink.clone())
            .build();

        logger.info("still delivered");

        assert_eq!(sink.len(), 1);
        assert_eq!(logger.metrics().write_failures(), 1);
        assert_eq!(logger.metrics().emitted_count(), 0);
    }

    #[test]
    fn test_write_error_is_counted_not_raised() {
        let logger = Logger::builder().sink(WriterSink::new(BrokenPipe)).build();
        logger.error("lost");
        assert_eq!(logger.metrics().write_failures(), 1);
        assert!(logger.flush().is_err());
    }

    #[test]
    fn test_emit_ignores_threshold() {
        let (logger, sink) = capture(LogLevel::Critical);
        logger.emit(&LogEvent::new(LogLevel::Debug, "forced"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_from_settings() {
        let settings = LoggerSettings::from_json(
            r#"{ "min_level": "error", "renderer": { "use_colors": false } }"#,
        )
        .expect("valid settings");
        let logger = Logger::try_from(&settings).expect("logger");

        assert_eq!(logger.min_level(), LogLevel::Error);
        assert!(!logger.renderer().use_colors());
    }

    #[test]
    fn test_join_message() {
        assert_eq!(join_message(Vec::<String>::new(), " "), "");
        assert_eq!(join_message(["a", "b"], "-"), "a-b");
    }
}
