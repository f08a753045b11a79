//! Sink trait for rendered log lines

use super::error::Result;

/// Destination for fully rendered lines
///
/// A sink receives one complete line per call, without its terminator, and
/// must write it, terminator included, as a single operation so lines from
/// concurrent callers never interleave.
pub trait Sink: Send + Sync {
    fn write_line(&self, line: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
