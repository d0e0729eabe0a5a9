//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → rotating JSON file
//! ```
//!
//! Spans land in `~/.local/share/zellij/userdeck/userdeck-otlp.json` as one
//! OTLP JSON document per line. The file rotates at 10 MB and keeps three
//! numbered backups. The level comes from the `trace_level` plugin option and
//! defaults to `info`.
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: provider and file exporter
//! - [`span_formatter`]: OTLP JSON encoding
//! - [`file_writer`]: rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::{RotatingFileWriter, RotationPolicy};
pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, SERVICE_NAME, TRACE_FILE_NAME};
