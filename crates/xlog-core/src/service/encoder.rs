//! Line encoder
//!
//! Every emitted line has four tab-separated columns:
//!
//! ```text
//! 2024-03-09 07:05:03.042	[I]	[4242][main.rs:17]	connected to 10.0.0.1
//! ```
//!
//! timestamp, bracketed severity initial, process tag plus caller location,
//! and the formatted message.

use crate::domain::Severity;
use chrono::{DateTime, Local, TimeZone};
use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
pub const DATETIME_FORMAT_WITH_TIMEZONE: &str = "%Y-%m-%d %H:%M:%S%.3f %z";

/// `[<pid>]` of the current process
pub fn process_tag() -> String {
    format!("[{}]", std::process::id())
}

pub fn format_timestamp<Tz>(at: &DateTime<Tz>, include_timezone: bool) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format(timestamp_format(include_timezone)).to_string()
}

fn timestamp_format(include_timezone: bool) -> &'static str {
    if include_timezone {
        DATETIME_FORMAT_WITH_TIMEZONE
    } else {
        DATETIME_FORMAT
    }
}

/// Last `/`-separated segment of a source path.
///
/// Paths without a separator, or ending in one, come back unchanged.
pub fn trim_caller_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) if idx + 1 < path.len() => &path[idx + 1..],
        _ => path,
    }
}

/// `<process tag>[<file>:<line>]`
pub fn caller_annotation(process_tag: &str, file: &str, line: u32) -> String {
    format!("{}[{}:{}]", process_tag, trim_caller_path(file), line)
}

/// Local wall-clock time with millisecond precision
#[derive(Debug, Clone, Copy, Default)]
pub struct Timestamp {
    include_timezone: bool,
}

impl Timestamp {
    pub fn new(include_timezone: bool) -> Self {
        Self { include_timezone }
    }
}

impl FormatTime for Timestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.write_str(&format_timestamp(&Local::now(), self.include_timezone))
    }
}

/// Console-style line layout used for every facade event
#[derive(Debug, Clone)]
pub struct LineFormat {
    timer: Timestamp,
    process_tag: String,
}

impl LineFormat {
    pub fn new(process_tag: impl Into<String>, include_timezone: bool) -> Self {
        Self {
            timer: Timestamp::new(include_timezone),
            process_tag: process_tag.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let severity = Severity::from(*meta.level());

        self.timer.format_time(&mut writer)?;
        write!(writer, "\t[{}]\t", severity.abbreviation())?;

        // Events always carry a location when they come from the macros
        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            write!(
                writer,
                "{}\t",
                caller_annotation(&self.process_tag, file, line)
            )?;
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
