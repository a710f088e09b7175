//! Shared test utilities for xlog integration tests.

use lazy_static::lazy_static;
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

lazy_static! {
    /// `YYYY-MM-DD HH:MM:SS.mmm`
    pub static ref TIMESTAMP: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}$").unwrap();

    /// `YYYY-MM-DD HH:MM:SS.mmm ±HHMM`
    pub static ref TIMESTAMP_WITH_TIMEZONE: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3} [+-]\d{4}$").unwrap();

    static ref LINE: Regex = Regex::new(
        r"^(?P<ts>[^\t]+)\t\[(?P<lvl>[DIWE])\]\t\[(?P<pid>\d+)\]\[(?P<file>[^:\]]+):(?P<line>\d+)\]\t(?P<msg>.*)$"
    )
    .unwrap();
}

/// One emitted line split into its columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub timestamp: String,
    pub level: String,
    pub pid: u32,
    pub file: String,
    pub line: u32,
    pub message: String,
}

/// Parse a line in the facade's layout; `None` if it does not match
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let caps = LINE.captures(line)?;
    Some(ParsedLine {
        timestamp: caps["ts"].to_string(),
        level: caps["lvl"].to_string(),
        pid: caps["pid"].parse().ok()?,
        file: caps["file"].to_string(),
        line: caps["line"].parse().ok()?,
        message: caps["msg"].to_string(),
    })
}

/// Rotated-out siblings of `<dir>/<stem>.<ext>`, sorted by name (oldest first)
pub fn backup_files(dir: &Path, stem: &str) -> Vec<PathBuf> {
    let prefix = format!("{}-", stem);
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("Failed to read log directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix))
        })
        .collect();
    files.sort();
    files
}

/// In-memory `MakeWriter` that keeps everything written to it
#[derive(Clone, Debug, Default)]
pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> String {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer).to_string()
    }

    pub fn lines(&self) -> Vec<String> {
        self.output().lines().map(str::to_string).collect()
    }
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| io::Error::other("Mutex poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let parsed =
            parse_line("2024-03-09 07:05:03.042\t[W]\t[4242][conn.rs:88]\tpeer reset: a\tb")
                .unwrap();
        assert_eq!(parsed.timestamp, "2024-03-09 07:05:03.042");
        assert_eq!(parsed.level, "W");
        assert_eq!(parsed.pid, 4242);
        assert_eq!(parsed.file, "conn.rs");
        assert_eq!(parsed.line, 88);
        assert_eq!(parsed.message, "peer reset: a\tb");
    }

    #[test]
    fn test_parse_line_rejects_other_layouts() {
        assert!(parse_line("INFO something happened").is_none());
        assert!(parse_line("2024-03-09 07:05:03.042\t[X]\t[1][a.rs:1]\tm").is_none());
    }

    #[test]
    fn test_timestamp_patterns() {
        assert!(TIMESTAMP.is_match("2024-03-09 07:05:03.042"));
        assert!(!TIMESTAMP.is_match("2024-03-09 07:05:03.042 +0800"));
        assert!(TIMESTAMP_WITH_TIMEZONE.is_match("2024-03-09 07:05:03.042 +0800"));
        assert!(TIMESTAMP_WITH_TIMEZONE.is_match("2024-03-09 07:05:03.042 -0530"));
    }
}
