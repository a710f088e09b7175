//! Log severities and the level helpers built on them

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returned by [`log_level_to_string`] for anything outside the known range
pub const UNKNOWN_LEVEL: &str = "unknown level";

/// Log severity, ordered from least to most urgent.
///
/// The discriminant is the rank the level gate compares against.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Case-insensitive lookup by name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn rank(self) -> i32 {
        self as i32
    }

    pub fn from_rank(rank: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.rank() == rank)
    }

    /// Uppercase first letter of the name, as shown in log lines (`[I]`)
    pub fn abbreviation(&self) -> char {
        self.as_str()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

impl From<Severity> for i32 {
    fn from(severity: Severity) -> Self {
        severity.rank()
    }
}

/// `TRACE` has no counterpart and folds into `Debug`
impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Self::Error,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownLevel(s.to_string()))
    }
}

/// Name of a raw level value, or [`UNKNOWN_LEVEL`]
pub fn log_level_to_string(level: i32) -> &'static str {
    Severity::from_rank(level)
        .map(|s| s.as_str())
        .unwrap_or(UNKNOWN_LEVEL)
}

/// Lenient level parsing: anything unrecognized, including an empty string, is `Info`
pub fn parse_log_level(name: &str) -> Severity {
    Severity::parse(name).unwrap_or(Severity::Info)
}
