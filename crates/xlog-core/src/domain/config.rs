//! Logger configuration

use crate::domain::severity::{parse_log_level, Severity};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use xlog_rotate::{RotationPolicy, MEGABYTE};

pub const ENV_FILE: &str = "XLOG_FILE";
pub const ENV_MAX_SIZE_MB: &str = "XLOG_MAX_SIZE_MB";
pub const ENV_MAX_AGE_DAYS: &str = "XLOG_MAX_AGE_DAYS";
pub const ENV_MAX_BACKUPS: &str = "XLOG_MAX_BACKUPS";
pub const ENV_COMPRESS: &str = "XLOG_COMPRESS";
pub const ENV_LEVEL: &str = "XLOG_LEVEL";
pub const ENV_TIMEZONE: &str = "XLOG_TIMEZONE";
pub const ENV_LOCAL_TIME: &str = "XLOG_LOCAL_TIME";

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Everything needed to build a file-backed [`crate::Logger`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Active log file; backups are written next to it
    pub file_path: PathBuf,

    /// Rotate once the file would grow past this many megabytes
    pub max_size_mb: u64,

    /// Delete backups older than this many days (0 = never)
    pub max_age_days: u64,

    /// Keep at most this many backups (0 = unlimited)
    pub max_backups: usize,

    /// Gzip backups after rotation
    pub compress: bool,

    /// Initial threshold of the level gate
    pub min_level: Severity,

    /// Append the UTC offset (` +0800`) to line timestamps
    pub include_timezone: bool,

    /// Stamp backup names with local time instead of UTC
    pub local_time: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("logs/app.log"),
            max_size_mb: 100,
            max_age_days: 0,
            max_backups: 0,
            compress: false,
            min_level: Severity::Info,
            include_timezone: false,
            local_time: true,
        }
    }
}

impl LoggerConfig {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    pub fn with_max_size_mb(mut self, max_size_mb: u64) -> Self {
        self.max_size_mb = max_size_mb;
        self
    }

    pub fn with_max_age_days(mut self, max_age_days: u64) -> Self {
        self.max_age_days = max_age_days;
        self
    }

    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_min_level(mut self, min_level: Severity) -> Self {
        self.min_level = min_level;
        self
    }

    pub fn with_timezone(mut self, include_timezone: bool) -> Self {
        self.include_timezone = include_timezone;
        self
    }

    pub fn with_local_time(mut self, local_time: bool) -> Self {
        self.local_time = local_time;
        self
    }

    /// Rotation settings for the file sink
    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy {
            max_size: self.max_size_mb.saturating_mul(MEGABYTE),
            max_age: (self.max_age_days > 0)
                .then(|| Duration::from_secs(self.max_age_days.saturating_mul(SECONDS_PER_DAY))),
            max_backups: self.max_backups,
            compress: self.compress,
            local_time: self.local_time,
        }
    }

    /// Read `XLOG_*` variables on top of the defaults.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoggerConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_FILE).filter(|p| !p.trim().is_empty()) {
            config.file_path = PathBuf::from(path.trim());
        }
        if let Some(value) = lookup(ENV_MAX_SIZE_MB) {
            config.max_size_mb = parse_number(ENV_MAX_SIZE_MB, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_AGE_DAYS) {
            config.max_age_days = parse_number(ENV_MAX_AGE_DAYS, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_BACKUPS) {
            config.max_backups = parse_number(ENV_MAX_BACKUPS, &value)?;
        }
        if let Some(value) = lookup(ENV_COMPRESS) {
            config.compress = parse_flag(ENV_COMPRESS, &value)?;
        }
        if let Some(value) = lookup(ENV_LEVEL) {
            config.min_level = parse_log_level(value.trim());
        }
        if let Some(value) = lookup(ENV_TIMEZONE) {
            config.include_timezone = parse_flag(ENV_TIMEZONE, &value)?;
        }
        if let Some(value) = lookup(ENV_LOCAL_TIME) {
            config.local_time = parse_flag(ENV_LOCAL_TIME, &value)?;
        }

        Ok(config)
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, Error> {
    value.trim().parse().map_err(|_| Error::InvalidEnv {
        key,
        value: value.to_string(),
    })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, Error> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidEnv {
            key,
            value: value.to_string(),
        }),
    }
}
