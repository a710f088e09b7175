//! Backup file naming and discovery

use chrono::NaiveDateTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Timestamp embedded in backup names; `-` instead of `:` keeps it path-safe
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

const COMPRESS_SUFFIX: &str = ".gz";

/// A rotated-out log file found next to the active one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub path: PathBuf,

    /// Rotation time parsed from the file name
    pub timestamp: NaiveDateTime,

    /// Whether the file has been gzipped
    pub compressed: bool,
}

impl Backup {
    /// File name without the `.gz` suffix.
    ///
    /// A plain backup and its compressed copy share the same key.
    pub(crate) fn key(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match name.strip_suffix(COMPRESS_SUFFIX) {
            Some(stripped) => stripped.to_string(),
            None => name,
        }
    }

    /// Path the gzipped copy of this backup is written to
    pub(crate) fn compressed_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(COMPRESS_SUFFIX);
        PathBuf::from(name)
    }
}

/// How backups of one log file are named: `app.log` rolls to `app-<ts>.log`
#[derive(Debug, Clone)]
pub(crate) struct BackupNaming {
    dir: PathBuf,
    prefix: String,
    ext: String,
}

impl BackupNaming {
    pub(crate) fn new(path: &Path) -> Self {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let stem = &file_name[..file_name.len() - ext.len()];

        Self {
            dir,
            prefix: format!("{}-", stem),
            ext,
        }
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn backup_path(&self, rotated_at: NaiveDateTime) -> PathBuf {
        self.dir.join(format!(
            "{}{}{}",
            self.prefix,
            rotated_at.format(BACKUP_TIME_FORMAT),
            self.ext
        ))
    }

    /// Extract the rotation time from a backup file name.
    ///
    /// Returns `None` for anything that is not one of our backups,
    /// including the active file itself.
    pub(crate) fn parse(&self, file_name: &str) -> Option<(NaiveDateTime, bool)> {
        let (name, compressed) = match file_name.strip_suffix(COMPRESS_SUFFIX) {
            Some(stripped) => (stripped, true),
            None => (file_name, false),
        };
        let ts = name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.ext.as_str())?;
        NaiveDateTime::parse_from_str(ts, BACKUP_TIME_FORMAT)
            .ok()
            .map(|t| (t, compressed))
    }

    /// All backups in the log directory, newest first
    pub(crate) fn list(&self) -> io::Result<Vec<Backup>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut backups = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some((timestamp, compressed)) = self.parse(name) {
                backups.push(Backup {
                    path: entry.path(),
                    timestamp,
                    compressed,
                });
            }
        }

        backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(backups)
    }
}
