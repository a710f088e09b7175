//! Size-rotated log file

use crate::backup::{Backup, BackupNaming};
use crate::RotateError;
use chrono::{Local, NaiveDateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const MEGABYTE: u64 = 1024 * 1024;

/// Used when a policy leaves `max_size` at zero
const DEFAULT_MAX_SIZE: u64 = 100 * MEGABYTE;

/// When to roll the active file and which backups to keep afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Maximum size of the active file in bytes (0 means 100MB)
    pub max_size: u64,

    /// Remove backups older than this; `None` keeps them regardless of age
    pub max_age: Option<Duration>,

    /// Keep at most this many backups; 0 keeps all of them
    pub max_backups: usize,

    /// Gzip backups once they are rotated out
    pub compress: bool,

    /// Stamp backup names with local time instead of UTC
    pub local_time: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            max_age: None,
            max_backups: 0,
            compress: false,
            local_time: false,
        }
    }
}

impl RotationPolicy {
    fn effective_max_size(&self) -> u64 {
        if self.max_size == 0 {
            DEFAULT_MAX_SIZE
        } else {
            self.max_size
        }
    }

    fn prunes_or_compresses(&self) -> bool {
        self.max_backups > 0 || self.max_age.is_some() || self.compress
    }
}

/// A log file that renames itself to a timestamped backup once full.
///
/// The file is opened lazily on the first write. Writes are serialized by an
/// internal lock, so a shared `&RotatingFile` can be written from several
/// threads; `io::Write` is implemented for both `RotatingFile` and
/// `&RotatingFile`.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    naming: BackupNaming,
    policy: RotationPolicy,
    active: Mutex<ActiveFile>,
}

#[derive(Debug, Default)]
struct ActiveFile {
    file: Option<File>,
    size: u64,
}

impl RotatingFile {
    pub fn new(path: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        let path = path.into();
        Self {
            naming: BackupNaming::new(&path),
            path,
            policy,
            active: Mutex::new(ActiveFile::default()),
        }
    }

    /// Path of the active log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes in the active file as tracked by this writer (0 before the first write)
    pub fn size(&self) -> u64 {
        self.lock().size
    }

    /// Append `buf`, rotating first if it would not fit
    pub fn write_bytes(&self, buf: &[u8]) -> Result<usize, RotateError> {
        let len = buf.len() as u64;
        let max = self.policy.effective_max_size();
        if len > max {
            return Err(RotateError::WriteTooLarge { len, max });
        }

        let mut active = self.lock();
        if active.file.is_none() {
            self.open_existing_or_new(&mut active, len)?;
        }
        if active.size + len > max {
            self.rotate_locked(&mut active)?;
        }

        match active.file.as_mut() {
            Some(file) => file.write_all(buf)?,
            None => return Err(io::Error::other("log file is not open").into()),
        }
        active.size += len;
        Ok(buf.len())
    }

    /// Close the active file, move it to a backup and start a new one
    pub fn rotate(&self) -> Result<(), RotateError> {
        let mut active = self.lock();
        self.rotate_locked(&mut active)
    }

    /// Close the active file. The next write reopens it.
    pub fn close(&self) -> Result<(), RotateError> {
        let mut active = self.lock();
        if let Some(mut file) = active.file.take() {
            file.flush()?;
        }
        Ok(())
    }

    /// Backups currently on disk, newest first
    pub fn backups(&self) -> Result<Vec<Backup>, RotateError> {
        Ok(self.naming.list()?)
    }

    fn lock(&self) -> MutexGuard<'_, ActiveFile> {
        // A panic mid-write leaves nothing half-updated that matters here
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn now(&self) -> NaiveDateTime {
        if self.policy.local_time {
            Local::now().naive_local()
        } else {
            Utc::now().naive_utc()
        }
    }

    fn open_existing_or_new(
        &self,
        active: &mut ActiveFile,
        write_len: u64,
    ) -> Result<(), RotateError> {
        let meta = match fs::metadata(&self.path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return self.open_new(active),
            Err(e) => return Err(e.into()),
        };

        if meta.len() + write_len >= self.policy.effective_max_size() {
            return self.rotate_locked(active);
        }

        match OpenOptions::new().append(true).open(&self.path) {
            Ok(file) => {
                active.file = Some(file);
                active.size = meta.len();
                Ok(())
            }
            Err(e) => {
                debug!("Could not reopen {:?} ({}), starting a new file", self.path, e);
                self.open_new(active)
            }
        }
    }

    fn open_new(&self, active: &mut ActiveFile) -> Result<(), RotateError> {
        fs::create_dir_all(self.naming.dir())?;

        let previous = match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        if previous.is_some() {
            let backup = self.naming.backup_path(self.now());
            fs::rename(&self.path, &backup)?;
            debug!("Rotated log file {:?} -> {:?}", self.path, backup);
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        if let Some(permissions) = previous {
            if let Err(e) = fs::set_permissions(&self.path, permissions) {
                warn!("Failed to carry permissions over to {:?}: {}", self.path, e);
            }
        }

        active.file = Some(file);
        active.size = 0;
        Ok(())
    }

    fn rotate_locked(&self, active: &mut ActiveFile) -> Result<(), RotateError> {
        if let Some(mut file) = active.file.take() {
            file.flush()?;
        }
        self.open_new(active)?;

        if let Err(e) = self.cleanup() {
            warn!("Failed to clean up backups of {:?}: {}", self.path, e);
        }
        Ok(())
    }

    /// Prune backups by count and age, then compress what is left
    fn cleanup(&self) -> Result<(), RotateError> {
        if !self.policy.prunes_or_compresses() {
            return Ok(());
        }

        let mut backups = self.naming.list()?;
        let mut expired = Vec::new();

        if self.policy.max_backups > 0 && self.policy.max_backups < backups.len() {
            let mut kept = HashSet::new();
            let mut remaining = Vec::new();
            for backup in backups {
                kept.insert(backup.key());
                if kept.len() > self.policy.max_backups {
                    expired.push(backup);
                } else {
                    remaining.push(backup);
                }
            }
            backups = remaining;
        }

        if let Some(max_age) = self.policy.max_age {
            let now = self.now();
            let (old, fresh): (Vec<_>, Vec<_>) = backups.into_iter().partition(|b| {
                (now - b.timestamp)
                    .to_std()
                    .map(|age| age > max_age)
                    .unwrap_or(false)
            });
            expired.extend(old);
            backups = fresh;
        }

        for backup in &expired {
            match fs::remove_file(&backup.path) {
                Ok(()) => debug!("Removed old log file: {:?}", backup.path),
                Err(e) => warn!("Failed to remove old log file {:?}: {}", backup.path, e),
            }
        }

        if self.policy.compress {
            for backup in backups.iter().filter(|b| !b.compressed) {
                match compress_backup(backup) {
                    Ok(gz_path) => info!("Compressed log file: {:?} -> {:?}", backup.path, gz_path),
                    Err(e) => warn!("Failed to compress log file {:?}: {}", backup.path, e),
                }
            }
        }

        Ok(())
    }
}

impl Write for &RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_bytes(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut active = self.lock();
        if let Some(file) = active.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut this: &RotatingFile = self;
        this.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut this: &RotatingFile = self;
        this.flush()
    }
}

/// Gzip a backup next to itself and remove the original
fn compress_backup(backup: &Backup) -> io::Result<PathBuf> {
    let gz_path = backup.compressed_path();
    if let Err(e) = gzip_into(&backup.path, &gz_path) {
        let _ = fs::remove_file(&gz_path);
        return Err(e);
    }
    fs::remove_file(&backup.path)?;
    Ok(gz_path)
}

fn gzip_into(src: &Path, dst: &Path) -> io::Result<()> {
    let mut input = File::open(src)?;
    let output = File::create(dst)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;
    Ok(())
}
