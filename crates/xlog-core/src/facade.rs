//! Process-wide logger
//!
//! One [`Logger`] per process, installed once, plus a process-wide threshold.
//! Before installation every emission is a silent no-op.

use crate::domain::{LoggerConfig, Severity};
use crate::{Error, Logger};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::OnceLock;

static LEVEL: AtomicI32 = AtomicI32::new(Severity::Debug as i32);
static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Build the file-backed logger from `config` and install it.
///
/// The threshold is set to `config.min_level`. A second call returns
/// [`Error::AlreadyInitialized`] and leaves the first logger untouched.
pub fn init(config: &LoggerConfig) -> Result<(), Error> {
    if LOGGER.get().is_some() {
        return Err(Error::AlreadyInitialized);
    }
    install(Logger::new(config))
}

/// Install a prebuilt logger; its current level becomes the process threshold
pub fn install(logger: Logger) -> Result<(), Error> {
    let min_level = logger.level();
    LOGGER
        .set(logger)
        .map_err(|_| Error::AlreadyInitialized)?;
    set_level(min_level);
    Ok(())
}

/// The installed logger, if any
pub fn global() -> Option<&'static Logger> {
    LOGGER.get()
}

/// Change the process threshold. Out-of-range values are accepted as-is.
pub fn set_level(level: impl Into<i32>) {
    LEVEL.store(level.into(), Ordering::Relaxed);
}

/// Current process threshold as an integer rank
pub fn level() -> i32 {
    LEVEL.load(Ordering::Relaxed)
}

/// Whether a call at `severity` passes the process-wide gate
pub fn enabled(severity: Severity) -> bool {
    level() <= severity.rank()
}

/// Flush the installed logger's file; a no-op before `init`
pub fn flush() {
    if let Some(logger) = global() {
        logger.flush();
    }
}
