//! # xlog rotate
//!
//! A log file that rolls itself over.
//!
//! [`RotatingFile`] writes to a single active file. Once a write would push
//! the file past its size limit, the file is renamed to a timestamped backup
//! (`<stem>-<YYYY-MM-DDTHH-MM-SS.mmm><.ext>`) and a fresh file takes its
//! place. Backups are then pruned by count and age and optionally gzipped.
//!
//! All of this happens synchronously on the writing thread.

mod backup;
mod error;
mod rotating_file;

pub use backup::Backup;
pub use error::RotateError;
pub use rotating_file::{RotatingFile, RotationPolicy, MEGABYTE};
