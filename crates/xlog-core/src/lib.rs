//! # xlog core
//!
//! A process-wide logging facade: leveled, `format!`-style calls written as
//! single lines to a size-rotated file.
//!
//! ## Modules
//!
//! - `domain` - Severities, level helpers and `LoggerConfig`
//! - `service` - Line encoder and the error-swallowing sink boundary
//!
//! ## Usage
//!
//! ```no_run
//! use xlog_core::{LoggerConfig, Severity};
//!
//! let config = LoggerConfig::new("logs/server.log")
//!     .with_max_size_mb(50)
//!     .with_max_backups(10)
//!     .with_min_level(Severity::Debug);
//! xlog_core::init(&config).expect("logger initialized twice");
//!
//! xlog_core::info!("listening on {}", 8080);
//! ```

pub mod domain;
pub mod service;

mod error;
mod facade;
mod logger;
mod macros;

pub use domain::*;
pub use error::Error;
pub use facade::{enabled, flush, global, init, install, level, set_level};
pub use logger::Logger;
pub use service::*;

// Re-export the sink so callers can use it without a direct dependency
pub use xlog_rotate::{Backup, RotateError, RotatingFile, RotationPolicy, MEGABYTE};

#[doc(hidden)]
pub mod __private {
    pub use tracing_core;
}
