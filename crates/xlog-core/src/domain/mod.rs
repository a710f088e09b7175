//! Core types: severities and logger configuration

pub mod config;
pub mod severity;

pub use config::*;
pub use severity::*;
