use std::io;
use thiserror::Error;

/// Errors produced by [`crate::RotatingFile`]
#[derive(Debug, Error)]
pub enum RotateError {
    /// A single write is larger than the whole file is allowed to be
    #[error("write length {len} exceeds maximum file size {max}")]
    WriteTooLarge { len: u64, max: u64 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<RotateError> for io::Error {
    fn from(err: RotateError) -> Self {
        match err {
            RotateError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}
