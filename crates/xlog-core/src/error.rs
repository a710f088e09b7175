use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// `init`/`install` ran a second time; the first logger stays in place
    #[error("logger is already initialized")]
    AlreadyInitialized,

    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("unknown log level: {0:?}")]
    UnknownLevel(String),
}
