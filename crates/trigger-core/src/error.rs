//! Error types shared by the timer core

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no timer [{index}] (there are {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no timers yet")]
    NoTimers,

    #[error("invalid index '{0}'")]
    InvalidIndex(String),

    #[error("unrecognized command '{0}'")]
    UnrecognizedCommand(String),

    #[error("empty command")]
    EmptyCommand,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Errors a user can cause from the command line; the session reports
    /// these and keeps going.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::IndexOutOfRange { .. }
                | Error::NoTimers
                | Error::InvalidIndex(_)
                | Error::UnrecognizedCommand(_)
                | Error::EmptyCommand
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
