use std::path::PathBuf;

use thiserror::Error;

/// Result type shared across handle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the binding.
///
/// A missing key is not an error: [`crate::DB::get`] reports it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The engine reported a failure through its error-string out-parameter.
    /// The message is the engine's text, unmodified.
    #[error("{0}")]
    Engine(String),
    /// The path cannot be represented as a C string.
    #[error("invalid database path: {}", .0.display())]
    InvalidPath(PathBuf),
    /// The handle was never opened, or has been closed.
    #[error("database is not open")]
    NotOpen,
    /// `open` was called on a handle that already owns an engine instance.
    #[error("database is already open")]
    AlreadyOpen,
}

impl Error {
    /// Engine message text, if this error originated in the engine.
    pub fn engine_message(&self) -> Option<&str> {
        match self {
            Error::Engine(message) => Some(message),
            _ => None,
        }
    }
}
