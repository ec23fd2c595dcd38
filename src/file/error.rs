//! Error and result type for file relay

use std::io;

/// An enum of all error kinds.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The email could not be turned into a MIME message
    #[error("message: {0}")]
    Message(#[from] crate::error::Error),
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// JSON serialization error
    #[error("serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

/// File result type
pub type FileResult<T> = Result<T, Error>;
