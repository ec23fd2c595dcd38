//! Error and result type for the stub relay

/// An enum of all error kinds.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The configured refusal
    #[error("rejected: {0}")]
    Rejected(String),
    /// Email had no recipient
    #[error("missing destination address")]
    MissingTo,
}

impl From<&'static str> for Error {
    fn from(string: &'static str) -> Error {
        Error::Rejected(string.to_string())
    }
}

/// Stub result type
pub type StubResult = Result<(), Error>;
