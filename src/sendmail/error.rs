//! Error and result type for sendmail relay

/// An enum of all error kinds.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The email could not be turned into a MIME message
    #[error("message: {0}")]
    Message(#[from] crate::error::Error),
    /// The sendmail command failed or could not be run
    #[error("sendmail: {0}")]
    Command(#[from] lettre::transport::sendmail::Error),
}

/// sendmail result type
pub type SendmailResult<T> = Result<T, Error>;
