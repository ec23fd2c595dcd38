//! Error and result type for the SMTP relay

use lettre::transport::smtp;

/// An enum of all error kinds.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The email could not be turned into a MIME message
    #[error("message: {0}")]
    Message(#[from] crate::error::Error),
    /// Error reported by the SMTP transport: connection, TLS, authentication or a
    /// negative server reply
    #[error("smtp: {0}")]
    Transport(#[from] smtp::Error),
}

// Reply codes for "authentication required", "mechanism too weak" and
// "credentials invalid"
// https://tools.ietf.org/html/rfc4954#section-6
const AUTH_CODES: [&str; 3] = ["530", "534", "535"];

impl Error {
    /// Returns true if the relay refused the credentials
    pub fn is_authentication(&self) -> bool {
        match self {
            Error::Message(_) => false,
            Error::Transport(err) => {
                let code = err.status().map(|code| code.to_string());
                refused_credentials(code.as_deref(), &err.to_string())
            }
        }
    }
}

/// Whether a failed exchange was a refused login, judged by its reply code or its
/// description
fn refused_credentials(code: Option<&str>, description: &str) -> bool {
    code.map_or(false, |code| AUTH_CODES.contains(&code))
        || description.to_ascii_lowercase().contains("auth")
}

/// SMTP result type
pub type SmtpResult<T> = Result<T, Error>;
