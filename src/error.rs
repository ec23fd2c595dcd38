//! Error and result type for email content

use lettre::address::AddressError;
use lettre::message::header::ContentTypeErr;

/// Error type for email content
///
/// Raised by a relay while turning an [`Email`](crate::Email) into a MIME message,
/// before anything is sent.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Missing to in envelope
    #[error("missing destination address")]
    MissingTo,
    /// Subject line is empty
    #[error("missing subject")]
    MissingSubject,
    /// Invalid email
    #[error("invalid email address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        source: AddressError,
    },
    /// Attachment media type could not be parsed
    #[error("invalid content type {content_type:?} for attachment {filename:?}")]
    InvalidContentType {
        filename: String,
        content_type: String,
        source: ContentTypeErr,
    },
    /// The message builder refused the headers
    #[error("message build: {0}")]
    Build(#[from] lettre::error::Error),
}

/// Email result type
pub type EmailResult<T> = Result<T, Error>;
