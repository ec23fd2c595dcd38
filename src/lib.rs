//! Relay-Mailer sends templated transactional emails through a third-party SMTP relay.
//!
//! Every send is a single request/response round trip: the message is composed,
//! handed to a [`Relay`] exactly once, and either the relay-assigned message id
//! or the relay's own error is returned. There is no queue and no retry.
//!
//! ```ignore
//! let config = MailerConfig::from_env()?;
//! if config::check(&config).is_ready() {
//!     let mailer = Mailer::from_config(&config)?;
//!     mailer.send_simple(SimpleEmail::new("Jane", "jane@example.com", "Hi", "Hello!")).await?;
//! }
//! ```

#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    missing_debug_implementations,
    clippy::unwrap_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod error;
#[cfg(feature = "file-transport")]
pub mod file;
mod mailer;
pub mod mime;
#[cfg(feature = "sendmail-transport")]
pub mod sendmail;
#[cfg(feature = "smtp-transport")]
pub mod smtp;
pub mod stub;
pub mod template;
mod types;

pub use types::*;

pub use crate::config::{ConfigStatus, MailerConfig, RecipientFallback, RelayProfile, Security};
#[cfg(feature = "file-transport")]
pub use crate::file::FileRelay;
pub use crate::mailer::Mailer;
#[cfg(feature = "sendmail-transport")]
pub use crate::sendmail::SendmailRelay;
#[cfg(feature = "smtp-transport")]
pub use crate::smtp::{create_transport, SmtpRelay};
pub use crate::stub::StubRelay;
pub use crate::template::SimpleEmail;

use async_trait::async_trait;

/// Capability to hand a composed email to a mail relay
///
/// A relay performs exactly one submission attempt per call and answers with the
/// identifier it assigned to the message. Errors are the relay's own and are
/// returned to the caller untouched.
#[async_trait]
pub trait Relay: Send + Sync {
    /// Error raised when the relay refuses or fails to accept a message
    type Error: std::error::Error + Send + Sync + 'static;

    /// Submits the email and returns its message id
    async fn submit(&self, email: &Email) -> Result<String, Self::Error>;
}

#[async_trait]
impl<R: Relay + ?Sized> Relay for std::sync::Arc<R> {
    type Error = R::Error;

    async fn submit(&self, email: &Email) -> Result<String, Self::Error> {
        (**self).submit(email).await
    }
}

/// Declares an async test running on the tokio runtime
#[doc(hidden)]
#[macro_export]
macro_rules! async_test {
    ($name:ident, $block:block) => {
        #[tokio::test]
        async fn $name() {
            $block
        }
    };
}
