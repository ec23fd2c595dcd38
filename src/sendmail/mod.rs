//! The sendmail relay hands the email to the local sendmail command.
//!

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::{AsyncSendmailTransport, AsyncTransport, Tokio1Executor};
use log::info;

use crate::mime;
use crate::sendmail::error::{Error, SendmailResult};
use crate::{Email, Relay};

pub mod error;

/// Sends an email using the `sendmail` command
#[allow(missing_debug_implementations)]
pub struct SendmailRelay {
    sender: Mailbox,
    transport: AsyncSendmailTransport<Tokio1Executor>,
}

impl SendmailRelay {
    /// Creates a new relay with the default `sendmail` command found in `PATH`
    ///
    /// `sender` is used for emails without a sender override.
    pub fn new(sender: Mailbox) -> SendmailRelay {
        SendmailRelay {
            sender,
            transport: AsyncSendmailTransport::new(),
        }
    }

    /// Creates a new relay to the given sendmail command
    pub fn new_with_command<S: Into<String>>(sender: Mailbox, command: S) -> SendmailRelay {
        SendmailRelay {
            sender,
            transport: AsyncSendmailTransport::new_with_command(command.into()),
        }
    }
}

#[async_trait]
impl Relay for SendmailRelay {
    type Error = Error;

    async fn submit(&self, email: &Email) -> SendmailResult<String> {
        let (message, message_id) = mime::build(email, &self.sender)?;
        self.transport.send(message).await?;
        info!("Wrote {} message to sendmail", message_id);
        Ok(message_id)
    }
}
