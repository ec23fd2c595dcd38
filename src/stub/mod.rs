//! The stub relay only logs the message envelope and records the email. It can be
//! useful for testing purposes.
//!

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::info;

use crate::stub::error::{Error, StubResult};
use crate::{Email, Relay};

pub mod error;

/// This relay logs the message envelope and returns the given response
///
/// Clones share the record of submitted emails.
#[derive(Debug, Clone)]
pub struct StubRelay {
    response: StubResult,
    sent: Arc<Mutex<Vec<Email>>>,
    counter: Arc<AtomicUsize>,
}

impl StubRelay {
    /// Creates a new relay that always returns the given response
    pub fn new(response: StubResult) -> StubRelay {
        StubRelay {
            response,
            sent: Arc::new(Mutex::new(Vec::new())),
            counter: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a new relay that always returns a success response
    pub fn new_positive() -> StubRelay {
        StubRelay::new(Ok(()))
    }

    /// Emails accepted so far, in submission order
    pub fn sent(&self) -> Vec<Email> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl Relay for StubRelay {
    type Error = Error;

    async fn submit(&self, email: &Email) -> Result<String, Error> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let message_id = format!("<stub-{}@localhost>", n);
        info!(
            "{}: from=<{}> to=<{}> reply-to=<{}> attachments={}",
            message_id,
            email.from.as_deref().unwrap_or(""),
            email.to,
            email.reply_to.as_deref().unwrap_or(""),
            email.attachments.len()
        );

        if email.to.trim().is_empty() {
            return Err(Error::MissingTo);
        }
        self.response.clone()?;

        match self.sent.lock() {
            Ok(mut sent) => sent.push(email.clone()),
            Err(poisoned) => poisoned.into_inner().push(email.clone()),
        }
        Ok(message_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::async_test;

    fn email() -> Email {
        Email::new("inbox@example.com", "Hello", "<p>Hi</p>", "Hi")
    }

    async_test! { test_positive_records_email, {
        let relay = StubRelay::new_positive();
        let first = relay.submit(&email()).await.unwrap();
        let second = relay.submit(&email()).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(relay.sent(), vec![email(), email()]);
    }}

    async_test! { test_configured_error_is_returned, {
        let relay = StubRelay::new(Err("535 authentication failed".into()));
        let err = relay.submit(&email()).await.unwrap_err();

        assert_eq!(err, Error::Rejected("535 authentication failed".to_string()));
        assert!(relay.sent().is_empty());
    }}

    async_test! { test_missing_recipient_is_rejected, {
        let relay = StubRelay::new_positive();
        let err = relay.submit(&Email::new("", "Hello", "<p>Hi</p>", "Hi")).await.unwrap_err();
        assert_eq!(err, Error::MissingTo);
    }}
}
