//! The file relay writes the emails to the given directory. Each email produces
//! `<id>.eml` with the formatted message and `<id>.json` with its envelope, where
//! `<id>` is the message id without angle brackets.
//! It can be useful for testing purposes, or if you want to keep track of sent messages.
//!

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lettre::message::Mailbox;
use log::{info, warn};
use tokio::fs;

use crate::file::error::{Error, FileResult};
use crate::mime;
use crate::{Email, Envelope, Relay};

pub mod error;

/// Writes the content and the envelope information to a file.
#[derive(Debug)]
pub struct FileRelay {
    path: PathBuf,
    sender: Mailbox,
}

impl FileRelay {
    /// Creates a new relay to the given directory
    ///
    /// `sender` is used for emails without a sender override.
    pub fn new<P: AsRef<Path>>(path: P, sender: Mailbox) -> FileRelay {
        FileRelay {
            path: PathBuf::from(path.as_ref()),
            sender,
        }
    }

    /// Path of the formatted message written for `message_id`
    pub fn message_path(&self, message_id: &str) -> PathBuf {
        self.path.join(format!("{}.eml", file_stem(message_id)))
    }

    /// Path of the envelope record written for `message_id`
    pub fn envelope_path(&self, message_id: &str) -> PathBuf {
        self.path.join(format!("{}.json", file_stem(message_id)))
    }

    /// Writes the message and its envelope record, or neither
    async fn write_pair(
        &self,
        message_id: &str,
        formatted: Vec<u8>,
        serialized: String,
    ) -> FileResult<()> {
        let message_path = self.message_path(message_id);
        fs::write(&message_path, formatted).await?;
        if let Err(err) = fs::write(self.envelope_path(message_id), serialized).await {
            if let Err(cleanup) = fs::remove_file(&message_path).await {
                warn!(
                    "{}: could not remove {}: {}",
                    message_id,
                    message_path.display(),
                    cleanup
                );
            }
            return Err(err.into());
        }
        Ok(())
    }
}

/// Envelope record stored next to each message
#[derive(PartialEq, Eq, Clone, Debug, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct SerializableEmail {
    pub envelope: Envelope,
    pub message_id: String,
    pub subject: String,
}

fn file_stem(message_id: &str) -> String {
    message_id
        .trim_matches(|c: char| c == '<' || c == '>')
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '@' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl Relay for FileRelay {
    type Error = Error;

    async fn submit(&self, email: &Email) -> FileResult<String> {
        let (message, message_id) = mime::build(email, &self.sender)?;

        let mut serialized = serde_json::to_string(&SerializableEmail {
            envelope: message.envelope().into(),
            message_id: message_id.clone(),
            subject: email.subject.clone(),
        })?;
        serialized += "\n";

        self.write_pair(&message_id, message.formatted(), serialized).await?;

        info!("{}: written to {}", message_id, self.path.display());
        Ok(message_id)
    }
}
