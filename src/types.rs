use std::fmt;

/// File attached to an email
#[derive(PartialEq, Eq, Clone)]
#[cfg_attr(
    feature = "serde-impls",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct Attachment {
    /// Name shown to the recipient
    pub filename: String,
    /// Raw file content
    #[cfg_attr(feature = "serde-impls", serde(with = "base64_bytes"))]
    pub content: Vec<u8>,
    /// Declared media type, e.g. `text/plain`
    pub content_type: String,
}

impl Attachment {
    pub fn new<F, C, T>(filename: F, content: C, content_type: T) -> Attachment
    where
        F: Into<String>,
        C: Into<Vec<u8>>,
        T: Into<String>,
    {
        Attachment {
            filename: filename.into(),
            content: content.into(),
            content_type: content_type.into(),
        }
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("content", &format_args!("{} bytes", self.content.len()))
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Fully specified email, ready to be handed to a relay
///
/// `to` is passed verbatim to the relay; it may hold a single address or a
/// comma-separated list.
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(
    feature = "serde-impls",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
    /// Overrides the relay's default sender
    #[cfg_attr(feature = "serde-impls", serde(default))]
    pub from: Option<String>,
    #[cfg_attr(feature = "serde-impls", serde(default))]
    pub reply_to: Option<String>,
    #[cfg_attr(feature = "serde-impls", serde(default))]
    pub attachments: Vec<Attachment>,
}

impl Email {
    /// Creates an email without sender override, reply-to or attachments
    pub fn new<S: Into<String>>(to: S, subject: S, html: S, text: S) -> Email {
        Email {
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
            text: text.into(),
            from: None,
            reply_to: None,
            attachments: Vec::new(),
        }
    }

    /// Set the sender, replacing the relay's default one
    pub fn from<S: Into<String>>(self, from: S) -> Email {
        Email {
            from: Some(from.into()),
            ..self
        }
    }

    /// Set the address replies are routed to
    pub fn reply_to<S: Into<String>>(self, reply_to: S) -> Email {
        Email {
            reply_to: Some(reply_to.into()),
            ..self
        }
    }

    /// Append an attachment, keeping the order of previous ones
    pub fn attachment(mut self, attachment: Attachment) -> Email {
        self.attachments.push(attachment);
        self
    }

    /// Replace all attachments
    pub fn attachments(self, attachments: Vec<Attachment>) -> Email {
        Email {
            attachments,
            ..self
        }
    }
}

/// Outcome of an accepted submission
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(
    feature = "serde-impls",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct SendResult {
    pub success: bool,
    /// Identifier the relay assigned to the message
    pub message_id: String,
}

impl SendResult {
    pub fn delivered<S: Into<String>>(message_id: S) -> SendResult {
        SendResult {
            success: true,
            message_id: message_id.into(),
        }
    }
}

/// Simple email envelope representation
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(
    feature = "serde-impls",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct Envelope {
    /// The envelope recipients' addresses
    ///
    /// This can not be empty.
    forward_path: Vec<String>,
    /// The envelope sender address
    reverse_path: Option<String>,
}

impl Envelope {
    /// Destination addresses of the envelope
    pub fn forward_path(&self) -> &[String] {
        self.forward_path.as_slice()
    }

    /// Source address of the envelope
    pub fn reverse_path(&self) -> Option<&str> {
        self.reverse_path.as_deref()
    }
}

impl From<&lettre::address::Envelope> for Envelope {
    fn from(envelope: &lettre::address::Envelope) -> Envelope {
        Envelope {
            forward_path: envelope.to().iter().map(ToString::to_string).collect(),
            reverse_path: envelope.from().map(ToString::to_string),
        }
    }
}

#[cfg(feature = "serde-impls")]
mod base64_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::decode(encoded).map_err(serde::de::Error::custom)
    }
}
