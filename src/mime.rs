//! Conversion of an [`Email`] into a MIME message.
//!
//! Bodies become a `multipart/alternative` (plain text first, then HTML). When
//! attachments are present that part is wrapped in a `multipart/mixed` followed by
//! one part per attachment, in order.

use lettre::message::header::ContentType;
use lettre::message::{Attachment as AttachmentPart, Mailbox, Mailboxes, MultiPart};
use lettre::Message;
use uuid::Uuid;

use crate::error::{EmailResult, Error};
use crate::Email;

/// Creates a fresh message id in the domain of `sender`
pub fn message_id(sender: &Mailbox) -> String {
    format!("<{}@{}>", Uuid::new_v4(), sender.email.domain())
}

/// Parses the default sender of a relay account, e.g. `"Email Service" <me@gmail.com>`
pub fn default_sender(name: &str, account: &str) -> EmailResult<Mailbox> {
    let address = account.trim().parse().map_err(|source| Error::InvalidAddress {
        address: account.to_string(),
        source,
    })?;
    Ok(Mailbox::new(Some(name.to_string()), address))
}

fn parse_mailbox(address: &str) -> EmailResult<Mailbox> {
    address.trim().parse().map_err(|source| Error::InvalidAddress {
        address: address.to_string(),
        source,
    })
}

/// Builds the MIME message of `email`
///
/// The sender override of the email wins over `default_from`. Returns the message
/// together with the message id set on it.
pub fn build(email: &Email, default_from: &Mailbox) -> EmailResult<(Message, String)> {
    if email.to.trim().is_empty() {
        return Err(Error::MissingTo);
    }
    if email.subject.trim().is_empty() {
        return Err(Error::MissingSubject);
    }

    let from = match &email.from {
        Some(from) => parse_mailbox(from)?,
        None => default_from.clone(),
    };
    let to: Mailboxes = email.to.parse().map_err(|source| Error::InvalidAddress {
        address: email.to.clone(),
        source,
    })?;

    let id = message_id(&from);
    let mut builder = Message::builder()
        .from(from)
        .subject(email.subject.as_str())
        .message_id(Some(id.clone()));
    for mailbox in to {
        builder = builder.to(mailbox);
    }
    if let Some(reply_to) = &email.reply_to {
        builder = builder.reply_to(parse_mailbox(reply_to)?);
    }

    let alternative = MultiPart::alternative_plain_html(email.text.clone(), email.html.clone());
    let body = if email.attachments.is_empty() {
        alternative
    } else {
        let mut mixed = MultiPart::mixed().multipart(alternative);
        for attachment in &email.attachments {
            let content_type = ContentType::parse(&attachment.content_type).map_err(|source| {
                Error::InvalidContentType {
                    filename: attachment.filename.clone(),
                    content_type: attachment.content_type.clone(),
                    source,
                }
            })?;
            mixed = mixed.singlepart(
                AttachmentPart::new(attachment.filename.clone())
                    .body(attachment.content.clone(), content_type),
            );
        }
        mixed
    };

    Ok((builder.multipart(body)?, id))
}
