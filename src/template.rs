//! Fixed HTML and plain-text layout for templated sends.
//!
//! Both variants are rendered from the same [`SimpleEmail`] fields and timestamp and
//! carry the same facts: sender name, sender email, message body, attachment count
//! (only when there are attachments) and send time.

use chrono::{DateTime, TimeZone};

use crate::Attachment;

/// Format of the send timestamp in both body variants
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Semantic fields of a templated send
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(
    feature = "serde-impls",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct SimpleEmail {
    /// Display name of the person the message is from
    pub name: String,
    /// Address of that person; replies are routed here
    pub email: String,
    pub subject: String,
    pub message: String,
    #[cfg_attr(feature = "serde-impls", serde(default))]
    pub attachments: Vec<Attachment>,
}

impl SimpleEmail {
    pub fn new<S: Into<String>>(name: S, email: S, subject: S, message: S) -> SimpleEmail {
        SimpleEmail {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
            attachments: Vec::new(),
        }
    }

    /// Set the attachments
    pub fn attachments(self, attachments: Vec<Attachment>) -> SimpleEmail {
        SimpleEmail {
            attachments,
            ..self
        }
    }
}

/// Rendered body variants of a templated send
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Rendered {
    pub html: String,
    pub text: String,
}

/// Renders both body variants
///
/// `attribution` is the footer line, e.g. `Sent via Gmail SMTP Service`.
pub fn render<Tz>(fields: &SimpleEmail, attribution: &str, sent_at: &DateTime<Tz>) -> Rendered
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let time = sent_at.format(TIMESTAMP_FORMAT).to_string();
    Rendered {
        html: render_html(fields, attribution, &time),
        text: render_text(fields, attribution, &time),
    }
}

/// Renders the HTML variant
///
/// Field values are inserted as given, so both variants carry them literally.
/// Callers rendering untrusted markup must sanitize the fields beforehand.
pub fn render_html(fields: &SimpleEmail, attribution: &str, time: &str) -> String {
    let notice = match fields.attachments.len() {
        0 => String::new(),
        count => format!(
            r#"
        <div style="background-color: #e7f3ff; border: 1px solid #b3d7ff; border-radius: 4px; padding: 10px; margin-top: 20px;">
          <strong>&#128206; Attachments:</strong> {} file(s)
        </div>
"#,
            count
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background-color: #f8f9fa; border-radius: 8px; padding: 30px; border: 1px solid #dee2e6;">
    <h2 style="color: #495057; margin-top: 0;">New Message</h2>

    <div style="background-color: white; border-radius: 4px; padding: 20px; margin: 20px 0;">
      <p style="margin: 0 0 10px 0;"><strong>From:</strong> {name}</p>
      <p style="margin: 0 0 20px 0;"><strong>Email:</strong> <a href="mailto:{email}" style="color: #007bff;">{email}</a></p>

      <div style="border-top: 1px solid #dee2e6; padding-top: 20px;">
        <h3 style="color: #495057; margin-top: 0;">Message:</h3>
        <p style="white-space: pre-wrap; margin: 0;">{message}</p>
      </div>
    </div>
{notice}
    <div style="margin-top: 20px; padding-top: 20px; border-top: 1px solid #dee2e6; font-size: 12px; color: #6c757d;">
      <p style="margin: 0;">{attribution}</p>
      <p style="margin: 5px 0 0 0;">Time: {time}</p>
    </div>
  </div>
</body>
</html>
"#,
        name = fields.name,
        email = fields.email,
        message = fields.message,
        notice = notice,
        attribution = attribution,
        time = time,
    )
}

/// Renders the plain-text variant
pub fn render_text(fields: &SimpleEmail, attribution: &str, time: &str) -> String {
    let notice = match fields.attachments.len() {
        0 => String::new(),
        count => format!("\nAttachments: {} file(s)\n", count),
    };

    format!(
        "New Message\n\
         ===========\n\
         \n\
         From: {name}\n\
         Email: {email}\n\
         \n\
         Message:\n\
         --------\n\
         {message}\n\
         {notice}\n\
         --\n\
         {attribution}\n\
         Time: {time}\n",
        name = fields.name,
        email = fields.email,
        message = fields.message,
        notice = notice,
        attribution = attribution,
        time = time,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{FixedOffset, Local};

    const ATTRIBUTION: &str = "Sent via Gmail SMTP Service";

    fn contact_form() -> SimpleEmail {
        SimpleEmail::new(
            "John Doe",
            "john.doe@example.com",
            "Contact Form Submission",
            "Hello!\n\nThis is a message from your contact form.\n\nBest regards,\nJohn",
        )
    }

    fn two_attachments() -> Vec<Attachment> {
        vec![
            Attachment::new("example.txt", "text content", "text/plain"),
            Attachment::new("data.json", "{\"example\":\"data\"}", "application/json"),
        ]
    }

    #[test]
    fn test_both_variants_carry_sender_and_message() {
        let fields = contact_form();
        let rendered = render(&fields, ATTRIBUTION, &Local::now());

        for body in [&rendered.html, &rendered.text].iter() {
            assert!(body.contains("John Doe"));
            assert!(body.contains("john.doe@example.com"));
            assert!(body.contains(&fields.message));
            assert!(body.contains(ATTRIBUTION));
        }
    }

    #[test]
    fn test_no_attachment_notice_without_attachments() {
        let rendered = render(&contact_form(), ATTRIBUTION, &Local::now());
        assert!(!rendered.html.contains("Attachments"));
        assert!(!rendered.text.contains("Attachments"));
    }

    #[test]
    fn test_attachment_count_in_both_variants() {
        let fields = contact_form().attachments(two_attachments());
        let rendered = render(&fields, ATTRIBUTION, &Local::now());

        assert!(rendered.html.contains("Attachments:</strong> 2 file(s)"));
        assert!(rendered.text.contains("Attachments: 2 file(s)"));
    }

    #[test]
    fn test_timestamp_is_identical_in_both_variants() {
        let sent_at = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .unwrap();
        let rendered = render(&contact_form(), ATTRIBUTION, &sent_at);

        assert!(rendered.html.contains("Time: 2024-03-09 14:05:07"));
        assert!(rendered.text.contains("Time: 2024-03-09 14:05:07"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let sent_at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        let fields = contact_form().attachments(two_attachments());
        assert_eq!(
            render(&fields, ATTRIBUTION, &sent_at),
            render(&fields, ATTRIBUTION, &sent_at)
        );
    }

    #[test]
    fn test_field_values_are_literal_in_both_variants() {
        let fields = SimpleEmail::new(
            "Tom O'Brien & Co",
            "o'brien@example.com",
            "Hi",
            "Fish & chips <b>tonight</b>",
        );
        let rendered = render(&fields, ATTRIBUTION, &Local::now());

        for body in [&rendered.html, &rendered.text].iter() {
            assert!(body.contains("Tom O'Brien & Co"));
            assert!(body.contains("o'brien@example.com"));
            assert!(body.contains("Fish & chips <b>tonight</b>"));
        }
        assert!(rendered.html.contains("href=\"mailto:o'brien@example.com\""));
    }
}
