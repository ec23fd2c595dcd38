use chrono::{DateTime, Local, TimeZone};
use log::{error, info};

use crate::config::MailerConfig;
use crate::template::{self, SimpleEmail};
use crate::{Email, Relay, SendResult};

/// Composes emails and submits them through a [`Relay`]
///
/// Every send is a single attempt. Errors are logged once and returned exactly as
/// the relay raised them.
#[derive(Debug, Clone)]
pub struct Mailer<R> {
    relay: R,
    /// Destination of templated sends
    destination: String,
    /// Footer line of templated sends
    attribution: String,
}

#[cfg(feature = "smtp-transport")]
impl Mailer<crate::smtp::SmtpRelay> {
    /// Creates a mailer over an SMTP session built from `config`
    pub fn from_config(config: &MailerConfig) -> crate::smtp::error::SmtpResult<Self> {
        Ok(Mailer::new(crate::smtp::create_transport(config)?, config))
    }
}

impl<R: Relay> Mailer<R> {
    /// Creates a mailer over `relay`
    ///
    /// The destination of templated sends is resolved from `config` once, see
    /// [`MailerConfig::destination`].
    pub fn new(relay: R, config: &MailerConfig) -> Mailer<R> {
        Mailer {
            relay,
            destination: config.destination().unwrap_or_default().to_string(),
            attribution: format!("Sent via {} SMTP Service", config.profile.name),
        }
    }

    /// The relay emails are submitted to
    pub fn relay(&self) -> &R {
        &self.relay
    }

    /// Destination used by templated sends, empty when none is configured
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Submits a fully specified email as is
    pub async fn send(&self, email: Email) -> Result<SendResult, R::Error> {
        match self.relay.submit(&email).await {
            Ok(message_id) => {
                info!("email sent successfully to {}", email.to);
                info!("  message id: {}", message_id);
                Ok(SendResult::delivered(message_id))
            }
            Err(err) => {
                error!("failed to send email to {}: {}", email.to, err);
                Err(err)
            }
        }
    }

    /// Renders the template from `fields` and sends it to the configured destination
    ///
    /// Replies are routed to `fields.email`.
    pub async fn send_simple(&self, fields: SimpleEmail) -> Result<SendResult, R::Error> {
        let email = self.compose(fields, &Local::now());
        self.send(email).await
    }

    /// Sends a canned templated email to check the configuration end to end
    pub async fn send_test(&self) -> Result<SendResult, R::Error> {
        info!("sending test email");
        self.send_simple(test_email()).await
    }

    /// Builds the email of a templated send without sending it
    pub fn compose<Tz>(&self, fields: SimpleEmail, sent_at: &DateTime<Tz>) -> Email
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let rendered = template::render(&fields, &self.attribution, sent_at);
        Email {
            to: self.destination.clone(),
            subject: fields.subject,
            html: rendered.html,
            text: rendered.text,
            from: None,
            reply_to: Some(fields.email),
            attachments: fields.attachments,
        }
    }
}

/// Fields of the configuration test email
pub fn test_email() -> SimpleEmail {
    SimpleEmail::new(
        "Test User",
        "test@example.com",
        "Test Email - Gmail SMTP Service",
        "This is a test email to verify that the Gmail SMTP service is working correctly.\n\n\
         If you receive this email, your configuration is correct!",
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::async_test;
    use crate::config::RecipientFallback;
    use crate::stub::{error::Error as StubError, StubRelay};
    use crate::Attachment;

    fn config() -> MailerConfig {
        MailerConfig::new("relay@gmail.com", "app-password")
    }

    fn contact_form() -> SimpleEmail {
        SimpleEmail::new(
            "John Doe",
            "john.doe@example.com",
            "Contact Form Submission",
            "Hello!\n\nThis is a message from your contact form.",
        )
    }

    async_test! { test_direct_send_returns_message_id, {
        let mailer = Mailer::new(StubRelay::new_positive(), &config());
        let email = Email::new("inbox@example.com", "Custom HTML Email", "<h1>Welcome!</h1>", "Welcome!")
            .reply_to("noreply@example.com");

        let result = mailer.send(email.clone()).await.unwrap();

        assert!(result.success);
        assert!(!result.message_id.is_empty());
        assert_eq!(mailer.relay().sent(), vec![email]);
    }}

    async_test! { test_direct_send_propagates_relay_error, {
        let refusal = StubError::Rejected("535 5.7.8 Username and Password not accepted".into());
        let mailer = Mailer::new(StubRelay::new(Err(refusal.clone())), &config());

        let err = mailer
            .send(Email::new("inbox@example.com", "Hello", "<p>Hi</p>", "Hi"))
            .await
            .unwrap_err();

        assert_eq!(err, refusal);
        assert!(mailer.relay().sent().is_empty());
    }}

    async_test! { test_templated_send_routes_replies_to_sender, {
        let mailer = Mailer::new(StubRelay::new_positive(), &config());
        mailer.send_simple(contact_form()).await.unwrap();

        let sent = mailer.relay().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].reply_to.as_deref(), Some("john.doe@example.com"));
        assert_eq!(sent[0].from, None);
        assert_eq!(sent[0].subject, "Contact Form Submission");
    }}

    async_test! { test_templated_send_uses_default_recipient, {
        let config = config().default_recipient("inbox@example.com");
        let mailer = Mailer::new(StubRelay::new_positive(), &config);
        mailer.send_simple(contact_form()).await.unwrap();

        assert_eq!(mailer.relay().sent()[0].to, "inbox@example.com");
    }}

    async_test! { test_templated_send_falls_back_to_account, {
        let mailer = Mailer::new(StubRelay::new_positive(), &config());
        mailer.send_simple(contact_form()).await.unwrap();

        assert_eq!(mailer.relay().sent()[0].to, "relay@gmail.com");
    }}

    async_test! { test_disabled_fallback_leaves_rejection_to_relay, {
        let config = config().fallback(RecipientFallback::Disabled);
        let mailer = Mailer::new(StubRelay::new_positive(), &config);

        assert_eq!(mailer.destination(), "");
        let err = mailer.send_simple(contact_form()).await.unwrap_err();
        assert_eq!(err, StubError::MissingTo);
    }}

    async_test! { test_test_email_is_templated, {
        let mailer = Mailer::new(StubRelay::new_positive(), &config());
        let result = mailer.send_test().await.unwrap();

        assert!(result.success);
        let sent = mailer.relay().sent();
        assert_eq!(sent[0].subject, "Test Email - Gmail SMTP Service");
        assert!(sent[0].text.contains("Test User"));
        assert_eq!(sent[0].reply_to.as_deref(), Some("test@example.com"));
    }}

    #[test]
    fn test_attribution_names_provider_not_host() {
        let overrides = |var: &str| match var {
            "GMAIL_USER" => Some("relay@gmail.com".to_string()),
            "SMTP_HOST" => Some("127.0.0.1".to_string()),
            _ => None,
        };
        let config = MailerConfig::from_lookup(overrides).unwrap();
        let mailer = Mailer::new(StubRelay::new_positive(), &config);

        let email = mailer.compose(contact_form(), &Local::now());

        assert!(email.text.contains("Sent via Gmail SMTP Service"));
        assert!(!email.html.contains("127.0.0.1"));
        assert!(!email.text.contains("127.0.0.1"));
    }

    #[test]
    fn test_compose_carries_attachments_and_count() {
        let mailer = Mailer::new(StubRelay::new_positive(), &config());
        let fields = contact_form().attachments(vec![
            Attachment::new("example.txt", "text", "text/plain"),
            Attachment::new("data.json", "{}", "application/json"),
        ]);

        let email = mailer.compose(fields, &Local::now());

        assert_eq!(email.attachments.len(), 2);
        assert!(email.html.contains("2 file(s)"));
        assert!(email.text.contains("Attachments: 2 file(s)"));
        assert!(email.html.contains("Sent via Gmail SMTP Service"));
    }
}
