//! The SMTP relay submits emails to a remote mail relay with an authenticated
//! session.
//!
//! The SMTP exchange itself (connection, TLS, AUTH, pipelining) is delegated to
//! `lettre`; this module only binds a [`RelayProfile`] and the account credentials
//! into a session descriptor.

use std::fmt;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use log::debug;

use crate::config::{MailerConfig, RelayProfile, Security};
use crate::mime;
use crate::smtp::error::{Error, SmtpResult};
use crate::{Email, Relay};

pub mod error;

/// Authenticated session descriptor for the configured relay
///
/// Building it opens no connection and does not check the credentials; a
/// rejected login surfaces on the first [`submit`](Relay::submit).
pub struct SmtpRelay {
    profile: RelayProfile,
    account: String,
    sender_name: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

/// Builds an SMTP session descriptor from the configuration
///
/// Absent credentials are used as empty strings; the relay will reject them.
pub fn create_transport(config: &MailerConfig) -> SmtpResult<SmtpRelay> {
    let account = config.user.clone().unwrap_or_default();
    let password = config.password.clone().unwrap_or_default();
    SmtpRelay::new(config.profile.clone(), account, password)
        .map(|relay| relay.sender_name(config.sender_name.clone()))
}

impl SmtpRelay {
    /// Creates a session descriptor bound to `profile`
    pub fn new(profile: RelayProfile, account: String, password: String) -> SmtpResult<SmtpRelay> {
        let host = profile.host.as_str();
        let mut builder = match profile.security {
            Security::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(host)?,
            Security::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?,
            Security::Opportunistic => {
                let parameters = TlsParameters::new(host.to_string())?;
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                    .tls(Tls::Opportunistic(parameters))
            }
            Security::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };
        if let Some(port) = profile.port {
            builder = builder.port(port);
        }
        let transport = builder
            .credentials(Credentials::new(account.clone(), password))
            .build();

        debug!(
            "smtp session for {} on {}:{:?} ({:?})",
            account, profile.host, profile.port, profile.security
        );

        Ok(SmtpRelay {
            profile,
            account,
            sender_name: crate::config::DEFAULT_SENDER_NAME.to_string(),
            transport,
        })
    }

    /// Set the display name of the default sender
    pub fn sender_name(self, name: String) -> SmtpRelay {
        SmtpRelay {
            sender_name: name,
            ..self
        }
    }

    /// Relay this session is bound to
    pub fn profile(&self) -> &RelayProfile {
        &self.profile
    }

    /// Account the session authenticates as
    pub fn account(&self) -> &str {
        &self.account
    }
}

impl fmt::Debug for SmtpRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpRelay")
            .field("profile", &self.profile)
            .field("account", &self.account)
            .field("sender_name", &self.sender_name)
            .finish()
    }
}

#[async_trait]
impl Relay for SmtpRelay {
    type Error = Error;

    async fn submit(&self, email: &Email) -> SmtpResult<String> {
        let sender = mime::default_sender(&self.sender_name, &self.account)?;
        let (message, message_id) = mime::build(email, &sender)?;

        let response = self.transport.send(message).await?;
        debug!(
            "{}: accepted by {} with {}",
            message_id,
            self.profile.host,
            response.code()
        );

        Ok(message_id)
    }
}
