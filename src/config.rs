//! Mailer configuration and the advisory credential check.
//!
//! The configuration is read once, usually at process start, and passed by
//! reference to [`check`], the transport factory and the [`Mailer`](crate::Mailer).
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `GMAIL_USER` | Yes | Relay account, also the default sender address |
//! | `GMAIL_APP_PASSWORD` | Yes | App-specific password for the account |
//! | `DEFAULT_RECIPIENT` | No | Destination of templated sends |
//! | `MAIL_FALLBACK_TO_ACCOUNT` | No | `true` (default) sends templated mail to the account when no recipient is set |
//! | `MAIL_SENDER_NAME` | No | Display name of the default sender (default: `Email Service`) |
//! | `SMTP_HOST` | No | Relay host override (default: `smtp.gmail.com`) |
//! | `SMTP_PROVIDER_NAME` | No | Provider named in the template footer (default: `Gmail`) |
//! | `SMTP_PORT` | No | Relay port override |
//! | `SMTP_SECURITY` | No | `wrapper` (default), `starttls`, `opportunistic` or `none` |

use std::env;
use std::fmt;

use log::{info, warn};

/// Variable holding the relay account
pub const USER_VAR: &str = "GMAIL_USER";
/// Variable holding the relay secret
pub const PASSWORD_VAR: &str = "GMAIL_APP_PASSWORD";
/// Variable holding the default destination of templated sends
pub const RECIPIENT_VAR: &str = "DEFAULT_RECIPIENT";

const FALLBACK_VAR: &str = "MAIL_FALLBACK_TO_ACCOUNT";
const SENDER_NAME_VAR: &str = "MAIL_SENDER_NAME";
const HOST_VAR: &str = "SMTP_HOST";
const PROVIDER_VAR: &str = "SMTP_PROVIDER_NAME";
const PORT_VAR: &str = "SMTP_PORT";
const SECURITY_VAR: &str = "SMTP_SECURITY";

/// Display name used in the default `From` header
pub const DEFAULT_SENDER_NAME: &str = "Email Service";

/// Error raised when an optional override holds an unusable value
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid {var}: {value:?} is not a port number")]
    InvalidPort { var: &'static str, value: String },
    #[error("invalid {var}: {value:?} (expected wrapper, starttls, opportunistic or none)")]
    InvalidSecurity { var: &'static str, value: String },
    #[error("invalid {var}: {value:?} (expected true or false)")]
    InvalidFlag { var: &'static str, value: String },
}

/// How to apply TLS to the relay connection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Security {
    /// Insecure connection only (for testing purposes)
    None,
    /// Start with insecure connection and use `STARTTLS` when available
    Opportunistic,
    /// Start with insecure connection and require `STARTTLS`
    StartTls,
    /// Use TLS wrapped connection
    Wrapper,
}

impl std::str::FromStr for Security {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Security::None),
            "opportunistic" => Ok(Security::Opportunistic),
            "starttls" | "required" => Ok(Security::StartTls),
            "wrapper" | "tls" => Ok(Security::Wrapper),
            _ => Err(()),
        }
    }
}

/// Identity of the relay a session is bound to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayProfile {
    /// Provider name, shown in the template attribution line
    pub name: String,
    pub host: String,
    /// `None` keeps the default port of the security mode
    pub port: Option<u16>,
    pub security: Security,
}

impl RelayProfile {
    /// Gmail submission over implicit TLS
    pub fn gmail() -> RelayProfile {
        RelayProfile {
            name: "Gmail".to_string(),
            host: "smtp.gmail.com".to_string(),
            port: Some(465),
            security: Security::Wrapper,
        }
    }
}

impl Default for RelayProfile {
    fn default() -> Self {
        Self::gmail()
    }
}

/// Where templated sends go when no default recipient is configured
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecipientFallback {
    /// Deliver to the relay account itself
    Account,
    /// Leave the destination empty, the relay rejects the message
    Disabled,
}

impl Default for RecipientFallback {
    fn default() -> Self {
        RecipientFallback::Account
    }
}

/// Mailer configuration
#[derive(Clone, PartialEq, Eq)]
pub struct MailerConfig {
    /// Relay account identifier
    pub user: Option<String>,
    /// Relay authentication secret
    pub password: Option<String>,
    pub default_recipient: Option<String>,
    pub fallback: RecipientFallback,
    pub sender_name: String,
    pub profile: RelayProfile,
}

impl Default for MailerConfig {
    fn default() -> Self {
        MailerConfig {
            user: None,
            password: None,
            default_recipient: None,
            fallback: RecipientFallback::default(),
            sender_name: DEFAULT_SENDER_NAME.to_string(),
            profile: RelayProfile::default(),
        }
    }
}

impl fmt::Debug for MailerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerConfig")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("default_recipient", &self.default_recipient)
            .field("fallback", &self.fallback)
            .field("sender_name", &self.sender_name)
            .field("profile", &self.profile)
            .finish()
    }
}

impl MailerConfig {
    /// Creates a configuration with the given credentials and defaults elsewhere
    pub fn new<S: Into<String>>(user: S, password: S) -> MailerConfig {
        MailerConfig {
            user: Some(user.into()),
            password: Some(password.into()),
            ..Default::default()
        }
    }

    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<MailerConfig, Error> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value
    ///
    /// Empty values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<MailerConfig, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let mut profile = RelayProfile::default();
        if let Some(name) = get(PROVIDER_VAR) {
            profile.name = name;
        }
        if let Some(host) = get(HOST_VAR) {
            profile.host = host;
            // a custom host keeps the security mode's usual port unless one is given
            profile.port = None;
        }
        if let Some(value) = get(SECURITY_VAR) {
            profile.security = value.parse().map_err(|_| Error::InvalidSecurity {
                var: SECURITY_VAR,
                value: value.clone(),
            })?;
        }
        if let Some(value) = get(PORT_VAR) {
            let port = value.trim().parse().map_err(|_| Error::InvalidPort {
                var: PORT_VAR,
                value: value.clone(),
            })?;
            profile.port = Some(port);
        }

        let fallback = match get(FALLBACK_VAR) {
            None => RecipientFallback::default(),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => RecipientFallback::Account,
                "false" | "0" | "no" => RecipientFallback::Disabled,
                _ => {
                    return Err(Error::InvalidFlag {
                        var: FALLBACK_VAR,
                        value,
                    })
                }
            },
        };

        Ok(MailerConfig {
            user: get(USER_VAR),
            password: get(PASSWORD_VAR),
            default_recipient: get(RECIPIENT_VAR),
            fallback,
            sender_name: get(SENDER_NAME_VAR).unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
            profile,
        })
    }

    /// Set the default recipient of templated sends
    pub fn default_recipient<S: Into<String>>(self, recipient: S) -> MailerConfig {
        MailerConfig {
            default_recipient: Some(recipient.into()),
            ..self
        }
    }

    /// Choose where templated sends go when no default recipient is set
    pub fn fallback(self, fallback: RecipientFallback) -> MailerConfig {
        MailerConfig { fallback, ..self }
    }

    /// Bind the configuration to another relay
    pub fn profile(self, profile: RelayProfile) -> MailerConfig {
        MailerConfig { profile, ..self }
    }

    /// Destination used by templated sends
    ///
    /// The configured default recipient wins; otherwise the account itself when the
    /// fallback allows it.
    pub fn destination(&self) -> Option<&str> {
        match (&self.default_recipient, self.fallback) {
            (Some(recipient), _) => Some(recipient.as_str()),
            (None, RecipientFallback::Account) => self.user.as_deref(),
            (None, RecipientFallback::Disabled) => None,
        }
    }
}

/// Presence of a configuration field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-impls",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum FieldStatus {
    Ok,
    Missing,
}

impl FieldStatus {
    fn of(value: Option<&str>) -> FieldStatus {
        match value {
            Some(value) if !value.is_empty() => FieldStatus::Ok,
            _ => FieldStatus::Missing,
        }
    }

    pub fn is_ok(self) -> bool {
        self == FieldStatus::Ok
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldStatus::Ok => "OK",
            FieldStatus::Missing => "MISSING",
        })
    }
}

/// Snapshot of which credentials are present
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-impls",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct ConfigStatus {
    pub user: FieldStatus,
    pub password: FieldStatus,
    /// Whether templated sends have a destination; does not affect readiness
    pub recipient: FieldStatus,
}

impl ConfigStatus {
    /// True only if both the account and the secret are present
    pub fn is_ready(&self) -> bool {
        self.user.is_ok() && self.password.is_ok()
    }

    /// Names of the missing required variables
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.user.is_ok() {
            missing.push(USER_VAR);
        }
        if !self.password.is_ok() {
            missing.push(PASSWORD_VAR);
        }
        missing
    }
}

impl fmt::Display for ConfigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "user: {}, password: {}, recipient: {}",
            self.user, self.password, self.recipient
        )
    }
}

/// Reports which credentials are present
///
/// Never fails. Missing fields are logged together with the variables that are
/// required.
pub fn check(config: &MailerConfig) -> ConfigStatus {
    let status = ConfigStatus {
        user: FieldStatus::of(config.user.as_deref()),
        password: FieldStatus::of(config.password.as_deref()),
        recipient: FieldStatus::of(config.destination()),
    };

    if status.is_ready() {
        info!("email service configured correctly");
    } else {
        warn!("missing email configuration: {}", status);
        info!("required environment variables:");
        info!("  {} - your relay account address", USER_VAR);
        info!("  {} - your app-specific password", PASSWORD_VAR);
    }

    status
}
