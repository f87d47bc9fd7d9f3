use super::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a syntactically valid email address.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Email {
    type Error = Error;

    /// Builds an [Email] from the given string if, and only if, the string matches the email's regex.
    fn try_from(value: &str) -> Result<Self> {
        value.to_string().try_into()
    }
}

impl TryFrom<String> for Email {
    type Error = Error;

    /// Builds an [Email] from the given string if, and only if, the string matches the email's regex.
    fn try_from(email: String) -> Result<Self> {
        REGEX
            .is_match(&email)
            .then_some(Self(email))
            .ok_or(Error::NotAnEmail)
    }
}

// dot-atom local part, as accepted by most web frameworks, without quoted strings
const PATTERN: &str = r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,63}$";
static REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(PATTERN).expect("email pattern must compile"));

impl Email {
    const DOMAIN_SEPARATOR: char = '@';

    /// Returns the local part of the email, everything before the `@`.
    pub fn username(&self) -> &str {
        self.0
            .split(Self::DOMAIN_SEPARATOR)
            .next()
            .unwrap_or_default()
    }
}

/// The identity messages are sent on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub email: String,
    pub name: String,
}

impl fmt::Display for Sender {
    /// Formats the sender as a mailbox, `Name <email>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

impl From<&crate::config::MailerSendConfig> for Sender {
    fn from(config: &crate::config::MailerSendConfig) -> Self {
        Self {
            email: config.from_email.clone(),
            name: config.from_name.clone(),
        }
    }
}

/// A transactional email, built for a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: Sender,
    pub to: Email,
    pub subject: String,
    /// Plain text fallback of the html body.
    pub text: String,
    pub html: String,
}
