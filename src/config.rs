//! Environment sourced configuration.
//!
//! Nothing in here panics: values with a sensible default are exposed as
//! lazy statics, while the credentials and sender identity are gathered into
//! explicit structs whose construction reports what is missing.

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_MAILERSEND_URL: &str = "https://api.mailersend.com/v1/";
pub const DEFAULT_TEMPLATES_PATH: &str = "templates/*.html";
pub const DEFAULT_VERIFY_ROUTE: &str = "/employer/verify-email/{uidb64}/{token}/";
pub const DEFAULT_TOKEN_TIMEOUT: u64 = 259_200; // 3 days

pub const ENV_MAILERSEND_API_TOKEN: &str = "MAILERSEND_API_TOKEN";
pub const ENV_MAILERSEND_FROM_EMAIL: &str = "MAILERSEND_FROM_EMAIL";
pub const ENV_MAILERSEND_FROM_NAME: &str = "MAILERSEND_FROM_NAME";
pub const ENV_MAILERSEND_API_URL: &str = "MAILERSEND_API_URL";
pub const ENV_MAILERSEND_TIMEOUT: &str = "MAILERSEND_TIMEOUT";
pub const ENV_SECRET_KEY: &str = "SECRET_KEY";
pub const ENV_TOKEN_TIMEOUT: &str = "TOKEN_TIMEOUT";
pub const ENV_MAIL_TEMPLATES: &str = "MAIL_TEMPLATES";
pub const ENV_EMPLOYER_VERIFY_ROUTE: &str = "EMPLOYER_VERIFY_ROUTE";
pub const ENV_SMTP_TRANSPORT: &str = "SMTP_TRANSPORT";
pub const ENV_SMTP_USERNAME: &str = "SMTP_USERNAME";
pub const ENV_SMTP_PASSWORD: &str = "SMTP_PASSWORD";

pub static MAIL_TEMPLATES: Lazy<String> = Lazy::new(|| {
    env::var(ENV_MAIL_TEMPLATES).unwrap_or_else(|_| DEFAULT_TEMPLATES_PATH.to_string())
});

pub static EMPLOYER_VERIFY_ROUTE: Lazy<String> = Lazy::new(|| {
    env::var(ENV_EMPLOYER_VERIFY_ROUTE).unwrap_or_else(|_| DEFAULT_VERIFY_ROUTE.to_string())
});

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
    #[error("environment variable {var} is not valid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Credentials and sender identity for the MailerSend API.
#[derive(Debug, Clone)]
pub struct MailerSendConfig {
    /// Checked on every send instead of here, so a missing token fails each
    /// delivery rather than the whole process.
    pub api_token: Option<String>,
    pub from_email: String,
    pub from_name: String,
    pub api_base_url: Url,
    /// Applied to every request made to the API.
    pub timeout: Duration,
}

impl MailerSendConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration out of any key-value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(ENV_MAILERSEND_API_URL)
            .unwrap_or_else(|| DEFAULT_MAILERSEND_URL.to_string());

        let api_base_url = Url::parse(&api_base_url).map_err(|err| Error::Invalid {
            var: ENV_MAILERSEND_API_URL,
            reason: err.to_string(),
        })?;

        Ok(Self {
            api_token: lookup(ENV_MAILERSEND_API_TOKEN).filter(|token| !token.is_empty()),
            from_email: required(&lookup, ENV_MAILERSEND_FROM_EMAIL)?,
            from_name: required(&lookup, ENV_MAILERSEND_FROM_NAME)?,
            api_base_url,
            timeout: required(&lookup, ENV_MAILERSEND_TIMEOUT)
                .and_then(|secs| seconds(ENV_MAILERSEND_TIMEOUT, &secs))?,
        })
    }

    /// Returns the url of the email sending endpoint.
    pub fn email_endpoint(&self) -> Result<Url> {
        let mut base = self.api_base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        base.join("email").map_err(|err| Error::Invalid {
            var: ENV_MAILERSEND_API_URL,
            reason: err.to_string(),
        })
    }
}

/// Signing secret and validity window of verification tokens.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: Vec<u8>,
    pub timeout: Duration,
}

impl TokenConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = lookup(ENV_TOKEN_TIMEOUT)
            .map(|secs| seconds(ENV_TOKEN_TIMEOUT, &secs))
            .transpose()?
            .unwrap_or(Duration::from_secs(DEFAULT_TOKEN_TIMEOUT));

        Ok(Self {
            secret: required(&lookup, ENV_SECRET_KEY)?.into_bytes(),
            timeout,
        })
    }
}

/// Settings of the smtp backend, as consumed by [`crate::mail::smtp::SmtpBuilder`].
#[derive(Debug, Clone, Default)]
pub struct SmtpConfig {
    pub transport: String,
    pub username: String,
    pub password: String,
}

impl SmtpConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            transport: required(&lookup, ENV_SMTP_TRANSPORT)?,
            username: lookup(ENV_SMTP_USERNAME).unwrap_or_default(),
            password: lookup(ENV_SMTP_PASSWORD).unwrap_or_default(),
        })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .filter(|value| !value.trim().is_empty())
        .ok_or(Error::Missing(var))
}

fn seconds(var: &'static str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse()
        .map(Duration::from_secs)
        .map_err(|err: std::num::ParseIntError| Error::Invalid {
            var,
            reason: err.to_string(),
        })
}
