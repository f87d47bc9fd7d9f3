use super::{
    domain::{Timestamp, Token},
    error::{Error, Result},
};
use crate::{config::TokenConfig, user::User};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_KEY_SALT: &str = "jobmail.token.TokenGenerator";

/// Issues and checks identity bound verification tokens.
///
/// Nothing is stored: the signature covers the user state a successful
/// verification is expected to change, so a token stops validating as soon as
/// that state moves on.
pub struct TokenGenerator {
    pub timeout: Duration,
    pub key_salt: &'static str,
    secret: Vec<u8>,
}

impl TryFrom<&TokenConfig> for TokenGenerator {
    type Error = Error;

    fn try_from(config: &TokenConfig) -> Result<Self> {
        Self::new(config.secret.clone(), config.timeout)
    }
}

impl TokenGenerator {
    pub fn new(secret: Vec<u8>, timeout: Duration) -> Result<Self> {
        if secret.is_empty() {
            return Error::EmptySecret.into();
        }

        Ok(Self {
            timeout,
            key_salt: DEFAULT_KEY_SALT,
            secret,
        })
    }

    /// Returns a token for the given user, valid from now on.
    #[instrument(skip_all, fields(user_id = %user.id))]
    pub fn make(&self, user: &User) -> Result<Token> {
        self.make_at(user, Utc::now())
    }

    pub fn make_at(&self, user: &User, time: DateTime<Utc>) -> Result<Token> {
        let timestamp = Timestamp::at(time)?;
        let signature = self.signer(user, timestamp)?.finalize().into_bytes();
        Ok(Token::new(timestamp, &signature))
    }

    /// Succeeds if, and only if, the token was issued for the given user, in
    /// its current state, and has not expired yet.
    #[instrument(skip_all, fields(user_id = %user.id))]
    pub fn check(&self, user: &User, token: &Token) -> Result<()> {
        self.check_at(user, token, Utc::now())
    }

    pub fn check_at(&self, user: &User, token: &Token, time: DateTime<Utc>) -> Result<()> {
        let (timestamp, signature) = token.parts()?;

        self.signer(user, timestamp)?
            .verify_slice(&signature)
            .map_err(|_| {
                warn!("token signature does not match");
                Error::InvalidSignature
            })?;

        let elapsed = Timestamp::at(time)?
            .as_secs()
            .saturating_sub(timestamp.as_secs());

        if elapsed > self.timeout.as_secs() {
            warn!(elapsed, "token has expired");
            return Error::Expired.into();
        }

        Ok(())
    }

    fn signer(&self, user: &User, timestamp: Timestamp) -> Result<HmacSha256> {
        let key = Sha256::new()
            .chain_update(self.key_salt.as_bytes())
            .chain_update(&self.secret)
            .finalize();

        let mut mac = HmacSha256::new_from_slice(&key).map_err(|_| Error::EmptySecret)?;
        mac.update(hash_value(user, timestamp).as_bytes());
        Ok(mac)
    }
}

/// Concatenates the user state the token is bound to.
fn hash_value(user: &User, timestamp: Timestamp) -> String {
    let last_login = user
        .last_login
        .map(|time| time.timestamp().to_string())
        .unwrap_or_default();

    format!(
        "{}{}{}{}{}{}",
        user.id,
        user.password_hash.as_deref().unwrap_or_default(),
        last_login,
        user.verified,
        timestamp.as_secs(),
        user.email
    )
}
