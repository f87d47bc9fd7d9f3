use super::error::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

const PATTERN: &str = r"^[0-9a-z]{1,13}-[0-9a-f]{64}$";
static REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(PATTERN).expect("token pattern must compile"));

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Token timestamps count seconds from 2001-01-01T00:00:00Z.
pub static TOKEN_EPOCH: Lazy<DateTime<Utc>> = Lazy::new(|| {
    Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
});

/// Seconds elapsed since [TOKEN_EPOCH] at the time a token was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn at(time: DateTime<Utc>) -> Result<Self> {
        let secs = (time - *TOKEN_EPOCH).num_seconds();
        u64::try_from(secs)
            .map(Self)
            .map_err(|_| Error::OutOfRange)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn to_base36(self) -> String {
        if self.0 == 0 {
            return "0".to_string();
        }

        let mut value = self.0;
        let mut digits = Vec::new();
        while value > 0 {
            digits.push(BASE36_DIGITS[(value % 36) as usize]);
            value /= 36;
        }

        digits.iter().rev().map(|&digit| digit as char).collect()
    }

    pub fn from_base36(value: &str) -> Result<Self> {
        u64::from_str_radix(value, 36)
            .map(Self)
            .map_err(|_| Error::NotAToken)
    }
}

/// Represents a signed, identity bound, verification token of the form
/// `<timestamp in base 36>-<hex encoded hmac-sha256>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Token {
    type Error = Error;

    fn try_from(token: String) -> Result<Self> {
        REGEX
            .is_match(&token)
            .then_some(Self(token))
            .ok_or(Error::NotAToken)
    }
}

impl TryFrom<&str> for Token {
    type Error = Error;

    fn try_from(token: &str) -> Result<Self> {
        token.to_string().try_into()
    }
}

impl Token {
    pub(super) fn new(timestamp: Timestamp, signature: &[u8]) -> Self {
        Self(format!("{}-{}", timestamp.to_base36(), hex::encode(signature)))
    }

    /// Returns the issue timestamp and the signature bytes of the token.
    pub(super) fn parts(&self) -> Result<(Timestamp, Vec<u8>)> {
        let (timestamp, signature) = self.0.split_once('-').ok_or(Error::NotAToken)?;
        let signature = hex::decode(signature).map_err(|_| Error::NotAToken)?;
        Ok((Timestamp::from_base36(timestamp)?, signature))
    }
}
