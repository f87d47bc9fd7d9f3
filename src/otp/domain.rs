use super::error::{Error, Result};
use rand::{distributions::Uniform, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a one time password.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Otp(String);

impl AsRef<str> for Otp {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Otp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Otp {
    type Error = Error;

    /// Builds an [Otp] from the given string if, and only if, it is a non empty sequence of ascii digits.
    fn try_from(otp: String) -> Result<Self> {
        if otp.is_empty() || !otp.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::NotAOneTimePassword);
        }

        Ok(Self(otp))
    }
}

impl TryFrom<&str> for Otp {
    type Error = Error;

    fn try_from(otp: &str) -> Result<Self> {
        otp.to_string().try_into()
    }
}

impl Otp {
    pub const MIN: u32 = 100_000;
    pub const MAX: u32 = 999_999;

    /// Samples a new six digits [Otp], uniformly distributed over `MIN..=MAX`.
    pub fn generate() -> Self {
        let code = rand::thread_rng().sample(Uniform::new_inclusive(Self::MIN, Self::MAX));
        Self(code.to_string())
    }
}
