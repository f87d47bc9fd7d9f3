//! Result type and errors related to email delivery.

pub type Result<T> = std::result::Result<T, Error>;

impl<T> From<Error> for Result<T> {
    fn from(value: Error) -> Self {
        Self::Err(value)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("email regex did not match")]
    NotAnEmail,
    #[error("mail api token is not set")]
    MissingCredentials,
    #[error("delivery rejected with status {status}")]
    Rejected { status: u16, body: String },
    #[error("{0}")]
    Config(#[from] crate::config::Error),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "smtp")]
    #[error("smtp transport is not valid")]
    NotATransport,
    #[cfg(feature = "smtp")]
    #[error("{0}")]
    ParseInt(#[from] std::num::ParseIntError),
    #[cfg(feature = "smtp")]
    #[error("{0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[cfg(feature = "smtp")]
    #[error("{0}")]
    Address(#[from] lettre::address::AddressError),
    #[cfg(feature = "smtp")]
    #[error("{0}")]
    Lettre(#[from] lettre::error::Error),
}

impl Error {
    /// Returns true if, and only if, the vendor answered but refused the message.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Error::Rejected { .. })
    }
}
