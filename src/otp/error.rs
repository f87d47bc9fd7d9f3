pub type Result<T> = std::result::Result<T, Error>;

impl<T> From<Error> for Result<T> {
    fn from(value: Error) -> Self {
        Self::Err(value)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("one time password must be made of digits only")]
    NotAOneTimePassword,
    #[error("rendering otp email: {0}")]
    Render(#[from] tera::Error),
    #[error("{0}")]
    Delivery(#[from] crate::mail::Error),
}

impl Error {
    /// Returns true if, and only if, the email could not reach the delivery channel or was refused by it.
    pub fn is_delivery(&self) -> bool {
        matches!(self, Error::Delivery(_))
    }
}
