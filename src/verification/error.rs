pub type Result<T> = std::result::Result<T, Error>;

impl<T> From<Error> for Result<T> {
    fn from(value: Error) -> Self {
        Self::Err(value)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("verification route must hold both the {{uidb64}} and {{token}} placeholders")]
    NotARoute,
    #[error("rendering verification email: {0}")]
    Render(#[from] tera::Error),
    #[error("building verification url: {0}")]
    Url(#[from] url::ParseError),
    #[error("issuing verification token: {0}")]
    Token(#[from] crate::token::Error),
    #[error("{0}")]
    Delivery(#[from] crate::mail::Error),
}

impl Error {
    pub fn is_delivery(&self) -> bool {
        matches!(self, Error::Delivery(_))
    }
}
