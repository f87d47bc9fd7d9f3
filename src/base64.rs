//! Base64 related utilities like the url safe engine used for user ids in links.

use base64::{
    alphabet,
    engine::{self, general_purpose},
    DecodeError, Engine,
};
use uuid::Uuid;

/// An url safe, unpadded, implementation of [`base64::engine::Engine`].
pub const B64_URL_SAFE_ENGINE: engine::GeneralPurpose =
    engine::GeneralPurpose::new(&alphabet::URL_SAFE, general_purpose::NO_PAD);

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Decode(#[from] DecodeError),
    #[error("{0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("{0}")]
    Uuid(#[from] uuid::Error),
}

/// Encodes the given user id as it is expected in the `uidb64` segment of a verification link.
pub fn encode_uid(id: &Uuid) -> String {
    B64_URL_SAFE_ENGINE.encode(id.to_string())
}

/// Decodes the `uidb64` segment of a verification link back into a user id.
pub fn decode_uid(uidb64: &str) -> Result<Uuid, Error> {
    let bytes = B64_URL_SAFE_ENGINE.decode(uidb64)?;
    let id = String::from_utf8(bytes)?;
    Uuid::parse_str(&id).map_err(Into::into)
}
