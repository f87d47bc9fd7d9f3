//! Identity bound verification tokens.

pub mod domain;
pub mod error;
pub mod service;

pub use domain::Token;
pub use error::{Error, Result};
pub use service::TokenGenerator;
