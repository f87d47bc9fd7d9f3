//! Employer account verification emails.

pub mod domain;
pub mod error;
pub mod sender;

pub use domain::{RequestContext, VerifyRoute};
pub use error::{Error, Result};
pub use sender::EmployerVerification;
