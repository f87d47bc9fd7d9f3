//! The identity verification and one time password emails are addressed to.

pub mod domain;
pub use domain::User;
