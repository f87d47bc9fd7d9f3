//! Transactional email delivery for the job board: employer account
//! verification links and one-time verification codes.

#[macro_use]
extern crate tracing;

pub mod base64;
pub mod config;
pub mod mail;
pub mod otp;
pub mod token;
pub mod tracer;
pub mod user;
pub mod verification;

mod macros;
