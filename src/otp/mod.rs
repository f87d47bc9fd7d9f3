//! One time passwords and the two ways of emailing them.

pub mod direct;
pub mod domain;
pub mod error;
pub mod mailer;

pub use direct::DirectOtpMailer;
pub use domain::Otp;
pub use mailer::OtpMailer;
