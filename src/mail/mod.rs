//! Outbound messages and the channels able to deliver them.

pub mod domain;
pub mod error;
pub mod mailersend;
#[cfg(feature = "smtp")]
pub mod smtp;
pub mod transport;

pub use domain::{Email, Message, Sender};
pub use error::{Error, Result};
pub use transport::Transport;
