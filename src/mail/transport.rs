//! Definition of the [Transport] trait, the delivery channel shared by the templated senders.

use super::{domain::Message, error::Result};
use async_trait::async_trait;

/// Represents a channel able to deliver a [Message].
#[async_trait]
pub trait Transport {
    /// Hands the message over to the channel, returning once it has been accepted.
    async fn deliver(&self, message: &Message) -> Result<()>;
}
