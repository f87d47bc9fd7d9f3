//! Smtp implementation of the [Transport] trait.

use super::{
    domain::Message,
    error::{Error, Result},
    transport::Transport,
};
use crate::{config::SmtpConfig, on_error};
use async_trait::async_trait;
use lettre::address::AddressError;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::Tls;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::num::ParseIntError;

/// A builder for the [Smtp] struct.
#[derive(Default)]
pub struct SmtpBuilder<'a> {
    /// Relay address, as `host` or `host:port`.
    pub transport: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a SmtpConfig> for SmtpBuilder<'a> {
    fn from(config: &'a SmtpConfig) -> Self {
        Self {
            transport: &config.transport,
            username: &config.username,
            password: &config.password,
        }
    }
}

impl<'a> SmtpBuilder<'a> {
    pub fn build(&self) -> Result<Smtp> {
        let mut transport_attrs = self.transport.split(':');
        let host = transport_attrs
            .next()
            .filter(|host| !host.is_empty())
            .ok_or(Error::NotATransport)?;

        let mut transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(on_error!(Error, "creating a smtp transport"))?;

        if let Some(port) = transport_attrs.next().filter(|port| !port.is_empty()) {
            let port: u16 = port.parse().map_err(on_error!(
                ParseIntError as Error,
                "parsing string into port number"
            ))?;

            transport = transport.port(port);
        }

        if !self.username.is_empty() && !self.password.is_empty() {
            let creds = Credentials::new(self.username.to_string(), self.password.to_string());
            transport = transport.credentials(creds);
        } else {
            warn!("tls is disabled for smtp");
            transport = transport.tls(Tls::None);
        }

        info!(host, "smtp transport ready");
        Ok(Smtp {
            transport: transport.build(),
        })
    }
}

/// Smtp delivers messages to a mail relay as multipart/alternative emails.
pub struct Smtp {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Smtp {
    /// Builds the lettre message out of the given one.
    fn build_message(message: &Message) -> Result<lettre::Message> {
        let from: Mailbox = message.from.to_string().parse().map_err(on_error!(
            AddressError as Error,
            "parsing sender into a mailbox"
        ))?;

        let to: Mailbox = message.to.as_ref().parse().map_err(on_error!(
            AddressError as Error,
            "parsing email destination"
        ))?;

        lettre::Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.as_str())
            .multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::plain(message.text.clone()))
                    .singlepart(SinglePart::html(message.html.clone())),
            )
            .map_err(on_error!(Error, "building email message"))
    }
}

#[async_trait]
impl Transport for Smtp {
    #[instrument(skip_all, fields(to = %message.to, subject = %message.subject))]
    async fn deliver(&self, message: &Message) -> Result<()> {
        let email = Self::build_message(message)?;

        self.transport
            .send(email)
            .await
            .map_err(on_error!(Error, "sending email"))?;

        Ok(())
    }
}
