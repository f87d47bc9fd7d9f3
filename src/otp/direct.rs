//! Direct MailerSend delivery of caller generated one time passwords.
//!
//! This path talks to the vendor on its own: it neither renders templates nor
//! goes through a [`crate::mail::Transport`], sends no plain text part, and
//! only takes a 200 or a 202 as success.

use super::domain::Otp;
use crate::{
    config::MailerSendConfig,
    mail::{mailersend::Address, Email, Error, Result, Sender},
    on_error,
};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use url::Url;

pub const DIRECT_OTP_SUBJECT: &str = "Your OTP Code";

#[derive(Debug, Serialize)]
struct OtpEmailRequest<'a> {
    from: Address<'a>,
    to: [Address<'a>; 1],
    subject: &'a str,
    html: String,
}

/// Relays pre-generated one time passwords straight to the MailerSend API.
pub struct DirectOtpMailer {
    client: Client,
    endpoint: Url,
    api_token: Option<String>,
    sender: Sender,
}

impl DirectOtpMailer {
    pub fn new(config: &MailerSendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(on_error!(Error, "building direct otp http client"))?;

        Ok(Self {
            client,
            endpoint: config.email_endpoint()?,
            api_token: config.api_token.clone(),
            sender: config.into(),
        })
    }

    /// Emails the given code to the recipient.
    #[instrument(skip(self, otp))]
    pub async fn send(&self, recipient: &Email, otp: &Otp) -> Result<()> {
        let Some(api_token) = &self.api_token else {
            error!("mailersend api token is not set");
            return Error::MissingCredentials.into();
        };

        let request = OtpEmailRequest {
            from: Address {
                email: &self.sender.email,
                name: Some(&self.sender.name),
            },
            to: [Address {
                email: recipient.as_ref(),
                name: None,
            }],
            subject: DIRECT_OTP_SUBJECT,
            html: otp_html(otp),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_token)
            .json(&request)
            .send()
            .await
            .map_err(on_error!(Error, "posting otp email to mailersend"))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "mailersend response");

        if !matches!(status, StatusCode::OK | StatusCode::ACCEPTED) {
            error!(status = status.as_u16(), "mailersend did not accept the otp email");
            return Error::Rejected {
                status: status.as_u16(),
                body,
            }
            .into();
        }

        Ok(())
    }
}

fn otp_html(otp: &Otp) -> String {
    format!(
        r#"
            <p>Hello,</p>
            <p>Your OTP code is:</p>
            <h2 style="font-size: 28px; letter-spacing: 4px;"><b>{otp}</b></h2>
            <p>This code expires in 5 minutes.</p>
        "#
    )
}
