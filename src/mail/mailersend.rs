//! MailerSend implementation of the [Transport] trait.

use super::{
    domain::Message,
    error::{Error, Result},
    transport::Transport,
};
use crate::{config::MailerSendConfig, on_error};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

#[derive(Debug, Serialize)]
pub(crate) struct Address<'a> {
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

/// Delivers messages through the MailerSend email endpoint, sending both the
/// html body and its plain text alternative.
pub struct MailerSendTransport {
    client: Client,
    endpoint: Url,
    api_token: Option<String>,
}

impl MailerSendTransport {
    pub fn new(config: &MailerSendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(on_error!(Error, "building mailersend http client"))?;

        Ok(Self {
            client,
            endpoint: config.email_endpoint()?,
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl Transport for MailerSendTransport {
    #[instrument(skip_all, fields(to = %message.to, subject = %message.subject))]
    async fn deliver(&self, message: &Message) -> Result<()> {
        let Some(api_token) = &self.api_token else {
            error!("mailersend api token is not set");
            return Error::MissingCredentials.into();
        };

        let request = SendEmailRequest {
            from: Address {
                email: &message.from.email,
                name: Some(&message.from.name),
            },
            to: vec![Address {
                email: message.to.as_ref(),
                name: None,
            }],
            subject: &message.subject,
            text: &message.text,
            html: &message.html,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_token)
            .json(&request)
            .send()
            .await
            .map_err(on_error!(Error, "sending email through mailersend"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "mailersend rejected the email");
            return Error::Rejected {
                status: status.as_u16(),
                body,
            }
            .into();
        }

        info!(status = status.as_u16(), "email accepted by mailersend");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MailerSendTransport;
    use crate::{
        config::MailerSendConfig,
        mail::{
            domain::{Message, Sender},
            error::Error,
            transport::Transport,
        },
    };
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn new_config(server: &MockServer, api_token: Option<&str>) -> MailerSendConfig {
        MailerSendConfig {
            api_token: api_token.map(str::to_string),
            from_email: "noreply@jobs.test".to_string(),
            from_name: "Job Connect".to_string(),
            api_base_url: format!("{}/v1/", server.uri()).parse().unwrap(),
            timeout: Duration::from_secs(5),
        }
    }

    fn new_message() -> Message {
        Message {
            from: Sender {
                email: "noreply@jobs.test".to_string(),
                name: "Job Connect".to_string(),
            },
            to: "seeker@example.com".try_into().unwrap(),
            subject: "Subject".to_string(),
            text: "plain body".to_string(),
            html: "<p>html body</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn deliver_should_not_fail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/email"))
            .and(header("authorization", "Bearer mlsn.token"))
            .and(body_json(json!({
                "from": {"email": "noreply@jobs.test", "name": "Job Connect"},
                "to": [{"email": "seeker@example.com"}],
                "subject": "Subject",
                "text": "plain body",
                "html": "<p>html body</p>",
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let transport = MailerSendTransport::new(&new_config(&server, Some("mlsn.token"))).unwrap();
        transport.deliver(&new_message()).await.unwrap();
    }

    #[tokio::test]
    async fn deliver_rejected_should_fail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/email"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid recipient"))
            .mount(&server)
            .await;

        let transport = MailerSendTransport::new(&new_config(&server, Some("mlsn.token"))).unwrap();
        let err = transport.deliver(&new_message()).await.unwrap_err();
        assert!(
            matches!(&err, Error::Rejected { status: 422, body } if body == "invalid recipient"),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn deliver_without_token_should_fail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .expect(0)
            .mount(&server)
            .await;

        let transport = MailerSendTransport::new(&new_config(&server, None)).unwrap();
        let err = transport.deliver(&new_message()).await.unwrap_err();
        assert!(matches!(err, Error::MissingCredentials), "{err:?}");
    }
}
