use jobmail::{
    config::{
        MailerSendConfig, ENV_MAILERSEND_API_TOKEN, ENV_MAILERSEND_API_URL,
        ENV_MAILERSEND_FROM_EMAIL, ENV_MAILERSEND_FROM_NAME, ENV_MAILERSEND_TIMEOUT,
    },
    mail::{mailersend::MailerSendTransport, Email},
    otp::{DirectOtpMailer, Otp, OtpMailer},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tera::Tera;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> MailerSendConfig {
    let api_url = format!("{}/v1/", server.uri());
    MailerSendConfig::from_lookup(|key| match key {
        ENV_MAILERSEND_API_TOKEN => Some("mlsn.test-token".to_string()),
        ENV_MAILERSEND_FROM_EMAIL => Some("noreply@jobs.test".to_string()),
        ENV_MAILERSEND_FROM_NAME => Some("Job Connect".to_string()),
        ENV_MAILERSEND_API_URL => Some(api_url.clone()),
        ENV_MAILERSEND_TIMEOUT => Some("5".to_string()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn direct_otp_is_posted_to_mailersend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/email"))
        .and(header("authorization", "Bearer mlsn.test-token"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let mailer = DirectOtpMailer::new(&config_for(&server)).unwrap();
    let recipient = Email::try_from("user@example.com").unwrap();
    let otp = Otp::try_from("482913").unwrap();

    mailer.send(&recipient, &otp).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["from"],
        json!({"email": "noreply@jobs.test", "name": "Job Connect"})
    );
    assert_eq!(body["to"], json!([{"email": "user@example.com"}]));
    assert_eq!(body["subject"], "Your OTP Code");
    assert!(body.get("text").is_none());

    let html = body["html"].as_str().unwrap();
    assert!(html.contains("482913"), "{html}");
}

#[tokio::test]
async fn templated_otp_is_posted_to_mailersend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/email"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let transport = Arc::new(MailerSendTransport::new(&config).unwrap());
    let tera = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/*.html")).unwrap();
    let mailer = OtpMailer::new(transport, &tera, (&config).into());

    let email = Email::try_from("jane.doe@example.com").unwrap();
    let otp = mailer.send(&email).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(body["subject"], "Your Email Verification Code");
    assert_eq!(body["to"], json!([{"email": "jane.doe@example.com"}]));
    assert!(body["text"].as_str().unwrap().starts_with("Hello jane.doe,"));
    assert!(body["html"].as_str().unwrap().contains(otp.as_ref()));
}

#[tokio::test]
async fn direct_otp_rejected_by_mailersend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/email"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"message": "The to.0.email must be verified."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mailer = DirectOtpMailer::new(&config_for(&server)).unwrap();
    let recipient = Email::try_from("user@example.com").unwrap();
    let otp = Otp::try_from("482913").unwrap();

    let err = mailer.send(&recipient, &otp).await.unwrap_err();
    assert!(err.is_rejected(), "{err:?}");
}
