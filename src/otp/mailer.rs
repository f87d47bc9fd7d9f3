use super::{
    domain::Otp,
    error::{Error, Result},
};
use crate::{
    mail::{Email, Message, Sender, Transport},
    on_error,
};
use chrono::{Datelike, Utc};
use std::sync::Arc;
use tera::{Context, Tera};

pub const OTP_SUBJECT: &str = "Your Email Verification Code";
pub const OTP_TEMPLATE: &str = "otp_verification.html";

/// Generates one time passwords and emails them through the templated delivery path.
pub struct OtpMailer<'a, T> {
    pub transport: Arc<T>,
    pub tera: &'a Tera,
    pub sender: Sender,
    pub subject: &'a str,
    pub template: &'a str,
}

impl<'a, T> OtpMailer<'a, T>
where
    T: Transport + Sync + Send,
{
    pub fn new(transport: Arc<T>, tera: &'a Tera, sender: Sender) -> Self {
        Self {
            transport,
            tera,
            sender,
            subject: OTP_SUBJECT,
            template: OTP_TEMPLATE,
        }
    }

    /// Emails a freshly generated [Otp] to the given address, returning it so
    /// the caller can keep it for later comparison. The code is not kept
    /// anywhere else.
    #[instrument(skip(self))]
    pub async fn send(&self, email: &Email) -> Result<Otp> {
        let otp = Otp::generate();
        let message = self.message(email, &otp)?;

        self.transport
            .deliver(&message)
            .await
            .map_err(on_error!(Error, "delivering otp email"))?;

        info!("otp email sent");
        Ok(otp)
    }

    fn message(&self, email: &Email, otp: &Otp) -> Result<Message> {
        let username = email.username();

        let mut context = Context::new();
        context.insert("username", username);
        context.insert("otp_code", otp.as_ref());
        context.insert("year", &Utc::now().year());

        let html = self
            .tera
            .render(self.template, &context)
            .map_err(on_error!(Error, "rendering otp email template"))?;

        let text = format!(
            "Hello {username},\n\n\
             Your OTP verification code is: {otp}\n\
             This code expires in 5 minutes.\n\n\
             If you did not request this, please ignore this email."
        );

        Ok(Message {
            from: self.sender.clone(),
            to: email.clone(),
            subject: self.subject.to_string(),
            text,
            html,
        })
    }
}
