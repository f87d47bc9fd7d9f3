use super::{
    domain::{RequestContext, VerifyRoute},
    error::{Error, Result},
};
use crate::{
    base64::encode_uid,
    mail::{Message, Sender, Transport},
    on_error,
    token::TokenGenerator,
    user::User,
};
use chrono::{Datelike, Utc};
use std::sync::Arc;
use tera::{Context, Tera};

pub const VERIFY_SUBJECT: &str = "Verify Your Employer Account";
pub const VERIFY_TEMPLATE: &str = "employer_email_verify.html";

/// Emails employers the link that verifies their account.
pub struct EmployerVerification<'a, T> {
    pub transport: Arc<T>,
    pub tera: &'a Tera,
    pub tokens: &'a TokenGenerator,
    pub sender: Sender,
    pub route: VerifyRoute,
    pub subject: &'a str,
    pub template: &'a str,
}

impl<'a, T> EmployerVerification<'a, T>
where
    T: Transport + Sync + Send,
{
    pub fn new(
        transport: Arc<T>,
        tera: &'a Tera,
        tokens: &'a TokenGenerator,
        sender: Sender,
    ) -> Self {
        Self {
            transport,
            tera,
            tokens,
            sender,
            route: VerifyRoute::default(),
            subject: VERIFY_SUBJECT,
            template: VERIFY_TEMPLATE,
        }
    }

    #[instrument(skip_all, fields(user_id = %user.id))]
    pub async fn send(&self, context: &RequestContext, user: &User) -> Result<()> {
        let verify_url = self.verify_url(context, user)?;
        let message = self.message(user, &verify_url)?;

        self.transport
            .deliver(&message)
            .await
            .map_err(on_error!(Error, "delivering employer verification email"))?;

        info!("employer verification email sent");
        Ok(())
    }

    /// Returns the absolute link the user has to follow in order to get verified.
    pub fn verify_url(&self, context: &RequestContext, user: &User) -> Result<String> {
        let uidb64 = encode_uid(&user.id);
        let token = self
            .tokens
            .make(user)
            .map_err(on_error!(Error, "issuing employer verification token"))?;

        let path = self.route.reverse(&uidb64, token.as_ref());
        context
            .absolute_url(&path)
            .map(String::from)
            .map_err(on_error!(Error, "building employer verification url"))
    }

    fn message(&self, user: &User, verify_url: &str) -> Result<Message> {
        let mut context = Context::new();
        context.insert("email", user.email.as_ref());
        context.insert("verify_url", verify_url);
        context.insert("year", &Utc::now().year());

        let html = self
            .tera
            .render(self.template, &context)
            .map_err(on_error!(Error, "rendering employer verification template"))?;

        let text = format!(
            "Hello {},\n\n\
             Please verify your employer account using the link below:\n\
             {verify_url}\n\n\
             If you didn't request this, you can ignore this email.",
            user.email
        );

        Ok(Message {
            from: self.sender.clone(),
            to: user.email.clone(),
            subject: self.subject.to_string(),
            text,
            html,
        })
    }
}
