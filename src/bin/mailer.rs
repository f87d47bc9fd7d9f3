#[macro_use]
extern crate tracing;

use clap::{Args, Parser, Subcommand};
use jobmail::{
    config::{MailerSendConfig, TokenConfig, EMPLOYER_VERIFY_ROUTE, MAIL_TEMPLATES},
    mail::{mailersend::MailerSendTransport, Email, Transport},
    otp::{DirectOtpMailer, Otp, OtpMailer},
    token::TokenGenerator,
    tracer,
    user::User,
    verification::{EmployerVerification, RequestContext, VerifyRoute},
};
use std::error::Error;
use std::sync::Arc;
use tera::Tera;
use uuid::Uuid;

/// Sends the transactional emails of the job board by hand.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Deliver templated emails through the smtp relay instead of MailerSend
    #[arg(long, global = true)]
    smtp: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a verification code and email it through the templated path
    Otp(OtpArgs),
    /// Email a verification code straight through the MailerSend API
    DirectOtp(DirectOtpArgs),
    /// Email an employer the link that verifies their account
    VerifyEmployer(VerifyEmployerArgs),
}

#[derive(Args)]
struct OtpArgs {
    #[arg(long)]
    email: String,
}

#[derive(Args)]
struct DirectOtpArgs {
    #[arg(long)]
    email: String,

    /// Code to send, a fresh one is generated when omitted
    #[arg(long)]
    code: Option<String>,
}

#[derive(Args)]
struct VerifyEmployerArgs {
    #[arg(long)]
    email: String,

    /// Id of the employer account, a random one is used when omitted
    #[arg(long)]
    id: Option<Uuid>,

    /// Base url verification links point to
    #[arg(long, env = "APP_BASE_URL", default_value = "http://localhost:8000")]
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if let Err(err) = dotenv::dotenv() {
        eprintln!("processing dotenv file: {err}");
    }

    tracer::init()?;

    let cli = Cli::parse();
    let mailersend = MailerSendConfig::from_env()?;

    if let Commands::DirectOtp(args) = &cli.command {
        return direct_otp(&mailersend, args).await;
    }

    if cli.smtp {
        return with_smtp(&mailersend, &cli.command).await;
    }

    let transport = Arc::new(MailerSendTransport::new(&mailersend)?);
    run(transport, &mailersend, &cli.command).await
}

#[cfg(feature = "smtp")]
async fn with_smtp(config: &MailerSendConfig, command: &Commands) -> Result<(), Box<dyn Error>> {
    use jobmail::{config::SmtpConfig, mail::smtp::SmtpBuilder};

    let smtp = SmtpConfig::from_env()?;
    let transport = Arc::new(SmtpBuilder::from(&smtp).build()?);
    run(transport, config, command).await
}

#[cfg(not(feature = "smtp"))]
async fn with_smtp(_: &MailerSendConfig, _: &Commands) -> Result<(), Box<dyn Error>> {
    Err("smtp support is not enabled in this build".into())
}

async fn direct_otp(config: &MailerSendConfig, args: &DirectOtpArgs) -> Result<(), Box<dyn Error>> {
    let recipient = Email::try_from(args.email.as_str())?;
    let otp = match &args.code {
        Some(code) => Otp::try_from(code.as_str())?,
        None => Otp::generate(),
    };

    DirectOtpMailer::new(config)?.send(&recipient, &otp).await?;
    info!("otp email sent through mailersend");
    Ok(())
}

async fn run<T>(
    transport: Arc<T>,
    config: &MailerSendConfig,
    command: &Commands,
) -> Result<(), Box<dyn Error>>
where
    T: Transport + Sync + Send,
{
    let tera = Tera::new(&MAIL_TEMPLATES)?;

    match command {
        Commands::Otp(args) => {
            let email = Email::try_from(args.email.as_str())?;
            OtpMailer::new(transport, &tera, config.into())
                .send(&email)
                .await?;

            info!("otp email sent");
        }
        Commands::VerifyEmployer(args) => {
            let tokens = TokenGenerator::try_from(&TokenConfig::from_env()?)?;

            let mut user = User::new(Email::try_from(args.email.as_str())?);
            if let Some(id) = args.id {
                user.id = id;
            }

            let route = VerifyRoute::try_from(EMPLOYER_VERIFY_ROUTE.as_str())?;
            let context = RequestContext::try_from(args.base_url.as_str())?;
            let mut sender = EmployerVerification::new(transport, &tera, &tokens, config.into());
            sender.route = route;
            sender.send(&context, &user).await?;
        }
        Commands::DirectOtp(args) => return direct_otp(config, args).await,
    }

    Ok(())
}
