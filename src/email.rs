use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::env;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
    #[error("smtp not configured: {0}")]
    Config(String),
}

/// A file attached to an outgoing email (QR code PNGs, mostly).
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Outgoing email seam. Handlers and the onboarding workflow talk to this
/// trait so tests can swap in a failing or recording mailer.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: String,
        attachment: Option<EmailAttachment>,
    ) -> Result<(), MailError>;
}

/// SMTP mailer backed by lettre's async transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    /// Build the transport from `SMTP_HOST`, `SMTP_FROM` and the optional
    /// `SMTP_USERNAME` / `SMTP_PASSWORD` pair.
    pub fn from_env() -> Result<Self, MailError> {
        let host =
            env::var("SMTP_HOST").map_err(|_| MailError::Config("SMTP_HOST not set".into()))?;
        let from =
            env::var("SMTP_FROM").map_err(|_| MailError::Config("SMTP_FROM not set".into()))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)?;

        if let (Ok(username), Ok(password)) = (env::var("SMTP_USERNAME"), env::var("SMTP_PASSWORD"))
        {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: String,
        attachment: Option<EmailAttachment>,
    ) -> Result<(), MailError> {
        let builder = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject);

        let message = match attachment {
            Some(file) => {
                let content_type = ContentType::parse(&file.content_type)
                    .unwrap_or(ContentType::TEXT_PLAIN);
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(body))
                        .singlepart(
                            Attachment::new(file.filename).body(file.bytes, content_type),
                        ),
                )?
            }
            None => builder.body(body)?,
        };

        self.transport.send(message).await?;
        Ok(())
    }
}
