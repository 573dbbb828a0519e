use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::entity::email_request::EmailRequest;
use crate::domain::service::{MailError, MailTransport};

pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(
        smtp_host: &str,
        smtp_port: u16,
        username: &str,
        password: &str,
    ) -> Result<Self, MailError> {
        let creds = Credentials::new(username.to_string(), password.to_string());

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_host)
                .map_err(|e: lettre::transport::smtp::Error| {
                    MailError::ConnectionFailed(e.to_string())
                })?
                .port(smtp_port)
                .credentials(creds)
                .build();

        Ok(Self { mailer })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, request: &EmailRequest) -> Result<(), MailError> {
        let mut builder = Message::builder()
            .from(
                request
                    .from
                    .parse()
                    .map_err(|e: lettre::address::AddressError| {
                        MailError::InvalidAddress(format!("from {}: {}", request.from, e))
                    })?,
            )
            .subject(request.subject.as_str())
            .header(ContentType::TEXT_HTML);

        for recipient in &request.to {
            builder = builder.to(recipient.parse().map_err(
                |e: lettre::address::AddressError| {
                    MailError::InvalidAddress(format!("recipient {recipient}: {e}"))
                },
            )?);
        }

        let email = builder
            .body(request.body.clone())
            .map_err(|e| MailError::Other(format!("failed to build email: {e}")))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e: lettre::transport::smtp::Error| {
                MailError::ConnectionFailed(e.to_string())
            })?;

        Ok(())
    }
}
