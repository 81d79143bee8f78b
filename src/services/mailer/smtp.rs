use anyhow::Context;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{Mailer, OutgoingEmail};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    admin: String,
}

impl SmtpMailer {
    /// STARTTLS submission; the transport is built once and reused.
    pub fn new(
        host: &str,
        port: u16,
        user: String,
        pass: String,
        admin: String,
    ) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .context("invalid SMTP relay host")?
            .port(port)
            .credentials(Credentials::new(user.clone(), pass))
            .build();

        Ok(Self {
            transport,
            from: user,
            admin,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.parse().context("invalid sender address")?)
            .to(self.admin.parse().context("invalid admin address")?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .context("failed to build notification email")?;

        self.transport
            .send(message)
            .await
            .context("failed to send notification email")?;

        Ok(())
    }
}
