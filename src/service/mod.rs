use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::{
    config::{ContactConfig, SmtpConfig},
    dto::ContactForm,
};

/// Port on which SMTP servers expect an implicit TLS handshake.
const SMTPS_PORT: u16 = 465;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid email address '{0}'")]
    InvalidAddress(String),

    #[error("Failed to build email message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// A fully addressed plain-text email ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync + 'static {
    async fn deliver(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    /// Port 465 gets an implicit TLS connection. Any other port upgrades with
    /// STARTTLS when the server offers it and stays plain text otherwise.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let builder = if config.port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| MailError::Smtp(e.to_string()))?
        } else {
            let tls = TlsParameters::new(config.host.clone())
                .map_err(|e| MailError::Smtp(e.to_string()))?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .tls(Tls::Opportunistic(tls))
        };

        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = builder.port(config.port).credentials(creds).build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn deliver(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(mail.from)
            .to(mail.to)
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        Ok(())
    }
}

pub struct MailService {
    transport: Arc<dyn MailTransport>,
    from: Mailbox,
    to: Mailbox,
}

impl MailService {
    pub fn new(
        transport: Arc<dyn MailTransport>,
        contact: &ContactConfig,
    ) -> Result<Self, MailError> {
        Ok(Self {
            transport,
            from: parse_mailbox(&contact.from)?,
            to: parse_mailbox(&contact.to)?,
        })
    }

    pub fn compose(&self, form: &ContactForm) -> OutgoingMail {
        OutgoingMail {
            from: self.from.clone(),
            to: self.to.clone(),
            subject: format!("Portfolio contact from {}", form.name),
            body: format!(
                "Name: {}\nEmail: {}\n\n{}",
                form.name, form.email, form.message
            ),
        }
    }

    /// Sends exactly one message for the submission. Failures are returned
    /// to the caller as-is; nothing is retried.
    pub async fn send_contact_mail(&self, form: &ContactForm) -> Result<(), MailError> {
        let mail = self.compose(form);

        tracing::info!(
            "Sending contact mail to '{}' with subject '{}'",
            mail.to,
            mail.subject
        );

        self.transport.deliver(mail).await?;

        tracing::info!("Contact mail from {} delivered", form.email);
        Ok(())
    }
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, MailError> {
    raw.parse()
        .map_err(|_| MailError::InvalidAddress(raw.to_string()))
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{MailError, MailTransport, OutgoingMail};

    /// Records every delivery attempt and optionally fails them all.
    #[derive(Default)]
    pub struct RecordingTransport {
        pub sent: Mutex<Vec<OutgoingMail>>,
        pub fail_with: Option<String>,
    }

    impl RecordingTransport {
        pub fn failing(reason: &str) -> Self {
            Self {
                sent: Mutex::default(),
                fail_with: Some(reason.to_string()),
            }
        }

        pub fn attempts(&self) -> Vec<OutgoingMail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn deliver(&self, mail: OutgoingMail) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(mail);
            match &self.fail_with {
                Some(reason) => Err(MailError::Smtp(reason.clone())),
                None => Ok(()),
            }
        }
    }
}
