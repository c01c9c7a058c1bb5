//! Email channel transport via SMTP.
//!
//! Wraps the `lettre` async SMTP transport. Configuration is loaded from
//! environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and sends are simulated (logged
//! and reported as success), which is the default in development and tests.

use async_trait::async_trait;

use crate::error::DispatchError;
use crate::message::OutboundMessage;
use crate::transport::ChannelTransport;

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@notifyhub.local";

/// Configuration for the SMTP email transport.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that real email
    /// delivery is not configured and sends should be simulated.
    ///
    /// | Variable        | Required | Default                    |
    /// |-----------------|----------|----------------------------|
    /// | `SMTP_HOST`     | yes      | —                          |
    /// | `SMTP_PORT`     | no       | `587`                      |
    /// | `SMTP_FROM`     | no       | `noreply@notifyhub.local`  |
    /// | `SMTP_USER`     | no       | —                          |
    /// | `SMTP_PASSWORD` | no       | —                          |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Sends notification emails via SMTP, or simulates when unconfigured.
pub struct EmailTransport {
    config: Option<EmailConfig>,
}

impl EmailTransport {
    /// Create an email transport. `None` means simulated sends.
    pub fn new(config: Option<EmailConfig>) -> Self {
        Self { config }
    }

    async fn send_smtp(
        &self,
        config: &EmailConfig,
        message: &OutboundMessage,
    ) -> Result<(), DispatchError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(config.from_address.parse()?)
            .to(message.email.parse()?)
            .subject(&message.title)
            .header(ContentType::TEXT_PLAIN)
            .body(message.content.clone())
            .map_err(|e| DispatchError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = %message.email, title = %message.title, "Notification email sent");
        Ok(())
    }
}

#[async_trait]
impl ChannelTransport for EmailTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DispatchError> {
        match &self.config {
            Some(config) => self.send_smtp(config, message).await,
            None => {
                tracing::debug!(
                    to = %message.email,
                    content = %message.content,
                    "Simulated email send (SMTP not configured)"
                );
                Ok(())
            }
        }
    }
}
