/// Email delivery for OTP codes and activity notifications
use crate::config::EmailSettings;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::sync::Arc;
use tracing::{info, warn};

/// Outbound mail seam. Handlers depend on this trait so tests can
/// substitute a recording fake for the SMTP transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Dispatch one plain-text email to `to` from the fixed sender.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Async SMTP transport wrapper (or no-op when unconfigured)
#[derive(Clone)]
pub struct EmailService {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
}

impl EmailService {
    /// Build the email service from configuration.
    ///
    /// If the SMTP host is empty, operates in no-op mode (logs only).
    /// Useful for development and testing without email infrastructure.
    pub fn new(config: &EmailSettings) -> Result<Self> {
        let from = config
            .smtp_from
            .parse::<Mailbox>()
            .map_err(|e| AppError::Internal(format!("Invalid SMTP_FROM address: {}", e)))?;

        let transport = if config.smtp_host.trim().is_empty() {
            warn!("SMTP host not configured; email service will operate in no-op mode");
            None
        } else {
            let builder = if config.use_starttls {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            }
            .map_err(|e| {
                AppError::Internal(format!("Failed to configure SMTP transport: {}", e))
            })?
            .port(config.smtp_port);

            let builder = if let (Some(username), Some(password)) =
                (&config.smtp_username, &config.smtp_password)
            {
                builder.credentials(Credentials::new(username.to_string(), password.to_string()))
            } else {
                builder
            };

            Some(Arc::new(builder.build()))
        };

        Ok(Self { transport, from })
    }

    /// Check if SMTP transport is enabled
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }
}

#[async_trait]
impl Mailer for EmailService {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        if let Some(transport) = &self.transport {
            let to = to
                .parse::<Mailbox>()
                .map_err(|e| AppError::Email(format!("Invalid recipient email address: {}", e)))?;

            let email = Message::builder()
                .from(self.from.clone())
                .to(to)
                .subject(subject)
                .header(header::ContentType::TEXT_PLAIN)
                .body(body.to_string())?;

            transport.send(email).await?;
            info!(subject, "email sent");
        } else {
            info!(
                subject,
                recipient = to,
                "email service in no-op mode; skipping send"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(host: &str, from: &str) -> EmailSettings {
        EmailSettings {
            smtp_host: host.to_string(),
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            smtp_from: from.to_string(),
            use_starttls: false,
        }
    }

    #[test]
    fn empty_host_runs_in_noop_mode() {
        let service = EmailService::new(&settings("", "Anchor <noreply@anchor.dev>")).unwrap();
        assert!(!service.is_enabled());
    }

    #[tokio::test]
    async fn configured_host_enables_transport() {
        let service =
            EmailService::new(&settings("smtp.example.com", "Anchor <noreply@anchor.dev>"))
                .unwrap();
        assert!(service.is_enabled());
    }

    #[test]
    fn invalid_from_address_is_rejected() {
        assert!(EmailService::new(&settings("", "not-an-address")).is_err());
    }

    #[tokio::test]
    async fn noop_send_succeeds() {
        let service = EmailService::new(&settings("", "Anchor <noreply@anchor.dev>")).unwrap();
        service
            .send("someone@example.com", "OTP Verification", "Your OTP is: 123456")
            .await
            .unwrap();
    }
}
