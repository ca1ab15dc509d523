use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use sitewatch_common::{Alert, Config};

use super::backend::AlertBackend;

/// SMTP submission backend. STARTTLS to the configured host/port, one
/// plain-text message per alert.
pub struct EmailBackend {
    from: String,
    to: String,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailBackend {
    /// Build from config. Yields `None` unless sender, recipient, and
    /// credential are all present.
    pub fn from_config(config: &Config) -> anyhow::Result<Option<Self>> {
        let (from, to, password) = match (
            config.email_from.as_deref(),
            config.email_to.as_deref(),
            config.email_password.as_deref(),
        ) {
            (Some(f), Some(t), Some(p)) if !f.is_empty() && !t.is_empty() && !p.is_empty() => {
                (f, t, p)
            }
            _ => return Ok(None),
        };

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(from.to_string(), password.to_string()))
            .build();

        Ok(Some(Self {
            from: from.to_string(),
            to: to.to_string(),
            mailer,
        }))
    }
}

#[async_trait]
impl AlertBackend for EmailBackend {
    async fn send(&self, alert: &Alert) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.parse()?)
            .to(self.to.parse()?)
            .subject(format!("Alert: {}", alert.headline))
            .header(ContentType::TEXT_PLAIN)
            .body(format!("{}\n\n{}", alert.headline, alert.detail))?;

        self.mailer.send(message).await?;

        info!(to = self.to.as_str(), headline = alert.headline.as_str(), "Alert email sent");
        Ok(())
    }
}
