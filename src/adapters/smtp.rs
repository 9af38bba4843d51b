use crate::config::SmtpConfig;
use crate::domain::ports::EmailSender;
use crate::utils::error::{AlertError, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// STARTTLS + 帳密驗證的 SMTP 寄件器
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AlertError::delivery(format!("Invalid SMTP relay {}: {}", config.host, e)))?
            .port(config.port())
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.username.clone(),
        })
    }

    pub fn build_message(from: &str, to: &str, subject: &str, body: &str) -> Result<Message> {
        let from: Mailbox = from
            .parse()
            .map_err(|e| AlertError::delivery(format!("Invalid sender address {}: {}", from, e)))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| AlertError::delivery(format!("Invalid recipient address {}: {}", to, e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AlertError::delivery(format!("Could not build message: {}", e)))
    }
}

#[async_trait]
impl EmailSender for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = Self::build_message(&self.from, to, subject, body)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| AlertError::delivery(e.to_string()))?;

        tracing::debug!("SMTP response code: {}", response.code());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_plain_text_message() {
        let message = SmtpMailer::build_message(
            "alerts@example.com",
            "me@example.com",
            "Satellite is passing over your area!",
            "line one\nline two",
        )
        .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Satellite is passing over your area!"));
        assert!(raw.contains("To: me@example.com"));
        assert!(raw.contains("text/plain"));
    }

    #[test]
    fn test_invalid_recipient_is_delivery_error() {
        let result = SmtpMailer::build_message("alerts@example.com", "not an address", "s", "b");
        assert!(matches!(result, Err(AlertError::DeliveryError { .. })));
    }

    #[tokio::test]
    async fn test_new_builds_transport_without_connecting() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: Some(2525),
            username: "alerts@example.com".to_string(),
            password: "secret".to_string(),
            recipient: "me@example.com".to_string(),
        };
        assert!(SmtpMailer::new(&config).is_ok());
    }
}
