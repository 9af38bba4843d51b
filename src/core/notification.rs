use crate::core::{EmailSender, LogRecord, LogStore, NotificationBody};
use crate::utils::error::AlertError;
use std::path::PathBuf;

pub const NOTIFICATION_SUBJECT: &str = "Satellite is passing over your area!";

#[derive(Debug)]
pub enum DeliveryStatus {
    Sent,
    /// 沒有設定 SMTP，只寫日誌
    Disabled,
    Failed(AlertError),
}

#[derive(Debug)]
pub enum LogStatus {
    Appended(PathBuf),
    Failed(AlertError),
}

#[derive(Debug)]
pub struct DispatchReport {
    pub delivery: DeliveryStatus,
    pub log: LogStatus,
}

impl DispatchReport {
    pub fn delivery_error(&self) -> Option<&AlertError> {
        match &self.delivery {
            DeliveryStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn log_error(&self) -> Option<&AlertError> {
        match &self.log {
            LogStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.delivery_error().is_none() && self.log_error().is_none()
    }
}

/// 寄送通知信並追加日誌；兩者都一定會嘗試，互不影響
pub struct NotificationSink<E: EmailSender, L: LogStore> {
    mailer: Option<E>,
    recipient: String,
    log_store: L,
}

impl<E: EmailSender, L: LogStore> NotificationSink<E, L> {
    pub fn new(mailer: E, recipient: impl Into<String>, log_store: L) -> Self {
        Self {
            mailer: Some(mailer),
            recipient: recipient.into(),
            log_store,
        }
    }

    pub fn log_only(log_store: L) -> Self {
        Self {
            mailer: None,
            recipient: String::new(),
            log_store,
        }
    }

    pub async fn dispatch(&self, body: &NotificationBody) -> DispatchReport {
        let delivery = match &self.mailer {
            Some(mailer) => match mailer
                .send(&self.recipient, NOTIFICATION_SUBJECT, body.as_str())
                .await
            {
                Ok(()) => {
                    tracing::info!("📧 Notification sent to {}", self.recipient);
                    DeliveryStatus::Sent
                }
                Err(e) => {
                    tracing::error!("❌ Notification delivery failed: {}", e);
                    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                    DeliveryStatus::Failed(e)
                }
            },
            None => {
                tracing::info!("Email disabled, notification will only be logged");
                DeliveryStatus::Disabled
            }
        };

        let record = LogRecord::now(body);
        let log = match self.log_store.append(&record).await {
            Ok(path) => {
                tracing::info!("📁 Notification appended to {}", path.display());
                LogStatus::Appended(path)
            }
            Err(e) => {
                tracing::error!("❌ Log write failed: {}", e);
                LogStatus::Failed(e)
            }
        };

        DispatchReport { delivery, log }
    }
}
