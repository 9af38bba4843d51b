use crate::domain::model::{Coordinates, LogRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// 追蹤資料來源：回傳原始回應內容，由查詢階段負責解碼
#[async_trait]
pub trait SatelliteFetcher: Send + Sync {
    async fn fetch(&self, satellite_id: &str, coordinates: &Coordinates) -> Result<String>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

pub trait LogStore: Send + Sync {
    fn append(
        &self,
        record: &LogRecord,
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
}
