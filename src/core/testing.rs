use crate::core::{Coordinates, EmailSender, LogRecord, LogStore, SatelliteFetcher};
use crate::utils::error::{AlertError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Clone)]
pub enum FakeResponse {
    Raw(String),
    NetworkFailure,
}

impl FakeResponse {
    pub fn json(value: serde_json::Value) -> Self {
        FakeResponse::Raw(value.to_string())
    }
}

/// 未設定的衛星回傳 "{}"
#[derive(Clone, Default)]
pub struct FakeFetcher {
    responses: HashMap<String, FakeResponse>,
    delays: HashMap<String, Duration>,
    calls: Arc<Mutex<Vec<(String, Coordinates)>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, satellite_id: &str, response: FakeResponse) -> Self {
        self.responses.insert(satellite_id.to_string(), response);
        self
    }

    pub fn delayed(mut self, satellite_id: &str, delay: Duration) -> Self {
        self.delays.insert(satellite_id.to_string(), delay);
        self
    }

    pub async fn calls(&self) -> Vec<(String, Coordinates)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl SatelliteFetcher for FakeFetcher {
    async fn fetch(&self, satellite_id: &str, coordinates: &Coordinates) -> Result<String> {
        self.calls
            .lock()
            .await
            .push((satellite_id.to_string(), *coordinates));

        if let Some(delay) = self.delays.get(satellite_id) {
            tokio::time::sleep(*delay).await;
        }

        match self.responses.get(satellite_id) {
            Some(FakeResponse::Raw(body)) => Ok(body.clone()),
            Some(FakeResponse::NetworkFailure) => {
                Err(AlertError::fetch(satellite_id, "connection refused"))
            }
            None => Ok("{}".to_string()),
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<(String, String, String)>>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        if self.fail {
            return Err(AlertError::delivery("535 authentication failed"));
        }
        self.sent
            .lock()
            .await
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryLogStore {
    records: Arc<Mutex<Vec<LogRecord>>>,
    fail: bool,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn records(&self) -> Vec<LogRecord> {
        self.records.lock().await.clone()
    }
}

impl LogStore for MemoryLogStore {
    async fn append(&self, record: &LogRecord) -> Result<PathBuf> {
        if self.fail {
            return Err(AlertError::LogWriteError {
                path: "memory".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.records.lock().await.push(record.clone());
        Ok(PathBuf::from("memory"))
    }
}
