use crate::domain::model::LogRecord;
use crate::domain::ports::LogStore;
use crate::utils::error::{AlertError, Result};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// 只追加 (append-only) 的文字日誌檔
#[derive(Debug, Clone)]
pub struct FileLogStore {
    path: PathBuf,
}

impl FileLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> AlertError {
        AlertError::LogWriteError {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl LogStore for FileLogStore {
    async fn append(&self, record: &LogRecord) -> Result<PathBuf> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.write_error(e))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.write_error(e))?;

        // 整筆一次寫入
        file.write_all(record.render().as_bytes())
            .await
            .map_err(|e| self.write_error(e))?;
        file.flush().await.map_err(|e| self.write_error(e))?;

        Ok(self.path.clone())
    }
}
