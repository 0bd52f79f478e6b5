use crate::core::store::json_file::JsonFile;
use crate::model::backup_result::BackupResult;
use crate::model::error::Error;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Append-only sequence of results, earliest first. Backs both `history.json`
/// and `log.json`; the log variant only accepts results carrying errors.
pub struct RecordStore {
    file: JsonFile,
    errors_only: bool,
    records: Mutex<Vec<BackupResult>>,
}

impl RecordStore {
    pub async fn history(path: impl Into<PathBuf>) -> Result<Self, Error> {
        Self::open(path, false).await
    }

    pub async fn log(path: impl Into<PathBuf>) -> Result<Self, Error> {
        Self::open(path, true).await
    }

    async fn open(path: impl Into<PathBuf>, errors_only: bool) -> Result<Self, Error> {
        let file = JsonFile::new(path);
        let records: Vec<BackupResult> = file.read().await?;
        Ok(Self {
            file,
            errors_only,
            records: Mutex::new(records),
        })
    }

    /// Returns whether the result was accepted and persisted.
    pub async fn append(&self, result: &BackupResult) -> Result<bool, Error> {
        if self.errors_only && !result.has_errors() {
            return Ok(false);
        }
        let mut records = self.records.lock().await;
        records.push(result.clone());
        if let Err(err) = self.file.write(&*records).await {
            records.pop();
            return Err(err);
        }
        Ok(true)
    }

    pub async fn records(&self) -> Vec<BackupResult> {
        self.records.lock().await.clone()
    }

    pub async fn dates(&self) -> Vec<String> {
        self.records
            .lock()
            .await
            .iter()
            .map(BackupResult::date_label)
            .collect()
    }

    /// First record whose date label equals `date`.
    pub async fn record_by_date(&self, date: &str) -> Option<BackupResult> {
        self.records
            .lock()
            .await
            .iter()
            .find(|record| record.date_label() == date)
            .cloned()
    }
}
