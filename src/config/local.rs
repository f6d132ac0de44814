use crate::core::ReadingStore;
use crate::domain::model::{NewReading, ReadingRecord};
use crate::utils::error::{Result, ZodiacError};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub const READINGS_FILE: &str = "readings.json";

/// Stores readings as a JSON array in `<base_path>/readings.json`.
#[derive(Debug)]
pub struct LocalReadingStore {
    base_path: String,
    // 序列化同一行程內的讀寫
    lock: Mutex<()>,
}

impl LocalReadingStore {
    pub fn new(base_path: String) -> Self {
        Self {
            base_path,
            lock: Mutex::new(()),
        }
    }

    pub fn file_path(&self) -> PathBuf {
        Path::new(&self.base_path).join(READINGS_FILE)
    }

    async fn load(&self) -> Result<Vec<ReadingRecord>> {
        let path = self.file_path();
        match tokio::fs::read(&path).await {
            Ok(data) if data.is_empty() => Ok(Vec::new()),
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(ZodiacError::IoError(e)),
        }
    }

    async fn save(&self, records: &[ReadingRecord]) -> Result<()> {
        let path = self.file_path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl ReadingStore for LocalReadingStore {
    async fn insert(&self, reading: NewReading) -> Result<ReadingRecord> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        let record = ReadingRecord {
            id: format!("r-{}", records.len() + 1),
            user_id: reading.user_id,
            kind: reading.kind,
            content: reading.content,
            created_at: Utc::now(),
        };
        records.push(record.clone());
        self.save(&records).await?;

        tracing::debug!("Wrote {} readings to {}", records.len(), self.file_path().display());
        Ok(record)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ReadingRecord>> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;

        // 反轉後穩定排序，同一時間戳記時較晚寫入者在前
        let mut mine: Vec<ReadingRecord> = records
            .into_iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }

    async fn get(&self, id: &str) -> Result<ReadingRecord> {
        let _guard = self.lock.lock().await;
        self.load()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ZodiacError::NotFound { id: id.to_string() })
    }
}
