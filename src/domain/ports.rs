use crate::domain::model::{NewReading, ReadingRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of the per-axis jitter applied to a base score.
///
/// Each call yields one offset in `[-10, 9]`.
pub trait OffsetSource {
    fn next_offset(&mut self) -> i32;
}

#[async_trait]
pub trait ReadingStore: Send + Sync {
    async fn insert(&self, reading: NewReading) -> Result<ReadingRecord>;
    /// Readings of one user, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ReadingRecord>>;
    async fn get(&self, id: &str) -> Result<ReadingRecord>;
}
