use crate::core::axes::{compute_axis_scores, RandomOffsets};
use crate::core::compatibility::{base_score, match_band};
use crate::core::{OffsetSource, ReadingStore};
use crate::domain::model::{
    CompatibilityContent, CompatibilityReading, CompatibilityRequest, NewReading, ReadingFilter,
    ReadingKind, ReadingRecord, ZodiacSign,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;

/// Scores a sign pair and builds the bundle that gets stored.
pub fn evaluate_compatibility<O: OffsetSource + ?Sized>(
    request: &CompatibilityRequest,
    offsets: &mut O,
) -> Result<CompatibilityReading> {
    let sign1: ZodiacSign = request.sign1.parse()?;
    let sign2: ZodiacSign = request.sign2.parse()?;

    let score = base_score(sign1, sign2);
    let areas = compute_axis_scores(score, offsets);
    let band = match_band(score);

    tracing::debug!(
        "{} ({}) + {} ({}) => {} [{}]",
        sign1,
        sign1.element(),
        sign2,
        sign2.element(),
        score,
        band
    );

    Ok(CompatibilityReading {
        content: CompatibilityContent {
            sign1: sign1.to_string(),
            sign2: sign2.to_string(),
            score,
            areas,
            birth_date_time1: request.birth_date_time1.clone(),
            birth_date_time2: request.birth_date_time2.clone(),
            birth_place1: request.birth_place1.clone(),
            birth_place2: request.birth_place2.clone(),
        },
        band,
    })
}

pub struct CompatibilityEngine<S: ReadingStore> {
    store: S,
}

impl<S: ReadingStore> CompatibilityEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Scores a request with the thread-local generator.
    pub fn evaluate(&self, request: &CompatibilityRequest) -> Result<CompatibilityReading> {
        evaluate_compatibility(request, &mut RandomOffsets::thread())
    }

    /// 計算並儲存一筆相容性解讀
    pub async fn save_reading(
        &self,
        user_id: &str,
        request: &CompatibilityRequest,
    ) -> Result<(CompatibilityReading, ReadingRecord)> {
        let reading = self.evaluate(request)?;
        self.store_reading(user_id, reading).await
    }

    pub async fn save_reading_with<O: OffsetSource + Send + ?Sized>(
        &self,
        user_id: &str,
        request: &CompatibilityRequest,
        offsets: &mut O,
    ) -> Result<(CompatibilityReading, ReadingRecord)> {
        let reading = evaluate_compatibility(request, offsets)?;
        self.store_reading(user_id, reading).await
    }

    async fn store_reading(
        &self,
        user_id: &str,
        reading: CompatibilityReading,
    ) -> Result<(CompatibilityReading, ReadingRecord)> {
        validate_non_empty_string("user_id", user_id)?;

        let new_reading = NewReading {
            user_id: user_id.to_string(),
            kind: ReadingKind::Compatibility,
            content: serde_json::to_value(&reading.content)?,
        };

        let record = self.store.insert(new_reading).await?;
        tracing::info!(
            "💾 Saved compatibility reading {} for user {} ({} + {} = {})",
            record.id,
            user_id,
            reading.content.sign1,
            reading.content.sign2,
            reading.content.score
        );

        Ok((reading, record))
    }

    /// 使用者的歷史紀錄，依建立時間由新到舊
    pub async fn history(
        &self,
        user_id: &str,
        filter: &ReadingFilter,
    ) -> Result<Vec<ReadingRecord>> {
        validate_non_empty_string("user_id", user_id)?;

        let records = self.store.list_for_user(user_id).await?;
        let total = records.len();
        let filtered: Vec<ReadingRecord> =
            records.into_iter().filter(|r| filter.matches(r)).collect();

        tracing::debug!(
            "History for {}: {} of {} readings match",
            user_id,
            filtered.len(),
            total
        );
        Ok(filtered)
    }

    pub async fn reading(&self, id: &str) -> Result<ReadingRecord> {
        self.store.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Axis;
    use crate::utils::error::ZodiacError;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStore {
        records: Arc<Mutex<Vec<ReadingRecord>>>,
    }

    #[async_trait]
    impl ReadingStore for MockStore {
        async fn insert(&self, reading: NewReading) -> Result<ReadingRecord> {
            let mut records = self.records.lock().await;
            let record = ReadingRecord {
                id: format!("r-{}", records.len() + 1),
                user_id: reading.user_id,
                kind: reading.kind,
                content: reading.content,
                created_at: Utc::now() + Duration::seconds(records.len() as i64),
            };
            records.push(record.clone());
            Ok(record)
        }

        async fn list_for_user(&self, user_id: &str) -> Result<Vec<ReadingRecord>> {
            let records = self.records.lock().await;
            let mut mine: Vec<ReadingRecord> = records
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect();
            mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(mine)
        }

        async fn get(&self, id: &str) -> Result<ReadingRecord> {
            let records = self.records.lock().await;
            records
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| ZodiacError::NotFound { id: id.to_string() })
        }
    }

    struct ConstantOffset(i32);

    impl OffsetSource for ConstantOffset {
        fn next_offset(&mut self) -> i32 {
            self.0
        }
    }

    #[test]
    fn test_evaluate_water_pair() {
        let request = CompatibilityRequest::new("Cancer", "Scorpio");
        let reading = evaluate_compatibility(&request, &mut ConstantOffset(-3)).unwrap();

        assert_eq!(reading.score(), 90);
        assert_eq!(reading.description(), "Celestial Match");
        assert_eq!(reading.content.areas.len(), 8);
        assert!(reading.content.areas.iter().all(|(_, s)| s == 87));
    }

    #[test]
    fn test_evaluate_rejects_unknown_sign() {
        let request = CompatibilityRequest::new("Cancer", "Dragon");
        assert!(matches!(
            evaluate_compatibility(&request, &mut ConstantOffset(0)),
            Err(ZodiacError::InvalidSign { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_reading_persists_bundle() {
        let engine = CompatibilityEngine::new(MockStore::default());
        let request = CompatibilityRequest {
            birth_place2: Some("Kyoto".to_string()),
            ..CompatibilityRequest::new("Aries", "Libra")
        };

        let (reading, record) = engine
            .save_reading_with("u-1", &request, &mut ConstantOffset(9))
            .await
            .unwrap();

        assert_eq!(reading.score(), 85);
        assert_eq!(record.kind, ReadingKind::Compatibility);
        assert_eq!(record.user_id, "u-1");

        let stored = engine.reading(&record.id).await.unwrap().compatibility().unwrap();
        assert_eq!(stored, reading.content);
        assert_eq!(stored.areas.get(Axis::Intellect), Some(94));
        assert_eq!(stored.birth_place2.as_deref(), Some("Kyoto"));
    }

    #[tokio::test]
    async fn test_invalid_sign_stores_nothing() {
        let store = MockStore::default();
        let engine = CompatibilityEngine::new(store.clone());

        let result = engine
            .save_reading("u-1", &CompatibilityRequest::new("NotASign", "Leo"))
            .await;

        assert!(matches!(result, Err(ZodiacError::InvalidSign { .. })));
        assert!(store.records.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_user_id_is_rejected() {
        let engine = CompatibilityEngine::new(MockStore::default());
        let result = engine
            .save_reading("  ", &CompatibilityRequest::new("Leo", "Leo"))
            .await;
        assert!(matches!(
            result,
            Err(ZodiacError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_history_is_filtered_and_newest_first() {
        let engine = CompatibilityEngine::new(MockStore::default());
        engine
            .save_reading("u-1", &CompatibilityRequest::new("Leo", "Aries"))
            .await
            .unwrap();
        engine
            .save_reading("u-2", &CompatibilityRequest::new("Virgo", "Pisces"))
            .await
            .unwrap();
        engine
            .save_reading("u-1", &CompatibilityRequest::new("Gemini", "Cancer"))
            .await
            .unwrap();

        let all = engine.history("u-1", &ReadingFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].compatibility().unwrap().sign1, "Gemini");
        assert_eq!(all[1].compatibility().unwrap().sign1, "Leo");

        let leo_only = ReadingFilter {
            kind: Some(ReadingKind::Compatibility),
            search: Some("aries".to_string()),
        };
        let found = engine.history("u-1", &leo_only).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].compatibility().unwrap().score, 90);
    }
}
