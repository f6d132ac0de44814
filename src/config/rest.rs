use crate::core::ReadingStore;
use crate::domain::model::{NewReading, ReadingRecord};
use crate::utils::error::{Result, ZodiacError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

pub const READINGS_PATH: &str = "/rest/v1/readings";

/// Reading store backed by a PostgREST `readings` table (hosted Postgres).
#[derive(Debug, Clone)]
pub struct RestReadingStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RestReadingStore {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), READINGS_PATH),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn rows(operation: &str, response: Response) -> Result<Vec<ReadingRecord>> {
        let status = response.status();
        tracing::debug!("{} -> {}", operation, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ZodiacError::StoreError {
                message: format!("{} failed with status {}: {}", operation, status, body),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ReadingStore for RestReadingStore {
    async fn insert(&self, reading: NewReading) -> Result<ReadingRecord> {
        tracing::debug!("POST {}", self.endpoint);
        let response = self
            .authorized(self.client.post(&self.endpoint))
            .header("Prefer", "return=representation")
            .json(&[&reading])
            .send()
            .await?;

        Self::rows("insert reading", response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ZodiacError::StoreError {
                message: "insert reading returned no rows".to_string(),
            })
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ReadingRecord>> {
        let user_filter = format!("eq.{}", user_id);
        let response = self
            .authorized(self.client.get(&self.endpoint))
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .send()
            .await?;

        Self::rows("list readings", response).await
    }

    async fn get(&self, id: &str) -> Result<ReadingRecord> {
        let id_filter = format!("eq.{}", id);
        let response = self
            .authorized(self.client.get(&self.endpoint))
            .query(&[("select", "*"), ("id", id_filter.as_str())])
            .send()
            .await?;

        Self::rows("get reading", response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ZodiacError::NotFound { id: id.to_string() })
    }
}
