#[cfg(feature = "cli")]
pub mod cli;
pub mod local;
pub mod rest;
pub mod toml_config;

use crate::core::ReadingStore;
use crate::domain::model::{NewReading, ReadingRecord};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use async_trait::async_trait;
use local::LocalReadingStore;
use rest::RestReadingStore;
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// The store selected by `store.type` in the configuration.
#[derive(Debug)]
pub enum ConfiguredStore {
    Local(LocalReadingStore),
    Rest(RestReadingStore),
}

impl ConfiguredStore {
    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        config.validate()?;

        if config.is_rest() {
            // validate() guarantees both are present
            let endpoint = config.store.endpoint.as_deref().unwrap_or_default();
            let api_key = config.store.api_key.clone().unwrap_or_default();
            let store = RestReadingStore::new(
                endpoint,
                api_key,
                Duration::from_secs(config.timeout_seconds()),
            )?;
            tracing::info!("🌐 Using remote reading store at {}", store.endpoint());
            Ok(ConfiguredStore::Rest(store))
        } else {
            let store = LocalReadingStore::new(config.output_path().to_string());
            tracing::info!("📁 Using local reading store at {}", store.file_path().display());
            Ok(ConfiguredStore::Local(store))
        }
    }
}

#[async_trait]
impl ReadingStore for ConfiguredStore {
    async fn insert(&self, reading: NewReading) -> Result<ReadingRecord> {
        match self {
            ConfiguredStore::Local(store) => store.insert(reading).await,
            ConfiguredStore::Rest(store) => store.insert(reading).await,
        }
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ReadingRecord>> {
        match self {
            ConfiguredStore::Local(store) => store.list_for_user(user_id).await,
            ConfiguredStore::Rest(store) => store.list_for_user(user_id).await,
        }
    }

    async fn get(&self, id: &str) -> Result<ReadingRecord> {
        match self {
            ConfiguredStore::Local(store) => store.get(id).await,
            ConfiguredStore::Rest(store) => store.get(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_store_by_type() {
        let local = ConfiguredStore::from_config(&TomlConfig::local("./out")).unwrap();
        assert!(matches!(local, ConfiguredStore::Local(_)));

        let rest_config = TomlConfig::from_toml_str(
            "[store]\ntype = \"rest\"\nendpoint = \"https://project.supabase.co/\"\napi_key = \"k\"\n",
        )
        .unwrap();
        match ConfiguredStore::from_config(&rest_config).unwrap() {
            ConfiguredStore::Rest(store) => {
                assert_eq!(store.endpoint(), "https://project.supabase.co/rest/v1/readings")
            }
            other => panic!("expected rest store, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = TomlConfig::from_toml_str("[store]\ntype = \"rest\"\n").unwrap();
        assert!(ConfiguredStore::from_config(&config).is_err());
    }
}
