use crate::utils::error::{Result, ZodiacError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_PATH: &str = "./readings";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub r#type: String,
    pub output_path: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ZodiacError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ZodiacError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPABASE_ANON_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ZodiacError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Local store by default, so a missing config file still works.
    pub fn local(output_path: &str) -> Self {
        Self {
            store: StoreConfig {
                r#type: "local".to_string(),
                output_path: Some(output_path.to_string()),
                endpoint: None,
                api_key: None,
                timeout_seconds: None,
            },
            logging: None,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.store.r#type == "rest"
    }

    pub fn output_path(&self) -> &str {
        self.store
            .output_path
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.store.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        match self.store.r#type.as_str() {
            "local" => validate_path("store.output_path", self.output_path())?,
            "rest" => {
                let endpoint = validate_required_field("store.endpoint", &self.store.endpoint)?;
                validate_url("store.endpoint", endpoint)?;
                let api_key = validate_required_field("store.api_key", &self.store.api_key)?;
                validate_non_empty_string("store.api_key", api_key)?;
                if api_key.starts_with("${") {
                    return Err(ZodiacError::InvalidConfigValueError {
                        field: "store.api_key".to_string(),
                        value: api_key.clone(),
                        reason: "Environment variable is not set".to_string(),
                    });
                }
            }
            other => {
                return Err(ZodiacError::InvalidConfigValueError {
                    field: "store.type".to_string(),
                    value: other.to_string(),
                    reason: "Unsupported store type. Valid types: local, rest".to_string(),
                })
            }
        }

        validate_range("store.timeout_seconds", self.timeout_seconds(), 1, 300)?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if !["compact", "json"].contains(&format) {
                return Err(ZodiacError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Unsupported format. Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_rest_config() {
        let toml_content = r#"
[store]
type = "rest"
endpoint = "https://project.supabase.co"
api_key = "anon-key"
timeout_seconds = 10

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.is_rest());
        assert_eq!(config.timeout_seconds(), 10);
        assert!(config.json_logs());
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_local_defaults() {
        let config = TomlConfig::from_toml_str("[store]\ntype = \"local\"\n").unwrap();
        assert!(!config.is_rest());
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ZODIAC_TEST_STORE_KEY", "secret-123");

        let toml_content = r#"
[store]
type = "rest"
endpoint = "https://project.supabase.co"
api_key = "${ZODIAC_TEST_STORE_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.store.api_key.as_deref(), Some("secret-123"));

        std::env::remove_var("ZODIAC_TEST_STORE_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[store]
type = "rest"
endpoint = "https://project.supabase.co"
api_key = "${ZODIAC_TEST_NEVER_SET}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let missing_key = TomlConfig::from_toml_str(
            "[store]\ntype = \"rest\"\nendpoint = \"https://project.supabase.co\"\n",
        )
        .unwrap();
        assert!(matches!(
            missing_key.validate(),
            Err(ZodiacError::MissingConfigError { .. })
        ));

        let bad_url = TomlConfig::from_toml_str(
            "[store]\ntype = \"rest\"\nendpoint = \"invalid-url\"\napi_key = \"k\"\n",
        )
        .unwrap();
        assert!(bad_url.validate().is_err());

        let bad_type = TomlConfig::from_toml_str("[store]\ntype = \"s3\"\n").unwrap();
        assert!(bad_type.validate().is_err());

        let bad_format = TomlConfig::from_toml_str(
            "[store]\ntype = \"local\"\n[logging]\nformat = \"xml\"\n",
        )
        .unwrap();
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[store]\ntype = \"local\"\noutput_path = \"./my-readings\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./my-readings");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[store"),
            Err(ZodiacError::ConfigError { .. })
        ));
    }
}
