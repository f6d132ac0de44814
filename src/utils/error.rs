use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZodiacError {
    #[error("Invalid zodiac sign: '{sign}'")]
    InvalidSign { sign: String },

    #[error("Invalid birth date '{value}': {reason}")]
    InvalidBirthDate { value: String, reason: String },

    #[error("Reading store request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Reading store error: {message}")]
    StoreError { message: String },

    #[error("Reading not found: {id}")]
    NotFound { id: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Storage,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ZodiacError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ZodiacError::InvalidSign { .. } | ZodiacError::InvalidBirthDate { .. } => {
                ErrorCategory::Input
            }
            ZodiacError::HttpError(_)
            | ZodiacError::StoreError { .. }
            | ZodiacError::NotFound { .. } => ErrorCategory::Storage,
            ZodiacError::ConfigError { .. }
            | ZodiacError::MissingConfigError { .. }
            | ZodiacError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ZodiacError::IoError(_) | ZodiacError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ZodiacError::NotFound { .. } => ErrorSeverity::Low,
            ZodiacError::HttpError(_) | ZodiacError::StoreError { .. } => ErrorSeverity::Medium,
            ZodiacError::InvalidSign { .. }
            | ZodiacError::InvalidBirthDate { .. }
            | ZodiacError::ConfigError { .. }
            | ZodiacError::MissingConfigError { .. }
            | ZodiacError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ZodiacError::IoError(_) | ZodiacError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 錯誤的修復建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            ZodiacError::InvalidSign { .. } => format!(
                "Use one of the canonical sign names: {}",
                crate::domain::model::ZodiacSign::ALL
                    .iter()
                    .map(|s| s.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ZodiacError::InvalidBirthDate { .. } => {
                "Use YYYY-MM-DD, optionally followed by a time (YYYY-MM-DDTHH:MM)".to_string()
            }
            ZodiacError::HttpError(_) | ZodiacError::StoreError { .. } => {
                "Check the store endpoint and API key, then try again".to_string()
            }
            ZodiacError::NotFound { .. } => "Check the reading id".to_string(),
            ZodiacError::ConfigError { .. }
            | ZodiacError::MissingConfigError { .. }
            | ZodiacError::InvalidConfigValueError { .. } => {
                "Review the store configuration file and command-line flags".to_string()
            }
            ZodiacError::IoError(_) => "Check file permissions and the output path".to_string(),
            ZodiacError::SerializationError(_) => {
                "The readings file may be corrupted; move it aside and retry".to_string()
            }
        }
    }

    /// 給使用者看的錯誤訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ZodiacError::InvalidSign { sign } => format!("'{}' is not a zodiac sign", sign),
            ZodiacError::InvalidBirthDate { value, .. } => {
                format!("Could not read the birth date '{}'", value)
            }
            ZodiacError::HttpError(_) | ZodiacError::StoreError { .. } => {
                "The reading could not be saved to the remote store".to_string()
            }
            ZodiacError::NotFound { id } => format!("No reading with id '{}'", id),
            ZodiacError::ConfigError { message } => format!("Configuration problem: {}", message),
            ZodiacError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            ZodiacError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            ZodiacError::IoError(e) => format!("File system error: {}", e),
            ZodiacError::SerializationError(e) => format!("Data format error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ZodiacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sign_is_high_severity_input_error() {
        let err = ZodiacError::InvalidSign {
            sign: "NotASign".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("Aries"));
        assert!(err.recovery_suggestion().contains("Pisces"));
        assert_eq!(err.to_string(), "Invalid zodiac sign: 'NotASign'");
    }

    #[test]
    fn test_not_found_is_low_severity() {
        let err = ZodiacError::NotFound {
            id: "r-9".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.category(), ErrorCategory::Storage);
    }
}
