use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Dataset request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV dataset error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid filter input '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Aircraft not found: {}", format_id_list(.ids))]
    MissingAircraftError { ids: Vec<i64> },

    #[error("Dataset error: {message}")]
    DatasetError { message: String },
}

fn format_id_list(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    NotFound,
    Network,
    Data,
    System,
}

impl CatalogError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn dataset(message: impl Into<String>) -> Self {
        Self::DatasetError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) => ErrorCategory::Network,
            Self::CsvError(_) | Self::SerializationError(_) | Self::DatasetError { .. } => {
                ErrorCategory::Data
            }
            Self::IoError(_) => ErrorCategory::System,
            Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::MissingAircraftError { .. } => ErrorCategory::NotFound,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::HttpError(_) => {
                "Check that the dataset endpoint is reachable and retry".to_string()
            }
            Self::CsvError(_) => "Check the CSV dataset header and row shapes".to_string(),
            Self::IoError(_) => "Check file permissions and available disk space".to_string(),
            Self::SerializationError(_) => {
                "Check that the dataset is valid JSON with the expected fields".to_string()
            }
            Self::ConfigValidationError { field, .. }
            | Self::MissingConfigError { field }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' entry in the configuration and rerun", field)
            }
            Self::ValidationError { field, .. } => {
                format!("Adjust the '{}' parameter and retry the request", field)
            }
            Self::MissingAircraftError { .. } => {
                "Remove the unknown IDs from the comparison request".to_string()
            }
            Self::DatasetError { .. } => "Reload the dataset from a known-good source".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(_) => "Could not reach the catalog data source".to_string(),
            Self::CsvError(_) | Self::SerializationError(_) | Self::DatasetError { .. } => {
                "The catalog dataset could not be read".to_string()
            }
            Self::IoError(_) => "A file operation failed".to_string(),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem ({}): {}", field, message)
            }
            Self::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            Self::ValidationError { field, reason } => {
                format!("Invalid request ({}): {}", field, reason)
            }
            Self::MissingAircraftError { ids } => {
                format!("Unknown aircraft IDs: {}", format_id_list(ids))
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_low_severity() {
        let err = CatalogError::validation("searchTerm", "too short");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_missing_aircraft_lists_every_id() {
        let err = CatalogError::MissingAircraftError { ids: vec![7, 42] };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.to_string().contains("7, 42"));
        assert!(err.user_friendly_message().contains("7, 42"));
    }
}
