use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Failed to load dataset '{path}': {message}")]
    DataLoad { path: String, message: String },

    #[error("Dataset is missing required column: {column}")]
    MissingColumn { column: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Could not write map to '{path}': {source}")]
    MapWrite {
        path: String,
        source: std::io::Error,
    },

    #[error("Could not geocode '{query}': {message}")]
    Geocode { query: String, message: String },

    #[error("No stores found")]
    NoStoresFound,

    #[error("Invalid input for {field}: '{value}' ({reason})")]
    InputValidation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Zip directory returned HTTP {status} for {url}")]
    Service { status: u16, url: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Geocode,
    Input,
    Network,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinderError {
    pub fn geocode(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Geocode {
            query: query.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DataLoad { .. } | Self::MissingColumn { .. } | Self::CsvError(_) => {
                ErrorCategory::Data
            }
            Self::Geocode { .. } | Self::NoStoresFound => ErrorCategory::Geocode,
            Self::InputValidation { .. } => ErrorCategory::Input,
            Self::ApiError(_) | Self::Service { .. } | Self::SerializationError(_) => {
                ErrorCategory::Network
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
            Self::IoError(_) | Self::MapWrite { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoStoresFound => ErrorSeverity::Low,
            Self::Geocode { .. } | Self::InputValidation { .. } | Self::MapWrite { .. } => {
                ErrorSeverity::Medium
            }
            Self::ApiError(_) | Self::Service { .. } | Self::SerializationError(_) => {
                ErrorSeverity::Medium
            }
            Self::DataLoad { .. }
            | Self::MissingColumn { .. }
            | Self::CsvError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::DataLoad { .. } | Self::IoError(_) => {
                "Check that the dataset file exists and is readable"
            }
            Self::MissingColumn { .. } | Self::CsvError(_) => {
                "Make sure the dataset is a CSV export with the standard store columns"
            }
            Self::MapWrite { .. } => "Check that the map output directory is writable",
            Self::Geocode { .. } => "Check the spelling of the city, state or zip code",
            Self::NoStoresFound => "Try a larger radius or a different drive-through filter",
            Self::InputValidation { .. } => "Re-enter the value in the expected format",
            Self::ApiError(_) | Self::Service { .. } | Self::SerializationError(_) => {
                "Check the zip directory endpoint and your network connection"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review the configuration file and CLI flags",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NoStoresFound => "Error. No stores are found".to_string(),
            Self::Geocode { query, .. } => format!("Error. Could not find location '{}'", query),
            Self::InputValidation { field, reason, .. } => format!("Error. {}: {}", field, reason),
            Self::MapWrite { path, .. } => format!("Error. Could not write the map to '{}'", path),
            Self::DataLoad { path, .. } => format!("Could not load store data from '{}'", path),
            Self::MissingColumn { column } => {
                format!("Store data is missing the '{}' column", column)
            }
            Self::ApiError(_) | Self::Service { .. } => {
                "The zip code lookup service is unavailable".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
