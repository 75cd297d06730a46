use crate::adapters::{HttpZipDirectory, TableZipDirectory};
use crate::core::finder::FinderSettings;
use crate::domain::ports::ZipDirectory;
use crate::render::MapSettings;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "store-finder.toml";
pub const DEFAULT_DATASET: &str = "stores.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinderConfig {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub zip_directory: ZipDirectoryConfig,
    #[serde(default)]
    pub map: MapSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATASET.to_string(),
        }
    }
}

/// Exactly one of `endpoint` or `reference_file` must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZipDirectoryConfig {
    pub endpoint: Option<String>,
    pub reference_file: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl FinderConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FinderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Falls back to defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            Self::from_file(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FinderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ZIP_API_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FinderError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.zip_directory.timeout_seconds.map(Duration::from_secs)
    }

    pub fn build_zip_directory(&self) -> Result<Box<dyn ZipDirectory>> {
        match (
            &self.zip_directory.endpoint,
            &self.zip_directory.reference_file,
        ) {
            (Some(endpoint), None) => {
                tracing::info!("🌐 Using zip directory service at {}", endpoint);
                Ok(Box::new(HttpZipDirectory::new(endpoint, self.timeout())?))
            }
            (None, Some(reference)) => Ok(Box::new(TableZipDirectory::from_path(reference)?)),
            (None, None) => Err(FinderError::MissingConfigError {
                field: "zip_directory.endpoint or zip_directory.reference_file".to_string(),
            }),
            (Some(_), Some(_)) => Err(FinderError::ConfigValidationError {
                field: "zip_directory".to_string(),
                message: "Set either endpoint or reference_file, not both".to_string(),
            }),
        }
    }

    pub fn finder_settings(&self) -> FinderSettings {
        FinderSettings {
            map: self.map.clone(),
            debug: self.debug,
        }
    }
}

impl Validate for FinderConfig {
    fn validate(&self) -> Result<()> {
        validate_path("dataset.path", &self.dataset.path)?;
        validate_path("map.output_file", &self.map.output_file)?;
        validate_range("map.zoom_start", self.map.zoom_start, 1, 18)?;

        match (
            &self.zip_directory.endpoint,
            &self.zip_directory.reference_file,
        ) {
            (Some(endpoint), None) => validate_url("zip_directory.endpoint", endpoint)?,
            (None, Some(reference)) => validate_path("zip_directory.reference_file", reference)?,
            (None, None) => {
                return Err(FinderError::MissingConfigError {
                    field: "zip_directory.endpoint or zip_directory.reference_file".to_string(),
                })
            }
            (Some(_), Some(_)) => {
                return Err(FinderError::ConfigValidationError {
                    field: "zip_directory".to_string(),
                    message: "Set either endpoint or reference_file, not both".to_string(),
                })
            }
        }

        if self.zip_directory.timeout_seconds == Some(0) {
            return Err(FinderError::InvalidConfigValueError {
                field: "zip_directory.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least one second".to_string(),
            });
        }

        Ok(())
    }
}
