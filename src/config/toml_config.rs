use crate::domain::criteria::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: CatalogSection,
    pub source: SourceSection,
    pub cache: Option<CacheSection>,
    pub limits: Option<LimitsSection>,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// "file" or "api".
    pub r#type: String,
    /// Dataset path for file sources, URL for api sources.
    pub location: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSection {
    pub enabled: bool,
    pub ttl_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSection {
    pub default_page_size: Option<usize>,
    pub max_page_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` markers with environment values; unknown
    /// variables are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.as_ref().map(|c| c.enabled).unwrap_or(true)
    }

    pub fn cache_ttl_seconds(&self) -> u64 {
        self.cache
            .as_ref()
            .and_then(|c| c.ttl_seconds)
            .unwrap_or(300)
    }

    pub fn default_page_size(&self) -> usize {
        self.limits
            .as_ref()
            .and_then(|l| l.default_page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("catalog.name", &self.catalog.name)?;

        match self.source.r#type.as_str() {
            "api" => validate_url("source.location", &self.source.location)?,
            "file" => {
                validate_file_extension("source.location", &self.source.location, &["json", "csv"])?
            }
            other => {
                return Err(CatalogError::InvalidConfigValueError {
                    field: "source.type".to_string(),
                    value: other.to_string(),
                    reason: "Source type must be 'file' or 'api'".to_string(),
                })
            }
        }

        if let Some(limits) = &self.limits {
            if let Some(size) = limits.default_page_size {
                validate_range("limits.default_page_size", size, 1, MAX_PAGE_SIZE)?;
            }
            if let Some(size) = limits.max_page_size {
                validate_range("limits.max_page_size", size, 1, MAX_PAGE_SIZE)?;
            }
        }

        Ok(())
    }
}
