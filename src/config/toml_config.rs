use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{default_min_birth_date, Validate, ValidationPolicy};
use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub storage: StorageConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub base_path: String,
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: ".".to_string(),
            data_file: "students.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub check_birth_date: bool,
    pub min_birth_date: NaiveDate,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_birth_date: true,
            min_birth_date: default_min_birth_date(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl RosterConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Like [`RosterConfig::from_file`], but a missing file means defaults.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.as_ref().display());
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| RosterError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as
    /// written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            check_birth_date: self.validation.check_birth_date,
            min_birth_date: self.validation.min_birth_date,
            today: Local::now().date_naive(),
        }
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        let data_file = self.storage.data_file.trim();
        if data_file.is_empty() {
            return Err(RosterError::config("storage.data_file cannot be empty"));
        }
        if !data_file.to_ascii_lowercase().ends_with(".json") {
            return Err(RosterError::config(format!(
                "storage.data_file '{}' must be a .json file",
                data_file
            )));
        }
        if self.validation.min_birth_date > Local::now().date_naive() {
            return Err(RosterError::config(format!(
                "validation.min_birth_date {} is in the future",
                self.validation.min_birth_date
            )));
        }
        Ok(())
    }
}
