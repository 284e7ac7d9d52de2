use crate::core::reservation_writer::SlotPolicy;
use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STORE_PATH: &str = "./reservations.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub reservations: ReservationsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationsConfig {
    /// Refuse a second reservation for an occupied slot.
    pub enforce_unique_slots: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReservationError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "Config file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReservationError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STORE_PATH})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReservationError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn slot_policy(&self) -> SlotPolicy {
        if self.reservations.enforce_unique_slots {
            SlotPolicy::RejectDuplicates
        } else {
            SlotPolicy::AllowDuplicates
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("store.path", &self.store.path)?;
        validate_one_of(
            "logging.level",
            &self.logging.level,
            &["error", "warn", "info", "debug", "trace"],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[store]
path = "/var/lib/reservations/store.json"

[reservations]
enforce_unique_slots = true

[logging]
level = "debug"
format = "json"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.store.path, "/var/lib/reservations/store.json");
        assert_eq!(config.slot_policy(), SlotPolicy::RejectDuplicates);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.store.path, DEFAULT_STORE_PATH);
        assert_eq!(config.slot_policy(), SlotPolicy::AllowDuplicates);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FIELD_RESERVATIONS_TEST_STORE", "/tmp/env-store.json");

        let toml_content = r#"
[store]
path = "${FIELD_RESERVATIONS_TEST_STORE}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.store.path, "/tmp/env-store.json");

        std::env::remove_var("FIELD_RESERVATIONS_TEST_STORE");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str("[store]\npath = \"\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[logging]\nlevel = \"chatty\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = AppConfig::from_toml_str("[logging]\nformat = \"xml\"\n");
        assert!(matches!(result, Err(ReservationError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[store]\npath = \"./file-test.json\"\n")
            .unwrap();

        let config = AppConfig::load_or_default(temp_file.path()).unwrap();
        assert_eq!(config.store.path, "./file-test.json");

        let missing = AppConfig::load_or_default("/definitely/not/here.toml").unwrap();
        assert_eq!(missing.store.path, DEFAULT_STORE_PATH);
    }
}
