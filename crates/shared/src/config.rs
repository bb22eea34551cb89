//! Configuration types for petcare
//!
//! Every key is optional; a missing file section falls back to the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::PetcareError;

/// Environment variable consulted when no explicit config path is given
pub const CONFIG_ENV_VAR: &str = "PETCARE_CONFIG";

/// Collection that holds pet profile documents
pub const DEFAULT_COLLECTION: &str = "petProfiles";

/// Retry schedule applied to every store round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryConfig {
    /// Total attempts, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed pause between attempts, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    1000
}

/// Which document store backend to open at startup
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StoreConfig {
    /// Process-local store, lost on exit
    #[default]
    Memory,
    /// Single JSON file holding every collection
    File { path: PathBuf },
}

/// Top-level configuration file (petcare.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetcareConfig {
    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for PetcareConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            retry: RetryConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl PetcareConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, else from `$PETCARE_CONFIG`, else defaults
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(env_path) => Self::from_file(Path::new(&env_path)),
            None => Ok(Self::default()),
        }
    }

    /// Reject settings the store layer cannot honour
    pub fn validate(&self) -> crate::Result<()> {
        if self.collection.trim().is_empty() {
            return Err(PetcareError::Config(
                "collection name must not be empty".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(PetcareError::Config(
                "retry.maxAttempts must be at least 1".to_string(),
            ));
        }
        if let StoreConfig::File { path } = &self.store {
            if path.as_os_str().is_empty() {
                return Err(PetcareError::Config(
                    "store.path must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config: PetcareConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PetcareConfig::default());
        assert_eq!(config.collection, "petProfiles");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.delay_ms, 1000);
        assert_eq!(config.store, StoreConfig::Memory);
    }

    #[test]
    fn test_config_parse() {
        let json = r#"{
            "collection": "pets",
            "retry": { "maxAttempts": 5 },
            "store": { "kind": "file", "path": "/tmp/pets.json" }
        }"#;

        let config: PetcareConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.collection, "pets");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.delay_ms, 1000);
        assert_eq!(
            config.store,
            StoreConfig::File {
                path: PathBuf::from("/tmp/pets.json")
            }
        );
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = PetcareConfig::default();
        config.retry.max_attempts = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, PetcareError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "retry": {{ "delayMs": 10 }} }}"#).unwrap();

        let config = PetcareConfig::from_file(file.path()).unwrap();
        assert_eq!(config.retry.delay_ms, 10);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = PetcareConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, PetcareError::Json(_)));
    }
}
