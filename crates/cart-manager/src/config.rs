//! TOML configuration for a [`CartSystem`](crate::lifecycle::CartSystem).
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3333"
//!
//! [storage]
//! directory = ".cart"
//! namespace = "@RocketShoes"
//!
//! [actor]
//! buffer_size = 32
//! ```
//!
//! Every section is optional. `${VAR}` is replaced by the environment variable `VAR` before
//! parsing; unset variables are left as written.

use crate::cart_actor::DEFAULT_BUFFER_SIZE;
use crate::model::CartId;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

static ENV_VAR: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    Parse(String),

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per key.
    pub directory: PathBuf,
    /// Key prefix; the cart lives under `{namespace}:cart`.
    pub namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".cart"),
            namespace: "@RocketShoes".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    pub buffer_size: usize,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub actor: ActorConfig,
}

impl CartConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let processed = substitute_env_vars(content)?;
        toml::from_str(&processed).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("api.base_url", &self.api.base_url)?;

        if self.storage.namespace.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.namespace",
                value: self.storage.namespace.clone(),
                reason: "Namespace cannot be empty".to_string(),
            });
        }

        if self.storage.directory.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.directory",
                value: String::new(),
                reason: "Path cannot be empty".to_string(),
            });
        }

        if self.actor.buffer_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "actor.buffer_size",
                value: "0".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// The storage key of the session cart.
    pub fn cart_key(&self) -> CartId {
        CartId::namespaced(&self.storage.namespace)
    }
}

fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
    let re = ENV_VAR
        .as_ref()
        .map_err(|e| ConfigError::Parse(e.to_string()))?;

    let result = re.replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });
    Ok(result.into_owned())
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        field,
        value: value.to_string(),
        reason,
    };

    if value.is_empty() {
        return Err(invalid("URL cannot be empty".to_string()));
    }

    let url = Url::parse(value).map_err(|e| invalid(format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(format!("Unsupported URL scheme: {}", scheme))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = CartConfig::from_toml_str("").unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.cart_key(), CartId("@RocketShoes:cart".to_string()));
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_sections() {
        let config = CartConfig::from_toml_str(
            r#"
            [storage]
            namespace = "@Shop"

            [actor]
            buffer_size = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.namespace, "@Shop");
        assert_eq!(config.storage.directory, PathBuf::from(".cart"));
        assert_eq!(config.actor.buffer_size, 4);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("CART_CONFIG_TEST_API", "https://api.example.com");
        let config = CartConfig::from_toml_str(
            r#"
            [api]
            base_url = "${CART_CONFIG_TEST_API}"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
    }

    #[test]
    fn test_unset_variable_is_left_in_place() {
        let config = CartConfig::from_toml_str(
            r#"
            [storage]
            namespace = "${CART_CONFIG_TEST_SURELY_UNSET}"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.namespace, "${CART_CONFIG_TEST_SURELY_UNSET}");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CartConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "api.base_url", .. })
        ));

        let mut config = CartConfig::default();
        config.actor.buffer_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "actor.buffer_size", .. })
        ));

        let mut config = CartConfig::default();
        config.storage.namespace = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "storage.namespace", .. })
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            CartConfig::from_toml_str("[api\nbase_url = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://127.0.0.1:9000\"\n").unwrap();

        let config = CartConfig::from_file(&path).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");

        let missing = CartConfig::from_file(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
