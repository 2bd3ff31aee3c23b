use resource_framework::{ClientConfig, ListOrdering};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::AdminError;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "CATALOG_ADMIN_CONFIG";
/// Environment variable overriding `api_url`.
pub const API_URL_ENV: &str = "CATALOG_API_URL";
pub const DEFAULT_CONFIG_FILE: &str = "catalog-admin.json";

/// Settings of the admin client, stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Root of the catalog backend, without the `api/` prefix.
    pub api_url: String,
    /// `0` (the default) leaves the HTTP client's own timeout behavior.
    pub request_timeout_seconds: u64,
    pub list_ordering: ListOrdering,
    pub store_buffer: usize,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            request_timeout_seconds: 0,
            list_ordering: ListOrdering::CompletionOrder,
            store_buffer: 32,
        }
    }
}

impl AdminConfig {
    /// Path of the configuration file: `$CATALOG_ADMIN_CONFIG`, else
    /// `catalog-admin.json` in the working directory.
    pub fn config_file_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Loads the configuration file, or the defaults if it cannot be read,
    /// then applies `$CATALOG_API_URL`.
    pub fn load() -> Self {
        let path = Self::config_file_path();
        let mut config = match Self::load_from_file(&path) {
            Ok(config) => {
                info!(path = %path.display(), "Configuration loaded");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Using default configuration");
                Self::default()
            }
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }
        config
    }

    pub fn load_from_file(path: &Path) -> Result<Self, AdminError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AdminError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| AdminError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self, path: &Path) -> Result<(), AdminError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AdminError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| AdminError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Framework settings derived from this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            request_timeout: (self.request_timeout_seconds > 0)
                .then(|| Duration::from_secs(self.request_timeout_seconds)),
            store_buffer: self.store_buffer.max(1),
            list_ordering: self.list_ordering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let config: AdminConfig =
            serde_json::from_str(r#"{ "api_url": "http://catalog:9000" }"#).unwrap();
        assert_eq!(config.api_url, "http://catalog:9000");
        assert_eq!(config.request_timeout_seconds, 0);
        assert_eq!(config.list_ordering, ListOrdering::CompletionOrder);
    }

    #[test]
    fn ordering_is_snake_case() {
        let config: AdminConfig =
            serde_json::from_str(r#"{ "list_ordering": "issue_order" }"#).unwrap();
        assert_eq!(config.list_ordering, ListOrdering::IssueOrder);
    }

    #[test]
    fn timeout_is_opt_in() {
        assert_eq!(AdminConfig::default().client_config().request_timeout, None);

        let config = AdminConfig {
            request_timeout_seconds: 15,
            ..AdminConfig::default()
        };
        assert_eq!(
            config.client_config().request_timeout,
            Some(Duration::from_secs(15))
        );
    }

    #[test]
    fn save_then_load_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "catalog-admin-config-{}.json",
            std::process::id()
        ));
        let config = AdminConfig {
            api_url: "http://saved:1234".to_string(),
            ..AdminConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = AdminConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = AdminConfig::load_from_file(Path::new("/nonexistent/catalog-admin.json"));
        assert!(matches!(result, Err(AdminError::Config(_))));
    }
}
