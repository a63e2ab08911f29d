//! Portal configuration.
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults
//! 2. `portal.toml` in the app config directory
//! 3. the `api_base_url` entry of the `preferences.json` store
//! 4. the `ACADTRACE_API_BASE` environment variable

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::error::PortalError;

pub const CONFIG_FILE_NAME: &str = "portal.toml";
pub const PREFERENCES_STORE: &str = "preferences.json";
pub const BASE_URL_PREFERENCE: &str = "api_base_url";
pub const BASE_URL_ENV: &str = "ACADTRACE_API_BASE";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortalConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            request_timeout_secs: 30,
            user_agent: "AcadTrace/0.1".to_string(),
        }
    }
}

/// Partial config as written in `portal.toml`. Missing keys keep the lower layer.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl PortalConfig {
    /// Parse the base URL, normalised to end with `/` so relative joins keep its path.
    pub fn base_url(&self) -> Result<Url, PortalError> {
        let mut raw = self.api_base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw)
            .map_err(|e| PortalError::Config(format!("Invalid API base URL '{}': {}", self.api_base_url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(PortalError::Config(format!(
                "API base URL must be http or https, got '{}'",
                other
            ))),
        }
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(base) = file.api_base_url {
            self.api_base_url = base;
        }
        if let Some(timeout) = file.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(agent) = file.user_agent {
            self.user_agent = agent;
        }
    }

    /// Apply a base URL override if it is non-empty and parses.
    fn apply_base_override(&mut self, source: &str, value: Option<String>) {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            return;
        };
        let candidate = PortalConfig {
            api_base_url: value.clone(),
            ..self.clone()
        };
        match candidate.base_url() {
            Ok(_) => {
                info!("Using API base URL from {}: {}", source, value);
                self.api_base_url = value;
            }
            Err(e) => warn!("Ignoring API base URL from {}: {}", source, e),
        }
    }

    /// Build the effective config from all layers.
    pub fn resolve(
        config_dir: Option<&Path>,
        preference: Option<String>,
        env_override: Option<String>,
    ) -> PortalConfig {
        let mut config = match config_dir.map(|d| d.join(CONFIG_FILE_NAME)) {
            Some(path) if path.exists() => match load_config(&path) {
                Ok(c) => c,
                Err(e) => {
                    warn!("Failed to load {:?}, using defaults: {:#}", path, e);
                    PortalConfig::default()
                }
            },
            _ => PortalConfig::default(),
        };
        config.apply_base_override("preferences", preference);
        config.apply_base_override(BASE_URL_ENV, env_override);
        config
    }
}

/// Load a config file, filling unset keys from the defaults.
pub fn load_config(path: &Path) -> Result<PortalConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let file: ConfigFile =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    let mut config = PortalConfig::default();
    config.apply_file(file);
    config
        .base_url()
        .with_context(|| format!("validating {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_gets_trailing_slash() {
        let url = PortalConfig::default().base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = PortalConfig {
            api_base_url: "ftp://example.com/api".to_string(),
            ..PortalConfig::default()
        };
        assert!(matches!(config.base_url(), Err(PortalError::Config(_))));
    }

    #[test]
    fn test_load_config_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "request_timeout_secs = 5\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.api_base_url, PortalConfig::default().api_base_url);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_resolve_layers_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "api_base_url = \"http://file.example/api\"\nuser_agent = \"Test/1\"\n",
        )
        .unwrap();

        let from_file = PortalConfig::resolve(Some(dir.path()), None, None);
        assert_eq!(from_file.api_base_url, "http://file.example/api");
        assert_eq!(from_file.user_agent, "Test/1");

        let from_pref = PortalConfig::resolve(
            Some(dir.path()),
            Some("http://pref.example/api".to_string()),
            None,
        );
        assert_eq!(from_pref.api_base_url, "http://pref.example/api");

        let from_env = PortalConfig::resolve(
            Some(dir.path()),
            Some("http://pref.example/api".to_string()),
            Some("https://env.example/api".to_string()),
        );
        assert_eq!(from_env.api_base_url, "https://env.example/api");
        assert_eq!(from_env.user_agent, "Test/1");
    }

    #[test]
    fn test_resolve_ignores_bad_override() {
        let config = PortalConfig::resolve(None, Some("not a url".to_string()), Some("  ".to_string()));
        assert_eq!(config, PortalConfig::default());
    }
}
