/*
[INPUT]:  Optional YAML configuration file plus CLI / environment overrides
[OUTPUT]: Resolved client settings
[POS]:    Configuration layer - connection and credential setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use wex_adapter::{ClientConfig, Credentials, WexClient};

const DEFAULT_PUBLIC_URL: &str = "https://wex.nz/api/3";
const DEFAULT_TRADE_URL: &str = "https://wex.nz/tapi";

/// Client settings as read from `--config`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// API key for trade methods
    #[serde(default)]
    pub api_key: Option<String>,
    /// API secret for trade methods
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Public API v3 root
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// Trade API endpoint
    #[serde(default = "default_trade_url")]
    pub trade_url: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            public_url: default_public_url(),
            trade_url: default_trade_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_public_url() -> String {
    DEFAULT_PUBLIC_URL.to_string()
}

fn default_trade_url() -> String {
    DEFAULT_TRADE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content).context("parse config yaml")?;
        Ok(config)
    }

    /// Flags and environment take precedence over the file
    pub fn merge_overrides(mut self, api_key: Option<String>, api_secret: Option<String>) -> Self {
        if api_key.is_some() {
            self.api_key = api_key;
        }
        if api_secret.is_some() {
            self.api_secret = api_secret;
        }
        self
    }

    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some(Credentials::new(key.clone(), secret)),
            _ => None,
        }
    }

    pub fn build_client(&self) -> anyhow::Result<WexClient> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be at least 1");
        }
        let client_config = ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            ..ClientConfig::default()
        };
        let client =
            WexClient::with_config_and_base_urls(client_config, &self.public_url, &self.trade_url)
                .context("build http client")?;

        Ok(match self.credentials() {
            Some(credentials) => client.with_credentials(credentials),
            None => client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_apply_to_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: file-key\ntimeout_secs: 5").unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.api_secret, None);
        assert_eq!(config.public_url, DEFAULT_PUBLIC_URL);
        assert_eq!(config.timeout_secs, 5);
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let config = CliConfig {
            api_key: Some("file-key".to_string()),
            ..CliConfig::default()
        }
        .merge_overrides(Some("flag-key".to_string()), Some("flag-secret".to_string()));

        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.api_key(), "flag-key");
        assert_eq!(credentials.secret(), b"flag-secret");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = CliConfig::from_file(Path::new("/nonexistent/wex.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/wex.yaml"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs: 0").unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        let err = config.build_client().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_build_client_without_credentials() {
        let client = CliConfig::default().build_client().unwrap();
        assert!(client.credentials().is_none());
    }
}
