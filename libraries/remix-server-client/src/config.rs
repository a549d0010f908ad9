//! Client configuration loaded from file and environment

use crate::error::{Result, ServerClientError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "remix.toml";

/// Environment variable prefix (`REMIX_URL`, `REMIX_ACCESS_TOKEN`, ...)
pub const ENV_PREFIX: &str = "REMIX";

/// Connection settings for the remix server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://remix.example.com`
    pub url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub access_token: Option<String>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Config for an anonymous client
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Config for a signed-in client
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::new(url)
        }
    }

    /// Override the request timeout
    #[must_use]
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load configuration from `remix.toml` (if present) and `REMIX_*`
    /// environment variables
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE, ENV_PREFIX)
    }

    /// Load configuration from `path` (if present), overridden by
    /// environment variables starting with `env_prefix`
    pub fn load_from(path: impl AsRef<Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        let path = path.as_ref();
        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix).try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.normalized_url()?;
        if self.timeout_secs == 0 {
            return Err(ServerClientError::Config(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Base URL without trailing slashes
    pub(crate) fn normalized_url(&self) -> Result<String> {
        if self.url.trim().is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = self.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        Url::parse(&url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new("https://remix.test");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.access_token.is_none());
    }

    #[test]
    fn normalizes_trailing_slashes() {
        let config = ClientConfig::new("https://remix.test///");
        assert_eq!(config.normalized_url().unwrap(), "https://remix.test");
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("   ").validate().is_err());
        assert!(ClientConfig::new("remix.test").validate().is_err());
        assert!(ClientConfig::new("ftp://remix.test").validate().is_err());
        assert!(ClientConfig::new("http://").validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let result = ClientConfig::new("https://remix.test").timeout(0).validate();
        assert!(matches!(result, Err(ServerClientError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("remix.toml");
        std::fs::write(
            &path,
            "url = \"https://remix.test\"\naccess_token = \"secret\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = ClientConfig::load_from(&path, "REMIXTESTFILE").unwrap();
        assert_eq!(config, ClientConfig::with_token("https://remix.test", "secret").timeout(5));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("remix.toml");
        std::fs::write(&path, "url = \"https://file.test\"\n").unwrap();

        std::env::set_var("REMIXTESTENV_URL", "https://env.test");
        std::env::set_var("REMIXTESTENV_TIMEOUT_SECS", "12");
        let config = ClientConfig::load_from(&path, "REMIXTESTENV").unwrap();
        std::env::remove_var("REMIXTESTENV_URL");
        std::env::remove_var("REMIXTESTENV_TIMEOUT_SECS");

        assert_eq!(config.url, "https://env.test");
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn missing_url_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ClientConfig::load_from(dir.path().join("absent.toml"), "REMIXTESTMISSING");
        assert!(matches!(result, Err(ServerClientError::Config(_))));
    }
}
