//! Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::Result;

/// Base URL of the shared Foody deployment the suite was written against
pub const DEFAULT_BASE_URL: &str =
    "http://softuni-qa-loadbalancer-2137572849.eu-north-1.elb.amazonaws.com:86";

/// Shown in place of the password when printing configuration
pub const PASSWORD_MASK: &str = "********";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Remote API location
    #[serde(default)]
    pub server: ServerConfig,

    /// Login credentials
    #[serde(default)]
    pub credentials: Credentials,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Suite behaviour
    #[serde(default)]
    pub suite: SuiteConfig,
}

/// Remote API location
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Base URL every request path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Username and password sent to the authentication endpoint
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Credentials {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

fn default_username() -> String {
    "Gogo44".to_string()
}
fn default_password() -> String {
    "gogo123456".to_string()
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Timeouts {
    /// Per-request timeout; the transport default applies when unset
    #[serde(default)]
    pub request_secs: Option<u64>,
}

impl Timeouts {
    /// Request timeout as a Duration, if configured
    pub fn request(&self) -> Option<Duration> {
        self.request_secs.map(Duration::from_secs)
    }
}

/// What to do when a response lacks an expected string field
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Raise `Error::MissingField`
    #[default]
    Fail,
    /// Treat the field as an empty string
    Empty,
}

/// Suite behaviour
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct SuiteConfig {
    #[serde(default)]
    pub missing_fields: MissingFieldPolicy,
}

/// Values given on the command line, applied over the file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(base_url) = overrides.base_url {
            self.server.base_url = base_url;
        }
        if let Some(username) = overrides.username {
            self.credentials.username = username;
        }
        if let Some(password) = overrides.password {
            self.credentials.password = password;
        }
        self
    }

    /// Render the resolved configuration as TOML with the password masked
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut redacted = self.clone();
        redacted.credentials.password = PASSWORD_MASK.to_string();
        toml::to_string_pretty(&redacted).map_err(|e| super::Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.credentials.username, "Gogo44");
        assert_eq!(config.suite.missing_fields, MissingFieldPolicy::Fail);
        assert!(config.timeouts.request().is_none());
    }

    #[test]
    fn test_parse_all_sections() {
        let config = Config::parse(
            r#"
[server]
base_url = "http://localhost:8080"

[credentials]
username = "alice"
password = "secret"

[timeouts]
request_secs = 15

[suite]
missing_fields = "empty"
"#,
        )
        .unwrap();

        assert_eq!(config.server.base_url, "http://localhost:8080");
        assert_eq!(config.credentials.username, "alice");
        assert_eq!(config.credentials.password, "secret");
        assert_eq!(config.timeouts.request(), Some(Duration::from_secs(15)));
        assert_eq!(config.suite.missing_fields, MissingFieldPolicy::Empty);
    }

    #[test]
    fn test_partial_credentials_keep_defaults() {
        let config = Config::parse("[credentials]\nusername = \"bob\"\n").unwrap();
        assert_eq!(config.credentials.username, "bob");
        assert_eq!(config.credentials.password, "gogo123456");
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let err = Config::parse("[suite]\nmissing_fields = \"ignore\"\n").unwrap_err();
        assert!(matches!(err, crate::Error::ConfigParse(_)));
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default().with_overrides(Overrides {
            base_url: Some("http://127.0.0.1:9".to_string()),
            username: None,
            password: Some("pw".to_string()),
        });
        assert_eq!(config.server.base_url, "http://127.0.0.1:9");
        assert_eq!(config.credentials.username, "Gogo44");
        assert_eq!(config.credentials.password, "pw");
    }

    #[test]
    fn test_redacted_toml_masks_password() {
        let mut config = Config::default();
        config.credentials.password = "a-rather-long-secret".to_string();
        config.timeouts.request_secs = Some(7);

        let rendered = config.to_redacted_toml().unwrap();
        assert!(!rendered.contains("a-rather-long-secret"));
        assert!(rendered.contains(PASSWORD_MASK));

        // The mask does not depend on the password length
        config.credentials.password = "x".to_string();
        assert!(config.to_redacted_toml().unwrap().contains(PASSWORD_MASK));

        let reparsed = Config::parse(&rendered).unwrap();
        assert_eq!(reparsed.server.base_url, DEFAULT_BASE_URL);
        assert_eq!(reparsed.timeouts.request_secs, Some(7));
        assert_eq!(reparsed.suite.missing_fields, MissingFieldPolicy::Fail);
        assert_eq!(reparsed.credentials.password, PASSWORD_MASK);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timeouts]\nrequest_secs = 3\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.timeouts.request_secs, Some(3));
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let err = Config::load_from(Path::new("/nonexistent/foody.toml")).unwrap_err();
        assert!(matches!(err, crate::Error::FileRead { .. }));
    }
}
