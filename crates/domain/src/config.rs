//! Client configuration structures

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TIMEZONE, REDACTION_MARKER,
};
use crate::errors::{Result, WapiError};
use crate::impl_wire_name_conversions;
use crate::types::Credentials;

/// Envelope format; also the last path segment of the endpoint URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    #[default]
    Xml,
    Json,
}

impl_wire_name_conversions!(WireFormat {
    Xml => "xml",
    Json => "json",
});

/// Polling budget for asynchronous operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_poll_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_POLL_ATTEMPTS, interval_secs: DEFAULT_POLL_INTERVAL_SECS }
    }
}

/// Everything needed to build a registry client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub username: String,
    pub password: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub format: WireFormat,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub poll: PollSettings,
    /// IANA zone whose wall-clock hour feeds the auth token.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl ClientConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: default_base_url(),
            format: WireFormat::default(),
            timeout_secs: default_timeout_secs(),
            poll: PollSettings::default(),
            timezone: default_timezone(),
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{base_url}/{xml|json}`
    pub fn endpoint_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.format)
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| WapiError::Config(format!("invalid base_url '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(WapiError::Config(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.username.trim().is_empty() {
            return Err(WapiError::Config("username must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(WapiError::Config("timeout_secs must be greater than zero".into()));
        }
        if self.poll.max_attempts == 0 {
            return Err(WapiError::Config("poll.max_attempts must be greater than zero".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("password", &REDACTION_MARKER)
            .field("base_url", &self.base_url)
            .field("format", &self.format)
            .field("timeout_secs", &self.timeout_secs)
            .field("poll", &self.poll)
            .field("timezone", &self.timezone)
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_poll_attempts() -> u32 {
    DEFAULT_POLL_ATTEMPTS
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"username":"u","password":"p"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.format, WireFormat::Xml);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.poll, PollSettings { max_attempts: 60, interval_secs: 10 });
        assert_eq!(config.timezone, "Europe/Prague");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn wire_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<WireFormat>(), Ok(WireFormat::Json));
        assert_eq!("xml".parse::<WireFormat>(), Ok(WireFormat::Xml));
        assert!("yaml".parse::<WireFormat>().is_err());
        let config: ClientConfig =
            serde_json::from_str(r#"{"username":"u","password":"p","format":"json"}"#).unwrap();
        assert_eq!(config.format, WireFormat::Json);
    }

    #[test]
    fn endpoint_url_appends_format() {
        let mut config = ClientConfig::new("u", "p");
        config.base_url = "https://registry.test/wapi/".into();
        assert_eq!(config.endpoint_url(), "https://registry.test/wapi/xml");
        config.format = WireFormat::Json;
        assert_eq!(config.endpoint_url(), "https://registry.test/wapi/json");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = ClientConfig::new("u", "p");
        config.base_url = "not a url".into();
        assert!(matches!(config.validate(), Err(WapiError::Config(_))));

        let mut config = ClientConfig::new("  ", "p");
        assert!(config.validate().is_err());
        config.username = "u".into();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.timeout_secs = 30;
        config.poll.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_password() {
        let config = ClientConfig::new("user", "top-secret-pass");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("top-secret-pass"));
        assert!(rendered.contains(REDACTION_MARKER));
    }
}
