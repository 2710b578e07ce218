//! Integration tests for configuration loading
//!
//! Loads configuration from files and the environment, then wires a client
//! from it.

use std::io::Write;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regwapi_domain::{WapiError, WireFormat};
use regwapi_infra::{config, connect};
use tempfile::Builder;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn config_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().prefix("regwapi").suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    file
}

#[test]
fn test_json_file_to_client() {
    let file = config_file(
        ".json",
        r#"{
            "username": "wapi@example.cz",
            "password": "secret",
            "base_url": "https://registry.test/wapi",
            "format": "json",
            "timeout_secs": 10,
            "poll": { "max_attempts": 12, "interval_secs": 5 },
            "timezone": "Europe/Prague"
        }"#,
    );

    let config = config::load_from_file(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(config.endpoint_url(), "https://registry.test/wapi/json");
    assert!(!format!("{config:?}").contains("secret"));

    let client = connect(config).unwrap();
    assert_eq!(client.format(), WireFormat::Json);
    assert_eq!(client.poll_settings().max_attempts, 12);
}

#[test]
fn test_toml_file_with_unknown_timezone_still_connects() {
    let file = config_file(
        ".toml",
        r#"
username = "wapi@example.cz"
password = "secret"
timezone = "Nowhere/Atlantis"
"#,
    );

    let config = config::load_from_file(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(config.format, WireFormat::Xml);

    let client = connect(config).unwrap();
    assert_eq!(client.format(), WireFormat::Xml);
}

#[test]
fn test_missing_credentials_in_file() {
    let file = config_file(".toml", "base_url = \"https://registry.test/wapi\"\n");
    let err = config::load_from_file(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, WapiError::Config(_)));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn test_load_prefers_environment() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    std::env::set_var("REGWAPI_USERNAME", "env-user");
    std::env::set_var("REGWAPI_PASSWORD", "env-pass");
    std::env::set_var("REGWAPI_FORMAT", "json");

    let result = config::load();

    std::env::remove_var("REGWAPI_USERNAME");
    std::env::remove_var("REGWAPI_PASSWORD");
    std::env::remove_var("REGWAPI_FORMAT");

    let config = result.unwrap();
    assert_eq!(config.username, "env-user");
    assert_eq!(config.format, WireFormat::Json);
}
