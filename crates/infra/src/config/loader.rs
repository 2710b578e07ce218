//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when the required ones are present
//! 2. Otherwise a config file, probed from the standard locations
//! 3. JSON and TOML are both accepted, chosen by file extension
//!
//! Every successful load is validated before it is returned.
//!
//! ## Environment Variables
//! - `REGWAPI_USERNAME` (required): API login
//! - `REGWAPI_PASSWORD` (required): API password
//! - `REGWAPI_BASE_URL`: endpoint root without the format suffix
//! - `REGWAPI_FORMAT`: `xml` or `json`
//! - `REGWAPI_TIMEOUT_SECS`: per-request timeout
//! - `REGWAPI_POLL_ATTEMPTS`: polling attempt budget
//! - `REGWAPI_POLL_INTERVAL_SECS`: seconds between poll attempts
//! - `REGWAPI_TIMEZONE`: IANA zone used for the auth hour
//!
//! ## File Locations
//! `config.{json,toml}` and `regwapi.{json,toml}`, looked up in the working
//! directory, its parent and grandparent, then the same relative to the
//! executable.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regwapi_domain::{ClientConfig, Result, WapiError};
use tracing::{debug, info};

const FILE_STEMS: [&str; 2] = ["config", "regwapi"];
const FILE_EXTENSIONS: [&str; 2] = ["json", "toml"];
const SEARCH_DIRS: [&str; 3] = [".", "..", "../.."];

/// Load configuration, environment first with a file fallback
///
/// # Errors
/// Returns `WapiError::Config` if neither source yields a valid configuration.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from `REGWAPI_*` environment variables
///
/// # Errors
/// Returns `WapiError::Config` if a required variable is missing or a value
/// does not parse.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(env_var("REGWAPI_USERNAME")?, env_var("REGWAPI_PASSWORD")?);

    if let Some(base_url) = env_opt("REGWAPI_BASE_URL") {
        config.base_url = base_url;
    }
    if let Some(format) = env_parse("REGWAPI_FORMAT")? {
        config.format = format;
    }
    if let Some(timeout) = env_parse("REGWAPI_TIMEOUT_SECS")? {
        config.timeout_secs = timeout;
    }
    if let Some(attempts) = env_parse("REGWAPI_POLL_ATTEMPTS")? {
        config.poll.max_attempts = attempts;
    }
    if let Some(interval) = env_parse("REGWAPI_POLL_INTERVAL_SECS")? {
        config.poll.interval_secs = interval;
    }
    if let Some(timezone) = env_opt("REGWAPI_TIMEZONE") {
        config.timezone = timezone;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, the first file found by [`probe_config_paths`] is
/// used.
///
/// # Errors
/// Returns `WapiError::Config` if the file is missing or unreadable, its
/// format is invalid, or the result fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(WapiError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            WapiError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| WapiError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration text, picking the format from `path`'s extension
/// (`.json` when there is none).
///
/// # Errors
/// Returns `WapiError::Config` for malformed content or an unknown extension.
pub fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| WapiError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| WapiError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(WapiError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots.iter().flat_map(|root| candidates_in(root)).find(|path| path.is_file())
}

fn candidates_in(root: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for dir in SEARCH_DIRS {
        for stem in FILE_STEMS {
            for ext in FILE_EXTENSIONS {
                candidates.push(root.join(dir).join(format!("{stem}.{ext}")));
            }
        }
    }
    candidates
}

/// Required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key)
        .ok_or_else(|| WapiError::Config(format!("Missing required environment variable: {key}")))
}

/// Optional environment variable; blank values count as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| WapiError::Config(format!("Invalid {key} '{raw}': {e}")))
        })
        .transpose()
}
