//! Configuration loader
//!
//! Loads credentials and batch settings from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If no carrier credentials are present there, falls back to a file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SHIPTRACK_UPS_USERNAME`: UPS account username
//! - `SHIPTRACK_UPS_PASSWORD`: UPS account password
//! - `SHIPTRACK_UPS_LICENSE`: UPS access license number
//! - `SHIPTRACK_USPS_USER_ID`: USPS Web Tools user id
//! - `SHIPTRACK_USPS_SOURCE_ID`: Source system identifier for USPS requests
//! - `SHIPTRACK_BATCH_TIMEOUT_SECS`: Whole-batch timeout in seconds (optional)
//! - `SHIPTRACK_REQUEST_TIMEOUT_SECS`: Per-request HTTP timeout in seconds
//!
//! A carrier group is either complete or absent; setting only some of a
//! carrier's variables is a configuration error. At least one carrier group
//! must be present.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./shiptrack.json` or `./shiptrack.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use shiptrack_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use shiptrack_domain::{
    BatchConfig, Config, Result, ShiptrackError, UpsCredentials, UspsCredentials,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If no carrier
/// credentials are set there, falls back to loading from a config file.
///
/// # Errors
/// Returns `ShiptrackError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - No carrier group is completely configured
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Each carrier group must be either fully present or fully absent, and at
/// least one group must be present.
///
/// # Errors
/// Returns `ShiptrackError::Config` if a carrier group is partially set, no
/// carrier group is set, or a numeric variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let ups = carrier_group(
        "UPS",
        &["SHIPTRACK_UPS_USERNAME", "SHIPTRACK_UPS_PASSWORD", "SHIPTRACK_UPS_LICENSE"],
    )?
    .map(|[username, password, license]| UpsCredentials { username, password, license });

    let usps = carrier_group("USPS", &["SHIPTRACK_USPS_USER_ID", "SHIPTRACK_USPS_SOURCE_ID"])?
        .map(|[user_id, source_id]| UspsCredentials { user_id, source_id });

    if ups.is_none() && usps.is_none() {
        return Err(ShiptrackError::Config(
            "No carrier credentials found in the environment".to_string(),
        ));
    }

    let timeout_seconds = env_u64("SHIPTRACK_BATCH_TIMEOUT_SECS")?;
    let request_timeout_seconds =
        env_u64("SHIPTRACK_REQUEST_TIMEOUT_SECS")?.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

    Ok(Config { ups, usps, batch: BatchConfig { timeout_seconds, request_timeout_seconds } })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ShiptrackError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - No carrier group is configured
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ShiptrackError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ShiptrackError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ShiptrackError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ShiptrackError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ShiptrackError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ShiptrackError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Reject configurations with no carrier section at all.
fn validate(config: Config) -> Result<Config> {
    if config.ups.is_none() && config.usps.is_none() {
        return Err(ShiptrackError::Config(
            "At least one carrier must be configured".to_string(),
        ));
    }
    Ok(config)
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent, and the executable's
/// directory for `config.{json,toml}` and `shiptrack.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("shiptrack.json"),
            cwd.join("shiptrack.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("shiptrack.json"),
                exe_dir.join("shiptrack.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Read a carrier's variable group from the environment.
///
/// Returns `Ok(None)` when every variable is absent, `Ok(Some(values))` when
/// every variable is present.
///
/// # Errors
/// Returns `ShiptrackError::Config` when only some variables are set.
fn carrier_group<const N: usize>(carrier: &str, keys: &[&str; N]) -> Result<Option<[String; N]>> {
    let values: Vec<Option<String>> = keys.iter().map(|key| std::env::var(key).ok()).collect();
    let present = values.iter().filter(|v| v.is_some()).count();

    if present == 0 {
        return Ok(None);
    }
    if present < N {
        let missing: Vec<&str> = keys
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| *k)
            .collect();
        return Err(ShiptrackError::Config(format!(
            "Incomplete {} credentials, missing: {}",
            carrier,
            missing.join(", ")
        )));
    }

    let mut iter = values.into_iter().flatten();
    Ok(Some(std::array::from_fn(|_| iter.next().unwrap_or_default())))
}

/// Parse an optional u64 environment variable.
///
/// # Errors
/// Returns `ShiptrackError::Config` if the variable is set but not a number.
fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ShiptrackError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}
