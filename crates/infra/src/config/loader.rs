//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the process environment, if one exists
//! 2. Attempts to load from environment variables
//! 3. If incomplete, falls back to loading from file
//! 4. Probes multiple paths for config files (JSON or TOML)
//! 5. Secrets from the environment override whatever the file holds
//!
//! ## Environment Variables
//! Required:
//! - `TRAINCAST_GRAPH_TENANT_ID`, `TRAINCAST_GRAPH_CLIENT_ID`
//! - `TRAINCAST_EXCHANGE_ENDPOINT`, `TRAINCAST_EXCHANGE_USERNAME`
//!
//! Optional:
//! - `TRAINCAST_GRAPH_CLIENT_SECRET`, `TRAINCAST_EXCHANGE_PASSWORD`
//! - `TRAINCAST_GRAPH_BASE_URL`, `TRAINCAST_GRAPH_AUTHORITY_URL`
//! - `TRAINCAST_GRAPH_MEETING_ACCOUNT`
//! - `TRAINCAST_EXCHANGE_MAX_ATTEMPTS`
//! - `TRAINCAST_TIME_ZONE`, `TRAINCAST_CANCEL_COMMENT`
//! - `TRAINCAST_HTTP_TIMEOUT_SECS`, `TRAINCAST_HTTP_MAX_ATTEMPTS`,
//!   `TRAINCAST_HTTP_BACKOFF_MS`
//! - `TRAINCAST_ROUTING_CACHE_TTL_SECS`, `TRAINCAST_ROUTING_CACHE_CAPACITY`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./traincast.json` or `./traincast.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use traincast_domain::constants::{DEFAULT_AUTHORITY_URL, DEFAULT_GRAPH_BASE_URL};
use traincast_domain::{
    Config, ExchangeConfig, GraphConfig, HttpConfig, InviteConfig, Result, RoutingCacheConfig,
    TraincastError,
};

const CLIENT_SECRET_VAR: &str = "TRAINCAST_GRAPH_CLIENT_SECRET";
const MEETING_ACCOUNT_VAR: &str = "TRAINCAST_GRAPH_MEETING_ACCOUNT";
const EXCHANGE_PASSWORD_VAR: &str = "TRAINCAST_EXCHANGE_PASSWORD";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `TraincastError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
/// - The configured time zone is not a known IANA name
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

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
/// # Errors
/// Returns `TraincastError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let defaults_http = HttpConfig::default();
    let defaults_invite = InviteConfig::default();
    let defaults_cache = RoutingCacheConfig::default();

    let config = Config {
        graph: GraphConfig {
            base_url: env_or("TRAINCAST_GRAPH_BASE_URL", DEFAULT_GRAPH_BASE_URL),
            authority_url: env_or("TRAINCAST_GRAPH_AUTHORITY_URL", DEFAULT_AUTHORITY_URL),
            tenant_id: env_var("TRAINCAST_GRAPH_TENANT_ID")?,
            client_id: env_var("TRAINCAST_GRAPH_CLIENT_ID")?,
            client_secret: std::env::var(CLIENT_SECRET_VAR).unwrap_or_default(),
            meeting_account: std::env::var(MEETING_ACCOUNT_VAR).unwrap_or_default(),
        },
        exchange: ExchangeConfig {
            endpoint: env_var("TRAINCAST_EXCHANGE_ENDPOINT")?,
            username: env_var("TRAINCAST_EXCHANGE_USERNAME")?,
            password: std::env::var(EXCHANGE_PASSWORD_VAR).unwrap_or_default(),
            max_attempts: env_parse("TRAINCAST_EXCHANGE_MAX_ATTEMPTS")?.unwrap_or(1),
        },
        invite: InviteConfig {
            time_zone: std::env::var("TRAINCAST_TIME_ZONE").unwrap_or(defaults_invite.time_zone),
            cancel_comment: std::env::var("TRAINCAST_CANCEL_COMMENT")
                .unwrap_or(defaults_invite.cancel_comment),
        },
        http: HttpConfig {
            timeout_seconds: env_parse("TRAINCAST_HTTP_TIMEOUT_SECS")?
                .unwrap_or(defaults_http.timeout_seconds),
            max_attempts: env_parse("TRAINCAST_HTTP_MAX_ATTEMPTS")?
                .unwrap_or(defaults_http.max_attempts),
            base_backoff_ms: env_parse("TRAINCAST_HTTP_BACKOFF_MS")?
                .unwrap_or(defaults_http.base_backoff_ms),
        },
        routing_cache: RoutingCacheConfig {
            ttl_seconds: env_parse("TRAINCAST_ROUTING_CACHE_TTL_SECS")?
                .unwrap_or(defaults_cache.ttl_seconds),
            max_capacity: env_parse("TRAINCAST_ROUTING_CACHE_CAPACITY")?
                .unwrap_or(defaults_cache.max_capacity),
        },
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TraincastError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TraincastError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TraincastError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TraincastError::Config(format!("Failed to read config file: {}", e)))?;

    let mut config = parse_config(&contents, &config_path)?;
    apply_secret_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TraincastError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TraincastError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(TraincastError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Secrets are never serialized, so files usually omit them.
fn apply_secret_overrides(config: &mut Config) {
    if let Ok(secret) = std::env::var(CLIENT_SECRET_VAR) {
        config.graph.client_secret = secret;
    }
    if let Ok(password) = std::env::var(EXCHANGE_PASSWORD_VAR) {
        config.exchange.password = password;
    }
}

fn validate(config: &Config) -> Result<()> {
    Tz::from_str(&config.invite.time_zone).map_err(|_| {
        TraincastError::Config(format!("Unknown time zone: {}", config.invite.time_zone))
    })?;
    Ok(())
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("traincast.json"),
        dir.join("traincast.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        TraincastError::Config(format!("Missing required environment variable: {}", key))
    })
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional numeric environment variable.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| TraincastError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}
