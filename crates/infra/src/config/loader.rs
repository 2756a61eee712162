//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `REELVIEW_API_BASE_URL` is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `REELVIEW_API_BASE_URL`: Backend root URL (required)
//! - `REELVIEW_API_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `REELVIEW_USER_AGENT`: User agent sent with every request
//! - `REELVIEW_SIGN_IN_PATH`: Redirect target after logout or session expiry
//! - `REELVIEW_HOME_PATH`: Landing path after sign-in
//! - `REELVIEW_OAUTH_TOKEN_PARAM`: Query parameter carrying the OAuth token
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./reelview.json` or `./reelview.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use reelview_domain::{ApiConfig, ClientConfig, ReelviewError, Result, RouteConfig};
use url::Url;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `ReelviewError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The base URL is not an absolute http(s) URL
pub fn load() -> Result<ClientConfig> {
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
/// Only `REELVIEW_API_BASE_URL` is required; every other setting falls back
/// to its default.
///
/// # Errors
/// Returns `ReelviewError::Config` if the base URL is missing or any
/// variable has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let defaults = ClientConfig::default();

    let base_url = env_var("REELVIEW_API_BASE_URL")?;
    let timeout_seconds = match std::env::var("REELVIEW_API_TIMEOUT_SECS") {
        Ok(s) => s
            .parse::<u64>()
            .map_err(|e| ReelviewError::Config(format!("Invalid API timeout: {}", e)))?,
        Err(_) => defaults.api.timeout_seconds,
    };

    let config = ClientConfig {
        api: ApiConfig {
            base_url,
            timeout_seconds,
            user_agent: env_or("REELVIEW_USER_AGENT", defaults.api.user_agent),
        },
        routes: RouteConfig {
            sign_in_path: env_or("REELVIEW_SIGN_IN_PATH", defaults.routes.sign_in_path),
            home_path: env_or("REELVIEW_HOME_PATH", defaults.routes.home_path),
            oauth_token_param: env_or(
                "REELVIEW_OAUTH_TOKEN_PARAM",
                defaults.routes.oauth_token_param,
            ),
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
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `ReelviewError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ReelviewError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ReelviewError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ReelviewError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ReelviewError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ReelviewError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ReelviewError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// The base URL must be absolute http(s); route paths must be absolute.
fn validate(config: &ClientConfig) -> Result<()> {
    let url = Url::parse(&config.api.base_url)
        .map_err(|e| ReelviewError::Config(format!("Invalid API base URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ReelviewError::Config(format!(
            "Unsupported API base URL scheme: {}",
            url.scheme()
        )));
    }

    for (name, value) in
        [("sign_in_path", &config.routes.sign_in_path), ("home_path", &config.routes.home_path)]
    {
        if !value.starts_with('/') {
            return Err(ReelviewError::Config(format!("{} must start with '/': {}", name, value)));
        }
    }

    if config.routes.oauth_token_param.is_empty() {
        return Err(ReelviewError::Config("oauth_token_param must not be empty".to_string()));
    }

    Ok(())
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./reelview.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
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
        dir.join("reelview.json"),
        dir.join("reelview.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `ReelviewError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        ReelviewError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank counts as unset.
fn env_or(key: &str, default: String) -> String {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty()).unwrap_or(default)
}
