use super::schemas::Config;
/// Configuration utilities - loading and environment overrides
///
/// Loading runs in three steps:
/// - Read the TOML file, or fall back to defaults when it does not exist
/// - Load `.env` into the process environment
/// - Apply environment variable overrides and validate the result
use crate::escrow::MintFilterStrategy;
use crate::logger::{self, LogTag};
use std::path::Path;

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Environment variables that override config file values
pub const ENV_LOCK_PROGRAM_ID: &str = "LOCK_PROGRAM_ID";
pub const ENV_TOKEN_MINT: &str = "TOKEN_MINT";
pub const ENV_RPC_ENDPOINT: &str = "RPC_ENDPOINT";
pub const ENV_ENRICH_FREE_BALANCE: &str = "ENRICH_FREE_BALANCE";
pub const ENV_MAX_CONCURRENT_LOOKUPS: &str = "MAX_CONCURRENT_LOOKUPS";
pub const ENV_SCAN_DEADLINE_SECS: &str = "SCAN_DEADLINE_SECS";
pub const ENV_MINT_FILTER_STRATEGY: &str = "MINT_FILTER_STRATEGY";
pub const ENV_WEBSERVER_HOST: &str = "WEBSERVER_HOST";
pub const ENV_WEBSERVER_PORT: &str = "WEBSERVER_PORT";

/// Load the full configuration
///
/// # Arguments
/// * `path` - TOML file to read, `CONFIG_FILE_PATH` when None
///
/// # Returns
/// - `Ok(Config)` - Validated configuration
/// - `Err(String)` - Unreadable file, bad TOML, bad override or invalid value
pub fn load_config(path: Option<&str>) -> Result<Config, String> {
    load_config_with(path, |_| None)
}

/// Load the configuration with one more override layer on top of the
/// environment, keyed by the same names as the environment variables
///
/// Command-line tools use this so their flags win over `.env` values.
pub fn load_config_with<F>(path: Option<&str>, overrides: F) -> Result<Config, String>
where
    F: Fn(&str) -> Option<String>,
{
    let path = path.unwrap_or(CONFIG_FILE_PATH);
    let config = load_config_from_path(path)?;

    if let Ok(env_path) = dotenv::dotenv() {
        logger::debug(
            LogTag::Config,
            &format!("Loaded environment from {}", env_path.display()),
        );
    }

    resolve_config(config, |key| std::env::var(key).ok(), overrides)
}

/// Environment overrides, then caller overrides, then a single validation
pub fn resolve_config<E, O>(config: Config, env: E, overrides: O) -> Result<Config, String>
where
    E: Fn(&str) -> Option<String>,
    O: Fn(&str) -> Option<String>,
{
    let config = apply_env_overrides(config, env)?;
    let config = apply_env_overrides(config, overrides)?;
    config.validate()?;
    Ok(config)
}

/// Read a TOML file, using defaults when it does not exist
pub fn load_config_from_path(path: &str) -> Result<Config, String> {
    if !Path::new(path).exists() {
        logger::info(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path),
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

    let config = toml::from_str::<Config>(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))?;

    logger::debug(LogTag::Config, &format!("Loaded config from '{}'", path));
    Ok(config)
}

/// Apply environment overrides
///
/// `lookup` returns the value of a variable, which keeps this function
/// independent of the real process environment.
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Result<Config, String>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(value) = get(ENV_LOCK_PROGRAM_ID) {
        config.lock.program_id = value;
    }
    if let Some(value) = get(ENV_TOKEN_MINT) {
        config.lock.token_mint = value;
    }
    if let Some(value) = get(ENV_RPC_ENDPOINT) {
        config.rpc.url = value;
    }
    if let Some(value) = get(ENV_ENRICH_FREE_BALANCE) {
        config.enrichment.enabled = parse_bool(ENV_ENRICH_FREE_BALANCE, &value)?;
    }
    if let Some(value) = get(ENV_MAX_CONCURRENT_LOOKUPS) {
        config.enrichment.max_concurrent_lookups = value
            .parse::<usize>()
            .map_err(|e| format!("{} must be a positive integer: {}", ENV_MAX_CONCURRENT_LOOKUPS, e))?;
    }
    if let Some(value) = get(ENV_SCAN_DEADLINE_SECS) {
        config.scan.deadline_secs = value
            .parse::<u64>()
            .map_err(|e| format!("{} must be a number of seconds: {}", ENV_SCAN_DEADLINE_SECS, e))?;
    }
    if let Some(value) = get(ENV_MINT_FILTER_STRATEGY) {
        config.scan.mint_filter_strategy = value
            .parse::<MintFilterStrategy>()
            .map_err(|e| format!("{}: {}", ENV_MINT_FILTER_STRATEGY, e))?;
    }
    if let Some(value) = get(ENV_WEBSERVER_HOST) {
        config.webserver.host = value;
    }
    if let Some(value) = get(ENV_WEBSERVER_PORT) {
        config.webserver.port = value
            .parse::<u16>()
            .map_err(|e| format!("{} must be a port number: {}", ENV_WEBSERVER_PORT, e))?;
    }

    Ok(config)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("{} must be a boolean, got '{}'", key, other)),
    }
}
