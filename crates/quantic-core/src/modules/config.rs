//! Gateway configuration loading.
//!
//! Layers, later wins: built-in defaults, the JSON file named by
//! `QUANTIC_CONFIG`, then individual environment variables. Blank
//! environment values count as unset.

use std::fs;
use std::path::Path;

use quantic_types::{AssetPrecedence, ConfigError, GatewayConfig};
use validator::Validate;

pub const ENV_CONFIG_PATH: &str = "QUANTIC_CONFIG";
pub const ENV_UPSTREAM_URL: &str = "CHATWOOT_URL";
pub const ENV_PLATFORM_TOKEN: &str = "CHATWOOT_PLATFORM_TOKEN";
pub const ENV_USER_ID: &str = "CHATWOOT_USER_ID";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATABASE_URL: &str = "SUPABASE_URL";
pub const ENV_DATABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_BIND: &str = "QUANTIC_BIND";
pub const ENV_STATIC_DIR: &str = "QUANTIC_STATIC_DIR";
pub const ENV_CORS_ORIGINS: &str = "QUANTIC_CORS_ORIGINS";
pub const ENV_ROUTE_PRECEDENCE: &str = "QUANTIC_ROUTE_PRECEDENCE";

/// Load configuration from the process environment.
pub fn load_config() -> Result<GatewayConfig, ConfigError> {
    load_config_with(|key| std::env::var(key).ok())
}

/// Load configuration using `env` as the variable source.
pub fn load_config_with<F>(env: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    let mut config = match lookup(ENV_CONFIG_PATH) {
        Some(path) => read_config_file(Path::new(path.trim()))?,
        None => GatewayConfig::default(),
    };

    apply_env(&mut config, lookup)?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a JSON config file. Missing sections take their defaults.
pub fn read_config_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let config = serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    tracing::debug!("Loaded config file {}", path.display());
    Ok(config)
}

/// Overlay environment variables onto `config`.
pub fn apply_env<F>(config: &mut GatewayConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = env(ENV_UPSTREAM_URL) {
        config.upstream.base_url = v.trim().to_string();
    }
    if let Some(v) = env(ENV_PLATFORM_TOKEN) {
        config.upstream.platform_token = Some(v.trim().to_string());
    }
    if let Some(v) = env(ENV_USER_ID) {
        config.upstream.user_id = parse_number(ENV_USER_ID, &v)?;
    }
    if let Some(v) = env(ENV_PORT) {
        config.port = parse_number(ENV_PORT, &v)?;
    }
    // Served verbatim by /api/config
    if let Some(v) = env(ENV_DATABASE_URL) {
        config.database.url = v;
    }
    if let Some(v) = env(ENV_DATABASE_ANON_KEY) {
        config.database.anon_key = v;
    }
    if let Some(v) = env(ENV_BIND) {
        config.bind_address = v.trim().to_string();
    }
    if let Some(v) = env(ENV_STATIC_DIR) {
        config.static_dir = v.trim().to_string();
    }
    if let Some(v) = env(ENV_CORS_ORIGINS) {
        config.cors.allowed_origins = v
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(v) = env(ENV_ROUTE_PRECEDENCE) {
        config.routing.precedence = AssetPrecedence::from_string(&v).ok_or_else(|| {
            ConfigError::invalid(
                ENV_ROUTE_PRECEDENCE,
                format!("expected local_extension or existing_file, got {:?}", v.trim()),
            )
        })?;
    }
    Ok(())
}

/// Range and format checks over the merged configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), ConfigError> {
    config.validate().map_err(|e| ConfigError::invalid("config", e.to_string()))?;

    for (field, raw) in [
        ("upstream.base_url", &config.upstream.base_url),
        ("database.url", &config.database.url),
    ] {
        let scheme = url::Url::parse(raw).map(|u| u.scheme().to_string()).unwrap_or_default();
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::invalid(field, format!("{:?} is not an http(s) URL", raw)));
        }
    }

    if !config.routing.reserved_prefix.starts_with('/')
        || !config.routing.reserved_prefix.ends_with('/')
    {
        return Err(ConfigError::invalid(
            "routing.reserved_prefix",
            "must start and end with '/'",
        ));
    }
    if let Some(asset) = config.routing.local_assets.iter().find(|a| !a.starts_with('/')) {
        return Err(ConfigError::invalid(
            "routing.local_assets",
            format!("{:?} is not a rooted path", asset),
        ));
    }
    // Credentialed CORS cannot answer with a wildcard origin
    if config.cors.allowed_origins.iter().any(|o| o.trim() == "*") {
        return Err(ConfigError::invalid(
            "cors.allowed_origins",
            "wildcard origin \"*\" is not allowed; list origins explicitly",
        ));
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| ConfigError::invalid(field, format!("{:?}: {}", raw, e)))
}
