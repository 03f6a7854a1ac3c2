use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub query_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub access_signing_key: String,
    pub refresh_signing_key: String,
    pub static_token: String,
    pub access_token_ttl_mins: i64,
    pub refresh_token_ttl_hours: i64,
    pub gate_public_routes: bool,
}

impl AppConfig {
    /// Load configuration from the environment. Signing keys and the static
    /// bearer token are mandatory: an empty secret would silently produce
    /// forgeable tokens, so startup refuses to continue without them.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let server = ServerConfig {
            port: parse_or("PORT", 8000),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/account".to_string()),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
            connect_timeout_secs: parse_or("DATABASE_CONNECT_TIMEOUT_SECS", 10),
            query_timeout_secs: parse_or("DATABASE_QUERY_TIMEOUT_SECS", 5),
        };

        let security = SecurityConfig {
            access_signing_key: required("SIGNING_KEY")?,
            refresh_signing_key: required("REFRESH_SIGNING_KEY")?,
            static_token: required("BASIC_TOKEN")?,
            access_token_ttl_mins: parse_or("ACCESS_TOKEN_TTL_MINS", 15),
            refresh_token_ttl_hours: parse_or("REFRESH_TOKEN_TTL_HOURS", 8),
            gate_public_routes: parse_or("GATE_PUBLIC_ROUTES", true),
        };

        Ok(Self {
            environment,
            server,
            database,
            security,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
