//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use quill_core::domain::Locale;
use quill_infra::{DatabaseConfig, JwtConfig, PasswordConfig};

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "sessionid".to_string(),
            secure: false,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Apply pending migrations before serving.
    pub auto_migrate: bool,
    pub jwt: JwtConfig,
    pub passwords: PasswordConfig,
    pub session: SessionConfig,
    pub locale: Locale,
    /// User fixture seeded at startup.
    pub fixtures_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS", 20),
            min_connections: parse_var("DB_MIN_CONNECTIONS", 2),
            connect_timeout: Duration::from_secs(parse_var("DB_CONNECT_TIMEOUT_SECS", 10)),
        });

        let locale = match env::var("LANGUAGE_CODE") {
            Ok(code) => code.parse().unwrap_or_else(|e| {
                tracing::warn!("{e}; falling back to Japanese messages");
                Locale::default()
            }),
            Err(_) => Locale::default(),
        };

        let session_defaults = SessionConfig::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080),
            database,
            auto_migrate: flag_var("DB_AUTO_MIGRATE"),
            jwt: JwtConfig::from_env(),
            passwords: PasswordConfig::from_env(),
            session: SessionConfig {
                cookie_name: env::var("SESSION_COOKIE_NAME")
                    .unwrap_or(session_defaults.cookie_name),
                secure: flag_var("SESSION_COOKIE_SECURE"),
            },
            locale,
            fixtures_path: env::var("FIXTURES_PATH").ok().map(PathBuf::from),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn flag_var(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
