//! Configuration management for notevault.
//!
//! Loads configuration from environment variables (optionally seeded from a
//! `.env` file) once per process. Services receive the section they need
//! explicitly so they can be constructed directly in tests.

use std::env;
use std::sync::OnceLock;

use jsonwebtoken::Algorithm;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub notes: NotesConfig,
    pub sharing: SharingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens.
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    /// Default access token lifetime in minutes.
    pub token_ttl_minutes: i64,
    pub password: PasswordConfig,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotesConfig {
    /// Maximum number of notes returned by a list call.
    pub list_limit: u32,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self { list_limit: 100 }
    }
}

#[derive(Debug, Clone)]
pub struct SharingConfig {
    /// Public origin that share URLs are built from.
    pub base_url: String,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "8000").parse().unwrap_or(8000),
            },
            database: DatabaseConfig {
                path: env_or("DATABASE_PATH", "./data/notevault.db"),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
                jwt_algorithm: env::var("JWT_ALGORITHM")
                    .ok()
                    .and_then(|a| parse_algorithm(&a))
                    .unwrap_or(Algorithm::HS256),
                token_ttl_minutes: env_or("ACCESS_TOKEN_EXPIRE_MINUTES", "30")
                    .parse()
                    .unwrap_or(30),
                password: Self::parse_password_config(),
            },
            notes: NotesConfig {
                list_limit: env_or("NOTES_LIST_LIMIT", "100").parse().unwrap_or(100),
            },
            sharing: SharingConfig {
                base_url: env_or("SHARE_BASE_URL", "http://localhost:3000"),
            },
            logging: LoggingConfig {
                format: match env_or("LOG_FORMAT", "pretty").to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                },
            },
        }
    }

    fn parse_password_config() -> PasswordConfig {
        let defaults = PasswordConfig::default();
        PasswordConfig {
            memory_kib: env::var("PASSWORD_MEMORY_KIB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.memory_kib),
            iterations: env::var("PASSWORD_ITERATIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.iterations),
            parallelism: env::var("PASSWORD_PARALLELISM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.parallelism),
        }
    }
}

#[cfg(test)]
impl Config {
    /// In-memory database, fixed secret and cheap password hashing.
    pub(crate) fn for_tests() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                path: ":memory:".to_string(),
            },
            auth: AuthConfig {
                jwt_secret: "test-secret".to_string(),
                jwt_algorithm: Algorithm::HS256,
                token_ttl_minutes: 30,
                password: PasswordConfig {
                    memory_kib: 1024,
                    iterations: 1,
                    parallelism: 1,
                },
            },
            notes: NotesConfig::default(),
            sharing: SharingConfig::default(),
            logging: LoggingConfig {
                format: LogFormat::Pretty,
            },
        }
    }
}

/// Only the HMAC family is accepted since the key is a shared secret.
pub fn parse_algorithm(s: &str) -> Option<Algorithm> {
    match s.trim().to_uppercase().as_str() {
        "HS256" => Some(Algorithm::HS256),
        "HS384" => Some(Algorithm::HS384),
        "HS512" => Some(Algorithm::HS512),
        _ => None,
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
