//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use verse_infra::{JwtConfig, RateLimitConfig};

const DEFAULT_ADMIN_PASSWORD: &str = "bloggerverse-admin";

/// Where posts and settings live.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Memory,
    JsonFile {
        posts_path: PathBuf,
        settings_path: PathBuf,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
    pub posts_per_page: usize,
    pub page_cache_ttl: Duration,
    pub admin_password: String,
    pub jwt: JwtConfig,
    pub login_rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let storage = match env::var("STORAGE").map(|s| s.to_lowercase()).as_deref() {
            Ok("json") | Ok("file") => StorageConfig::JsonFile {
                posts_path: env::var("POSTS_FILE")
                    .unwrap_or_else(|_| "data/posts.json".to_string())
                    .into(),
                settings_path: env::var("SETTINGS_FILE")
                    .unwrap_or_else(|_| "data/settings.json".to_string())
                    .into(),
            },
            Ok("memory") | Err(_) => StorageConfig::Memory,
            Ok(other) => {
                tracing::warn!(storage = %other, "Unknown STORAGE value, using memory");
                StorageConfig::Memory
            }
        };

        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("ADMIN_PASSWORD not set. Using the default admin password.");
            DEFAULT_ADMIN_PASSWORD.to_string()
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            storage,
            posts_per_page: env::var("POSTS_PER_PAGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(6),
            page_cache_ttl: Duration::from_secs(
                env::var("PAGE_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            admin_password,
            jwt: JwtConfig::from_env(),
            login_rate_limit: RateLimitConfig::from_env(),
        }
    }
}
