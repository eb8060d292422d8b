//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use verse_core::domain::UserDirectory;
use verse_core::ports::{
    AuthError, Cache, PostRepository, RateLimiter, SettingsRepository, TokenService,
};
use verse_core::{PostService, SettingsService, seed};
use verse_infra::{
    Argon2PasswordService, CacheRevalidator, CredentialStore, InMemoryCache,
    InMemoryPostRepository, InMemoryRateLimiter, InMemorySettingsRepository,
    JsonFilePostRepository, JsonFileSettingsRepository, JwtTokenService,
};

use crate::config::{AppConfig, StorageConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub settings: Arc<SettingsService>,
    pub users: Arc<UserDirectory>,
    pub page_cache: Arc<dyn Cache>,
    pub tokens: Arc<dyn TokenService>,
    pub credentials: Arc<CredentialStore<Argon2PasswordService>>,
    pub login_limiter: Arc<dyn RateLimiter>,
    pub posts_per_page: usize,
    pub page_ttl: Duration,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub fn new(config: &AppConfig) -> Result<Self, AuthError> {
        let users = Arc::new(seed::users());

        let (post_repo, settings_repo): (Arc<dyn PostRepository>, Arc<dyn SettingsRepository>) =
            match &config.storage {
                StorageConfig::Memory => {
                    tracing::info!("Using in-memory storage");
                    (
                        Arc::new(InMemoryPostRepository::new(seed::posts(&users))),
                        Arc::new(InMemorySettingsRepository::new(seed::settings())),
                    )
                }
                StorageConfig::JsonFile {
                    posts_path,
                    settings_path,
                } => {
                    tracing::info!(
                        posts = %posts_path.display(),
                        settings = %settings_path.display(),
                        "Using JSON file storage"
                    );
                    (
                        Arc::new(JsonFilePostRepository::new(
                            posts_path.clone(),
                            users.clone(),
                            seed::posts(&users),
                        )),
                        Arc::new(JsonFileSettingsRepository::new(
                            settings_path.clone(),
                            seed::settings(),
                        )),
                    )
                }
            };

        let page_cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());
        let revalidator = Arc::new(CacheRevalidator::new(page_cache.clone()));

        let mut credentials = CredentialStore::new(Argon2PasswordService::new());
        match users.admin() {
            Some(admin) => credentials.register(&admin.email, &config.admin_password)?,
            None => tracing::warn!("No admin in the user directory; sign-in is disabled"),
        }

        tracing::info!("Application state initialized");

        Ok(Self {
            posts: Arc::new(PostService::new(
                post_repo,
                users.clone(),
                revalidator.clone(),
            )),
            settings: Arc::new(SettingsService::new(
                settings_repo,
                users.clone(),
                revalidator,
            )),
            users,
            page_cache,
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            credentials: Arc::new(credentials),
            login_limiter: Arc::new(InMemoryRateLimiter::new(config.login_rate_limit.clone())),
            posts_per_page: config.posts_per_page,
            page_ttl: config.page_cache_ttl,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::time::Duration;

    use verse_infra::{JwtConfig, RateLimitConfig};

    use super::*;

    pub const ADMIN_PASSWORD: &str = "correct-horse";

    pub fn config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            storage: StorageConfig::Memory,
            posts_per_page: 6,
            page_cache_ttl: Duration::from_secs(60),
            admin_password: ADMIN_PASSWORD.to_string(),
            jwt: JwtConfig::default(),
            login_rate_limit: RateLimitConfig::default(),
        }
    }

    pub fn state() -> AppState {
        AppState::new(&config()).unwrap()
    }

    /// A bearer header value for the given user id.
    pub fn bearer(state: &AppState, user_id: &str) -> String {
        let user = state.users.find(user_id).unwrap();
        let token = state
            .tokens
            .generate_token(&user.id, &user.email, Vec::new())
            .unwrap();
        format!("Bearer {token}")
    }
}
