//! # Verse Infrastructure
//!
//! Concrete implementations of the ports defined in `verse-core`.
//! Storage backends, the page cache, revalidation and authentication.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - Storage and cache only
//! - `auth` - JWT + Argon2 authentication
//! - `rate-limit` - Rate limiting via governor

pub mod cache;
pub mod database;
pub mod revalidate;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use cache::InMemoryCache;
pub use database::{
    InMemoryPostRepository, InMemorySettingsRepository, JsonFilePostRepository,
    JsonFileSettingsRepository,
};
pub use revalidate::CacheRevalidator;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, CredentialStore, JwtConfig, JwtTokenService};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
