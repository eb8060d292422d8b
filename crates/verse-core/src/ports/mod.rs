//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod rate_limit;
mod repository;
pub mod revalidate;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use cache::{Cache, CacheError};
pub use rate_limit::{RateLimitDecision, RateLimitError, RateLimiter};
pub use repository::{BaseRepository, PostRepository, SettingsRepository};
pub use revalidate::Revalidator;
