//! Services - the post store and settings store rules over the ports.

mod posts;
mod settings;

#[cfg(test)]
pub(crate) mod testing;

pub use posts::PostService;
pub use settings::SettingsService;

use crate::error::{DomainError, RepoError};

/// Storage failures reach callers with a generic message; the cause is logged.
fn persistence(store: &'static str, err: RepoError) -> DomainError {
    tracing::error!(store, error = %err, "Storage operation failed");
    DomainError::Persistence(format!("Failed to access {store} storage"))
}
