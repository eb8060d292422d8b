//! Revalidation backed by the page cache.

use std::sync::Arc;

use async_trait::async_trait;

use verse_core::ports::{Cache, Revalidator};

/// Drops cached renders of the signalled paths.
///
/// Cache keys are request paths with their query string, so `/` also covers
/// `/?page=2`.
pub struct CacheRevalidator {
    cache: Arc<dyn Cache>,
}

impl CacheRevalidator {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl Revalidator for CacheRevalidator {
    async fn revalidate(&self, path: &str) {
        let with_query = format!("{path}?");
        let result = match self.cache.delete(path).await {
            Ok(()) => self.cache.delete_prefix(&with_query).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => tracing::debug!(path = %path, "Revalidated page"),
            Err(e) => tracing::warn!(path = %path, error = %e, "Failed to revalidate page"),
        }
    }

    async fn revalidate_all(&self) {
        match self.cache.clear().await {
            Ok(()) => tracing::debug!("Revalidated all pages"),
            Err(e) => tracing::warn!(error = %e, "Failed to revalidate pages"),
        }
    }
}
