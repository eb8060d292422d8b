use async_trait::async_trait;

use crate::domain::{Post, SiteSettings};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update, keyed by its ID).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns whether anything was removed.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Post repository.
///
/// Implementations hold records as given; ordering, slug uniqueness and id
/// assignment belong to [`crate::PostService`].
#[async_trait]
pub trait PostRepository: BaseRepository<Post, u64> {
    /// Every stored post, in storage order.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;
}

/// Storage for the single site settings record.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load(&self) -> Result<SiteSettings, RepoError>;

    async fn store(&self, settings: SiteSettings) -> Result<SiteSettings, RepoError>;
}
