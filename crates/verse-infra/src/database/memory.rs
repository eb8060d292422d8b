//! Process-lifetime repositories. Data is lost on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use verse_core::domain::{Post, SiteSettings};
use verse_core::error::RepoError;
use verse_core::ports::{BaseRepository, PostRepository, SettingsRepository};

/// Posts held in a vector for the life of the process.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl BaseRepository<Post, u64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post.clone(),
            None => posts.insert(0, post.clone()),
        }
        Ok(post)
    }

    async fn delete(&self, id: u64) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }
}

/// Settings held for the life of the process.
pub struct InMemorySettingsRepository {
    settings: RwLock<SiteSettings>,
}

impl InMemorySettingsRepository {
    pub fn new(settings: SiteSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn load(&self) -> Result<SiteSettings, RepoError> {
        Ok(self.settings.read().await.clone())
    }

    async fn store(&self, settings: SiteSettings) -> Result<SiteSettings, RepoError> {
        *self.settings.write().await = settings.clone();
        Ok(settings)
    }
}
