//! Test doubles for the service tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Post, SiteSettings};
use crate::error::RepoError;
use crate::ports::{BaseRepository, PostRepository, Revalidator, SettingsRepository};

pub struct MemoryPosts {
    posts: Mutex<Vec<Post>>,
}

impl MemoryPosts {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
        }
    }

    pub fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseRepository<Post, u64> for MemoryPosts {
    async fn find_by_id(&self, id: u64) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post.clone(),
            None => posts.insert(0, post.clone()),
        }
        Ok(post)
    }

    async fn delete(&self, id: u64) -> Result<bool, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

#[async_trait]
impl PostRepository for MemoryPosts {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.slug == slug).cloned())
    }
}

/// Every call fails, for exercising the storage error path.
pub struct BrokenPosts;

#[async_trait]
impl BaseRepository<Post, u64> for BrokenPosts {
    async fn find_by_id(&self, _id: u64) -> Result<Option<Post>, RepoError> {
        Err(RepoError::Io("disk on fire".to_string()))
    }

    async fn save(&self, _post: Post) -> Result<Post, RepoError> {
        Err(RepoError::Io("disk on fire".to_string()))
    }

    async fn delete(&self, _id: u64) -> Result<bool, RepoError> {
        Err(RepoError::Io("disk on fire".to_string()))
    }
}

#[async_trait]
impl PostRepository for BrokenPosts {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Err(RepoError::Io("disk on fire".to_string()))
    }

    async fn find_by_slug(&self, _slug: &str) -> Result<Option<Post>, RepoError> {
        Err(RepoError::Io("disk on fire".to_string()))
    }
}

pub struct MemorySettings(pub Mutex<SiteSettings>);

#[async_trait]
impl SettingsRepository for MemorySettings {
    async fn load(&self) -> Result<SiteSettings, RepoError> {
        Ok(self.0.lock().unwrap().clone())
    }

    async fn store(&self, settings: SiteSettings) -> Result<SiteSettings, RepoError> {
        *self.0.lock().unwrap() = settings.clone();
        Ok(settings)
    }
}

/// Always fails, for exercising the storage error path.
pub struct BrokenSettings;

#[async_trait]
impl SettingsRepository for BrokenSettings {
    async fn load(&self) -> Result<SiteSettings, RepoError> {
        Err(RepoError::Io("disk on fire".to_string()))
    }

    async fn store(&self, _settings: SiteSettings) -> Result<SiteSettings, RepoError> {
        Err(RepoError::Io("disk on fire".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingRevalidator {
    paths: Mutex<Vec<String>>,
    full: Mutex<usize>,
}

impl RecordingRevalidator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    pub fn full_revalidations(&self) -> usize {
        *self.full.lock().unwrap()
    }
}

#[async_trait]
impl Revalidator for RecordingRevalidator {
    async fn revalidate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }

    async fn revalidate_all(&self) {
        *self.full.lock().unwrap() += 1;
    }
}
