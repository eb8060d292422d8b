//! Flat JSON file repositories.
//!
//! Every call reads the whole file and every mutation writes it back. There
//! is no locking: two concurrent writers race and the last write wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use verse_core::domain::{Post, SiteSettings, UserDirectory};
use verse_core::error::RepoError;
use verse_core::ports::{BaseRepository, PostRepository, SettingsRepository};

/// Read and parse `path`, or `None` if the file does not exist yet.
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RepoError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| RepoError::Serialization(format!("{}: {e}", path.display())))
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), RepoError> {
    let json =
        serde_json::to_vec_pretty(value).map_err(|e| RepoError::Serialization(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await?;

    tracing::debug!(path = %path.display(), "Wrote JSON store");
    Ok(())
}

/// Posts stored as a JSON array at a fixed path.
///
/// Authors are written as full user objects and re-resolved against the
/// live directory on read; unknown ids keep the stored snapshot.
pub struct JsonFilePostRepository {
    path: PathBuf,
    users: Arc<UserDirectory>,
    seed: Vec<Post>,
}

impl JsonFilePostRepository {
    /// `seed` is written out the first time the file is found missing.
    pub fn new(path: impl Into<PathBuf>, users: Arc<UserDirectory>, seed: Vec<Post>) -> Self {
        Self {
            path: path.into(),
            users,
            seed,
        }
    }

    async fn read(&self) -> Result<Vec<Post>, RepoError> {
        let posts = match read_json::<Vec<Post>>(&self.path).await? {
            Some(posts) => posts,
            None => {
                tracing::info!(path = %self.path.display(), "Posts file missing, writing seed data");
                write_json(&self.path, &self.seed).await?;
                self.seed.clone()
            }
        };

        Ok(posts
            .into_iter()
            .map(|mut post| {
                if let Some(live) = self.users.find(&post.author.id) {
                    post.author = live.clone();
                }
                post
            })
            .collect())
    }

    async fn write(&self, posts: &[Post]) -> Result<(), RepoError> {
        write_json(&self.path, posts).await
    }
}

#[async_trait]
impl BaseRepository<Post, u64> for JsonFilePostRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<Post>, RepoError> {
        Ok(self.read().await?.into_iter().find(|p| p.id == id))
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.read().await?;
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post.clone(),
            None => posts.insert(0, post.clone()),
        }
        self.write(&posts).await?;
        Ok(post)
    }

    async fn delete(&self, id: u64) -> Result<bool, RepoError> {
        let mut posts = self.read().await?;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            return Ok(false);
        }
        self.write(&posts).await?;
        Ok(true)
    }
}

#[async_trait]
impl PostRepository for JsonFilePostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        self.read().await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self.read().await?.into_iter().find(|p| p.slug == slug))
    }
}

/// Site settings stored as one JSON object at a fixed path.
pub struct JsonFileSettingsRepository {
    path: PathBuf,
    defaults: SiteSettings,
}

impl JsonFileSettingsRepository {
    pub fn new(path: impl Into<PathBuf>, defaults: SiteSettings) -> Self {
        Self {
            path: path.into(),
            defaults,
        }
    }
}

#[async_trait]
impl SettingsRepository for JsonFileSettingsRepository {
    async fn load(&self) -> Result<SiteSettings, RepoError> {
        Ok(read_json(&self.path)
            .await?
            .unwrap_or_else(|| self.defaults.clone()))
    }

    async fn store(&self, settings: SiteSettings) -> Result<SiteSettings, RepoError> {
        write_json(&self.path, &settings).await?;
        Ok(settings)
    }
}
