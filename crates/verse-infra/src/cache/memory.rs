//! In-memory cache implementation, used for rendered pages.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use verse_core::ports::{Cache, CacheError};

struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

/// In-memory cache using a simple HashMap with async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryCache {
    store: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        entry
            .expires_at
            .map(|exp| Instant::now() > exp)
            .unwrap_or(false)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().await;
        let entry = store.get(key)?;

        if Self::is_expired(entry) {
            drop(store);
            let mut store = self.store.write().await;
            store.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        // Expired entries are only otherwise dropped when their own key is read.
        store.retain(|_, entry| !Self::is_expired(entry));

        let expires_at = ttl.map(|d| Instant::now() + d);

        store.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.store.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();
        cache.set("key1", "value1", None).await.unwrap();
        assert_eq!(cache.get("key1").await, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = InMemoryCache::new();
        cache.set("key1", "value1", None).await.unwrap();
        cache.delete("key1").await.unwrap();
        assert_eq!(cache.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_gone() {
        let cache = InMemoryCache::new();
        cache
            .set("key1", "value1", Some(Duration::from_millis(0)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(cache.get("key1").await.is_none());
    }

    #[tokio::test]
    async fn test_set_drops_expired_entries() {
        let cache = InMemoryCache::new();
        for n in 0..50 {
            let key = format!("/?junk={n}");
            cache.set(&key, "page", Some(Duration::from_millis(0))).await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(5)).await;

        cache.set("/", "home", Some(Duration::from_secs(60))).await.unwrap();

        assert_eq!(cache.store.read().await.len(), 1);
        assert_eq!(cache.get("/").await, Some("home".to_string()));
    }

    #[tokio::test]
    async fn test_delete_prefix_and_clear() {
        let cache = InMemoryCache::new();
        cache.set("/?page=1", "a", None).await.unwrap();
        cache.set("/?page=2", "b", None).await.unwrap();
        cache.set("/posts/x", "c", None).await.unwrap();

        cache.delete_prefix("/?").await.unwrap();
        assert!(cache.get("/?page=1").await.is_none());
        assert!(cache.get("/?page=2").await.is_none());
        assert!(cache.get("/posts/x").await.is_some());

        cache.clear().await.unwrap();
        assert!(cache.get("/posts/x").await.is_none());
    }
}
