//! Persistent response cache
//!
//! A small TTL store on top of a `fjall` keyspace. Entries are `postcard`
//! encoded together with an optional expiry; entries without an expiry never
//! go stale.

use anyhow::{Result, anyhow};
use fjall::Keyspace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task;

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    expires_at: Option<u64>, // Unix timestamp (seconds)
}

#[derive(Clone)]
pub struct PersistentCache {
    store: Keyspace,
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

fn now_secs() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

impl PersistentCache {
    /// Opens (or creates) the cache database under `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let items = db.keyspace("responses", fjall::KeyspaceCreateOptions::default)?;
        Ok(PersistentCache { store: items })
    }

    /// Stores a serializable value. `ttl` of `None` keeps the entry forever.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = match ttl {
            Some(ttl) => Some(
                SystemTime::now()
                    .checked_add(ttl)
                    .ok_or(anyhow!("TTL overflow"))?
                    .duration_since(UNIX_EPOCH)?
                    .as_secs(),
            ),
            None => None,
        };
        let entry = StoredEntry { value, expires_at };
        let bytes = postcard::to_stdvec(&entry)?;

        task::spawn_blocking(move || store.insert(key, bytes)).await??;
        Ok(())
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_store(store, key_bytes)).await??;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("Key not found");
            return Ok(None);
        };

        let entry: StoredEntry<T> = postcard::from_bytes(&bytes)?;
        match entry.expires_at {
            Some(expires_at) if now_secs()? >= expires_at => {
                tracing::debug!("Key found but expired");
                self.remove(key).await?;
                Ok(None)
            }
            _ => {
                tracing::debug!("Key found and still fresh");
                Ok(Some(entry.value))
            }
        }
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key)).await??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = TempDir::new().unwrap();
        let cache = PersistentCache::open(dir.path()).unwrap();

        cache
            .put("archive:1", "body".to_string(), Some(Duration::from_secs(60)))
            .await
            .unwrap();
        let hit: Option<String> = cache.get("archive:1").await.unwrap();
        assert_eq!(hit.as_deref(), Some("body"));
    }

    #[tokio::test]
    async fn test_entry_without_ttl_never_expires() {
        let dir = TempDir::new().unwrap();
        let cache = PersistentCache::open(dir.path()).unwrap();

        cache.put("archive:2", 42_u64, None).await.unwrap();
        assert_eq!(cache.get::<u64>("archive:2").await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_expired_entry_is_dropped() {
        let dir = TempDir::new().unwrap();
        let cache = PersistentCache::open(dir.path()).unwrap();

        cache
            .put("forecast:1", "stale".to_string(), Some(Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(cache.get::<String>("forecast:1").await.unwrap(), None);
        // second lookup hits the removed key
        assert_eq!(cache.get::<String>("forecast:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let dir = TempDir::new().unwrap();
        let cache = PersistentCache::open(dir.path()).unwrap();
        assert_eq!(cache.get::<String>("nope").await.unwrap(), None);
    }
}
