use async_trait::async_trait;
use moka::future::Cache;
use popcorn::key::CacheKey;
use popcorn::ports::CacheStore;
use shared::Result;
use std::fmt::Debug;
use std::time::Duration;

/// Moka-backed cache store, for contexts that want a size bound on top of
/// TTL expiry. Same port and miss semantics as [`crate::TtlCache`], but the
/// TTL applies cache-wide rather than per entry.
pub struct MokaCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    cache: Cache<CacheKey, V>,
}

impl<V> MokaCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, max_entries: Option<u64>, default_ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder().name(&name.into());

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        if let Some(ttl) = default_ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
        }
    }
}

#[async_trait]
impl<V> CacheStore<V> for MokaCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn item(&self, key: &CacheKey) -> Result<Option<V>> {
        Ok(self.cache.get(key).await)
    }

    async fn set_item(&self, key: CacheKey, value: V) -> Result<()> {
        self.cache.insert(key, value).await;
        Ok(())
    }

    async fn invalidate(&self, key: &CacheKey) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn invalidate_all(&self) -> Result<()> {
        self.cache.invalidate_all();
        Ok(())
    }
}

impl<V> Debug for MokaCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn key(id: u64) -> CacheKey {
        CacheKey::new("people", "person", id)
    }

    #[tokio::test]
    async fn set_and_get() {
        let cache = MokaCache::new("people", None, None);

        cache.set_item(key(287), "Brad Pitt").await.unwrap();

        assert_eq!(cache.item(&key(287)).await.unwrap(), Some("Brad Pitt"));
    }

    #[tokio::test]
    async fn miss_is_absence_not_an_error() {
        let cache: MokaCache<&str> = MokaCache::new("people", None, None);

        assert_eq!(cache.item(&key(287)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn entries_expire_after_the_cache_ttl() {
        let cache = MokaCache::new("people", None, Some(Duration::from_millis(100)));

        cache.set_item(key(287), "Brad Pitt").await.unwrap();
        assert_eq!(cache.item(&key(287)).await.unwrap(), Some("Brad Pitt"));

        sleep(Duration::from_millis(150)).await;
        assert_eq!(cache.item(&key(287)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalidate_reports_presence() {
        let cache = MokaCache::new("people", None, None);

        cache.set_item(key(287), "Brad Pitt").await.unwrap();

        assert!(cache.invalidate(&key(287)).await.unwrap());
        assert!(!cache.invalidate(&key(287)).await.unwrap());
    }

    #[tokio::test]
    async fn bounded_cache_evicts_beyond_capacity() {
        let cache = MokaCache::new("people", Some(2), None);

        cache.set_item(key(1), "a").await.unwrap();
        cache.set_item(key(2), "b").await.unwrap();
        cache.set_item(key(3), "c").await.unwrap();
        cache.cache.run_pending_tasks().await;

        assert!(cache.cache.entry_count() <= 2);
    }
}
