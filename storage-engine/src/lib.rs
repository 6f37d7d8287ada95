use async_trait::async_trait;
use dashmap::DashMap;
use popcorn::key::CacheKey;
use popcorn::ports::CacheStore;
use shared::Result;
use std::fmt::Debug;
use std::time::{Duration, Instant};

pub mod moka_cache;
#[cfg(test)]
mod scenarios;

pub use moka_cache::MokaCache;

struct CacheEntry<V> {
    value: V,
    created_at: Instant,
    expires_in: Duration,
}

impl<V> CacheEntry<V> {
    // Valid while now - created_at < expires_in; the boundary instant reads
    // as expired.
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= self.expires_in
    }
}

/// In-memory cache with per-entry expiry, one instance per context and
/// entity type.
///
/// Expiry is lazy: entries are checked at read time and purged
/// opportunistically, never on a timer. The sharded map serializes access
/// per key, so unmediated concurrent callers cannot tear an entry. Nothing
/// survives a process restart.
pub struct TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    name: String,
    default_ttl: Duration,
    entries: DashMap<CacheKey, CacheEntry<V>>,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, default_ttl: Duration) -> Self {
        Self {
            name: name.into(),
            default_ttl,
            entries: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores `value` with an expiry overriding the cache default.
    pub fn insert_with_ttl(&self, key: CacheKey, value: V, expires_in: Duration) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                created_at: Instant::now(),
                expires_in,
            },
        );
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn item_inner(&self, key: &CacheKey) -> Option<V> {
        let now = Instant::now();
        let entry = self.entries.get(key)?;
        if !entry.is_expired(now) {
            return Some(entry.value.clone());
        }
        drop(entry);
        // Opportunistic purge; remove_if re-checks so a concurrent fresh
        // overwrite is not discarded.
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        None
    }
}

#[async_trait]
impl<V> CacheStore<V> for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn item(&self, key: &CacheKey) -> Result<Option<V>> {
        Ok(self.item_inner(key))
    }

    async fn set_item(&self, key: CacheKey, value: V) -> Result<()> {
        self.insert_with_ttl(key, value, self.default_ttl);
        Ok(())
    }

    async fn invalidate(&self, key: &CacheKey) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    async fn invalidate_all(&self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

impl<V> Debug for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("name", &self.name)
            .field("default_ttl", &self.default_ttl)
            .field("entry_count", &self.entries.len())
            .finish()
    }
}
