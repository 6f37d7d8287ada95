use crate::domain::{Media, Page};
use crate::key::CacheKey;
use async_trait::async_trait;
use shared::Result;

// Ports are the pluggable extension points between the repository layer and
// its cache/network collaborators.

/// Port for a process-wide cache instance holding one entity type.
///
/// One instance is created per context at the composition root and shared by
/// every call site in that context. Absence (miss or expiry) is represented
/// as `Ok(None)`, never as an error; `Err(Persistence)` is reserved for
/// storage faults in disk-backed implementations.
#[async_trait]
pub trait CacheStore<V>: Send + Sync + 'static
where
    V: Clone + Send + Sync + 'static,
{
    async fn item(&self, key: &CacheKey) -> Result<Option<V>>;

    /// Stores `value` under `key` with a fresh timestamp and the store's
    /// default expiry, overwriting any existing entry.
    async fn set_item(&self, key: CacheKey, value: V) -> Result<()>;

    /// Removes the entry, reporting whether one was present.
    async fn invalidate(&self, key: &CacheKey) -> Result<bool>;

    async fn invalidate_all(&self) -> Result<()>;
}

/// Port for the authoritative network-backed source of one entity type.
///
/// Implementations translate transport and service errors into the shared
/// taxonomy before returning; callers never see transport-level error types.
#[async_trait]
pub trait RemoteDataSource<K, V>: Send + Sync + 'static
where
    K: Send + Sync,
{
    async fn fetch(&self, key: &K) -> Result<V>;
}

/// Port for multi-media search. Remote-only: search traffic bypasses the
/// caching layer entirely.
#[async_trait]
pub trait SearchDataSource: Send + Sync + 'static {
    async fn search(&self, query: &str, page: u32) -> Result<Page<Media>>;
}

/// Port exposed to use cases: the single source of truth for one entity type.
#[async_trait]
pub trait Repository<K, V>: Send + Sync + 'static
where
    K: Send + Sync,
{
    async fn fetch(&self, key: &K) -> Result<V>;

    /// Drops any cached value for `key`, forcing the next fetch to go remote.
    async fn invalidate(&self, key: &K) -> Result<()>;
}
