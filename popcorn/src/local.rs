use crate::key::CacheKey;
use crate::ports::CacheStore;
use shared::Result;
use std::fmt::Display;
use std::sync::Arc;

/// Strongly-typed facade over a shared cache for exactly one entity type and
/// its key scheme. Holds a non-owning handle to the context's cache instance.
pub struct LocalDataSource<V>
where
    V: Clone + Send + Sync + 'static,
{
    cache: Arc<dyn CacheStore<V>>,
    context: &'static str,
    entity: &'static str,
}

impl<V> LocalDataSource<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new<S>(cache: Arc<S>, context: &'static str, entity: &'static str) -> Self
    where
        S: CacheStore<V>,
    {
        Self {
            cache,
            context,
            entity,
        }
    }

    pub fn context(&self) -> &'static str {
        self.context
    }

    fn key_for(&self, id: &impl Display) -> CacheKey {
        CacheKey::new(self.context, self.entity, id)
    }

    /// `Ok(None)` on miss or expiry; `Err(Persistence)` only for storage
    /// faults.
    pub async fn item(&self, id: &impl Display) -> Result<Option<V>> {
        self.cache.item(&self.key_for(id)).await
    }

    pub async fn set(&self, id: &impl Display, value: V) -> Result<()> {
        self.cache.set_item(self.key_for(id), value).await
    }

    pub async fn invalidate(&self, id: &impl Display) -> Result<bool> {
        self.cache.invalidate(&self.key_for(id)).await
    }
}
