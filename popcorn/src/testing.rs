//! Test doubles shared by the repository and coalescing tests.

use crate::key::CacheKey;
use crate::ports::{CacheStore, RemoteDataSource};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{Error, Result};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

/// Plain map-backed cache store without expiry.
pub(crate) struct MemoryStore<V> {
    entries: Mutex<HashMap<CacheKey, V>>,
}

impl<V: Clone + Send + Sync + 'static> Default for MemoryStore<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V: Clone + Send + Sync + 'static> MemoryStore<V> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn seed(&self, context: &str, entity: &str, id: impl Display, value: V) {
        self.entries
            .lock()
            .insert(CacheKey::new(context, entity, id), value);
    }

    pub(crate) async fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl<V: Clone + Send + Sync + 'static> CacheStore<V> for MemoryStore<V> {
    async fn item(&self, key: &CacheKey) -> Result<Option<V>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set_item(&self, key: CacheKey, value: V) -> Result<()> {
        self.entries.lock().insert(key, value);
        Ok(())
    }

    async fn invalidate(&self, key: &CacheKey) -> Result<bool> {
        Ok(self.entries.lock().remove(key).is_some())
    }

    async fn invalidate_all(&self) -> Result<()> {
        self.entries.lock().clear();
        Ok(())
    }
}

/// Cache store whose every operation fails with a persistence error.
pub(crate) struct FailingStore;

#[async_trait]
impl<V: Clone + Send + Sync + 'static> CacheStore<V> for FailingStore {
    async fn item(&self, _key: &CacheKey) -> Result<Option<V>> {
        Err(Error::Persistence("store offline".to_string()))
    }

    async fn set_item(&self, _key: CacheKey, _value: V) -> Result<()> {
        Err(Error::Persistence("store offline".to_string()))
    }

    async fn invalidate(&self, _key: &CacheKey) -> Result<bool> {
        Err(Error::Persistence("store offline".to_string()))
    }

    async fn invalidate_all(&self) -> Result<()> {
        Err(Error::Persistence("store offline".to_string()))
    }
}

/// Remote data source returning a fixed result and counting invocations.
/// With a gate attached, every fetch waits for a permit first, letting tests
/// hold calls in flight.
pub(crate) struct CountingRemote<V> {
    result: Result<V>,
    calls: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
}

impl<V: Clone + Send + Sync + 'static> CountingRemote<V> {
    pub(crate) fn ok(value: V) -> Self {
        Self {
            result: Ok(value),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub(crate) fn failing(error: Error) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub(crate) fn gated(result: Result<V>, gate: Arc<Semaphore>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            gate: Some(gate),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<K, V> RemoteDataSource<K, V> for CountingRemote<V>
where
    K: Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn fetch(&self, _key: &K) -> Result<V> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }
        self.result.clone()
    }
}
