use crate::events::RepositoryEvent;
use crate::local::LocalDataSource;
use crate::ports::{RemoteDataSource, Repository};
use async_trait::async_trait;
use shared::Result;
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{Instrument, warn};

/// Read-through repository: consult the local data source, on miss fetch
/// remote and populate, return the value. A cache hit never triggers a
/// remote call, and failures are never cached.
pub struct CachedRepository<K, V>
where
    K: Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    local: LocalDataSource<V>,
    remote: Arc<dyn RemoteDataSource<K, V>>,
    event_broadcaster: Option<broadcast::Sender<RepositoryEvent>>,
}

impl<K, V> CachedRepository<K, V>
where
    K: Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(local: LocalDataSource<V>, remote: Arc<dyn RemoteDataSource<K, V>>) -> Self {
        Self {
            local,
            remote,
            event_broadcaster: None,
        }
    }

    pub fn with_event_broadcaster(
        local: LocalDataSource<V>,
        remote: Arc<dyn RemoteDataSource<K, V>>,
        broadcaster: broadcast::Sender<RepositoryEvent>,
    ) -> Self {
        Self {
            local,
            remote,
            event_broadcaster: Some(broadcaster),
        }
    }

    fn emit(&self, event: RepositoryEvent) {
        if let Some(broadcaster) = &self.event_broadcaster {
            let _ = broadcaster.send(event);
        }
    }

    async fn fetch_inner(&self, key: &K) -> Result<V> {
        let context = self.local.context();
        let span = tracing::Span::current();

        match self.local.item(key).await {
            Ok(Some(value)) => {
                span.record("cache.hit", true);
                self.emit(RepositoryEvent::Hit {
                    context,
                    key: key.to_string(),
                });
                return Ok(value);
            }
            Ok(None) => {
                span.record("cache.hit", false);
            }
            // A cache malfunction degrades to "always fetch remote"; it must
            // never block reads.
            Err(error) => {
                span.record("cache.hit", false);
                warn!(context, key = %key, %error, "local read failed, treating as miss");
            }
        }
        self.emit(RepositoryEvent::Miss {
            context,
            key: key.to_string(),
        });

        // The write is only committed once the remote call has fully
        // resolved; a cancelled fetch leaves the cache untouched.
        let value = self.remote.fetch(key).await?;

        match self.local.set(key, value.clone()).await {
            Ok(()) => self.emit(RepositoryEvent::Populated {
                context,
                key: key.to_string(),
            }),
            // Best effort: the freshly fetched value is still returned.
            Err(error) => warn!(context, key = %key, %error, "failed to populate cache"),
        }

        Ok(value)
    }
}

#[async_trait]
impl<K, V> Repository<K, V> for CachedRepository<K, V>
where
    K: Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn fetch(&self, key: &K) -> Result<V> {
        let span = tracing::debug_span!(
            "repository_fetch",
            context = self.local.context(),
            key = %key,
            cache.hit = tracing::field::Empty,
        );
        self.fetch_inner(key).instrument(span).await
    }

    async fn invalidate(&self, key: &K) -> Result<()> {
        let removed = self.local.invalidate(key).await?;
        if removed {
            self.emit(RepositoryEvent::Invalidated {
                context: self.local.context(),
                key: key.to_string(),
            });
        }
        Ok(())
    }
}
