//! Read-through scenarios driving [`popcorn::CachedRepository`] against the
//! real TTL engine.

use crate::TtlCache;
use async_trait::async_trait;
use popcorn::domain::{AppConfiguration, ConfigurationScope, ImagesConfiguration, Person, PersonId};
use popcorn::ports::{RemoteDataSource, Repository};
use popcorn::{CachedRepository, LocalDataSource};
use shared::{Error, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

struct StubRemote<V> {
    result: Result<V>,
    calls: AtomicUsize,
}

impl<V: Clone> StubRemote<V> {
    fn new(result: Result<V>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<K, V> RemoteDataSource<K, V> for StubRemote<V>
where
    K: Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn fetch(&self, _key: &K) -> Result<V> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

fn configuration() -> AppConfiguration {
    AppConfiguration {
        images: ImagesConfiguration {
            secure_base_url: "https://image.example.org/t/p/".to_string(),
            poster_sizes: vec!["w500".into()],
            backdrop_sizes: vec!["w780".into()],
            logo_sizes: vec!["w154".into()],
            profile_sizes: vec!["w185".into()],
        },
    }
}

#[tokio::test]
async fn configuration_fetch_hits_remote_once_within_the_ttl() {
    let cache = Arc::new(TtlCache::new("configuration", Duration::from_secs(60)));
    let remote = Arc::new(StubRemote::new(Ok(configuration())));
    let local = LocalDataSource::new(cache, "configuration", "app-configuration");
    let repository: CachedRepository<ConfigurationScope, AppConfiguration> =
        CachedRepository::new(local, remote.clone());

    let first = repository.fetch(&ConfigurationScope).await.unwrap();
    let second = repository.fetch(&ConfigurationScope).await.unwrap();

    assert_eq!(first, configuration());
    assert_eq!(second, first);
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn an_expired_entry_is_refetched_from_remote() {
    let cache = Arc::new(TtlCache::new("configuration", Duration::from_millis(100)));
    let remote = Arc::new(StubRemote::new(Ok(configuration())));
    let local = LocalDataSource::new(cache, "configuration", "app-configuration");
    let repository: CachedRepository<ConfigurationScope, AppConfiguration> =
        CachedRepository::new(local, remote.clone());

    repository.fetch(&ConfigurationScope).await.unwrap();
    sleep(Duration::from_millis(150)).await;
    repository.fetch(&ConfigurationScope).await.unwrap();

    assert_eq!(remote.calls(), 2);
}

#[tokio::test]
async fn person_not_found_leaves_the_cache_empty() {
    let cache = Arc::new(TtlCache::<Person>::new("people", Duration::from_secs(60)));
    let remote = Arc::new(StubRemote::<Person>::new(Err(Error::NotFound)));
    let local = LocalDataSource::new(cache.clone(), "people", "person");
    let repository: CachedRepository<PersonId, Person> = CachedRepository::new(local, remote);

    let error = repository.fetch(&PersonId(999)).await.unwrap_err();

    assert_eq!(error, Error::NotFound);
    assert_eq!(cache.entry_count(), 0);
}
