use crate::ports::Repository;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::Result;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Single-flight decorator: at most one outstanding remote fetch exists per
/// key. Concurrent callers racing on a cold key subscribe to the leader's
/// flight and share its result, success or failure, instead of issuing
/// duplicates. Shared results are not cached failures; the flight ends with
/// the call and the next fetch starts fresh.
pub struct CoalescingRepository<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<dyn Repository<K, V>>,
    inflight: Mutex<HashMap<K, broadcast::Sender<Result<V>>>>,
}

enum Flight<V> {
    Leader,
    Follower(broadcast::Receiver<Result<V>>),
}

impl<K, V> CoalescingRepository<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(inner: Arc<dyn Repository<K, V>>) -> Self {
        Self {
            inner,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    fn join_or_lead(&self, key: &K) -> Flight<V> {
        let mut inflight = self.inflight.lock();
        if let Some(sender) = inflight.get(key) {
            // Subscribing under the lock guarantees the leader's publish,
            // which also takes the lock, happens after this subscription.
            Flight::Follower(sender.subscribe())
        } else {
            let (sender, _) = broadcast::channel(1);
            inflight.insert(key.clone(), sender);
            Flight::Leader
        }
    }

    fn conclude(&self, key: &K, result: &Result<V>) {
        let sender = self.inflight.lock().remove(key);
        if let Some(sender) = sender {
            let _ = sender.send(result.clone());
        }
    }

    fn abandon(&self, key: &K) {
        // Dropping the sender wakes every follower with a closed-channel
        // error; they re-run the election.
        self.inflight.lock().remove(key);
    }
}

/// Clears the flight if the leading fetch is cancelled before publishing.
struct LeaderGuard<'a, K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    repository: &'a CoalescingRepository<K, V>,
    key: &'a K,
}

impl<K, V> LeaderGuard<'_, K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn conclude(self, result: &Result<V>) {
        self.repository.conclude(self.key, result);
        std::mem::forget(self);
    }
}

impl<K, V> Drop for LeaderGuard<'_, K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.repository.abandon(self.key);
    }
}

#[async_trait]
impl<K, V> Repository<K, V> for CoalescingRepository<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn fetch(&self, key: &K) -> Result<V> {
        loop {
            match self.join_or_lead(key) {
                Flight::Follower(mut receiver) => match receiver.recv().await {
                    Ok(result) => return result,
                    // The leader was cancelled without publishing; elect a
                    // new one.
                    Err(_) => continue,
                },
                Flight::Leader => {
                    let flight = LeaderGuard {
                        repository: self,
                        key,
                    };
                    let result = self.inner.fetch(key).await;
                    flight.conclude(&result);
                    return result;
                }
            }
        }
    }

    async fn invalidate(&self, key: &K) -> Result<()> {
        self.inner.invalidate(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalDataSource;
    use crate::repository::CachedRepository;
    use crate::testing::{CountingRemote, MemoryStore};
    use shared::Error;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    fn coalescing(
        remote: Arc<CountingRemote<String>>,
    ) -> Arc<CoalescingRepository<u64, String>> {
        let local = LocalDataSource::new(Arc::new(MemoryStore::new()), "movies", "movie");
        let inner: Arc<dyn Repository<u64, String>> =
            Arc::new(CachedRepository::<u64, String>::new(local, remote));
        Arc::new(CoalescingRepository::new(inner))
    }

    #[tokio::test]
    async fn concurrent_cold_reads_issue_exactly_one_remote_call() {
        let gate = Arc::new(Semaphore::new(0));
        let remote = Arc::new(CountingRemote::gated(
            Ok("The Matrix".to_string()),
            gate.clone(),
        ));
        let repo = coalescing(remote.clone());

        let first = tokio::spawn({
            let repo = repo.clone();
            async move { repo.fetch(&603).await }
        });
        let second = tokio::spawn({
            let repo = repo.clone();
            async move { repo.fetch(&603).await }
        });

        // Let both tasks join the flight before releasing the remote call.
        tokio::time::sleep(Duration::from_millis(50)).await;
        gate.add_permits(2);

        assert_eq!(first.await.unwrap().unwrap(), "The Matrix");
        assert_eq!(second.await.unwrap().unwrap(), "The Matrix");
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test]
    async fn distinct_keys_do_not_share_a_flight() {
        let remote = Arc::new(CountingRemote::ok("value".to_string()));
        let repo = coalescing(remote.clone());

        repo.fetch(&1).await.unwrap();
        repo.fetch(&2).await.unwrap();

        assert_eq!(remote.calls(), 2);
    }

    #[tokio::test]
    async fn followers_share_the_leaders_failure_without_caching_it() {
        let gate = Arc::new(Semaphore::new(0));
        let remote = Arc::new(CountingRemote::<String>::gated(
            Err(Error::Unknown("upstream down".to_string())),
            gate.clone(),
        ));
        let repo = coalescing(remote.clone());

        let first = tokio::spawn({
            let repo = repo.clone();
            async move { repo.fetch(&603).await }
        });
        let second = tokio::spawn({
            let repo = repo.clone();
            async move { repo.fetch(&603).await }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        gate.add_permits(2);

        assert!(first.await.unwrap().is_err());
        assert!(second.await.unwrap().is_err());
        assert_eq!(remote.calls(), 1);

        // The flight ended with the failure; a later fetch retries remote.
        gate.add_permits(1);
        assert!(repo.fetch(&603).await.is_err());
        assert_eq!(remote.calls(), 2);
    }

    #[tokio::test]
    async fn a_cancelled_leader_hands_the_flight_to_a_waiter() {
        let gate = Arc::new(Semaphore::new(0));
        let remote = Arc::new(CountingRemote::gated(
            Ok("The Matrix".to_string()),
            gate.clone(),
        ));
        let repo = coalescing(remote.clone());

        let leader = tokio::spawn({
            let repo = repo.clone();
            async move { repo.fetch(&603).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let follower = tokio::spawn({
            let repo = repo.clone();
            async move { repo.fetch(&603).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        leader.abort();
        gate.add_permits(2);

        // The follower re-runs the election, leads its own flight and
        // completes the fetch.
        assert_eq!(follower.await.unwrap().unwrap(), "The Matrix");
    }

    #[tokio::test]
    async fn a_warm_cache_still_short_circuits() {
        let remote = Arc::new(CountingRemote::ok("The Matrix".to_string()));
        let repo = coalescing(remote.clone());

        repo.fetch(&603).await.unwrap();
        repo.fetch(&603).await.unwrap();
        repo.fetch(&603).await.unwrap();

        assert_eq!(remote.calls(), 1);
    }
}
