//! Composition root: caches, data sources and repositories are constructed
//! here, once, and injected everywhere else. No ambient global lookup.

use application::{Application, Repositories};
use popcorn::events::RepositoryEvent;
use popcorn::ports::{RemoteDataSource, Repository};
use popcorn::{CachedRepository, CoalescingRepository, LocalDataSource};
use remote_http::{
    HttpConfigurationDataSource, HttpGenresDataSource, HttpMovieDataSource, HttpPersonDataSource,
    HttpSearchDataSource, HttpSeriesDataSource, HttpTrendingMoviesDataSource,
    HttpTrendingSeriesDataSource, MetadataClient,
};
use shared::Result;
use shared::config::Config;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use storage_engine::TtlCache;
use tokio::sync::broadcast;

fn repository<K, V, R>(
    context: &'static str,
    entity: &'static str,
    ttl: Duration,
    remote: R,
    coalesce: bool,
    events: &broadcast::Sender<RepositoryEvent>,
) -> Arc<dyn Repository<K, V>>
where
    K: Display + Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    R: RemoteDataSource<K, V>,
{
    let cache = Arc::new(TtlCache::<V>::new(context, ttl));
    let local = LocalDataSource::new(cache, context, entity);
    let cached: Arc<dyn Repository<K, V>> = Arc::new(CachedRepository::with_event_broadcaster(
        local,
        Arc::new(remote),
        events.clone(),
    ));
    if coalesce {
        Arc::new(CoalescingRepository::new(cached))
    } else {
        cached
    }
}

pub fn build(
    config: &Config,
    coalesce: bool,
    events: broadcast::Sender<RepositoryEvent>,
) -> Result<Application> {
    let client = Arc::new(MetadataClient::new(config)?);
    let ttl = config.cache_ttl;

    let repositories = Repositories {
        movies: repository(
            "movies",
            "movie",
            ttl,
            HttpMovieDataSource::new(client.clone()),
            coalesce,
            &events,
        ),
        series: repository(
            "tv",
            "series",
            ttl,
            HttpSeriesDataSource::new(client.clone()),
            coalesce,
            &events,
        ),
        people: repository(
            "people",
            "person",
            ttl,
            HttpPersonDataSource::new(client.clone()),
            coalesce,
            &events,
        ),
        configuration: repository(
            "configuration",
            "app-configuration",
            ttl,
            HttpConfigurationDataSource::new(client.clone()),
            coalesce,
            &events,
        ),
        genres: repository(
            "genres",
            "genre-list",
            ttl,
            HttpGenresDataSource::new(client.clone()),
            coalesce,
            &events,
        ),
        trending_movies: repository(
            "trending",
            "movie",
            ttl,
            HttpTrendingMoviesDataSource::new(client.clone()),
            coalesce,
            &events,
        ),
        trending_series: repository(
            "trending",
            "series",
            ttl,
            HttpTrendingSeriesDataSource::new(client.clone()),
            coalesce,
            &events,
        ),
    };

    let search = Arc::new(HttpSearchDataSource::new(client));
    Ok(Application::new(repositories, search))
}
