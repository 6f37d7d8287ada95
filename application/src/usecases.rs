use crate::details::{MovieDetails, PersonDetails, SeriesDetails};
use crate::error::UseCaseResult;
use popcorn::domain::{
    AppConfiguration, ConfigurationScope, Genre, Media, MediaKind, Movie, MovieId, Page, Person,
    PersonId, SeriesId, TrendingQuery, TrendingWindow, TvSeries,
};
use popcorn::ports::{Repository, SearchDataSource};
use std::sync::Arc;

// Use cases are pure composition: one repository operation each, value
// mapping, error vocabulary translation. No caching or retry logic here.

#[derive(Clone)]
pub struct FetchMovieDetailsUseCase {
    movies: Arc<dyn Repository<MovieId, Movie>>,
    configuration: Arc<dyn Repository<ConfigurationScope, AppConfiguration>>,
}

impl FetchMovieDetailsUseCase {
    pub fn new(
        movies: Arc<dyn Repository<MovieId, Movie>>,
        configuration: Arc<dyn Repository<ConfigurationScope, AppConfiguration>>,
    ) -> Self {
        Self {
            movies,
            configuration,
        }
    }

    pub async fn exec(&self, id: MovieId) -> UseCaseResult<MovieDetails> {
        let (movie, configuration) = tokio::join!(
            self.movies.fetch(&id),
            self.configuration.fetch(&ConfigurationScope)
        );
        Ok(MovieDetails::compose(movie?, &configuration?.images))
    }
}

#[derive(Clone)]
pub struct FetchSeriesDetailsUseCase {
    series: Arc<dyn Repository<SeriesId, TvSeries>>,
    configuration: Arc<dyn Repository<ConfigurationScope, AppConfiguration>>,
}

impl FetchSeriesDetailsUseCase {
    pub fn new(
        series: Arc<dyn Repository<SeriesId, TvSeries>>,
        configuration: Arc<dyn Repository<ConfigurationScope, AppConfiguration>>,
    ) -> Self {
        Self {
            series,
            configuration,
        }
    }

    pub async fn exec(&self, id: SeriesId) -> UseCaseResult<SeriesDetails> {
        let (series, configuration) = tokio::join!(
            self.series.fetch(&id),
            self.configuration.fetch(&ConfigurationScope)
        );
        Ok(SeriesDetails::compose(series?, &configuration?.images))
    }
}

#[derive(Clone)]
pub struct FetchPersonDetailsUseCase {
    people: Arc<dyn Repository<PersonId, Person>>,
    configuration: Arc<dyn Repository<ConfigurationScope, AppConfiguration>>,
}

impl FetchPersonDetailsUseCase {
    pub fn new(
        people: Arc<dyn Repository<PersonId, Person>>,
        configuration: Arc<dyn Repository<ConfigurationScope, AppConfiguration>>,
    ) -> Self {
        Self {
            people,
            configuration,
        }
    }

    pub async fn exec(&self, id: PersonId) -> UseCaseResult<PersonDetails> {
        let (person, configuration) = tokio::join!(
            self.people.fetch(&id),
            self.configuration.fetch(&ConfigurationScope)
        );
        Ok(PersonDetails::compose(person?, &configuration?.images))
    }
}

#[derive(Clone)]
pub struct FetchTrendingMoviesUseCase {
    trending: Arc<dyn Repository<TrendingQuery, Page<Movie>>>,
}

impl FetchTrendingMoviesUseCase {
    pub fn new(trending: Arc<dyn Repository<TrendingQuery, Page<Movie>>>) -> Self {
        Self { trending }
    }

    pub async fn exec(&self, window: TrendingWindow, page: u32) -> UseCaseResult<Page<Movie>> {
        Ok(self.trending.fetch(&TrendingQuery::new(window, page)).await?)
    }
}

#[derive(Clone)]
pub struct FetchTrendingSeriesUseCase {
    trending: Arc<dyn Repository<TrendingQuery, Page<TvSeries>>>,
}

impl FetchTrendingSeriesUseCase {
    pub fn new(trending: Arc<dyn Repository<TrendingQuery, Page<TvSeries>>>) -> Self {
        Self { trending }
    }

    pub async fn exec(&self, window: TrendingWindow, page: u32) -> UseCaseResult<Page<TvSeries>> {
        Ok(self.trending.fetch(&TrendingQuery::new(window, page)).await?)
    }
}

#[derive(Clone)]
pub struct FetchGenresUseCase {
    genres: Arc<dyn Repository<MediaKind, Vec<Genre>>>,
}

impl FetchGenresUseCase {
    pub fn new(genres: Arc<dyn Repository<MediaKind, Vec<Genre>>>) -> Self {
        Self { genres }
    }

    pub async fn exec(&self, kind: MediaKind) -> UseCaseResult<Vec<Genre>> {
        Ok(self.genres.fetch(&kind).await?)
    }
}

#[derive(Clone)]
pub struct SearchMediaUseCase {
    search: Arc<dyn SearchDataSource>,
}

impl SearchMediaUseCase {
    pub fn new(search: Arc<dyn SearchDataSource>) -> Self {
        Self { search }
    }

    /// Search goes straight to remote; results are too query-specific to be
    /// worth caching. A blank query returns an empty first page without a
    /// network round-trip.
    pub async fn exec(&self, query: &str, page: u32) -> UseCaseResult<Page<Media>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Page {
                page: 1,
                total_pages: 1,
                total_results: 0,
                results: Vec::new(),
            });
        }
        Ok(self.search.search(query, page).await?)
    }
}
