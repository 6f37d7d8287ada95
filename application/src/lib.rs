// application/src/lib.rs
pub mod details;
pub mod error;
pub mod usecases;

use popcorn::domain::{
    AppConfiguration, ConfigurationScope, Genre, MediaKind, Movie, MovieId, Page, Person, PersonId,
    SeriesId, TrendingQuery, TvSeries,
};
use popcorn::ports::{Repository, SearchDataSource};
use std::sync::Arc;
use usecases::{
    FetchGenresUseCase, FetchMovieDetailsUseCase, FetchPersonDetailsUseCase,
    FetchSeriesDetailsUseCase, FetchTrendingMoviesUseCase, FetchTrendingSeriesUseCase,
    SearchMediaUseCase,
};

/// Repository handles for every context, built once at the composition root.
#[derive(Clone)]
pub struct Repositories {
    pub movies: Arc<dyn Repository<MovieId, Movie>>,
    pub series: Arc<dyn Repository<SeriesId, TvSeries>>,
    pub people: Arc<dyn Repository<PersonId, Person>>,
    pub configuration: Arc<dyn Repository<ConfigurationScope, AppConfiguration>>,
    pub genres: Arc<dyn Repository<MediaKind, Vec<Genre>>>,
    pub trending_movies: Arc<dyn Repository<TrendingQuery, Page<Movie>>>,
    pub trending_series: Arc<dyn Repository<TrendingQuery, Page<TvSeries>>>,
}

#[derive(Clone)]
pub struct Application {
    pub movie_details: FetchMovieDetailsUseCase,
    pub series_details: FetchSeriesDetailsUseCase,
    pub person_details: FetchPersonDetailsUseCase,
    pub trending_movies: FetchTrendingMoviesUseCase,
    pub trending_series: FetchTrendingSeriesUseCase,
    pub genres: FetchGenresUseCase,
    pub search: SearchMediaUseCase,
}

impl Application {
    pub fn new(repositories: Repositories, search: Arc<dyn SearchDataSource>) -> Self {
        Self {
            movie_details: FetchMovieDetailsUseCase::new(
                repositories.movies.clone(),
                repositories.configuration.clone(),
            ),
            series_details: FetchSeriesDetailsUseCase::new(
                repositories.series.clone(),
                repositories.configuration.clone(),
            ),
            person_details: FetchPersonDetailsUseCase::new(
                repositories.people.clone(),
                repositories.configuration.clone(),
            ),
            trending_movies: FetchTrendingMoviesUseCase::new(repositories.trending_movies.clone()),
            trending_series: FetchTrendingSeriesUseCase::new(repositories.trending_series.clone()),
            genres: FetchGenresUseCase::new(repositories.genres),
            search: SearchMediaUseCase::new(search),
        }
    }
}
