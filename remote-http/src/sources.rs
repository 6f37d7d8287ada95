//! Remote data sources backed by [`MetadataClient`], one per context. Each
//! translates wire DTOs into domain values; error translation already
//! happened at the client.

use crate::MetadataClient;
use crate::dto::{ConfigurationDto, GenreListDto, MediaDto, MovieDto, PageDto, PersonDto, TvSeriesDto};
use async_trait::async_trait;
use popcorn::domain::{
    AppConfiguration, ConfigurationScope, Genre, Media, MediaKind, Movie, MovieId, Page, Person,
    PersonId, SeriesId, TrendingQuery, TvSeries,
};
use popcorn::ports::{RemoteDataSource, SearchDataSource};
use shared::Result;
use std::sync::Arc;

pub struct HttpMovieDataSource {
    client: Arc<MetadataClient>,
}

impl HttpMovieDataSource {
    pub fn new(client: Arc<MetadataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteDataSource<MovieId, Movie> for HttpMovieDataSource {
    async fn fetch(&self, id: &MovieId) -> Result<Movie> {
        let dto: MovieDto = self.client.get_json(&format!("/movie/{id}"), &[]).await?;
        Ok(dto.into())
    }
}

pub struct HttpSeriesDataSource {
    client: Arc<MetadataClient>,
}

impl HttpSeriesDataSource {
    pub fn new(client: Arc<MetadataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteDataSource<SeriesId, TvSeries> for HttpSeriesDataSource {
    async fn fetch(&self, id: &SeriesId) -> Result<TvSeries> {
        let dto: TvSeriesDto = self.client.get_json(&format!("/tv/{id}"), &[]).await?;
        Ok(dto.into())
    }
}

pub struct HttpPersonDataSource {
    client: Arc<MetadataClient>,
}

impl HttpPersonDataSource {
    pub fn new(client: Arc<MetadataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteDataSource<PersonId, Person> for HttpPersonDataSource {
    async fn fetch(&self, id: &PersonId) -> Result<Person> {
        let dto: PersonDto = self.client.get_json(&format!("/person/{id}"), &[]).await?;
        Ok(dto.into())
    }
}

pub struct HttpConfigurationDataSource {
    client: Arc<MetadataClient>,
}

impl HttpConfigurationDataSource {
    pub fn new(client: Arc<MetadataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteDataSource<ConfigurationScope, AppConfiguration> for HttpConfigurationDataSource {
    async fn fetch(&self, _scope: &ConfigurationScope) -> Result<AppConfiguration> {
        let dto: ConfigurationDto = self.client.get_json("/configuration", &[]).await?;
        Ok(dto.into())
    }
}

pub struct HttpGenresDataSource {
    client: Arc<MetadataClient>,
}

impl HttpGenresDataSource {
    pub fn new(client: Arc<MetadataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteDataSource<MediaKind, Vec<Genre>> for HttpGenresDataSource {
    async fn fetch(&self, kind: &MediaKind) -> Result<Vec<Genre>> {
        let dto: GenreListDto = self
            .client
            .get_json(&format!("/genre/{kind}/list"), &[])
            .await?;
        Ok(dto.into_domain())
    }
}

pub struct HttpTrendingMoviesDataSource {
    client: Arc<MetadataClient>,
}

impl HttpTrendingMoviesDataSource {
    pub fn new(client: Arc<MetadataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteDataSource<TrendingQuery, Page<Movie>> for HttpTrendingMoviesDataSource {
    async fn fetch(&self, query: &TrendingQuery) -> Result<Page<Movie>> {
        let dto: PageDto<MovieDto> = self
            .client
            .get_json(
                &format!("/trending/movie/{}", query.window),
                &[("page", query.page.to_string())],
            )
            .await?;
        Ok(dto.into_domain())
    }
}

pub struct HttpTrendingSeriesDataSource {
    client: Arc<MetadataClient>,
}

impl HttpTrendingSeriesDataSource {
    pub fn new(client: Arc<MetadataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteDataSource<TrendingQuery, Page<TvSeries>> for HttpTrendingSeriesDataSource {
    async fn fetch(&self, query: &TrendingQuery) -> Result<Page<TvSeries>> {
        let dto: PageDto<TvSeriesDto> = self
            .client
            .get_json(
                &format!("/trending/tv/{}", query.window),
                &[("page", query.page.to_string())],
            )
            .await?;
        Ok(dto.into_domain())
    }
}

pub struct HttpSearchDataSource {
    client: Arc<MetadataClient>,
}

impl HttpSearchDataSource {
    pub fn new(client: Arc<MetadataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchDataSource for HttpSearchDataSource {
    async fn search(&self, query: &str, page: u32) -> Result<Page<Media>> {
        let dto: PageDto<MediaDto> = self
            .client
            .get_json(
                "/search/multi",
                &[("query", query.to_string()), ("page", page.to_string())],
            )
            .await?;
        Ok(dto.into_domain())
    }
}
