use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::config::Config;
use shared::{Error, Result};
use tracing::debug;

mod dto;
pub mod sources;

pub use sources::{
    HttpConfigurationDataSource, HttpGenresDataSource, HttpMovieDataSource,
    HttpPersonDataSource, HttpSearchDataSource, HttpSeriesDataSource,
    HttpTrendingMoviesDataSource, HttpTrendingSeriesDataSource,
};

/// Shared HTTP client for the metadata API. One instance per process,
/// injected into every remote data source.
pub struct MetadataClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MetadataClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| Error::Unknown(error.to_string()))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url).query(query);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|error| Error::Unknown(error.to_string()))?;

        let status = response.status();
        if let Some(error) = translate_status(status) {
            debug!(%status, url = url.as_str(), "metadata request rejected");
            return Err(error);
        }

        response
            .json::<T>()
            .await
            .map_err(|error| Error::Unknown(error.to_string()))
    }
}

/// Only auth failures and missing entities are distinguished at this
/// boundary; everything else collapses to `Unknown`.
fn translate_status(status: StatusCode) -> Option<Error> {
    match status {
        StatusCode::NOT_FOUND => Some(Error::NotFound),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Some(Error::Unauthorised),
        status if status.is_success() => None,
        status => Some(Error::Unknown(format!("unexpected status {status}"))),
    }
}
