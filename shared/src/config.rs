use std::time::Duration;
use tracing::warn;

/// Runtime configuration, read once at startup by the composition root.
pub struct Config {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub cache_ttl: Duration,
    pub coalesce_requests: bool,
    pub request_timeout: Duration,
}

impl Config {
    const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
    const DEFAULT_TTL_SECS: u64 = 60;
    const DEFAULT_TIMEOUT_SECS: u64 = 15;

    pub fn from_env() -> Self {
        let api_base_url = std::env::var("POPCORN_API_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("POPCORN_API_KEY").ok();
        if api_key.is_none() {
            warn!("POPCORN_API_KEY not set, metadata requests will be unauthenticated");
        }
        let cache_ttl = std::env::var("POPCORN_CACHE_TTL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(Self::DEFAULT_TTL_SECS));
        let coalesce_requests = std::env::var("POPCORN_COALESCE_REQUESTS")
            .map(|raw| raw != "0" && !raw.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let request_timeout = std::env::var("POPCORN_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS));

        Self {
            api_base_url,
            api_key,
            cache_ttl,
            coalesce_requests,
            request_timeout,
        }
    }
}
