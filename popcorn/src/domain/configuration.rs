use serde::{Deserialize, Serialize};
use std::fmt;

/// API-wide configuration. There is exactly one per deployment, addressed by
/// [`ConfigurationScope`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfiguration {
    pub images: ImagesConfiguration,
}

/// Image host settings from the configuration endpoint. Absolute image URLs
/// are `secure_base_url + size + file_path`, where `file_path` values carry a
/// leading slash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesConfiguration {
    pub secure_base_url: String,
    pub poster_sizes: Vec<String>,
    pub backdrop_sizes: Vec<String>,
    pub logo_sizes: Vec<String>,
    pub profile_sizes: Vec<String>,
}

impl ImagesConfiguration {
    const PREFERRED_POSTER: &str = "w500";
    const PREFERRED_BACKDROP: &str = "w780";
    const PREFERRED_PROFILE: &str = "w185";

    pub fn poster_url(&self, file_path: &str) -> Option<String> {
        self.url(&self.poster_sizes, Self::PREFERRED_POSTER, file_path)
    }

    pub fn backdrop_url(&self, file_path: &str) -> Option<String> {
        self.url(&self.backdrop_sizes, Self::PREFERRED_BACKDROP, file_path)
    }

    pub fn profile_url(&self, file_path: &str) -> Option<String> {
        self.url(&self.profile_sizes, Self::PREFERRED_PROFILE, file_path)
    }

    fn url(&self, sizes: &[String], preferred: &str, file_path: &str) -> Option<String> {
        let size = sizes
            .iter()
            .find(|size| size.as_str() == preferred)
            .or_else(|| sizes.last())?;
        Some(format!("{}{}{}", self.secure_base_url, size, file_path))
    }
}

/// Key for the configuration context; a single logical entity.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct ConfigurationScope;

impl fmt::Display for ConfigurationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("current")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images() -> ImagesConfiguration {
        ImagesConfiguration {
            secure_base_url: "https://image.example.org/t/p/".to_string(),
            poster_sizes: vec!["w92".into(), "w500".into(), "original".into()],
            backdrop_sizes: vec!["w300".into(), "original".into()],
            logo_sizes: vec!["w45".into()],
            profile_sizes: vec![],
        }
    }

    #[test]
    fn poster_url_uses_preferred_size() {
        let url = images().poster_url("/abc.jpg").unwrap();
        assert_eq!(url, "https://image.example.org/t/p/w500/abc.jpg");
    }

    #[test]
    fn backdrop_url_falls_back_to_largest_size() {
        let url = images().backdrop_url("/abc.jpg").unwrap();
        assert_eq!(url, "https://image.example.org/t/p/original/abc.jpg");
    }

    #[test]
    fn url_is_absent_without_any_size() {
        assert_eq!(images().profile_url("/abc.jpg"), None);
    }
}
