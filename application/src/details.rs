use popcorn::domain::{ImagesConfiguration, Movie, Person, TvSeries};
use serde::Serialize;

/// Presentation-ready movie: the raw entity plus absolute image URLs built
/// from the separately-fetched configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieDetails {
    pub movie: Movie,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

impl MovieDetails {
    pub fn compose(movie: Movie, images: &ImagesConfiguration) -> Self {
        let poster_url = movie
            .poster_path
            .as_deref()
            .and_then(|path| images.poster_url(path));
        let backdrop_url = movie
            .backdrop_path
            .as_deref()
            .and_then(|path| images.backdrop_url(path));
        Self {
            movie,
            poster_url,
            backdrop_url,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesDetails {
    pub series: TvSeries,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

impl SeriesDetails {
    pub fn compose(series: TvSeries, images: &ImagesConfiguration) -> Self {
        let poster_url = series
            .poster_path
            .as_deref()
            .and_then(|path| images.poster_url(path));
        let backdrop_url = series
            .backdrop_path
            .as_deref()
            .and_then(|path| images.backdrop_url(path));
        Self {
            series,
            poster_url,
            backdrop_url,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PersonDetails {
    pub person: Person,
    pub profile_url: Option<String>,
}

impl PersonDetails {
    pub fn compose(person: Person, images: &ImagesConfiguration) -> Self {
        let profile_url = person
            .profile_path
            .as_deref()
            .and_then(|path| images.profile_url(path));
        Self {
            person,
            profile_url,
        }
    }
}
