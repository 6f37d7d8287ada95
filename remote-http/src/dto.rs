//! Wire shapes for the metadata API. Kept separate from the domain so wire
//! quirks (empty date strings, nested vs flat genres) stay at this boundary.

use chrono::NaiveDate;
use popcorn::domain::{
    AppConfiguration, Genre, GenreId, ImagesConfiguration, Media, Movie, MovieId, Page, Person,
    PersonId, SeriesId, TvSeries,
};
use serde::Deserialize;

// The API serves dates as "YYYY-MM-DD" but uses the empty string for
// unreleased titles.
fn parse_date(raw: Option<String>) -> Option<NaiveDate> {
    let raw = raw?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok()
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreDto {
    id: u64,
    name: String,
}

impl From<GenreDto> for Genre {
    fn from(dto: GenreDto) -> Self {
        Genre {
            id: GenreId(dto.id),
            name: dto.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreListDto {
    pub(crate) genres: Vec<GenreDto>,
}

impl GenreListDto {
    pub(crate) fn into_domain(self) -> Vec<Genre> {
        self.genres.into_iter().map(Genre::from).collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MovieDto {
    id: u64,
    title: String,
    overview: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    // List endpoints carry flat ids, detail endpoints nest full genres.
    #[serde(default)]
    genre_ids: Vec<u64>,
    #[serde(default)]
    genres: Vec<GenreDto>,
    #[serde(default)]
    vote_average: f32,
}

impl From<MovieDto> for Movie {
    fn from(dto: MovieDto) -> Self {
        let genre_ids = if dto.genre_ids.is_empty() {
            dto.genres.iter().map(|genre| GenreId(genre.id)).collect()
        } else {
            dto.genre_ids.into_iter().map(GenreId).collect()
        };
        Movie {
            id: MovieId(dto.id),
            title: dto.title,
            overview: dto.overview.filter(|overview| !overview.is_empty()),
            release_date: parse_date(dto.release_date),
            poster_path: dto.poster_path,
            backdrop_path: dto.backdrop_path,
            genre_ids,
            vote_average: dto.vote_average,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TvSeriesDto {
    id: u64,
    name: String,
    overview: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    genre_ids: Vec<u64>,
    #[serde(default)]
    genres: Vec<GenreDto>,
    #[serde(default)]
    vote_average: f32,
    number_of_seasons: Option<u32>,
}

impl From<TvSeriesDto> for TvSeries {
    fn from(dto: TvSeriesDto) -> Self {
        let genre_ids = if dto.genre_ids.is_empty() {
            dto.genres.iter().map(|genre| GenreId(genre.id)).collect()
        } else {
            dto.genre_ids.into_iter().map(GenreId).collect()
        };
        TvSeries {
            id: SeriesId(dto.id),
            name: dto.name,
            overview: dto.overview.filter(|overview| !overview.is_empty()),
            first_air_date: parse_date(dto.first_air_date),
            poster_path: dto.poster_path,
            backdrop_path: dto.backdrop_path,
            genre_ids,
            vote_average: dto.vote_average,
            number_of_seasons: dto.number_of_seasons,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonDto {
    id: u64,
    name: String,
    known_for_department: Option<String>,
    biography: Option<String>,
    profile_path: Option<String>,
    #[serde(default)]
    popularity: f32,
}

impl From<PersonDto> for Person {
    fn from(dto: PersonDto) -> Self {
        Person {
            id: PersonId(dto.id),
            name: dto.name,
            known_for_department: dto.known_for_department,
            biography: dto.biography.filter(|biography| !biography.is_empty()),
            profile_path: dto.profile_path,
            popularity: dto.popularity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImagesDto {
    secure_base_url: String,
    #[serde(default)]
    poster_sizes: Vec<String>,
    #[serde(default)]
    backdrop_sizes: Vec<String>,
    #[serde(default)]
    logo_sizes: Vec<String>,
    #[serde(default)]
    profile_sizes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfigurationDto {
    images: ImagesDto,
}

impl From<ConfigurationDto> for AppConfiguration {
    fn from(dto: ConfigurationDto) -> Self {
        AppConfiguration {
            images: ImagesConfiguration {
                secure_base_url: dto.images.secure_base_url,
                poster_sizes: dto.images.poster_sizes,
                backdrop_sizes: dto.images.backdrop_sizes,
                logo_sizes: dto.images.logo_sizes,
                profile_sizes: dto.images.profile_sizes,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub(crate) enum MediaDto {
    Movie(MovieDto),
    Tv(TvSeriesDto),
    Person(PersonDto),
}

impl From<MediaDto> for Media {
    fn from(dto: MediaDto) -> Self {
        match dto {
            MediaDto::Movie(movie) => Media::Movie(movie.into()),
            MediaDto::Tv(series) => Media::Tv(series.into()),
            MediaDto::Person(person) => Media::Person(person.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageDto<T> {
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default = "first_page")]
    total_pages: u32,
    #[serde(default)]
    total_results: u64,
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

fn first_page() -> u32 {
    1
}

impl<T> PageDto<T> {
    pub(crate) fn into_domain<U: From<T>>(self) -> Page<U> {
        Page {
            page: self.page,
            total_pages: self.total_pages,
            total_results: self.total_results,
            results: self.results.into_iter().map(U::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_detail_payload_converts_to_domain() {
        let dto: MovieDto = serde_json::from_str(
            r#"{
                "id": 603,
                "title": "The Matrix",
                "overview": "A hacker learns the truth.",
                "release_date": "1999-03-30",
                "poster_path": "/poster.jpg",
                "backdrop_path": null,
                "genres": [{"id": 28, "name": "Action"}],
                "vote_average": 8.2
            }"#,
        )
        .unwrap();

        let movie = Movie::from(dto);

        assert_eq!(movie.id, MovieId(603));
        assert_eq!(
            movie.release_date,
            NaiveDate::from_ymd_opt(1999, 3, 30)
        );
        assert_eq!(movie.genre_ids, vec![GenreId(28)]);
    }

    #[test]
    fn empty_release_date_reads_as_absent() {
        let dto: MovieDto = serde_json::from_str(
            r#"{"id": 1, "title": "Unreleased", "release_date": ""}"#,
        )
        .unwrap();

        assert_eq!(Movie::from(dto).release_date, None);
    }

    #[test]
    fn list_payload_flat_genre_ids_win_over_empty_nested_genres() {
        let dto: MovieDto = serde_json::from_str(
            r#"{"id": 1, "title": "Listed", "genre_ids": [18, 53]}"#,
        )
        .unwrap();

        assert_eq!(Movie::from(dto).genre_ids, vec![GenreId(18), GenreId(53)]);
    }

    #[test]
    fn multi_search_rows_parse_by_media_type_tag() {
        let page: PageDto<MediaDto> = serde_json::from_str(
            r#"{
                "page": 1,
                "total_pages": 1,
                "total_results": 2,
                "results": [
                    {"media_type": "movie", "id": 603, "title": "The Matrix"},
                    {"media_type": "person", "id": 287, "name": "Brad Pitt"}
                ]
            }"#,
        )
        .unwrap();

        let page: Page<Media> = page.into_domain();

        assert_eq!(page.results.len(), 2);
        assert!(matches!(page.results[0], Media::Movie(_)));
        assert!(matches!(page.results[1], Media::Person(_)));
    }

    #[test]
    fn configuration_payload_converts_to_domain() {
        let dto: ConfigurationDto = serde_json::from_str(
            r#"{
                "images": {
                    "secure_base_url": "https://image.example.org/t/p/",
                    "poster_sizes": ["w92", "w500"],
                    "backdrop_sizes": ["w780"]
                }
            }"#,
        )
        .unwrap();

        let configuration = AppConfiguration::from(dto);

        assert_eq!(
            configuration.images.secure_base_url,
            "https://image.example.org/t/p/"
        );
        assert!(configuration.images.profile_sizes.is_empty());
    }
}
