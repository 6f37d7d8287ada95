use crate::domain::movie::Movie;
use crate::domain::person::Person;
use crate::domain::tv::TvSeries;
use serde::{Deserialize, Serialize};

/// One page of a paginated API listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

/// A multi-search result row: any of the three media catalogues.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum Media {
    Movie(Movie),
    Tv(TvSeries),
    Person(Person),
}

impl Media {
    pub fn display_title(&self) -> &str {
        match self {
            Media::Movie(movie) => &movie.title,
            Media::Tv(series) => &series.name,
            Media::Person(person) => &person.name,
        }
    }
}
