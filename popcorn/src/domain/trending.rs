use serde::{Deserialize, Serialize};
use std::fmt;

/// Time window a trending feed is computed over.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingWindow {
    Day,
    Week,
}

impl TrendingWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }
}

impl fmt::Display for TrendingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup key for a trending page. The window and page number both
/// participate in the cache key, so `day` and `week` feeds never collide.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TrendingQuery {
    pub window: TrendingWindow,
    pub page: u32,
}

impl TrendingQuery {
    pub fn new(window: TrendingWindow, page: u32) -> Self {
        Self { window, page }
    }
}

impl fmt::Display for TrendingQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-p{}", self.window, self.page)
    }
}
