use serde::{Deserialize, Serialize};

/// A single row of the movie catalog
///
/// Entries are immutable once loaded; the catalog row index doubles as the
/// row index into the similarity matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieEntry {
    /// TMDB movie identifier
    pub movie_id: u64,
    /// Movie title, used for title-based lookup (first match wins on duplicates)
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl MovieEntry {
    /// Creates a bare entry with only id and title set
    pub fn new(movie_id: u64, title: impl Into<String>) -> Self {
        Self {
            movie_id,
            title: title.into(),
            year: None,
            genres: None,
            rating: None,
        }
    }
}

/// A catalog entry paired with its similarity score relative to a query movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub entry: MovieEntry,
    pub score: f64,
}
