use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::MovieEntry;

/// The static movie catalog
///
/// Row order is significant: catalog index i corresponds to row i of the
/// similarity matrix. The catalog is read-only after load.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<MovieEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<MovieEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MovieEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[MovieEntry] {
        &self.entries
    }

    /// Index of the first entry with an exact title match
    ///
    /// Duplicate titles resolve to the earliest catalog row, matching the
    /// original title-keyed lookup behavior.
    pub fn index_of_title(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.title == title)
    }

    /// Index of the entry with the given movie id
    pub fn index_of_id(&self, movie_id: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.movie_id == movie_id)
    }
}

/// Dense, square similarity matrix aligned with the catalog row order
///
/// `rows[i][j]` is the similarity between catalog entries i and j. Squareness
/// is validated at construction; alignment with the catalog is validated when
/// the similarity index is built.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let dim = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(AppError::Artifact(format!(
                    "similarity matrix is not square: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    dim
                )));
            }
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(|r| r.as_slice())
    }
}

/// Loads the movie catalog from a JSON array of entries
///
/// Missing or malformed artifacts are fatal at startup, so errors carry the
/// offending path.
pub fn load_catalog(path: impl AsRef<Path>) -> AppResult<Catalog> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        AppError::Artifact(format!("failed to open catalog {}: {}", path.display(), e))
    })?;
    let entries: Vec<MovieEntry> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::Artifact(format!("failed to parse catalog {}: {}", path.display(), e))
    })?;

    tracing::info!(path = %path.display(), entries = entries.len(), "Catalog loaded");
    Ok(Catalog::new(entries))
}

/// Loads the similarity matrix from a JSON array of float rows
pub fn load_similarity(path: impl AsRef<Path>) -> AppResult<SimilarityMatrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        AppError::Artifact(format!("failed to open matrix {}: {}", path.display(), e))
    })?;
    let rows: Vec<Vec<f64>> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::Artifact(format!("failed to parse matrix {}: {}", path.display(), e))
    })?;

    let matrix = SimilarityMatrix::new(rows)?;
    tracing::info!(path = %path.display(), dim = matrix.len(), "Similarity matrix loaded");
    Ok(matrix)
}
