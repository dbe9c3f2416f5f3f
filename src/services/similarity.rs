use crate::{
    data::{Catalog, SimilarityMatrix},
    error::{AppError, AppResult},
    models::Recommendation,
};

/// Default number of recommendations returned per query
pub const DEFAULT_K: usize = 5;

/// Read-only nearest-neighbor lookup over the precomputed similarity matrix
///
/// Built once at startup from the loaded artifacts and shared behind an `Arc`.
/// There is no mutation path, so any number of readers may query concurrently
/// without locking.
#[derive(Debug)]
pub struct SimilarityIndex {
    catalog: Catalog,
    matrix: SimilarityMatrix,
}

impl SimilarityIndex {
    /// Builds the index, validating that catalog and matrix are row-aligned
    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> AppResult<Self> {
        if catalog.len() != matrix.len() {
            return Err(AppError::Artifact(format!(
                "catalog has {} entries but similarity matrix has {} rows",
                catalog.len(),
                matrix.len()
            )));
        }
        Ok(Self { catalog, matrix })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolves a title to its catalog index (first match wins)
    pub fn resolve_index(&self, title: &str) -> AppResult<usize> {
        self.catalog
            .index_of_title(title)
            .ok_or_else(|| AppError::NotFound(format!("no movie titled '{}' in catalog", title)))
    }

    /// Resolves a movie id to its catalog index
    pub fn resolve_id(&self, movie_id: u64) -> AppResult<usize> {
        self.catalog
            .index_of_id(movie_id)
            .ok_or_else(|| AppError::NotFound(format!("no movie with id {} in catalog", movie_id)))
    }

    /// Returns the top-k most similar catalog entries for a title
    ///
    /// Scores are taken from the matrix row of the resolved entry, sorted
    /// descending. The sort is stable, so ties keep catalog order. The query
    /// entry itself (self-similarity) is excluded from the result.
    pub fn recommend(&self, title: &str, k: usize) -> AppResult<Vec<Recommendation>> {
        let index = self.resolve_index(title)?;
        Ok(self.top_k(index, k))
    }

    /// Identifier-keyed variant of [`recommend`](Self::recommend)
    pub fn recommend_by_id(&self, movie_id: u64, k: usize) -> AppResult<Vec<Recommendation>> {
        let index = self.resolve_id(movie_id)?;
        Ok(self.top_k(index, k))
    }

    fn top_k(&self, index: usize, k: usize) -> Vec<Recommendation> {
        let row = match self.matrix.row(index) {
            Some(row) => row,
            None => return Vec::new(),
        };

        let mut scored: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
        // Stable sort keeps catalog order for equal scores
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .filter(|(i, _)| *i != index)
            .take(k)
            .filter_map(|(i, score)| {
                self.catalog.get(i).map(|entry| Recommendation {
                    entry: entry.clone(),
                    score,
                })
            })
            .collect()
    }
}
