pub mod artifacts;

pub use artifacts::load_catalog;
pub use artifacts::load_similarity;
pub use artifacts::Catalog;
pub use artifacts::SimilarityMatrix;
