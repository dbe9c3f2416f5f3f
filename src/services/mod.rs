pub mod enrichment;
pub mod providers;
pub mod similarity;

pub use enrichment::Enricher;
pub use providers::MetadataProvider;
pub use similarity::SimilarityIndex;
