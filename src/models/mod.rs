pub mod metadata;
pub mod movie;

pub use metadata::{
    MovieDetails, TmdbGenre, TmdbMovie, TmdbTrendingResponse, TmdbVideo, TmdbVideosResponse,
    TrendingMovie, PLACEHOLDER_POSTER,
};
pub use movie::{MovieEntry, Recommendation};
