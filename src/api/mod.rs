//! API clients for external services
//!
//! - TMDB: Movie/TV listings, details, trailers and search
//! - Images: TMDB image and YouTube URL builders

pub mod images;
pub mod tmdb;

pub use images::{image_url, youtube_embed_url, youtube_watch_url, ImageKind, ImageSize};
pub use tmdb::{select_trailer, TmdbClient, TmdbError};
