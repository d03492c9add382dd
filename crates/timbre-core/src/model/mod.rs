pub mod album;
pub mod ids;
pub mod matched;

pub use album::Album;
pub use ids::AlbumId;
pub use matched::{AlbumMatch, REVIEW_DISPLAY_CHARS};
