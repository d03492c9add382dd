use serde::{Deserialize, Serialize};

use crate::model::album::Album;
use crate::model::ids::AlbumId;
use crate::text::truncate_chars;

/// Maximum number of characters of a review carried in a result.
pub const REVIEW_DISPLAY_CHARS: usize = 500;

/// A ranked match for a single query.
///
/// Built fresh per query from the matched [`Album`]; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumMatch {
    /// 1-based position in the returned ordering.
    pub rank: usize,

    /// Cosine similarity, as computed (not clamped).
    pub score: f32,

    pub album_id: AlbumId,
    pub artist: String,
    pub title: String,
    pub genre: String,
    pub year_released: Option<String>,

    /// At most [`REVIEW_DISPLAY_CHARS`] characters of the album review.
    pub review: String,
}

impl AlbumMatch {
    /// Copy the display fields of `album`, truncating the review.
    #[must_use]
    pub fn from_album(rank: usize, score: f32, album: &Album) -> Self {
        Self {
            rank,
            score,
            album_id: album.album_id,
            artist: album.artist.clone(),
            title: album.title.clone(),
            genre: album.genre.clone(),
            year_released: album.year_released.clone(),
            review: truncate_chars(&album.review, REVIEW_DISPLAY_CHARS).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_album_copies_fields() {
        let album = Album::new(5, "Slowdive", "Souvlaki")
            .with_genre("Shoegaze")
            .with_year_released("1993")
            .with_review("washed out and tender");

        let matched = AlbumMatch::from_album(1, 0.75, &album);

        assert_eq!(matched.rank, 1);
        assert!((matched.score - 0.75).abs() < f32::EPSILON);
        assert_eq!(matched.album_id, AlbumId::new(5));
        assert_eq!(matched.genre, "Shoegaze");
        assert_eq!(matched.year_released.as_deref(), Some("1993"));
        assert_eq!(matched.review, "washed out and tender");
    }

    #[test]
    fn test_from_album_truncates_long_review() {
        let album = Album::new(1, "a", "b").with_review("x".repeat(REVIEW_DISPLAY_CHARS + 20));
        let matched = AlbumMatch::from_album(1, 0.0, &album);
        assert_eq!(matched.review.chars().count(), REVIEW_DISPLAY_CHARS);
    }

    #[test]
    fn test_from_album_empty_review() {
        let album = Album::new(1, "a", "b");
        let matched = AlbumMatch::from_album(3, -0.1, &album);
        assert!(matched.review.is_empty());
        assert_eq!(matched.rank, 3);
    }
}
