use serde::{Deserialize, Serialize};

use crate::model::ids::AlbumId;

/// One album in the catalog.
///
/// Row `i` of the metadata table pairs with row `i` of the embedding
/// matrix. Field names follow the metadata CSV headers; columns the
/// catalog does not use (rating, mood words) are ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub album_id: AlbumId,

    #[serde(default)]
    pub artist: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub genre: String,

    /// Release year as display text.
    ///
    /// The source data mixes integers, floats and free text here, so the
    /// value is kept verbatim.
    #[serde(default)]
    pub year_released: Option<String>,

    /// Full review text; only a prefix is ever shown.
    #[serde(default)]
    pub review: String,
}

impl Album {
    #[must_use]
    pub fn new(
        album_id: impl Into<AlbumId>,
        artist: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            album_id: album_id.into(),
            artist: artist.into(),
            title: title.into(),
            genre: String::new(),
            year_released: None,
            review: String::new(),
        }
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    #[must_use]
    pub fn with_year_released(mut self, year: impl Into<String>) -> Self {
        self.year_released = Some(year.into());
        self
    }

    #[must_use]
    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.review = review.into();
        self
    }
}
