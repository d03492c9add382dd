//! The similarity retrieval engine.

use std::collections::HashSet;

use ndarray::Array2;
use timbre_core::{Album, AlbumMatch, Error, Result};

use crate::normalize::{normalize_query, normalize_rows};
use crate::rank;

/// An immutable, in-memory album catalog ready to answer similarity queries.
///
/// Row `i` of the embedding matrix belongs to `albums[i]`. Rows are
/// L2-normalized once at construction; nothing is mutated afterwards, so
/// `retrieve` may be called concurrently through a shared reference.
#[derive(Debug)]
pub struct SearchEngine {
    embeddings: Array2<f32>,
    albums: Vec<Album>,
    zero_vector_rows: usize,
}

impl SearchEngine {
    /// Validate and normalize a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataIntegrity`] when the embedding dimension is
    /// zero, the row counts of the matrix and the album table differ, an
    /// embedding holds a NaN or infinite value, or two albums share an id.
    pub fn new(mut embeddings: Array2<f32>, albums: Vec<Album>) -> Result<Self> {
        let (rows, dimension) = embeddings.dim();

        if dimension == 0 {
            return Err(Error::DataIntegrity(
                "embedding dimension is zero".to_string(),
            ));
        }

        if rows != albums.len() {
            return Err(Error::DataIntegrity(format!(
                "embedding matrix has {rows} rows but metadata has {} albums",
                albums.len()
            )));
        }

        if let Some(((row, col), value)) = embeddings
            .indexed_iter()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(Error::DataIntegrity(format!(
                "non-finite value {value} at row {row}, column {col}"
            )));
        }

        let mut seen = HashSet::with_capacity(albums.len());
        if let Some(duplicate) = albums.iter().find(|album| !seen.insert(album.album_id)) {
            return Err(Error::DataIntegrity(format!(
                "duplicate album_id {}",
                duplicate.album_id
            )));
        }

        let zero_vector_rows = normalize_rows(&mut embeddings);
        if zero_vector_rows > 0 {
            log::warn!(
                "{} of {} catalog embeddings are zero vectors and will score 0 against every query",
                zero_vector_rows,
                rows
            );
        }

        log::info!(
            "Search engine ready: {} albums, dimension {}",
            rows,
            dimension
        );

        Ok(Self {
            embeddings,
            albums,
            zero_vector_rows,
        })
    }

    /// Rank the catalog against `query` and return the best `top_k` albums.
    ///
    /// Scores are cosine similarities, highest first; equal scores keep
    /// catalog order. At most `min(top_k, len())` matches are returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuery`] when `top_k` is zero, the query
    /// length differs from [`dimension`](Self::dimension), or the query
    /// holds a NaN or infinite value.
    pub fn retrieve(&self, query: &[f32], top_k: usize) -> Result<Vec<AlbumMatch>> {
        if top_k == 0 {
            return Err(Error::InvalidQuery(
                "top_k must be at least 1".to_string(),
            ));
        }

        if query.len() != self.dimension() {
            return Err(Error::InvalidQuery(format!(
                "expected a {}-dimensional query vector, got {}",
                self.dimension(),
                query.len()
            )));
        }

        if let Some(position) = query.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidQuery(format!(
                "non-finite value at query position {position}"
            )));
        }

        let query = normalize_query(query);
        let scores = self.embeddings.dot(&query).to_vec();

        let matches = rank::top_k(&scores, top_k)
            .into_iter()
            .enumerate()
            .map(|(position, scored)| {
                AlbumMatch::from_album(position + 1, scored.score, &self.albums[scored.index])
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Retrieved {} of {} albums (top_k = {})",
            matches.len(),
            self.len(),
            top_k
        );

        Ok(matches)
    }

    /// Number of albums in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.albums.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// Embedding dimension every query must match.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.embeddings.ncols()
    }

    #[must_use]
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// Number of catalog rows whose embedding was the zero vector.
    #[must_use]
    pub const fn zero_vector_rows(&self) -> usize {
        self.zero_vector_rows
    }
}
