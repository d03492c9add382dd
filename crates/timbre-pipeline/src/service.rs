//! The vibe search service: validate, embed, retrieve.

use std::sync::Arc;

use timbre_core::{AlbumMatch, VibeQuery};
use timbre_search::SearchEngine;

use crate::embed::Embedder;
use crate::error::SearchError;

/// Answers vibe queries against a loaded catalog.
///
/// The engine is shared; clone the `Arc` to serve several callers from
/// the same catalog.
#[derive(Debug)]
pub struct VibeSearch<E> {
    engine: Arc<SearchEngine>,
    embedder: E,
}

impl<E: Embedder> VibeSearch<E> {
    pub fn new(engine: Arc<SearchEngine>, embedder: E) -> Self {
        Self { engine, embedder }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Run a query end to end.
    ///
    /// Empty queries and out-of-range result counts are rejected before
    /// the embedder is called.
    pub async fn search(&self, query: &VibeQuery) -> Result<Vec<AlbumMatch>, SearchError> {
        query.validate().map_err(SearchError::Query)?;

        let text = query.text();
        log::info!("Searching for \"{}\" (top {})", text, query.top_k);

        let vector = self.embedder.embed(&text).await?;
        let matches = self
            .engine
            .retrieve(&vector, query.top_k)
            .map_err(SearchError::Retrieve)?;

        log::info!("Found {} matches for \"{}\"", matches.len(), text);
        Ok(matches)
    }
}
