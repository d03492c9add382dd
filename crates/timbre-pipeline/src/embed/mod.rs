//! Query text embedding.
//!
//! The engine only ever sees vectors. An [`Embedder`] turns query text
//! into a vector of the catalog's dimension, using the same model the
//! catalog embeddings were built with.

pub mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::EmbedResult;

pub use http::HttpEmbedder;

/// Turns text into an embedding vector.
///
/// Implementations must be deterministic for identical input within a
/// session.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> EmbedResult<Vec<f32>>;
}

#[async_trait]
impl<T: Embedder + ?Sized> Embedder for Arc<T> {
    async fn embed(&self, text: &str) -> EmbedResult<Vec<f32>> {
        (**self).embed(text).await
    }
}
