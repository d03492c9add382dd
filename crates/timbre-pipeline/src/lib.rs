//! Catalog loading, query embedding and the vibe search service for timbre.
//!
//! Everything the retrieval engine treats as an external collaborator
//! lives here: configuration, reading the embedding matrix and metadata
//! from disk, the embedding service client, and the descriptor vocabulary.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod descriptors;
pub mod embed;
pub mod error;
pub mod loader;
pub mod service;

pub use config::Config;
pub use descriptors::{load_descriptors, DISPLAY_DESCRIPTORS, MAX_DESCRIPTORS};
pub use embed::{Embedder, HttpEmbedder};
pub use error::{EmbedError, EmbedResult, LoadError, LoadResult, SearchError};
pub use loader::{load_embeddings, load_engine, load_metadata, Catalog};
pub use service::VibeSearch;
