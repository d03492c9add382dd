//! Error types for catalog loading, embedding, and the query service.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the catalog from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The embedding matrix could not be read as a 2-D float array.
    #[error("failed to read embeddings {}: {source}", .path.display())]
    Npy {
        path: PathBuf,
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    /// A CSV file could not be read or a row did not match the expected columns.
    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The matrix and metadata loaded but do not form a valid catalog.
    #[error(transparent)]
    Integrity(#[from] timbre_core::Error),
}

/// Convenience alias for loader results.
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Errors that can occur while turning query text into a vector.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// The embedding service answered with a non-success status.
    #[error("HTTP error from embedding service (status {status}): {message}")]
    Http { status: u16, message: String },

    /// The embedding service returned a rate-limit response.
    #[error("rate limited by embedding service")]
    RateLimited,

    /// The response could not be parsed or held no usable vector.
    #[error("parse error from embedding service: {message}")]
    Parse { message: String },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl EmbedError {
    /// Returns `true` when the error is transient and the request may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Parse { .. } => false,
        }
    }
}

/// Convenience alias for embedding results.
pub type EmbedResult<T> = std::result::Result<T, EmbedError>;

/// Errors from a complete vibe search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query was rejected before anything was embedded.
    #[error(transparent)]
    Query(timbre_core::Error),

    /// The embedding service failed.
    #[error("embedding failed: {0}")]
    Embed(#[from] EmbedError),

    /// The engine rejected the embedded query, e.g. a model whose output
    /// dimension does not match the catalog.
    #[error("retrieval failed: {0}")]
    Retrieve(timbre_core::Error),
}

impl SearchError {
    /// Returns `true` when the failure is down to the user's input rather
    /// than the search machinery.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Query(e) if e.is_user_error())
    }
}
