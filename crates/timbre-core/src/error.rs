use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The catalog matrix and metadata are inconsistent or malformed.
    ///
    /// Raised once while building an engine; an engine is never handed out
    /// in this state.
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    /// The query vector or result count is unusable.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("empty query: describe the vibe you want")]
    EmptyQuery,
}

impl Error {
    /// Returns `true` when the caller can fix the problem by changing
    /// their input and retrying.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidQuery(_) | Self::EmptyQuery)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
