//! Core domain model for timbre.
//!
//! This crate defines the album catalog records, the ranked result
//! records handed back to callers, vibe query composition, and the
//! error taxonomy shared by the search engine and its collaborators.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod query;
pub mod text;

pub use error::{Error, Result};
pub use model::{Album, AlbumId, AlbumMatch, REVIEW_DISPLAY_CHARS};
pub use query::{VibeQuery, DEFAULT_TOP_K, MAX_TOP_K};
