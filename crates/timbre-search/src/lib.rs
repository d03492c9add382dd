//! Vector search for timbre.
//!
//! Holds the L2-normalized album embedding matrix in memory and ranks
//! every album against a query embedding by cosine similarity. The
//! engine is built once, never mutated, and safe to share across threads.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod engine;
pub mod normalize;
pub mod rank;

pub use engine::SearchEngine;
pub use normalize::{normalize_query, normalize_rows, QUERY_NORM_EPSILON};
pub use rank::{top_k, Scored};
