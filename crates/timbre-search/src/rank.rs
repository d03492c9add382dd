//! Top-K selection.
//!
//! Results are ordered by score descending. Equal scores fall back to the
//! catalog index ascending, so the same scores always produce the same
//! ordering.

use std::cmp::Ordering;

/// A catalog row and its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    /// Row index into the catalog.
    pub index: usize,
    pub score: f32,
}

fn rank_order(a: &Scored, b: &Scored) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.index.cmp(&b.index))
}

/// Select the `k` highest scores in rank order.
///
/// Returns `min(k, scores.len())` entries. Selection is partial when `k`
/// is smaller than the catalog, then the selected prefix is sorted under
/// the same order, so the output equals a full sort truncated to `k`.
pub fn top_k(scores: &[f32], k: usize) -> Vec<Scored> {
    let mut scored: Vec<Scored> = scores
        .iter()
        .enumerate()
        .map(|(index, &score)| Scored { index, score })
        .collect();

    let k = k.min(scored.len());
    if k == 0 {
        return Vec::new();
    }
    if k < scored.len() {
        scored.select_nth_unstable_by(k - 1, rank_order);
        scored.truncate(k);
    }
    scored.sort_unstable_by(rank_order);
    scored
}
