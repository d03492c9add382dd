//! Text helpers for display fields.

/// Return the prefix of `text` holding at most `max_chars` characters.
///
/// Counts Unicode scalar values, not bytes, so a multi-byte character is
/// never split. Text at or under the limit is returned unchanged.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
