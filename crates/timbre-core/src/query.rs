//! Vibe query composition.
//!
//! A query is free text describing a mood, optionally extended with
//! descriptor words picked from the vocabulary. The composed text is what
//! gets embedded.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Result count used when the caller does not ask for one.
pub const DEFAULT_TOP_K: usize = 5;

/// Largest result count a caller may request.
pub const MAX_TOP_K: usize = 100;

/// A user's request: vibe text, extra descriptors, and how many albums to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibeQuery {
    pub vibe: String,

    #[serde(default)]
    pub extras: Vec<String>,

    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

const fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl VibeQuery {
    #[must_use]
    pub fn new(vibe: impl Into<String>) -> Self {
        Self {
            vibe: vibe.into(),
            extras: Vec::new(),
            top_k: DEFAULT_TOP_K,
        }
    }

    #[must_use]
    pub fn with_extras<I, S>(mut self, extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extras.extend(extras.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// The text to embed: the vibe followed by every extra, space-separated
    /// and trimmed.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = self.vibe.clone();
        for extra in &self.extras {
            text.push(' ');
            text.push_str(extra);
        }
        text.trim().to_string()
    }

    /// Reject queries that should never reach the embedder.
    pub fn validate(&self) -> Result<()> {
        if self.text().is_empty() {
            return Err(Error::EmptyQuery);
        }
        if !(1..=MAX_TOP_K).contains(&self.top_k) {
            return Err(Error::InvalidQuery(format!(
                "top_k must be between 1 and {MAX_TOP_K}, got {}",
                self.top_k
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_extras() {
        let query = VibeQuery::new("rainy sunday").with_extras(["melancholic", "jazz"]);
        assert_eq!(query.text(), "rainy sunday melancholic jazz");
    }

    #[test]
    fn test_text_trims() {
        let query = VibeQuery::new("   ").with_extras(["dreamy"]);
        assert_eq!(query.text(), "dreamy");
    }

    #[test]
    fn test_validate_empty() {
        let query = VibeQuery::new(" \t ");
        assert!(matches!(query.validate(), Err(Error::EmptyQuery)));
    }

    #[test]
    fn test_validate_empty_extras() {
        let query = VibeQuery::new("").with_extras(["", " "]);
        assert!(matches!(query.validate(), Err(Error::EmptyQuery)));
    }

    #[test]
    fn test_validate_top_k_bounds() {
        assert!(VibeQuery::new("folk").with_top_k(1).validate().is_ok());
        assert!(VibeQuery::new("folk").with_top_k(MAX_TOP_K).validate().is_ok());

        let zero = VibeQuery::new("folk").with_top_k(0).validate();
        assert!(matches!(zero, Err(Error::InvalidQuery(_))));

        let too_many = VibeQuery::new("folk").with_top_k(MAX_TOP_K + 1).validate();
        assert!(matches!(too_many, Err(Error::InvalidQuery(_))));
    }

    #[test]
    fn test_default_top_k() {
        assert_eq!(VibeQuery::new("x").top_k, DEFAULT_TOP_K);
        let query: VibeQuery = serde_json::from_str(r#"{"vibe": "x"}"#).unwrap();
        assert_eq!(query.top_k, DEFAULT_TOP_K);
        assert!(query.extras.is_empty());
    }
}
