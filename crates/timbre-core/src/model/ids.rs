use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an album in the catalog.
///
/// Stable for the lifetime of a loaded catalog; the metadata table
/// assigns one per artist/title pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AlbumId(u64);

impl AlbumId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for AlbumId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_album_id_display() {
        assert_eq!(AlbumId::new(42).to_string(), "42");
    }

    #[test]
    fn test_album_id_from_u64() {
        let id: AlbumId = 7.into();
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn test_album_id_serializes_as_integer() {
        let json = serde_json::to_string(&AlbumId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
