//! Board identity: the token that ties a board to a stored record.

use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Longest identifier accepted from a URL or a request.
const MAX_ID_LEN: usize = 128;

/// Opaque identifier of a board in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    /// Mints a fresh random identifier.
    #[instrument]
    pub fn mint() -> Self {
        let id = Self(Uuid::new_v4().simple().to_string());
        debug!(board_id = %id, "Minted board id");
        id
    }

    /// Accepts an identifier from outside (query string, request body).
    ///
    /// Returns `None` for empty, oversized or whitespace-containing input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let valid = !raw.is_empty()
            && raw.len() <= MAX_ID_LEN
            && !raw.chars().any(|c| c.is_whitespace() || c.is_control());
        valid.then(|| Self(raw.to_string()))
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether the current board is tied to a stored record.
///
/// Moves to `Bound` on the first successful save or load and only
/// returns to `Unbound` when the user starts a new board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdentityBinding {
    /// Board exists only locally.
    #[default]
    Unbound,
    /// Board is stored under this id.
    Bound(BoardId),
}

impl IdentityBinding {
    /// The bound id, if any.
    pub fn board_id(&self) -> Option<&BoardId> {
        match self {
            Self::Unbound => None,
            Self::Bound(id) => Some(id),
        }
    }

    /// True when bound.
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_ids_are_unique() {
        assert_ne!(BoardId::mint(), BoardId::mint());
    }

    #[test]
    fn test_minted_id_parses_back() {
        let id = BoardId::mint();
        assert_eq!(BoardId::parse(id.as_str()), Some(id));
    }

    #[test]
    fn test_parse_rejects_junk() {
        assert_eq!(BoardId::parse(""), None);
        assert_eq!(BoardId::parse("   "), None);
        assert_eq!(BoardId::parse("has space"), None);
        assert_eq!(BoardId::parse(&"x".repeat(MAX_ID_LEN + 1)), None);
    }

    #[test]
    fn test_parse_trims() {
        assert_eq!(BoardId::parse(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_binding_defaults_unbound() {
        let binding = IdentityBinding::default();
        assert!(!binding.is_bound());
        assert_eq!(binding.board_id(), None);
    }
}
