//! Affirmation model

use serde::{Deserialize, Serialize};

/// Identifier of the placeholder shown when no affirmations are available
pub const FALLBACK_ID: &str = "fallback";

/// Text of the placeholder shown when no affirmations are available
pub const FALLBACK_TEXT: &str = "You are enough.";

/// A single affirmation shown to the user
///
/// Two affirmations with the same `id` and `text` are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Affirmation {
    /// Stable identifier assigned by the source
    pub id: String,
    /// Display text
    pub text: String,
}

impl Affirmation {
    /// Create a new affirmation
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// The placeholder used when the in-memory list is empty
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(FALLBACK_ID, FALLBACK_TEXT)
    }

    /// Check if this is the placeholder affirmation
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.id == FALLBACK_ID
    }
}

/// Encode a list of affirmations as the cached JSON snapshot
pub fn encode_snapshot(affirmations: &[Affirmation]) -> serde_json::Result<String> {
    serde_json::to_string(affirmations)
}

/// Decode a cached JSON snapshot, preserving order
pub fn decode_snapshot(raw: &str) -> serde_json::Result<Vec<Affirmation>> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_affirmation_json_shape() {
        let affirmation = Affirmation::new("42", "Test text");
        let json = serde_json::to_string(&affirmation).unwrap();
        assert_eq!(json, r#"{"id":"42","text":"Test text"}"#);

        let decoded: Affirmation = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.id, "42");
        assert_eq!(decoded.text, "Test text");
    }

    #[test]
    fn test_affirmation_set_deduplicates_equal_entries() {
        let a = Affirmation::new("1", "Hello");
        let b = Affirmation::new("1", "Hello");
        let c = Affirmation::new("2", "World");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Affirmation> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let list = vec![
            Affirmation::new("t3", "Third"),
            Affirmation::new("t1", "First"),
            Affirmation::new("t2", "Second"),
        ];

        let raw = encode_snapshot(&list).unwrap();
        assert_eq!(decode_snapshot(&raw).unwrap(), list);
    }

    #[test]
    fn test_decode_snapshot_rejects_garbage() {
        assert!(decode_snapshot("not json").is_err());
        assert!(decode_snapshot(r#"{"id":"1"}"#).is_err());
    }

    #[test]
    fn test_fallback() {
        let fallback = Affirmation::fallback();
        assert_eq!(fallback.id, "fallback");
        assert_eq!(fallback.text, "You are enough.");
        assert!(fallback.is_fallback());
        assert!(!Affirmation::new("1", "x").is_fallback());
    }
}
