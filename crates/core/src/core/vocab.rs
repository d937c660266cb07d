//! Vocabulary storage and lookup.
//!
//! This module provides efficient vocabulary storage using AHashMap for fast lookups
//! and CompactString for memory-efficient string storage. Most GPT-2 tokens are short
//! enough to stay inline.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> token string
pub type VocabR = AHashMap<u32, CompactString>;

/// Vocabulary with forward and reverse mappings.
///
/// The two maps are kept bijective: every ID has exactly one token string and
/// every token string exactly one ID.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    vocab: Vocab,
    /// Reverse mapping: ID -> token string
    vocab_r: VocabR,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            vocab_r: VocabR::with_capacity(capacity),
        }
    }

    /// Build a vocabulary from `(token, id)` pairs.
    ///
    /// Fails if an ID or a token string appears twice.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let entries = entries.into_iter();
        let mut vocab = Self::with_capacity(entries.size_hint().0);
        for (token, id) in entries {
            vocab.add_token_with_id(token.as_ref(), id)?;
        }
        Ok(vocab)
    }

    /// Add a token with the next free ID (one past the current maximum).
    ///
    /// Returns the existing ID if the token is already present.
    pub fn add_token(&mut self, token: &str) -> Result<u32> {
        if let Some(&id) = self.vocab.get(token) {
            return Ok(id);
        }

        let id = self.next_id();
        self.add_token_with_id(token, id)?;
        Ok(id)
    }

    /// Add a token with a specific ID.
    ///
    /// Returns an error if the ID is already taken or the token already has a
    /// different ID.
    pub fn add_token_with_id(&mut self, token: &str, id: u32) -> Result<()> {
        if let Some(existing) = self.vocab_r.get(&id) {
            return Err(TokenizerError::MalformedTable(format!(
                "token ID {} assigned to both {:?} and {:?}",
                id, existing, token
            )));
        }
        if let Some(&existing) = self.vocab.get(token) {
            return Err(TokenizerError::MalformedTable(format!(
                "token {:?} listed with IDs {} and {}",
                token, existing, id
            )));
        }

        let token = CompactString::new(token);
        self.vocab_r.insert(id, token.clone());
        self.vocab.insert(token, id);

        Ok(())
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(&id).map(|s| s.as_str())
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// Highest assigned ID, if any.
    pub fn max_id(&self) -> Option<u32> {
        self.vocab_r.keys().copied().max()
    }

    /// All `(id, token)` entries in ascending ID order.
    pub fn entries_by_id(&self) -> Vec<(u32, &str)> {
        let mut entries: Vec<(u32, &str)> = self
            .vocab_r
            .iter()
            .map(|(&id, token)| (id, token.as_str()))
            .collect();
        entries.sort_unstable_by_key(|&(id, _)| id);
        entries
    }

    /// Iterate over `(token, id)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.vocab.iter().map(|(token, &id)| (token.as_str(), id))
    }

    fn next_id(&self) -> u32 {
        self.max_id().map_or(0, |id| id + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_token() {
        let mut vocab = Vocabulary::new();
        let id1 = vocab.add_token("hello").unwrap();
        let id2 = vocab.add_token("world").unwrap();

        assert_eq!(id1, 0);
        assert_eq!(id2, 1);
        assert_eq!(vocab.get_id("hello"), Some(0));
        assert_eq!(vocab.get_id("world"), Some(1));
        assert_eq!(vocab.get_token(0), Some("hello"));
        assert_eq!(vocab.get_token(1), Some("world"));
    }

    #[test]
    fn test_add_duplicate_token() {
        let mut vocab = Vocabulary::new();
        let id1 = vocab.add_token("hello").unwrap();
        let id2 = vocab.add_token("hello").unwrap();

        assert_eq!(id1, id2);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_add_token_with_id() {
        let mut vocab = Vocabulary::new();
        vocab.add_token_with_id("hello", 5).unwrap();
        vocab.add_token_with_id("world", 10).unwrap();

        assert_eq!(vocab.get_id("hello"), Some(5));
        assert_eq!(vocab.get_token(10), Some("world"));
        // next free ID continues after the highest one
        assert_eq!(vocab.add_token("again").unwrap(), 11);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Vocabulary::from_entries([("a", 0), ("b", 0)]).unwrap_err();
        assert!(matches!(err, TokenizerError::MalformedTable(_)));
    }

    #[test]
    fn test_token_with_two_ids_rejected() {
        let mut vocab = Vocabulary::new();
        vocab.add_token_with_id("a", 0).unwrap();
        assert!(vocab.add_token_with_id("a", 1).is_err());
    }

    #[test]
    fn test_entries_by_id() {
        let vocab = Vocabulary::from_entries([("c", 2), ("a", 0), ("b", 1)]).unwrap();
        assert_eq!(vocab.entries_by_id(), vec![(0, "a"), (1, "b"), (2, "c")]);
        assert_eq!(vocab.max_id(), Some(2));
    }
}
