//! Merge rule management for BPE.
//!
//! Merge rules are stored using token IDs rather than strings for fast comparison.
//! Every rule caches the ID of the token its pair merges into, so the merge loop
//! never has to concatenate strings or consult the vocabulary.

use crate::core::vocab::Vocabulary;
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;

/// A pair of token IDs that can be merged.
pub type Pair = (u32, u32);

/// Merge rule mapping: pair -> (rank, new_token_id).
///
/// The rank indicates the priority of this merge rule (lower rank = higher priority).
/// The new_token_id is the ID of the token created by merging this pair.
pub type MergeMap = AHashMap<Pair, (u32, u32)>;

/// Collection of BPE merge rules with efficient lookup.
#[derive(Debug, Clone, Default)]
pub struct MergeRules {
    /// Merge rules: pair -> (rank, new_token_id)
    merges: MergeMap,
    /// Maximum rank (for validation and ordering)
    max_rank: u32,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            merges: MergeMap::with_capacity(capacity),
            max_rank: 0,
        }
    }

    /// Resolve an ordered list of `(left, right)` symbol pairs against `vocab`.
    ///
    /// The position in the list is the rank. Both symbols and their
    /// concatenation must be vocabulary tokens, and no pair may repeat.
    pub fn from_symbol_pairs<I, L, R>(vocab: &Vocabulary, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, R)>,
        L: AsRef<str>,
        R: AsRef<str>,
    {
        let pairs = pairs.into_iter();
        let mut rules = Self::with_capacity(pairs.size_hint().0);

        for (rank, (left, right)) in pairs.enumerate() {
            let (left, right) = (left.as_ref(), right.as_ref());
            let lookup = |symbol: &str| {
                vocab.get_id(symbol).ok_or_else(|| TokenizerError::InvalidMerge {
                    rank,
                    reason: format!("symbol {:?} is not in the vocabulary", symbol),
                })
            };

            let pair = (lookup(left)?, lookup(right)?);
            let merged = format!("{}{}", left, right);
            let new_id = vocab
                .get_id(&merged)
                .ok_or_else(|| TokenizerError::InvalidMerge {
                    rank,
                    reason: format!("merge result {:?} is not in the vocabulary", merged),
                })?;

            let rank = u32::try_from(rank).map_err(|_| {
                TokenizerError::MalformedTable("merge table exceeds u32::MAX entries".into())
            })?;
            if rules.get(pair).is_some() {
                return Err(TokenizerError::InvalidMerge {
                    rank: rank as usize,
                    reason: format!("pair ({:?}, {:?}) is listed twice", left, right),
                });
            }
            rules.add_merge(pair, rank, new_id);
        }

        Ok(rules)
    }

    /// Add a merge rule.
    ///
    /// # Arguments
    /// * `pair` - The pair of token IDs to merge
    /// * `rank` - The priority rank (lower = higher priority)
    /// * `new_token_id` - The ID of the token created by this merge
    pub fn add_merge(&mut self, pair: Pair, rank: u32, new_token_id: u32) {
        self.merges.insert(pair, (rank, new_token_id));
        self.max_rank = self.max_rank.max(rank);
    }

    /// Get the merge rule for a pair.
    ///
    /// Returns Some((rank, new_token_id)) if this pair should be merged,
    /// None otherwise.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<(u32, u32)> {
        self.merges.get(&pair).copied()
    }

    /// Rank of a pair, if it is a merge rule.
    #[inline]
    pub fn rank(&self, pair: Pair) -> Option<u32> {
        self.get(pair).map(|(rank, _)| rank)
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.merges.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// Highest rank in the table.
    #[inline]
    pub fn max_rank(&self) -> u32 {
        self.max_rank
    }

    /// Pairs in ascending rank order.
    pub fn pairs_by_rank(&self) -> Vec<Pair> {
        let mut ranked: Vec<(u32, Pair)> = self
            .merges
            .iter()
            .map(|(&pair, &(rank, _))| (rank, pair))
            .collect();
        ranked.sort_unstable_by_key(|&(rank, _)| rank);
        ranked.into_iter().map(|(_, pair)| pair).collect()
    }
}
