//! The validated, immutable table set a tokenizer runs on.
//!
//! Construction performs every integrity check up front so the encoder can
//! treat a vocabulary miss as unreachable.

use crate::core::merges::MergeRules;
use crate::core::vocab::Vocabulary;
use crate::encoding::ByteMap;
use crate::error::{Result, TokenizerError};
use log::debug;

/// Vocabulary, merge ranks and byte alphabet, checked for mutual consistency.
#[derive(Debug, Clone)]
pub struct BpeTables {
    vocab: Vocabulary,
    merges: MergeRules,
    /// Token ID of each single-byte symbol
    byte_ids: [u32; 256],
}

impl BpeTables {
    /// Validate a vocabulary against an ordered list of merge pairs.
    pub fn from_symbol_pairs<I, L, R>(vocab: Vocabulary, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, R)>,
        L: AsRef<str>,
        R: AsRef<str>,
    {
        let merges = MergeRules::from_symbol_pairs(&vocab, pairs)?;
        Self::new(vocab, merges)
    }

    /// Validate already-resolved merge rules against `vocab`.
    ///
    /// Every token must be spelled in the byte alphabet, every byte needs its
    /// own single-symbol token, and every merge rule must point at existing IDs.
    pub fn new(vocab: Vocabulary, merges: MergeRules) -> Result<Self> {
        let byte_map = ByteMap::get();

        if let Some((token, id)) = vocab
            .iter()
            .find(|(token, _)| token.is_empty() || !byte_map.is_byte_symbol(token))
        {
            return Err(TokenizerError::MalformedTable(format!(
                "token {:?} (ID {}) is not spelled in the byte alphabet",
                token, id
            )));
        }

        let mut byte_ids = [0u32; 256];
        for byte in 0..=255u8 {
            let symbol = byte_map.char_for(byte).to_string();
            byte_ids[byte as usize] = vocab.get_id(&symbol).ok_or_else(|| {
                TokenizerError::MalformedTable(format!(
                    "byte {:#04x} has no vocabulary entry {:?}",
                    byte, symbol
                ))
            })?;
        }

        for pair in merges.pairs_by_rank() {
            let known = |id: u32| vocab.get_token(id).is_some();
            let resolves = merges.get(pair).is_some_and(|(_, new_id)| known(new_id));
            if !known(pair.0) || !known(pair.1) || !resolves {
                return Err(TokenizerError::MalformedTable(format!(
                    "merge rule {:?} references an ID outside the vocabulary",
                    pair
                )));
            }
        }

        debug!(
            "validated BPE tables: {} tokens, {} merge rules",
            vocab.len(),
            merges.len()
        );

        Ok(Self {
            vocab,
            merges,
            byte_ids,
        })
    }

    /// The vocabulary.
    #[inline]
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// The merge rules.
    #[inline]
    pub fn merges(&self) -> &MergeRules {
        &self.merges
    }

    /// Token ID of the single-byte symbol for `byte`.
    #[inline]
    pub fn byte_id(&self, byte: u8) -> u32 {
        self.byte_ids[byte as usize]
    }

    /// The shared byte alphabet.
    #[inline]
    pub fn byte_map(&self) -> &'static ByteMap {
        ByteMap::get()
    }
}
