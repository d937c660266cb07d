//! Byte-level BPE encoding (GPT-2 style).
//!
//! This module implements the merge loop over a single pre-tokenized chunk and
//! the reverse path from token IDs to bytes. Splitting text into chunks is the
//! caller's job; merges never cross the boundary of the slice they are given.

use crate::core::tables::BpeTables;
use crate::error::{Result, TokenizerError};
use std::sync::Arc;

/// Byte-level BPE encoder over a shared, validated table set.
///
/// This encoder:
/// 1. Converts a chunk to UTF-8 bytes
/// 2. Maps each byte to its single-symbol token
/// 3. Repeatedly merges every occurrence of the lowest-ranked adjacent pair
#[derive(Debug, Clone)]
pub struct ByteLevelEncoder {
    tables: Arc<BpeTables>,
}

impl ByteLevelEncoder {
    /// Create a new byte-level encoder.
    pub fn new(tables: Arc<BpeTables>) -> Self {
        Self { tables }
    }

    /// The tables this encoder runs on.
    #[inline]
    pub fn tables(&self) -> &Arc<BpeTables> {
        &self.tables
    }

    /// Encode one chunk into token IDs.
    pub fn encode_chunk(&self, chunk: &str) -> Vec<u32> {
        let mut ids = Vec::with_capacity(chunk.len());
        self.encode_chunk_into(chunk, &mut ids);
        ids
    }

    /// Encode one chunk, appending its token IDs to `out`.
    pub fn encode_chunk_into(&self, chunk: &str, out: &mut Vec<u32>) {
        let mut symbols: Vec<u32> = chunk.bytes().map(|b| self.tables.byte_id(b)).collect();
        self.apply_bpe_merges(&mut symbols);
        out.extend_from_slice(&symbols);
    }

    /// Apply BPE merge rules to a sequence of symbols.
    ///
    /// Each round picks the adjacent pair with the lowest rank (leftmost on a
    /// tie, which can only be another occurrence of the same pair) and
    /// rewrites every non-overlapping occurrence of it, scanning left to right.
    fn apply_bpe_merges(&self, symbols: &mut Vec<u32>) {
        let merges = self.tables.merges();

        while symbols.len() >= 2 {
            let best = symbols
                .windows(2)
                .filter_map(|w| {
                    let pair = (w[0], w[1]);
                    merges.get(pair).map(|(rank, new_id)| (rank, pair, new_id))
                })
                .min_by_key(|&(rank, _, _)| rank);

            let Some((_, pair, new_id)) = best else {
                break;
            };

            let mut read = 0;
            let mut write = 0;
            while read < symbols.len() {
                if read + 1 < symbols.len() && (symbols[read], symbols[read + 1]) == pair {
                    symbols[write] = new_id;
                    read += 2;
                } else {
                    symbols[write] = symbols[read];
                    read += 1;
                }
                write += 1;
            }
            symbols.truncate(write);
        }
    }

    /// Token strings (in the byte alphabet) for `ids`.
    pub fn id_to_symbols(&self, ids: &[u32]) -> Result<Vec<&str>> {
        let vocab = self.tables.vocab();
        ids.iter()
            .map(|&id| vocab.get_token(id).ok_or(TokenizerError::UnknownTokenId(id)))
            .collect()
    }

    /// Decode token IDs to the raw bytes they stand for.
    pub fn decode_bytes(&self, ids: &[u32]) -> Result<Vec<u8>> {
        let vocab = self.tables.vocab();
        let byte_map = self.tables.byte_map();
        let mut bytes = Vec::with_capacity(ids.len() * 4);

        for &id in ids {
            let token = vocab
                .get_token(id)
                .ok_or(TokenizerError::UnknownTokenId(id))?;

            // Each character in the token represents a byte
            if !byte_map.decode_into(token, &mut bytes) {
                return Err(TokenizerError::MalformedTable(format!(
                    "token {:?} (ID {}) is not spelled in the byte alphabet",
                    token, id
                )));
            }
        }

        Ok(bytes)
    }

    /// Decode token IDs back to text.
    ///
    /// Fails with an input error if an ID is unknown or the bytes are not
    /// valid UTF-8 (possible when a caller splits a multi-byte character).
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let bytes = self.decode_bytes(ids)?;
        String::from_utf8(bytes).map_err(|e| TokenizerError::InvalidUtf8 {
            valid_up_to: e.utf8_error().valid_up_to(),
        })
    }

    /// Decode token IDs, replacing invalid UTF-8 with U+FFFD.
    pub fn decode_lossy(&self, ids: &[u32]) -> Result<String> {
        let bytes = self.decode_bytes(ids)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vocab::Vocabulary;
    use crate::encoding::ByteMap;
    use crate::ErrorKind;

    /// Byte symbols plus a handful of merges over "hello" and "aaaa".
    fn encoder(extra: &[(&str, &str)]) -> ByteLevelEncoder {
        let map = ByteMap::get();
        let mut vocab =
            Vocabulary::from_entries((0..=255u8).map(|b| (map.char_for(b).to_string(), b as u32)))
                .unwrap();
        for (left, right) in extra {
            vocab.add_token(&format!("{}{}", left, right)).unwrap();
        }
        let tables = BpeTables::from_symbol_pairs(vocab, extra.iter().copied()).unwrap();
        ByteLevelEncoder::new(Arc::new(tables))
    }

    fn symbols(encoder: &ByteLevelEncoder, chunk: &str) -> Vec<String> {
        let ids = encoder.encode_chunk(chunk);
        encoder
            .id_to_symbols(&ids)
            .unwrap()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_no_merges_is_one_id_per_byte() {
        let encoder = encoder(&[]);
        assert_eq!(encoder.encode_chunk("ab"), vec![97, 98]);
        assert_eq!(encoder.encode_chunk("é").len(), 2);
        assert!(encoder.encode_chunk("").is_empty());
    }

    #[test]
    fn test_lowest_rank_wins() {
        let encoder = encoder(&[("l", "l"), ("e", "l"), ("h", "e"), ("he", "ll"), ("hell", "o")]);
        // (l,l) outranks (e,l), so "ell" never forms
        assert_eq!(symbols(&encoder, "hello"), vec!["hello"]);
        assert_eq!(symbols(&encoder, "yell"), vec!["y", "e", "ll"]);
    }

    #[test]
    fn test_all_occurrences_merge_left_to_right() {
        let encoder = encoder(&[("a", "a")]);
        assert_eq!(symbols(&encoder, "aaa"), vec!["aa", "a"]);
        assert_eq!(symbols(&encoder, "aaaa"), vec!["aa", "aa"]);

        let encoder = encoder_with_aaaa();
        assert_eq!(symbols(&encoder, "aaaaa"), vec!["aaaa", "a"]);
    }

    fn encoder_with_aaaa() -> ByteLevelEncoder {
        encoder(&[("a", "a"), ("aa", "aa")])
    }

    #[test]
    fn test_space_symbol() {
        let encoder = encoder(&[("Ġ", "w")]);
        assert_eq!(symbols(&encoder, " w"), vec!["Ġw"]);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let encoder = encoder(&[("l", "l"), ("h", "e")]);
        for text in ["Hello, world!", "", "naïve café 🎉", "\u{0}\t\r\n", "lllll"] {
            let ids = encoder.encode_chunk(text);
            assert_eq!(encoder.decode(&ids).unwrap(), text);
        }
    }

    #[test]
    fn test_unknown_id_is_input_error() {
        let encoder = encoder(&[]);
        let err = encoder.decode(&[104, 1_000_000]).unwrap_err();
        assert!(matches!(err, TokenizerError::UnknownTokenId(1_000_000)));
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_split_multibyte_character() {
        let encoder = encoder(&[]);
        let ids = encoder.encode_chunk("é");
        let err = encoder.decode(&ids[..1]).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidUtf8 { valid_up_to: 0 }));
        assert_eq!(encoder.decode_lossy(&ids[..1]).unwrap(), "\u{FFFD}");
        assert_eq!(encoder.decode_bytes(&ids[..1]).unwrap(), vec![0xC3]);
    }
}
