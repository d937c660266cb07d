//! Bytepair-core - Core byte-level BPE implementation
//!
//! This crate provides the data structures and the merge algorithm behind
//! GPT-2/GPT-3 style byte-level byte-pair encoding.
//!
//! # Features
//!
//! - Vocabulary storage using `AHashMap` and compact strings
//! - Merge rules keyed by ID pairs, each caching the ID it merges into
//! - Load-time integrity checks so encoding can never fail
//! - Two error classes: integrity (unusable tables) and input (bad caller data)
//!
//! # Example
//!
//! ```rust
//! use bytepair_core::{BpeTables, ByteLevelEncoder, ByteMap, Vocabulary};
//! use std::sync::Arc;
//!
//! let map = ByteMap::get();
//! let mut vocab = Vocabulary::from_entries(
//!     (0..=255u8).map(|b| (map.char_for(b).to_string(), u32::from(b))),
//! )?;
//! vocab.add_token("hi")?;
//!
//! let tables = BpeTables::from_symbol_pairs(vocab, [("h", "i")])?;
//! let encoder = ByteLevelEncoder::new(Arc::new(tables));
//! assert_eq!(encoder.encode_chunk("hi"), vec![256]);
//! assert_eq!(encoder.decode(&[256])?, "hi");
//! # Ok::<(), bytepair_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{ErrorKind, Result, TokenizerError};

// Vocabulary and merge tables
pub mod core;
pub use core::{BpeTables, MergeMap, MergeRules, Pair, Vocab, VocabR, Vocabulary};

// Byte-level encoding
pub mod encoding;
pub use encoding::{ByteLevelEncoder, ByteMap};
