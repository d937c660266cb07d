//! bytepair-tokenizer - GPT-2 / GPT-3 byte-level BPE tokenizer
//!
//! This crate wraps the tables and merge loop of `bytepair-core` into a
//! ready-to-use handle: GPT-2 pre-tokenization, asset loading and saving,
//! batch encoding, an optional chunk cache and prompt budgeting.
//!
//! # Example
//!
//! ```
//! use bytepair_tokenizer::{PromptBudget, Tokenizer};
//!
//! // GPT-2 tables shipped with the crate; `.data_dir(..)` loads others
//! let tokenizer = Tokenizer::builder().cache_capacity(4096).build()?;
//!
//! let ids = tokenizer.encode("Hello, world!");
//! assert_eq!(ids, vec![15496, 11, 995, 0]);
//! assert_eq!(tokenizer.decode(&ids)?, "Hello, world!");
//!
//! PromptBudget::gpt3().reserve(256).check(&tokenizer, "My name is Fulano")?;
//! # Ok::<(), bytepair_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use bytepair_core::{BpeTables, ByteMap, ErrorKind, Result, TokenizerError, Vocabulary};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{TableSource, Tokenizer, TokenizerBuilder, TokenizerConfig};

// IO/Serialization
pub mod io;
pub use io::{ModelFormat, SerializedTables, TableLoader, TableSaver};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::Splitter;

// Utilities
pub mod utils;
pub use utils::{CacheStats, EncodingCache};

// Embedded GPT-2 asset
pub mod gpt2;

pub mod budget;
pub use budget::PromptBudget;

pub mod shared;

#[cfg(test)]
pub(crate) mod fixtures;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
