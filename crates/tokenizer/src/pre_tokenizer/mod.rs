//! Pre-tokenization.
//!
//! Text is cut into chunks before BPE runs; merges never cross a chunk
//! boundary. No normalization is applied, since decoding must reproduce the
//! input byte for byte.

pub mod split;

pub use split::{Chunks, Splitter, GPT2_SPLIT_PATTERN};
