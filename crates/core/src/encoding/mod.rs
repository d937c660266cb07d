//! Byte-level encoding for BPE tokenization.
//!
//! - `byte_map`: the reversible byte <-> printable character alphabet
//! - `byte_level`: the merge loop over one chunk, and decoding back to bytes

pub mod byte_level;
pub mod byte_map;

pub use byte_level::ByteLevelEncoder;
pub use byte_map::ByteMap;
