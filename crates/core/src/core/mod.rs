//! Core BPE tables.
//!
//! This module contains the vocabulary, the merge rank table and the
//! validated table set that bundles them.

pub mod merges;
pub mod tables;
pub mod vocab;

pub use merges::{MergeMap, MergeRules, Pair};
pub use tables::BpeTables;
pub use vocab::{Vocab, VocabR, Vocabulary};
