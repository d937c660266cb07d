//! GPT-2 reference tables shipped with the library.
//!
//! `data/encoder.json` and `data/vocab.bpe` are the r50k tables used by GPT-2
//! and the GPT-3 completion models. They are compiled into the crate and
//! parsed once per process on first use.

use crate::io::TableLoader;
use bytepair_core::{BpeTables, Result};
use log::debug;
use std::sync::{Arc, OnceLock};

/// Version tag of the embedded asset (the `vocab.bpe` header).
pub const ASSET_VERSION: &str = "0.2";

/// Embedded `encoder.json`.
pub const ENCODER_JSON: &str = include_str!("../data/encoder.json");

/// Embedded `vocab.bpe`.
pub const VOCAB_BPE: &str = include_str!("../data/vocab.bpe");

/// Number of tokens in the GPT-2 vocabulary.
pub const VOCAB_SIZE: usize = 50_257;

/// Number of merge rules in the GPT-2 merge list.
pub const MERGE_COUNT: usize = 50_000;

/// ID of `<|endoftext|>`.
pub const END_OF_TEXT_ID: u32 = 50_256;

static TABLES: OnceLock<Arc<BpeTables>> = OnceLock::new();

/// The validated GPT-2 tables.
///
/// Concurrent first calls may each parse the asset; all of them get the
/// instance that was stored first.
pub fn tables() -> Result<Arc<BpeTables>> {
    if let Some(tables) = TABLES.get() {
        return Ok(Arc::clone(tables));
    }

    debug!("parsing embedded GPT-2 tables (asset version {})", ASSET_VERSION);
    let tables = Arc::new(TableLoader::from_gpt2_str(ENCODER_JSON, VOCAB_BPE)?);
    Ok(Arc::clone(TABLES.get_or_init(|| tables)))
}
