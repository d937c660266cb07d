//! Small GPT-2 shaped table set for unit tests.
//!
//! The merges spell out whole words left to right, so the sample sentences
//! encode to the same token counts as under the real GPT-2 tables.

use crate::io::TableSaver;
use crate::Tokenizer;
use bytepair_core::{BpeTables, ByteMap, Vocabulary};
use std::path::Path;
use std::sync::Arc;

/// Merge rules in rank order.
pub(crate) const MERGES: &[(&str, &str)] = &[
    ("H", "e"),
    ("He", "l"),
    ("Hel", "l"),
    ("Hell", "o"),
    ("Ġ", "w"),
    ("Ġw", "o"),
    ("Ġwo", "r"),
    ("Ġwor", "l"),
    ("Ġworl", "d"),
    ("M", "y"),
    ("Ġ", "n"),
    ("Ġn", "a"),
    ("Ġna", "m"),
    ("Ġnam", "e"),
    ("Ġ", "i"),
    ("Ġi", "s"),
    ("Ġ", "F"),
    ("ĠF", "u"),
    ("ĠFu", "l"),
    ("a", "n"),
    ("an", "o"),
    ("O", "n"),
    ("On", "e"),
    ("Ġ", "p"),
    ("Ġp", "l"),
    ("Ġpl", "u"),
    ("Ġplu", "s"),
    ("Ġ", "o"),
    ("Ġo", "n"),
    ("Ġon", "e"),
    ("Ġ", "e"),
    ("Ġe", "q"),
    ("Ġeq", "u"),
    ("Ġequ", "a"),
    ("Ġequa", "l"),
    ("Ġequal", "s"),
    ("Ġ", "t"),
    ("Ġt", "w"),
    ("Ġtw", "o"),
];

/// Special token appended after the merged tokens.
pub(crate) const END_OF_TEXT: &str = "<|endoftext|>";

/// Byte symbols at IDs 0..=255, merged tokens after them in rank order.
pub(crate) fn tables() -> BpeTables {
    let map = ByteMap::get();
    let mut vocab =
        Vocabulary::from_entries((0..=255u8).map(|b| (map.char_for(b).to_string(), b as u32)))
            .unwrap();
    for (left, right) in MERGES {
        vocab.add_token(&format!("{}{}", left, right)).unwrap();
    }
    vocab.add_token(END_OF_TEXT).unwrap();

    BpeTables::from_symbol_pairs(vocab, MERGES.iter().copied()).unwrap()
}

pub(crate) fn tokenizer() -> Tokenizer {
    Tokenizer::from_tables(Arc::new(tables())).unwrap()
}

/// Write `encoder.json` and `vocab.bpe` into `dir`.
pub(crate) fn write_gpt2_files(dir: &Path) {
    TableSaver::new(&tables()).save_gpt2(dir).unwrap();
}
