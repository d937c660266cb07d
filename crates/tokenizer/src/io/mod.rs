//! Reading and writing the vocabulary and merge assets.
//!
//! Tables can come from the GPT-2 `encoder.json` + `vocab.bpe` pair or from a
//! single versioned bundle; both go through the same integrity checks.

pub mod format;
pub mod load;
pub mod save;

pub use format::{
    ModelFormat, SerializedTables, BUNDLE_FILE, BUNDLE_FORMAT_VERSION, ENCODER_FILES,
    MERGES_FILES, MERGES_HEADER,
};
pub use load::TableLoader;
pub use save::TableSaver;
