//! Format definitions for table assets.
//!
//! Two layouts are understood:
//! - the GPT-2 pair: `encoder.json` (token -> ID object) next to `vocab.bpe`
//!   (one `left right` merge per line after a `#version` header). The
//!   HuggingFace names `vocab.json` / `merges.txt` work too.
//! - a single versioned `tokenizer.json` bundle.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Version tag written into, and required from, bundle files.
pub const BUNDLE_FORMAT_VERSION: &str = "1";

/// File name of the single-file bundle inside a data directory.
pub const BUNDLE_FILE: &str = "tokenizer.json";

/// Accepted file names for the token -> ID table, in lookup order.
pub const ENCODER_FILES: [&str; 2] = ["encoder.json", "vocab.json"];

/// Accepted file names for the merge list, in lookup order.
pub const MERGES_FILES: [&str; 2] = ["vocab.bpe", "merges.txt"];

/// Header line written at the top of merge files.
pub const MERGES_HEADER: &str = "#version: 0.2";

/// Asset layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// `encoder.json` + `vocab.bpe`
    Gpt2,
    /// Single `tokenizer.json`
    Bundle,
}

impl ModelFormat {
    /// Detect the layout of a data directory. A bundle wins over a GPT-2 pair.
    pub fn detect(dir: &Path) -> Option<ModelFormat> {
        if dir.join(BUNDLE_FILE).is_file() {
            Some(ModelFormat::Bundle)
        } else if first_existing(dir, &ENCODER_FILES).is_some()
            && first_existing(dir, &MERGES_FILES).is_some()
        {
            Some(ModelFormat::Gpt2)
        } else {
            None
        }
    }
}

/// First of `names` that exists as a file inside `dir`.
pub(crate) fn first_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Single-file bundle layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedTables {
    /// Format version, must equal [`BUNDLE_FORMAT_VERSION`]
    pub version: String,
    /// Vocabulary (token -> ID mapping)
    pub vocab: BTreeMap<String, u32>,
    /// Merge rules, highest priority first
    pub merges: Vec<(String, String)>,
}

/// Serializes `(id, token)` entries as a JSON object in the given order,
/// which keeps `encoder.json` files sorted by ID like the originals.
pub(crate) struct OrderedVocab<'a>(pub &'a [(u32, &'a str)]);

impl Serialize for OrderedVocab<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, token) in self.0 {
            map.serialize_entry(token, id)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_json_shape() {
        let json = r#"{"version":"1","vocab":{"a":0,"b":1,"ab":2},"merges":[["a","b"]]}"#;
        let bundle: SerializedTables = serde_json::from_str(json).unwrap();

        assert_eq!(bundle.version, BUNDLE_FORMAT_VERSION);
        assert_eq!(bundle.vocab["ab"], 2);
        assert_eq!(bundle.merges, vec![("a".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_detect() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ModelFormat::detect(dir.path()), None);

        std::fs::write(dir.path().join("vocab.json"), "{}").unwrap();
        assert_eq!(ModelFormat::detect(dir.path()), None);

        std::fs::write(dir.path().join("merges.txt"), "").unwrap();
        assert_eq!(ModelFormat::detect(dir.path()), Some(ModelFormat::Gpt2));

        std::fs::write(dir.path().join(BUNDLE_FILE), "{}").unwrap();
        assert_eq!(ModelFormat::detect(dir.path()), Some(ModelFormat::Bundle));
    }

    #[test]
    fn test_ordered_vocab_keeps_id_order() {
        let entries = [(0, "z"), (1, "a")];
        let json = serde_json::to_string(&OrderedVocab(&entries)).unwrap();
        assert_eq!(json, r#"{"z":0,"a":1}"#);
    }
}
