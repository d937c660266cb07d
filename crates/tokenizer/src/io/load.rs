//! Load functionality for table assets.
//!
//! Every loader ends in [`BpeTables::from_symbol_pairs`], so whatever the
//! source, the result has passed the same integrity checks.

use super::format::{
    first_existing, ModelFormat, SerializedTables, BUNDLE_FILE, BUNDLE_FORMAT_VERSION,
    ENCODER_FILES, MERGES_FILES,
};
use bytepair_core::{BpeTables, Result, TokenizerError, Vocabulary};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Table loader - reads vocabulary and merge assets from disk.
pub struct TableLoader;

impl TableLoader {
    /// Load from a data directory.
    ///
    /// Uses `tokenizer.json` if present, otherwise the first existing
    /// encoder file (`encoder.json`, `vocab.json`) together with the first
    /// existing merges file (`vocab.bpe`, `merges.txt`).
    pub fn load_dir(dir: &Path) -> Result<BpeTables> {
        match ModelFormat::detect(dir) {
            Some(ModelFormat::Bundle) => {
                if first_existing(dir, &ENCODER_FILES).is_some() {
                    warn!(
                        "{} found in {}, ignoring GPT-2 files next to it",
                        BUNDLE_FILE,
                        dir.display()
                    );
                }
                Self::load_bundle(&dir.join(BUNDLE_FILE))
            }
            _ => {
                let encoder = Self::find(dir, &ENCODER_FILES)?;
                let merges = Self::find(dir, &MERGES_FILES)?;
                Self::load_gpt2(&encoder, &merges)
            }
        }
    }

    /// Load from a GPT-2 style `encoder.json` + `vocab.bpe` pair.
    pub fn load_gpt2(encoder_path: &Path, merges_path: &Path) -> Result<BpeTables> {
        debug!(
            "loading GPT-2 tables from {} and {}",
            encoder_path.display(),
            merges_path.display()
        );

        let encoder_json = std::fs::read_to_string(encoder_path)
            .map_err(|e| TokenizerError::io(encoder_path, e))?;
        let merges_text = std::fs::read_to_string(merges_path)
            .map_err(|e| TokenizerError::io(merges_path, e))?;

        let tables = Self::from_gpt2_str(&encoder_json, &merges_text)?;
        info!(
            "loaded {} tokens and {} merge rules from {}",
            tables.vocab().len(),
            tables.merges().len(),
            merges_path.display()
        );
        Ok(tables)
    }

    /// Validate GPT-2 style tables held in memory: the `encoder.json` text
    /// and the `vocab.bpe` text.
    pub fn from_gpt2_str(encoder_json: &str, merges_text: &str) -> Result<BpeTables> {
        let entries: HashMap<String, u32> = serde_json::from_str(encoder_json)?;
        let vocab = Vocabulary::from_entries(entries)?;
        let pairs = Self::parse_merges(merges_text)?;
        BpeTables::from_symbol_pairs(vocab, pairs)
    }

    /// Load from a single-file bundle.
    pub fn load_bundle(path: &Path) -> Result<BpeTables> {
        debug!("loading table bundle from {}", path.display());

        let file = File::open(path).map_err(|e| TokenizerError::io(path, e))?;
        let bundle: SerializedTables = serde_json::from_reader(BufReader::new(file))?;
        let tables = Self::from_bundle(bundle)?;

        info!(
            "loaded {} tokens and {} merge rules from {}",
            tables.vocab().len(),
            tables.merges().len(),
            path.display()
        );
        Ok(tables)
    }

    /// Validate an in-memory bundle.
    pub fn from_bundle(bundle: SerializedTables) -> Result<BpeTables> {
        if bundle.version != BUNDLE_FORMAT_VERSION {
            return Err(TokenizerError::UnsupportedVersion {
                found: bundle.version,
                expected: BUNDLE_FORMAT_VERSION.to_string(),
            });
        }

        let vocab = Vocabulary::from_entries(bundle.vocab)?;
        BpeTables::from_symbol_pairs(vocab, bundle.merges)
    }

    /// Parse merge-file text into ordered `(left, right)` pairs.
    ///
    /// A leading `#version` line and blank lines are skipped; any other line
    /// must hold exactly two whitespace-separated symbols.
    pub fn parse_merges(text: &str) -> Result<Vec<(&str, &str)>> {
        let mut pairs = Vec::new();

        for (line_num, line) in text.lines().enumerate() {
            if line_num == 0 && line.starts_with("#version") {
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(left), Some(right), None) => pairs.push((left, right)),
                _ => {
                    return Err(TokenizerError::MalformedTable(format!(
                        "invalid merge format at line {}: {:?}",
                        line_num + 1,
                        line
                    )))
                }
            }
        }

        Ok(pairs)
    }

    fn find(dir: &Path, names: &[&str]) -> Result<PathBuf> {
        first_existing(dir, names).ok_or_else(|| {
            TokenizerError::io(
                dir,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("none of {} found", names.join(", ")),
                ),
            )
        })
    }
}
