//! Save functionality for table assets.
//!
//! Used to re-export a loaded table set, either as the GPT-2 file pair or as a
//! single versioned bundle.

use super::format::{
    ModelFormat, OrderedVocab, SerializedTables, BUNDLE_FORMAT_VERSION, ENCODER_FILES,
    MERGES_FILES, MERGES_HEADER,
};
use bytepair_core::{BpeTables, Result, TokenizerError};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Table saver - writes a validated table set to disk.
pub struct TableSaver<'a> {
    tables: &'a BpeTables,
}

impl<'a> TableSaver<'a> {
    /// Create a new table saver.
    pub fn new(tables: &'a BpeTables) -> Self {
        Self { tables }
    }

    /// Save in `format`. `path` is a directory for [`ModelFormat::Gpt2`] and
    /// a file for [`ModelFormat::Bundle`].
    pub fn save(&self, format: ModelFormat, path: &Path) -> Result<()> {
        match format {
            ModelFormat::Gpt2 => self.save_gpt2(path),
            ModelFormat::Bundle => self.save_bundle(path),
        }
    }

    /// Save as `encoder.json` + `vocab.bpe` inside `dir`.
    pub fn save_gpt2(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir).map_err(|e| TokenizerError::io(dir, e))?;

        let vocab_path = dir.join(ENCODER_FILES[0]);
        let entries = self.tables.vocab().entries_by_id();
        let file = File::create(&vocab_path).map_err(|e| TokenizerError::io(&vocab_path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &OrderedVocab(&entries))?;
        writer.flush().map_err(|e| TokenizerError::io(&vocab_path, e))?;

        let merges_path = dir.join(MERGES_FILES[0]);
        let file = File::create(&merges_path).map_err(|e| TokenizerError::io(&merges_path, e))?;
        let mut writer = BufWriter::new(file);
        let write_err = |e| TokenizerError::io(&merges_path, e);

        writeln!(writer, "{}", MERGES_HEADER).map_err(write_err)?;
        for (left, right) in self.symbol_pairs()? {
            writeln!(writer, "{} {}", left, right).map_err(write_err)?;
        }
        writer.flush().map_err(write_err)?;

        info!(
            "saved {} tokens and {} merge rules to {}",
            entries.len(),
            self.tables.merges().len(),
            dir.display()
        );
        Ok(())
    }

    /// Save as a single bundle file at `path`.
    pub fn save_bundle(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TokenizerError::io(parent, e))?;
        }

        let file = File::create(path).map_err(|e| TokenizerError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.to_bundle()?)?;
        writer.flush().map_err(|e| TokenizerError::io(path, e))?;

        info!("saved table bundle to {}", path.display());
        Ok(())
    }

    /// Serialize the tables to the bundle structure.
    pub fn to_bundle(&self) -> Result<SerializedTables> {
        let vocab = self
            .tables
            .vocab()
            .iter()
            .map(|(token, id)| (token.to_string(), id))
            .collect();

        let merges = self
            .symbol_pairs()?
            .into_iter()
            .map(|(left, right)| (left.to_string(), right.to_string()))
            .collect();

        Ok(SerializedTables {
            version: BUNDLE_FORMAT_VERSION.to_string(),
            vocab,
            merges,
        })
    }

    /// Merge rules as symbol pairs, highest priority first.
    fn symbol_pairs(&self) -> Result<Vec<(&'a str, &'a str)>> {
        let vocab = self.tables.vocab();
        self.tables
            .merges()
            .pairs_by_rank()
            .into_iter()
            .map(|(left, right)| {
                let symbol = |id| vocab.get_token(id).ok_or(TokenizerError::UnknownTokenId(id));
                Ok((symbol(left)?, symbol(right)?))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::io::TableLoader;

    #[test]
    fn test_gpt2_round_trip() {
        let tables = fixtures::tables();
        let dir = tempfile::tempdir().unwrap();
        TableSaver::new(&tables).save_gpt2(dir.path()).unwrap();

        let merges = std::fs::read_to_string(dir.path().join("vocab.bpe")).unwrap();
        assert!(merges.starts_with("#version: 0.2\n"));
        assert_eq!(merges.lines().nth(1), Some("H e"));

        let loaded = TableLoader::load_dir(dir.path()).unwrap();
        assert_eq!(loaded.vocab().entries_by_id(), tables.vocab().entries_by_id());
        assert_eq!(loaded.merges().pairs_by_rank(), tables.merges().pairs_by_rank());
    }

    #[test]
    fn test_bundle_round_trip() {
        let tables = fixtures::tables();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tokenizer.json");
        TableSaver::new(&tables).save_bundle(&path).unwrap();

        let loaded = TableLoader::load_bundle(&path).unwrap();
        assert_eq!(loaded.vocab().len(), tables.vocab().len());
        assert_eq!(loaded.merges().pairs_by_rank(), tables.merges().pairs_by_rank());

        // a directory holding the bundle loads through it
        let from_dir = TableLoader::load_dir(path.parent().unwrap()).unwrap();
        assert_eq!(from_dir.merges().len(), tables.merges().len());
    }

    #[test]
    fn test_save_by_format() {
        let tables = fixtures::tables();
        let dir = tempfile::tempdir().unwrap();
        let saver = TableSaver::new(&tables);

        saver.save(ModelFormat::Gpt2, dir.path()).unwrap();
        assert_eq!(ModelFormat::detect(dir.path()), Some(ModelFormat::Gpt2));

        saver
            .save(ModelFormat::Bundle, &dir.path().join("tokenizer.json"))
            .unwrap();
        assert_eq!(ModelFormat::detect(dir.path()), Some(ModelFormat::Bundle));
    }

    #[test]
    fn test_to_bundle() {
        let tables = fixtures::tables();
        let bundle = TableSaver::new(&tables).to_bundle().unwrap();

        assert_eq!(bundle.version, BUNDLE_FORMAT_VERSION);
        assert_eq!(bundle.vocab.len(), tables.vocab().len());
        assert_eq!(bundle.merges[0], ("H".to_string(), "e".to_string()));
    }
}
