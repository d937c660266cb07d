//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` handle that ties the
//! validated tables, the GPT-2 pre-tokenizer and the optional chunk cache
//! together.

pub mod config;
pub use config::{
    TableSource, TokenizerConfig, CACHE_CAPACITY_ENV, DATA_DIR_ENV, DEFAULT_CACHE_CAPACITY,
};

use crate::gpt2;
use crate::pre_tokenizer::{Chunks, Splitter};
use crate::utils::{CacheStats, EncodingCache};
use bytepair_core::{BpeTables, ByteLevelEncoder, Result};
use log::info;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Builder for creating a tokenizer.
///
/// Unless another source is chosen, the tokenizer runs on the GPT-2 tables
/// shipped with the library.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    source: TableSource,
    cache_capacity: usize,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder over the embedded GPT-2 tables.
    pub fn new() -> Self {
        Self {
            source: TableSource::Gpt2,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Use the embedded GPT-2 tables.
    pub fn gpt2(mut self) -> Self {
        self.source = TableSource::Gpt2;
        self
    }

    /// Load tables from a data directory.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source = TableSource::Dir(dir.into());
        self
    }

    /// Load tables from an explicit `encoder.json` + `vocab.bpe` pair.
    pub fn gpt2_files(mut self, encoder: impl Into<PathBuf>, merges: impl Into<PathBuf>) -> Self {
        self.source = TableSource::Gpt2Files {
            encoder: encoder.into(),
            merges: merges.into(),
        };
        self
    }

    /// Load tables from a single-file bundle.
    pub fn bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = TableSource::Bundle(path.into());
        self
    }

    /// Use tables that are already in memory.
    pub fn tables(mut self, tables: impl Into<Arc<BpeTables>>) -> Self {
        self.source = TableSource::Tables(tables.into());
        self
    }

    /// Set the chunk cache capacity (0 disables the cache).
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        Tokenizer::from_config(TokenizerConfig {
            source: self.source,
            cache_capacity: self.cache_capacity,
        })
    }
}

/// Main tokenizer handle.
///
/// Cloning is cheap: clones share the tables and, if enabled, the cache.
/// `encode` and `count` cannot fail because every table check already ran
/// when the handle was built.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Merge loop and byte decode over the shared tables
    encoder: ByteLevelEncoder,
    /// GPT-2 pre-tokenizer
    splitter: Splitter,
    /// Chunk -> IDs memo, absent when the capacity is 0
    cache: Option<Arc<Mutex<EncodingCache>>>,
}

impl Tokenizer {
    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Create a tokenizer from a configuration.
    pub fn from_config(config: TokenizerConfig) -> Result<Self> {
        let tables = config.source.load()?;
        let tokenizer = Self::with_cache(tables, config.cache_capacity)?;

        info!(
            "tokenizer ready: {} tokens, {} merge rules, cache capacity {}",
            tokenizer.vocab_size(),
            tokenizer.tables().merges().len(),
            config.cache_capacity
        );
        Ok(tokenizer)
    }

    /// The GPT-2 / GPT-3 tokenizer over the tables shipped with the library.
    pub fn gpt2() -> Result<Self> {
        Self::from_tables(gpt2::tables()?)
    }

    /// Load a tokenizer from a data directory.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        Self::from_config(TokenizerConfig::new(TableSource::Dir(dir.to_path_buf())))
    }

    /// Load a tokenizer as configured by the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_config(TokenizerConfig::from_env()?)
    }

    /// Create a tokenizer over tables that are already validated.
    pub fn from_tables(tables: Arc<BpeTables>) -> Result<Self> {
        Self::with_cache(tables, DEFAULT_CACHE_CAPACITY)
    }

    fn with_cache(tables: Arc<BpeTables>, cache_capacity: usize) -> Result<Self> {
        let cache = (cache_capacity > 0)
            .then(|| Arc::new(Mutex::new(EncodingCache::with_capacity(cache_capacity))));

        Ok(Self {
            encoder: ByteLevelEncoder::new(tables),
            splitter: Splitter::gpt2()?,
            cache,
        })
    }

    /// Encode text to token IDs.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        let mut ids = Vec::with_capacity(text.len() / 3 + 1);
        for chunk in self.splitter.split(text) {
            self.encode_chunk_into(chunk, &mut ids);
        }
        ids
    }

    fn encode_chunk_into(&self, chunk: &str, out: &mut Vec<u32>) {
        let Some(cache) = &self.cache else {
            self.encoder.encode_chunk_into(chunk, out);
            return;
        };

        let hit = lock(cache).get(chunk);
        if let Some(ids) = hit {
            out.extend_from_slice(&ids);
            return;
        }

        // merge outside the lock so batch workers do not serialize
        let ids = self.encoder.encode_chunk(chunk);
        out.extend_from_slice(&ids);
        lock(cache).insert(chunk, ids);
    }

    /// Encode a batch of texts (parallelized).
    pub fn encode_batch<S>(&self, texts: &[S]) -> Vec<Vec<u32>>
    where
        S: AsRef<str> + Sync,
    {
        texts.par_iter().map(|text| self.encode(text.as_ref())).collect()
    }

    /// Number of tokens `text` encodes to.
    pub fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }

    /// Encode text and return the merged symbols instead of their IDs.
    ///
    /// `encode` only emits IDs present in the validated tables, so the lookup
    /// cannot miss; an error here means the tables were corrupted after load.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let ids = self.encode(text);
        let symbols = self.symbols(&ids)?;
        Ok(symbols.into_iter().map(str::to_owned).collect())
    }

    /// Token strings (in the byte alphabet) for `ids`. Unknown IDs are input
    /// errors.
    pub fn symbols(&self, ids: &[u32]) -> Result<Vec<&str>> {
        self.encoder.id_to_symbols(ids)
    }

    /// Split text into the chunks that are encoded independently.
    pub fn pre_tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.chunks(text).collect()
    }

    /// Iterate over the pre-tokenization chunks of `text`.
    pub fn chunks<'s, 't>(&'s self, text: &'t str) -> Chunks<'s, 't> {
        self.splitter.split(text)
    }

    /// Decode token IDs back to text.
    ///
    /// Unknown IDs and byte sequences that are not valid UTF-8 are input
    /// errors.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        self.encoder.decode(ids)
    }

    /// Decode token IDs, replacing invalid UTF-8 with U+FFFD.
    pub fn decode_lossy(&self, ids: &[u32]) -> Result<String> {
        self.encoder.decode_lossy(ids)
    }

    /// Decode token IDs to raw bytes.
    pub fn decode_bytes(&self, ids: &[u32]) -> Result<Vec<u8>> {
        self.encoder.decode_bytes(ids)
    }

    /// Token string for an ID.
    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.tables().vocab().get_token(id)
    }

    /// ID for a token string.
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.tables().vocab().get_id(token)
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.tables().vocab().len()
    }

    /// The shared tables.
    pub fn tables(&self) -> &Arc<BpeTables> {
        self.encoder.tables()
    }

    /// Chunk cache statistics, if the cache is enabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| lock(cache).stats())
    }
}

/// A poisoned cache only means another thread panicked mid-update; the
/// entries it holds are still complete.
fn lock(cache: &Mutex<EncodingCache>) -> MutexGuard<'_, EncodingCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}
