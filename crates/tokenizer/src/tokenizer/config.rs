//! Tokenizer configuration.
//!
//! A configuration names where the tables come from and how large the chunk
//! cache is. It can be assembled in code through [`TokenizerBuilder`] or read
//! from the environment. Without any table source the GPT-2 tables shipped
//! with the library are used.
//!
//! [`TokenizerBuilder`]: super::TokenizerBuilder

use crate::gpt2;
use crate::io::TableLoader;
use bytepair_core::{BpeTables, Result, TokenizerError};
use std::path::PathBuf;
use std::sync::Arc;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "BYTEPAIR_DATA_DIR";

/// Environment variable holding the chunk cache capacity.
pub const CACHE_CAPACITY_ENV: &str = "BYTEPAIR_CACHE_CAPACITY";

/// Default chunk cache capacity (0 disables the cache).
pub const DEFAULT_CACHE_CAPACITY: usize = 0;

/// Where the vocabulary and merge tables come from.
#[derive(Debug, Clone, Default)]
pub enum TableSource {
    /// GPT-2 tables embedded in the library
    #[default]
    Gpt2,
    /// Directory with a bundle or a GPT-2 file pair
    Dir(PathBuf),
    /// Explicit GPT-2 file pair
    Gpt2Files { encoder: PathBuf, merges: PathBuf },
    /// Single-file bundle
    Bundle(PathBuf),
    /// Tables already in memory
    Tables(Arc<BpeTables>),
}

impl TableSource {
    /// Load (or hand out) the validated tables.
    pub fn load(&self) -> Result<Arc<BpeTables>> {
        match self {
            TableSource::Gpt2 => gpt2::tables(),
            TableSource::Dir(dir) => TableLoader::load_dir(dir).map(Arc::new),
            TableSource::Gpt2Files { encoder, merges } => {
                TableLoader::load_gpt2(encoder, merges).map(Arc::new)
            }
            TableSource::Bundle(path) => TableLoader::load_bundle(path).map(Arc::new),
            TableSource::Tables(tables) => Ok(Arc::clone(tables)),
        }
    }
}

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Table source
    pub source: TableSource,
    /// Capacity for the chunk cache
    pub cache_capacity: usize,
}

impl TokenizerConfig {
    /// Configuration for `source` with the default cache capacity.
    pub fn new(source: TableSource) -> Self {
        Self {
            source,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Read the configuration from `BYTEPAIR_DATA_DIR` and
    /// `BYTEPAIR_CACHE_CAPACITY`. An unset data directory selects the
    /// embedded GPT-2 tables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_vars(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_env_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = match lookup(DATA_DIR_ENV) {
            Some(dir) if !dir.trim().is_empty() => TableSource::Dir(PathBuf::from(dir)),
            _ => TableSource::Gpt2,
        };

        let cache_capacity = match lookup(CACHE_CAPACITY_ENV) {
            Some(value) if !value.trim().is_empty() => {
                value.trim().parse::<usize>().map_err(|_| {
                    TokenizerError::InvalidConfig(format!(
                        "{} must be a non-negative integer, got {:?}",
                        CACHE_CAPACITY_ENV, value
                    ))
                })?
            }
            _ => DEFAULT_CACHE_CAPACITY,
        };

        Ok(Self {
            source,
            cache_capacity,
        })
    }
}
