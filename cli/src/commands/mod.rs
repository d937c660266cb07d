//! CLI commands for the bytepair tokenizer.

pub mod benchmark;
pub mod bundle;
pub mod count;
pub mod decode;
pub mod encode;
pub mod inspect;

pub use benchmark::BenchmarkCommand;
pub use bundle::BundleCommand;
pub use count::CountCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use inspect::InspectCommand;

use anyhow::{Context, Result};
use bytepair_tokenizer::tokenizer::{CACHE_CAPACITY_ENV, DATA_DIR_ENV};
use bytepair_tokenizer::Tokenizer;
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

/// Where the tables live, shared by every command.
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Directory holding encoder.json + vocab.bpe or a tokenizer.json bundle
    /// (the embedded GPT-2 tables if unset)
    #[arg(long, global = true, env = DATA_DIR_ENV, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Chunk cache capacity (0 disables the cache)
    #[arg(long, global = true, env = CACHE_CAPACITY_ENV, default_value_t = 0)]
    pub cache_capacity: usize,
}

impl TableArgs {
    /// Build the tokenizer these arguments describe.
    pub fn load(&self) -> Result<Tokenizer> {
        let builder = Tokenizer::builder().cache_capacity(self.cache_capacity);
        match &self.data_dir {
            Some(dir) => builder.data_dir(dir).build().with_context(|| {
                format!("failed to load tokenizer tables from {}", dir.display())
            }),
            None => builder
                .gpt2()
                .build()
                .context("failed to load the embedded GPT-2 tables"),
        }
    }
}

/// Read the text argument, or `stdin` if it is `-`.
pub fn read_input(input: String, mut stdin: impl Read) -> Result<String> {
    if input != "-" {
        return Ok(input);
    }

    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}
