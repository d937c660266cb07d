//! Bundle command implementation.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output layout.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BundleFormat {
    /// Single versioned tokenizer.json
    Bundle,
    /// encoder.json + vocab.bpe (OUTPUT is a directory)
    Gpt2,
}

/// Bundle command arguments.
#[derive(Parser, Debug)]
pub struct BundleCommand {
    /// Output path
    #[arg(short, long, default_value = "tokenizer.json")]
    pub output: PathBuf,

    /// Output layout
    #[arg(short, long, value_enum, default_value_t = BundleFormat::Bundle)]
    pub format: BundleFormat,
}

use super::TableArgs;
use anyhow::{Context, Result as AnyhowResult};
use bytepair_tokenizer::{ModelFormat, TableSaver, Tokenizer};
use std::io::{self, Write};

pub fn run(cmd: BundleCommand, tables: &TableArgs) -> AnyhowResult<()> {
    let tokenizer = tables.load()?;
    execute(cmd, &tokenizer, &mut io::stdout().lock())
}

pub fn execute(
    cmd: BundleCommand,
    tokenizer: &Tokenizer,
    out: &mut impl Write,
) -> AnyhowResult<()> {
    let format = match cmd.format {
        BundleFormat::Bundle => ModelFormat::Bundle,
        BundleFormat::Gpt2 => ModelFormat::Gpt2,
    };

    TableSaver::new(tokenizer.tables())
        .save(format, &cmd.output)
        .with_context(|| format!("failed to write {}", cmd.output.display()))?;

    writeln!(
        out,
        "Wrote {} tokens and {} merge rules to {}",
        tokenizer.vocab_size(),
        tokenizer.tables().merges().len(),
        cmd.output.display()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;

    #[test]
    fn test_bundle_loads_back() {
        let (dir, tables) = fixtures::data_dir();
        let tokenizer = tables.load().unwrap();
        let path = dir.path().join("out").join("tokenizer.json");
        let cmd = BundleCommand {
            output: path.clone(),
            format: BundleFormat::Bundle,
        };

        let mut out = Vec::new();
        execute(cmd, &tokenizer, &mut out).unwrap();
        assert!(fixtures::output(out).starts_with("Wrote 50257 tokens and 50000 merge rules"));

        let bundled = Tokenizer::builder().bundle(&path).build().unwrap();
        let text = "One plus one equals two";
        assert_eq!(bundled.encode(text), tokenizer.encode(text));
    }
}
