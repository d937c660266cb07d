//! Encode command implementation.

use clap::Parser;

/// Encode command arguments.
#[derive(Parser, Debug)]
pub struct EncodeCommand {
    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

use super::{read_input, TableArgs};
use anyhow::{Context, Result as AnyhowResult};
use bytepair_tokenizer::Tokenizer;
use std::io::{self, Read, Write};

pub fn run(cmd: EncodeCommand, tables: &TableArgs) -> AnyhowResult<()> {
    let tokenizer = tables.load()?;
    execute(cmd, &tokenizer, io::stdin().lock(), &mut io::stdout().lock())
}

pub fn execute(
    cmd: EncodeCommand,
    tokenizer: &Tokenizer,
    stdin: impl Read,
    out: &mut impl Write,
) -> AnyhowResult<()> {
    let input_text = read_input(cmd.input, stdin)?;

    let ids = tokenizer.encode(&input_text);

    let ids_str: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    let output = ids_str.join(" ");

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output).with_context(|| format!("failed to write {}", path))?;
            writeln!(out, "Encoded {} tokens to {}", ids.len(), path)?;
        }
        None => {
            writeln!(out, "{}", output)?;
        }
    }

    Ok(())
}
