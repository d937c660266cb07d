//! Inspect command implementation.

use clap::Parser;

/// Inspect command arguments.
#[derive(Parser, Debug)]
pub struct InspectCommand {
    /// Text to inspect ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Print the pre-tokenization chunks instead of tokens
    #[arg(long, default_value_t = false)]
    pub chunks: bool,
}

use super::{read_input, TableArgs};
use anyhow::Result as AnyhowResult;
use bytepair_tokenizer::Tokenizer;
use std::io::{self, Read, Write};

pub fn run(cmd: InspectCommand, tables: &TableArgs) -> AnyhowResult<()> {
    let tokenizer = tables.load()?;
    execute(cmd, &tokenizer, io::stdin().lock(), &mut io::stdout().lock())
}

pub fn execute(
    cmd: InspectCommand,
    tokenizer: &Tokenizer,
    stdin: impl Read,
    out: &mut impl Write,
) -> AnyhowResult<()> {
    let text = read_input(cmd.input, stdin)?;

    if cmd.chunks {
        for chunk in tokenizer.chunks(&text) {
            writeln!(out, "{:?}", chunk)?;
        }
        return Ok(());
    }

    let ids = tokenizer.encode(&text);
    for (id, symbol) in ids.iter().zip(tokenizer.symbols(&ids)?) {
        writeln!(out, "{}\t{}", id, symbol)?;
    }

    Ok(())
}
