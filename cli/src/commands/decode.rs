//! Decode command implementation.

use clap::Parser;

/// Decode command arguments.
#[derive(Parser, Debug)]
pub struct DecodeCommand {
    /// Token IDs to decode (comma- or space-separated)
    #[arg(short, long)]
    pub tokens: String,

    /// Replace invalid UTF-8 with U+FFFD instead of failing
    #[arg(long, default_value_t = false)]
    pub lossy: bool,
}

use super::TableArgs;
use anyhow::{Context, Result as AnyhowResult};
use bytepair_tokenizer::Tokenizer;
use std::io::{self, Write};

pub fn run(cmd: DecodeCommand, tables: &TableArgs) -> AnyhowResult<()> {
    let tokenizer = tables.load()?;
    execute(cmd, &tokenizer, &mut io::stdout().lock())
}

pub fn execute(
    cmd: DecodeCommand,
    tokenizer: &Tokenizer,
    out: &mut impl Write,
) -> AnyhowResult<()> {
    let ids = parse_token_ids(&cmd.tokens)?;

    let text = if cmd.lossy {
        tokenizer.decode_lossy(&ids)
    } else {
        tokenizer.decode(&ids)
    }
    .context("failed to decode token IDs")?;

    writeln!(out, "{}", text)?;

    Ok(())
}

fn parse_token_ids(tokens: &str) -> AnyhowResult<Vec<u32>> {
    tokens
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("invalid token ID {:?}", s))
        })
        .collect()
}
