//! Count command implementation.

use clap::Parser;

/// Count command arguments.
#[derive(Parser, Debug)]
pub struct CountCommand {
    /// Text to count ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Fail if the text does not fit this context window
    #[arg(long, value_name = "TOKENS")]
    pub context_window: Option<usize>,

    /// Tokens to keep free for the completion
    #[arg(long, value_name = "TOKENS", default_value_t = 0, requires = "context_window")]
    pub reserve: usize,
}

use super::{read_input, TableArgs};
use anyhow::Result as AnyhowResult;
use bytepair_tokenizer::{PromptBudget, Tokenizer};
use std::io::{self, Read, Write};

pub fn run(cmd: CountCommand, tables: &TableArgs) -> AnyhowResult<()> {
    let tokenizer = tables.load()?;
    execute(cmd, &tokenizer, io::stdin().lock(), &mut io::stdout().lock())
}

pub fn execute(
    cmd: CountCommand,
    tokenizer: &Tokenizer,
    stdin: impl Read,
    out: &mut impl Write,
) -> AnyhowResult<()> {
    let text = read_input(cmd.input, stdin)?;

    match cmd.context_window {
        Some(window) => {
            let budget = PromptBudget::new(window).reserve(cmd.reserve);
            let tokens = budget.check(tokenizer, &text)?;
            writeln!(out, "{} ({} remaining)", tokens, budget.limit() - tokens)?;
        }
        None => writeln!(out, "{}", tokenizer.count(&text))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use bytepair_tokenizer::TokenizerError;

    fn count(input: &str, context_window: Option<usize>, reserve: usize) -> AnyhowResult<String> {
        let (_dir, tables) = fixtures::data_dir();
        let tokenizer = tables.load()?;
        let cmd = CountCommand {
            input: input.to_string(),
            context_window,
            reserve,
        };
        let mut out = Vec::new();
        execute(cmd, &tokenizer, io::empty(), &mut out)?;
        Ok(fixtures::output(out))
    }

    #[test]
    fn test_count() {
        assert_eq!(count("My name is Fulano", None, 0).unwrap(), "5\n");
        assert_eq!(count("", None, 0).unwrap(), "0\n");
    }

    #[test]
    fn test_count_within_context_window() {
        assert_eq!(count("Hello, world!", Some(10), 2).unwrap(), "4 (4 remaining)\n");
        assert_eq!(count("Hello, world!", Some(4), 0).unwrap(), "4 (0 remaining)\n");
    }

    #[test]
    fn test_count_context_window_overflow() {
        let err = count("One plus one equals two", Some(6), 2).unwrap_err();
        match err.downcast_ref::<TokenizerError>() {
            Some(TokenizerError::PromptTooLong { tokens, limit }) => {
                assert_eq!((*tokens, *limit), (5, 4));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
