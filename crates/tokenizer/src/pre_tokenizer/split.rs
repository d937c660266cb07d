//! Text splitting for pre-tokenization.
//!
//! GPT-2 splits text with
//! `'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+`.
//! The `regex` crate has no look-around, so [`Splitter`] matches the pattern
//! without the `\s+(?!\S)` branch and then hands the last character of a
//! whitespace run back to the following chunk whenever the run is followed by
//! non-whitespace. That is exactly where the look-ahead branch would have
//! stopped. A lone whitespace character is left alone: the look-ahead fails on
//! it and the plain `\s+` branch takes it.

use bytepair_core::{Result, TokenizerError};
use regex::{Match, Regex};

/// GPT-2 pre-tokenization pattern minus the `\s+(?!\S)` branch.
pub const GPT2_SPLIT_PATTERN: &str =
    r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+";

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone)]
pub struct Splitter {
    pattern: Regex,
    /// Emulate the `\s+(?!\S)` look-ahead (GPT-2 only)
    give_back_whitespace: bool,
}

impl Splitter {
    /// Create a splitter from a custom pattern. Text the pattern does not
    /// match comes out as chunks of its own.
    pub(crate) fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            TokenizerError::InvalidConfig(format!("invalid pre-tokenization pattern: {}", e))
        })?;
        Ok(Self {
            pattern,
            give_back_whitespace: false,
        })
    }

    /// Create the GPT-2 splitter.
    pub fn gpt2() -> Result<Self> {
        Ok(Self {
            give_back_whitespace: true,
            ..Self::new(GPT2_SPLIT_PATTERN)?
        })
    }

    /// Split text into chunks. Concatenating the chunks yields `text`.
    pub fn split<'s, 't>(&'s self, text: &'t str) -> Chunks<'s, 't> {
        Chunks {
            splitter: self,
            text,
            pos: 0,
        }
    }
}

/// Iterator over the chunks of a text, see [`Splitter::split`].
#[derive(Debug)]
pub struct Chunks<'s, 't> {
    splitter: &'s Splitter,
    text: &'t str,
    pos: usize,
}

impl<'s, 't> Chunks<'s, 't> {
    /// Next non-empty match at or after `pos`.
    fn next_match(&self) -> Option<Match<'t>> {
        let mut at = self.pos;
        while at < self.text.len() {
            let found = self.splitter.pattern.find_at(self.text, at)?;
            if !found.is_empty() {
                return Some(found);
            }
            let step = self.text[found.end()..].chars().next().map_or(1, char::len_utf8);
            at = found.end() + step;
        }
        None
    }
}

impl<'s, 't> Iterator for Chunks<'s, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        if self.pos >= self.text.len() {
            return None;
        }

        let start = self.pos;
        let found = match self.next_match() {
            Some(found) if found.start() == start => found,
            // unmatched text up to the next match, or to the end
            other => {
                self.pos = other.map_or(self.text.len(), |m| m.start());
                return Some(&self.text[start..self.pos]);
            }
        };

        let mut end = found.end();
        if self.splitter.give_back_whitespace
            && end < self.text.len()
            && found.as_str().chars().all(char::is_whitespace)
        {
            // \s+ is greedy, so the next character is not whitespace
            if let Some((last, _)) = found.as_str().char_indices().last() {
                if last > 0 {
                    end = start + last;
                }
            }
        }

        self.pos = end;
        Some(&self.text[start..end])
    }
}
