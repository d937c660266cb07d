//! Prompt length budgeting.
//!
//! Completion endpoints reject prompts that leave no room in the context
//! window. [`PromptBudget`] lets callers check a prompt before sending it.

use crate::Tokenizer;
use bytepair_core::{Result, TokenizerError};

/// Context window of GPT-3 completion models.
pub const GPT3_CONTEXT_WINDOW: usize = 2048;

/// Context window of Codex models.
pub const CODEX_CONTEXT_WINDOW: usize = 4096;

/// Token budget for a single prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptBudget {
    /// Total tokens the model accepts (prompt plus completion)
    pub context_window: usize,
    /// Tokens kept free for the completion
    pub reserved_for_completion: usize,
}

impl PromptBudget {
    /// A budget with nothing reserved for the completion.
    pub fn new(context_window: usize) -> Self {
        Self {
            context_window,
            reserved_for_completion: 0,
        }
    }

    pub fn gpt3() -> Self {
        Self::new(GPT3_CONTEXT_WINDOW)
    }

    pub fn codex() -> Self {
        Self::new(CODEX_CONTEXT_WINDOW)
    }

    /// Keep `tokens` free for the completion.
    pub fn reserve(mut self, tokens: usize) -> Self {
        self.reserved_for_completion = tokens;
        self
    }

    /// Largest prompt, in tokens, that fits.
    pub fn limit(&self) -> usize {
        self.context_window.saturating_sub(self.reserved_for_completion)
    }

    /// Token count of `prompt`, or `PromptTooLong` if it exceeds the limit.
    pub fn check(&self, tokenizer: &Tokenizer, prompt: &str) -> Result<usize> {
        let tokens = tokenizer.count(prompt);
        let limit = self.limit();
        if tokens > limit {
            return Err(TokenizerError::PromptTooLong { tokens, limit });
        }
        Ok(tokens)
    }

    /// Tokens still available after `prompt` (0 if it does not fit).
    pub fn remaining(&self, tokenizer: &Tokenizer, prompt: &str) -> usize {
        self.limit().saturating_sub(tokenizer.count(prompt))
    }
}
