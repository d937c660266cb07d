//! Error types for the BPE tokenizer library.
//!
//! Every error belongs to one of two classes, reported by
//! [`TokenizerError::kind`]: integrity errors mean the table set is unusable,
//! input errors mean the caller handed in something invalid.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a [`TokenizerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The vocabulary, merge table or configuration is corrupt or unreadable.
    Integrity,
    /// The caller supplied an invalid value (unknown ID, over-long prompt).
    Input,
}

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Vocabulary or merge data is inconsistent
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// Invalid merge rule
    #[error("Invalid merge rule #{rank}: {reason}")]
    InvalidMerge { rank: usize, reason: String },

    /// Asset written by an incompatible format version
    #[error("Unsupported table format version {found} (expected {expected})")]
    UnsupportedVersion { found: String, expected: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown token ID
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),

    /// Decoded bytes are not valid UTF-8
    #[error("Token sequence does not decode to valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },

    /// Prompt does not fit in the configured token budget
    #[error("Prompt is {tokens} tokens, limit is {limit}")]
    PromptTooLong { tokens: usize, limit: usize },
}

impl TokenizerError {
    /// Which of the two error classes this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenizerError::UnknownTokenId(_)
            | TokenizerError::InvalidUtf8 { .. }
            | TokenizerError::PromptTooLong { .. } => ErrorKind::Input,
            TokenizerError::Io { .. }
            | TokenizerError::Json(_)
            | TokenizerError::MalformedTable(_)
            | TokenizerError::InvalidMerge { .. }
            | TokenizerError::UnsupportedVersion { .. }
            | TokenizerError::InvalidConfig(_) => ErrorKind::Integrity,
        }
    }

    /// Shorthand for `kind() == ErrorKind::Input`.
    #[inline]
    pub fn is_input_error(&self) -> bool {
        self.kind() == ErrorKind::Input
    }

    /// Build an [`TokenizerError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        TokenizerError::Io {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(TokenizerError::UnknownTokenId(7).kind(), ErrorKind::Input);
        assert_eq!(
            TokenizerError::InvalidUtf8 { valid_up_to: 0 }.kind(),
            ErrorKind::Input
        );
        assert_eq!(
            TokenizerError::MalformedTable("dup".into()).kind(),
            ErrorKind::Integrity
        );
        assert_eq!(
            TokenizerError::io("x", std::io::Error::other("boom")).kind(),
            ErrorKind::Integrity
        );
    }

    #[test]
    fn test_display() {
        let err = TokenizerError::InvalidMerge {
            rank: 3,
            reason: "expected two symbols".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid merge rule #3: expected two symbols"
        );
        assert!(TokenizerError::PromptTooLong {
            tokens: 10,
            limit: 5
        }
        .is_input_error());
    }
}
