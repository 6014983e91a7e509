//! Error types for the unformat engine.
//!
//! Only template compilation and configuration loading can fail. A structural
//! non-match is not an error: [`crate::CompiledTemplate::unformat`] returns
//! `None` for it, and the coercion helpers return `None` on parse failure.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UnformatError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnformatError {
    /// A placeholder contains a character the grammar does not allow at that point,
    /// such as a non-numeric index (`{a}`) or an empty one (`{}`).
    #[error("Unexpected character {found:?} in placeholder at offset {offset}, expected {expected}")]
    UnexpectedCharacter {
        offset: usize,
        found: char,
        expected: &'static str,
    },

    #[error("Invalid alignment span at offset {offset}: {reason}")]
    InvalidSpan { offset: usize, reason: String },

    #[error("Invalid character {found:?} in format specification at offset {offset}")]
    InvalidFormatCharacter { offset: usize, found: char },

    #[error("Unterminated placeholder starting at offset {offset}")]
    UnterminatedPlaceholder { offset: usize },

    #[error("Unbalanced closing brace at offset {offset}, use '}}}}' for a literal brace")]
    UnbalancedBrace { offset: usize },

    #[error("Placeholder index {index} at offset {offset} exceeds the limit of {limit}")]
    IndexOutOfRange {
        offset: usize,
        index: String,
        limit: usize,
    },

    #[error("Template length {length} exceeds the limit of {limit} bytes")]
    TemplateTooLong { length: usize, limit: usize },

    #[error("Compiled pattern rejected: {0}")]
    PatternTooLarge(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl UnformatError {
    /// Byte offset in the template where the error was detected, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            UnformatError::UnexpectedCharacter { offset, .. }
            | UnformatError::InvalidSpan { offset, .. }
            | UnformatError::InvalidFormatCharacter { offset, .. }
            | UnformatError::UnterminatedPlaceholder { offset }
            | UnformatError::UnbalancedBrace { offset }
            | UnformatError::IndexOutOfRange { offset, .. } => Some(*offset),
            UnformatError::TemplateTooLong { .. }
            | UnformatError::PatternTooLarge(_)
            | UnformatError::InvalidConfig(_) => None,
        }
    }

    /// True for errors caused by the template text itself.
    pub fn is_template_error(&self) -> bool {
        !matches!(self, UnformatError::InvalidConfig(_))
    }
}

impl From<serde_yaml::Error> for UnformatError {
    fn from(err: serde_yaml::Error) -> Self {
        UnformatError::InvalidConfig(err.to_string())
    }
}

impl From<serde_json::Error> for UnformatError {
    fn from(err: serde_json::Error) -> Self {
        UnformatError::InvalidConfig(err.to_string())
    }
}
