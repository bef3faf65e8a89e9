//! Error types for lexing and parsing S-expression notations

use thiserror::Error;

use crate::lexer::SourceInfo;

/// Notation lexing/parsing errors
#[derive(Error, Debug, Clone)]
pub enum Error {
    // Parse errors
    /// Syntax error encountered during parsing
    ///
    /// **Triggered by:** Unrecognized input, an unterminated list, or trailing input
    /// **Example:** `(1 (2)` (missing closing parenthesis)
    ///
    /// The message is fully formatted and already carries the position.
    #[error("{message}")]
    SyntaxError {
        /// Formatted diagnostic
        message: String,
        /// Position of the offending token (or of the end of input)
        position: SourceInfo,
    },

    /// Nesting limit exceeded while opening a list
    #[error("nesting too deep: limit of {limit} exceeded at {position}")]
    NestingTooDeep {
        /// Configured maximum depth
        limit: usize,
        /// Position of the `(` that exceeded the limit
        position: SourceInfo,
    },

    // Vocabulary errors
    /// Token type violates its construction invariants
    ///
    /// **Triggered by:** A mapped token type with an empty label, or an empty pattern
    #[error("invalid token type '{label}': {reason}")]
    InvalidTokenType {
        /// Label of the offending type
        label: String,
        /// What is wrong with it
        reason: String,
    },

    /// Token type pattern failed to compile
    #[error("invalid pattern for token type '{label}': {source}")]
    InvalidPattern {
        /// Label of the offending type
        label: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Value requested from a token type that has no mapper
    #[error("token type '{label}' is non-significant and has no value")]
    NonSignificantToken {
        /// Label of the token type
        label: String,
    },

    /// A token mapper rejected the matched text
    #[error("cannot map token '{label}': {message}")]
    TokenMapping {
        /// Label of the token type
        label: String,
        /// Mapper failure reason
        message: String,
    },

    // Tree model errors
    /// Scalar value read from a list node
    #[error("expression is a list, not an atom")]
    NotAnAtom,

    /// Children read from an atom node
    #[error("expression is an atom, not a list")]
    NotAList,

    /// Child index past the end of a list node
    #[error("index out of bounds: {index} for list of length {length}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// List length
        length: usize,
    },

    /// Raw value does not fit the representation's scalar type
    #[error("value conversion failed: expected {expected}, found {found}")]
    ValueConversion {
        /// Target scalar type
        expected: String,
        /// Actual raw value
        found: String,
    },
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Input is not a valid notation; the parse is abandoned
    Fatal,
    /// Caller misused the vocabulary or tree model
    Usage,
}

impl Error {
    /// Create a token mapping error for the given token type label
    pub fn mapping(label: impl Into<String>, message: impl Into<String>) -> Self {
        Error::TokenMapping {
            label: label.into(),
            message: message.into(),
        }
    }

    /// Create a value conversion error
    pub fn conversion(expected: impl Into<String>, found: impl ToString) -> Self {
        Error::ValueConversion {
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::SyntaxError { .. } => ErrorSeverity::Fatal,
            Error::NestingTooDeep { .. } => ErrorSeverity::Fatal,
            Error::TokenMapping { .. } => ErrorSeverity::Fatal,

            _ => ErrorSeverity::Usage,
        }
    }

    /// Source position attached to the error, if any
    pub fn position(&self) -> Option<SourceInfo> {
        match self {
            Error::SyntaxError { position, .. } | Error::NestingTooDeep { position, .. } => {
                Some(*position)
            }
            _ => None,
        }
    }
}

/// Result type for notation operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_displays_message_verbatim() {
        let err = Error::SyntaxError {
            message: "syntax error: ) expected but found end of input at line 1, column 7 (offset 6)"
                .to_string(),
            position: SourceInfo::new(6, 1, 7),
        };
        assert_eq!(
            err.to_string(),
            "syntax error: ) expected but found end of input at line 1, column 7 (offset 6)"
        );
        assert_eq!(err.classify(), ErrorSeverity::Fatal);
        assert_eq!(err.position(), Some(SourceInfo::new(6, 1, 7)));
    }

    #[test]
    fn test_shape_errors_are_usage_errors() {
        assert_eq!(Error::NotAList.classify(), ErrorSeverity::Usage);
        assert_eq!(Error::conversion("String", 42).classify(), ErrorSeverity::Usage);
        assert!(Error::NotAnAtom.position().is_none());
    }
}
