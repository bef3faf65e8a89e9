use serde::{Deserialize, Serialize};

/// Default nesting limit for [`ParserConfig`]
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration for parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum list nesting depth; `None` leaves recursion unbounded
    /// (default: [`DEFAULT_MAX_DEPTH`])
    pub max_depth: Option<usize>,
}

impl ParserConfig {
    /// Configuration without a nesting limit
    pub fn unbounded() -> Self {
        ParserConfig { max_depth: None }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        ParserConfig {
            max_depth: Some(max_depth),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}
