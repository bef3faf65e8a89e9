use std::sync::Arc;

use super::TokenType;

/// Ordered, immutable vocabulary of a grammar
///
/// Order matters when types are tried without a hint: the first type that
/// matches wins.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    token_types: Vec<Arc<TokenType>>,
}

impl Lexicon {
    /// Creates a lexicon from token types, in priority order
    pub fn new(token_types: impl IntoIterator<Item = TokenType>) -> Self {
        Lexicon {
            token_types: token_types.into_iter().map(Arc::new).collect(),
        }
    }

    /// Creates a lexicon from already-shared token types
    pub fn from_shared(token_types: impl IntoIterator<Item = Arc<TokenType>>) -> Self {
        Lexicon {
            token_types: token_types.into_iter().collect(),
        }
    }

    pub fn token_types(&self) -> &[Arc<TokenType>] {
        &self.token_types
    }

    pub fn len(&self) -> usize {
        self.token_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TokenType>> {
        self.token_types.iter()
    }
}

impl FromIterator<TokenType> for Lexicon {
    fn from_iter<I: IntoIterator<Item = TokenType>>(iter: I) -> Self {
        Lexicon::new(iter)
    }
}
