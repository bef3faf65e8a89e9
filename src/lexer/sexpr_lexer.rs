use std::sync::Arc;

use lazy_static::lazy_static;

use super::{Lexer, Lexicon, SourceInfo, TokenType};

lazy_static! {
    /// Greedy run of whitespace, skipped by the parser
    pub static ref WHITESPACE: Arc<TokenType> =
        Arc::new(TokenType::pattern("space", r"\s+").expect("whitespace pattern is valid"));

    /// List opener `(`
    pub static ref OPENING: Arc<TokenType> = Arc::new(
        TokenType::character('(')
            .with_mapper(TokenType::verbatim)
            .expect("`(` has a label")
    );

    /// List closer `)`
    pub static ref CLOSING: Arc<TokenType> = Arc::new(
        TokenType::character(')')
            .with_mapper(TokenType::verbatim)
            .expect("`)` has a label")
    );

    /// Catch-all for any run of non-whitespace nothing else claimed
    pub static ref UNEXPECTED: Arc<TokenType> = Arc::new(
        TokenType::pattern("unexpected", r"[^\s]+")
            .and_then(|t| t.with_mapper(TokenType::verbatim))
            .expect("catch-all pattern is valid")
    );
}

/// Lexer for S-expression notations
///
/// Vocabulary, in priority order: whitespace, `(`, `)`, the caller's atom
/// types in the order given, then the catch-all [`UNEXPECTED`] type. Atom
/// patterns therefore never swallow punctuation, and input the atoms cannot
/// classify surfaces as a syntax error instead of stalling the lexer.
#[derive(Debug, Clone)]
pub struct SExprLexer {
    token_types: Vec<Arc<TokenType>>,
    position: SourceInfo,
}

impl SExprLexer {
    /// Creates a lexer whose atoms are the token types of `atoms`
    pub fn new(atoms: &Lexicon) -> Self {
        let mut token_types = Vec::with_capacity(atoms.len() + 4);
        token_types.push(Arc::clone(&WHITESPACE));
        token_types.push(Arc::clone(&OPENING));
        token_types.push(Arc::clone(&CLOSING));
        token_types.extend(atoms.iter().cloned());
        token_types.push(Arc::clone(&UNEXPECTED));
        SExprLexer {
            token_types,
            position: SourceInfo::default(),
        }
    }

    pub fn whitespace() -> &'static Arc<TokenType> {
        &WHITESPACE
    }

    pub fn opening() -> &'static Arc<TokenType> {
        &OPENING
    }

    pub fn closing() -> &'static Arc<TokenType> {
        &CLOSING
    }

    pub fn unexpected() -> &'static Arc<TokenType> {
        &UNEXPECTED
    }
}

impl Default for SExprLexer {
    fn default() -> Self {
        SExprLexer::new(&Lexicon::default())
    }
}

impl Lexer for SExprLexer {
    fn position(&self) -> SourceInfo {
        self.position
    }

    fn set_position(&mut self, position: SourceInfo) {
        self.position = position;
    }

    fn token_types(&self) -> &[Arc<TokenType>] {
        &self.token_types
    }
}
