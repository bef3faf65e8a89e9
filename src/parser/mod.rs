//! Parsing
//!
//! [`Parser`] holds the grammar-independent part: lexer acquisition, the
//! default reduction, trailing-input detection and syntax-error formatting.
//! [`SExprParser`] supplies the recursive descent for S-expressions.

mod config;
mod sexpr_parser;
mod tree;

pub use config::{ParserConfig, DEFAULT_MAX_DEPTH};
pub use sexpr_parser::{Factory, SExprParser};
pub use tree::{Content, Expression, SExpr};

use tracing::debug;

use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token, TokenType};

/// One phase of the reduction callback
///
/// Each grammar position is reduced twice: first `Build` with the raw atom
/// value or the completed child sequence, then `Finalize` with the node the
/// build produced. Whatever `Finalize` returns is what the enclosing list
/// receives as its child.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<E> {
    /// Construct a node
    Build(Content<E>),
    /// Post-process a constructed node
    Finalize(E),
}

/// Grammar-independent parser driver
pub trait Parser<E> {
    /// Lexer created for each parse
    type Lexer: Lexer;

    /// Fresh lexer positioned at the start of the input
    fn lexer(&self) -> Self::Lexer;

    /// Representation factory used by the default reduction
    fn create(&self, content: Content<E>) -> Result<E>;

    /// Parse one complete expression from the lexer's current position
    fn parse_root<C, R>(
        &self,
        lexer: &mut dyn Lexer,
        input: &str,
        reduce: &R,
        context: &C,
    ) -> Result<E>
    where
        R: Fn(&C, Option<&[E]>, Step<E>) -> Result<E>;

    /// Default reduction: build through the factory, finalize as-is
    fn reduce_default(&self, step: Step<E>) -> Result<E> {
        match step {
            Step::Build(content) => self.create(content),
            Step::Finalize(node) => Ok(node),
        }
    }

    /// Parse with the default reduction
    fn parse(&self, input: &str) -> Result<E> {
        self.parse_with(
            input,
            |_: &(), _: Option<&[E]>, step: Step<E>| self.reduce_default(step),
            &(),
        )
    }

    /// Parse with a caller-supplied reduction and context
    ///
    /// The reduction receives the context, the outer list as the siblings
    /// parsed before the current node (`None` at the top level), and the step.
    fn parse_with<C, R>(&self, input: &str, reduce: R, context: &C) -> Result<E>
    where
        R: Fn(&C, Option<&[E]>, Step<E>) -> Result<E>,
    {
        let mut lexer = self.lexer();
        self.parse_using(&mut lexer, input, reduce, context)
    }

    /// Parse with an injected lexer and the default reduction
    fn parse_lexed(&self, lexer: &mut dyn Lexer, input: &str) -> Result<E> {
        self.parse_using(
            lexer,
            input,
            |_: &(), _: Option<&[E]>, step: Step<E>| self.reduce_default(step),
            &(),
        )
    }

    /// Parse with an injected lexer, reduction and context
    ///
    /// Fails if significant input remains after the expression.
    fn parse_using<C, R>(
        &self,
        lexer: &mut dyn Lexer,
        input: &str,
        reduce: R,
        context: &C,
    ) -> Result<E>
    where
        R: Fn(&C, Option<&[E]>, Step<E>) -> Result<E>,
    {
        debug!(
            len = input.len(),
            token_types = lexer.token_types().len(),
            start = %lexer.position(),
            "parsing"
        );
        let root = match self.parse_root(lexer, input, &reduce, context) {
            Ok(root) => root,
            Err(e) => {
                debug!(error = %e, "parse failed");
                return Err(e);
            }
        };
        if let Some(token) = lexer.next_of(input, None, true) {
            return Err(syntax_error(lexer, Some(&token), None));
        }
        debug!(end = %lexer.position(), "parsed");
        Ok(root)
    }
}

const END_OF_INPUT: &str = "end of input";

/// Build the syntax error for an unexpected token
///
/// A missing `found` token means end of input, positioned at the lexer's
/// current position; a missing `expected` type means end of input was expected.
pub fn syntax_error(
    lexer: &dyn Lexer,
    found: Option<&Token>,
    expected: Option<&TokenType>,
) -> Error {
    let position = found.map_or_else(|| lexer.position(), |token| token.position());
    let expected = expected.map_or_else(|| END_OF_INPUT.to_string(), |t| t.to_string());
    let found = found.map_or_else(|| END_OF_INPUT.to_string(), |t| t.to_string());
    let message = format!(
        "syntax error: {} expected but found {} at {}",
        expected, found, position
    );
    debug!(%message, "syntax error");
    Error::SyntaxError { message, position }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexicon, SExprLexer, SourceInfo};
    use std::sync::Arc;

    #[test]
    fn test_syntax_error_at_end_of_input() {
        let mut lexer = SExprLexer::new(&Lexicon::default());
        lexer.set_position(SourceInfo::new(6, 1, 7));
        let err = syntax_error(&lexer, None, Some(SExprLexer::closing().as_ref()));
        assert_eq!(
            err.to_string(),
            "syntax error: ) expected but found end of input at line 1, column 7 (offset 6)"
        );
    }

    #[test]
    fn test_syntax_error_trailing_token() {
        let lexer = SExprLexer::default();
        let junk = Token::new(
            Arc::clone(SExprLexer::unexpected()),
            "junk",
            SourceInfo::new(4, 1, 5),
        );
        let err = syntax_error(&lexer, Some(&junk), None);
        assert_eq!(
            err.to_string(),
            "syntax error: end of input expected but found unexpected junk at line 1, column 5 (offset 4)"
        );
        assert_eq!(err.position(), Some(SourceInfo::new(4, 1, 5)));
    }
}
