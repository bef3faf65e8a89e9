use std::fmt;
use std::sync::Arc;

use super::{syntax_error, Content, Expression, Parser, ParserConfig, SExpr, Step};
use crate::error::{Error, Result};
use crate::lexer::{Lexer, Lexicon, SExprLexer, Token, CLOSING, OPENING, UNEXPECTED};

/// Constructs a representation node from a raw value or a child sequence
pub type Factory<E> = Arc<dyn Fn(Content<E>) -> Result<E> + Send + Sync>;

/// Recursive-descent parser for S-expressions
///
/// Grammar: an expression is an atom (any token of the caller's lexicon) or
/// `(` followed by zero or more expressions and `)`. The output node type is
/// chosen by the caller through the factory and the reduction callback.
pub struct SExprParser<E = SExpr> {
    atoms: Lexicon,
    factory: Factory<E>,
    config: ParserConfig,
}

impl<E: Expression + 'static> SExprParser<E> {
    /// Creates a parser building `E` through [`Expression::create`]
    pub fn new(atoms: Lexicon) -> Self {
        Self::with_factory(atoms, E::create)
    }
}

impl<E> SExprParser<E> {
    /// Creates a parser building nodes with an explicit factory
    pub fn with_factory<F>(atoms: Lexicon, factory: F) -> Self
    where
        F: Fn(Content<E>) -> Result<E> + Send + Sync + 'static,
    {
        SExprParser {
            atoms,
            factory: Arc::new(factory),
            config: ParserConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn atoms(&self) -> &Lexicon {
        &self.atoms
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse the expression starting at `lookahead`
    ///
    /// `outer` holds the already parsed children of the enclosing list, `None`
    /// at the top level. `depth` counts the lists enclosing this expression.
    #[allow(clippy::too_many_arguments)]
    fn parse_expression<C, R>(
        &self,
        lexer: &mut dyn Lexer,
        input: &str,
        lookahead: Option<Token>,
        reduce: &R,
        context: &C,
        outer: Option<&[E]>,
        depth: usize,
    ) -> Result<E>
    where
        R: Fn(&C, Option<&[E]>, Step<E>) -> Result<E>,
    {
        let node = match lookahead {
            Some(token) if token.is(&OPENING) => {
                if let Some(limit) = self.config.max_depth {
                    if depth >= limit {
                        return Err(Error::NestingTooDeep {
                            limit,
                            position: token.position(),
                        });
                    }
                }
                lexer.consume(token);

                // each child sees the siblings parsed before it as its outer list
                let mut children = Vec::new();
                loop {
                    match lexer.next_of(input, None, true) {
                        Some(next) if next.is(&CLOSING) => {
                            lexer.consume(next);
                            break;
                        }
                        Some(next) if !next.is(&UNEXPECTED) => {
                            let child = self.parse_expression(
                                lexer,
                                input,
                                Some(next),
                                reduce,
                                context,
                                Some(children.as_slice()),
                                depth + 1,
                            )?;
                            children.push(child);
                        }
                        other => {
                            return Err(syntax_error(lexer, other.as_ref(), Some(&**CLOSING)));
                        }
                    }
                }
                reduce(context, outer, Step::Build(Content::List(children)))?
            }
            Some(token) if !token.is(&UNEXPECTED) && !token.is(&CLOSING) => {
                let token = lexer.consume(token);
                let value = token.value()?;
                reduce(context, outer, Step::Build(Content::Value(value)))?
            }
            other => return Err(syntax_error(lexer, other.as_ref(), Some(&**OPENING))),
        };
        reduce(context, outer, Step::Finalize(node))
    }
}

impl<E> Parser<E> for SExprParser<E> {
    type Lexer = SExprLexer;

    fn lexer(&self) -> SExprLexer {
        SExprLexer::new(&self.atoms)
    }

    fn create(&self, content: Content<E>) -> Result<E> {
        (self.factory)(content)
    }

    fn parse_root<C, R>(
        &self,
        lexer: &mut dyn Lexer,
        input: &str,
        reduce: &R,
        context: &C,
    ) -> Result<E>
    where
        R: Fn(&C, Option<&[E]>, Step<E>) -> Result<E>,
    {
        let lookahead = lexer.next_of(input, None, true);
        self.parse_expression(lexer, input, lookahead, reduce, context, None, 0)
    }
}

impl<E> Clone for SExprParser<E> {
    fn clone(&self) -> Self {
        SExprParser {
            atoms: self.atoms.clone(),
            factory: Arc::clone(&self.factory),
            config: self.config,
        }
    }
}

impl<E> fmt::Debug for SExprParser<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SExprParser")
            .field("atoms", &self.atoms)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
