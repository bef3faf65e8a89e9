//! # sexpr-notation - Lexing and Parsing for S-expression Notations
//!
//! A reusable engine for parenthesized list notations: a tokenizer driven by
//! a pluggable, ordered set of token-matching rules, and a recursive-descent
//! parser whose output representation is supplied by the caller.
//!
//! ## Features
//!
//! - **Rule-driven lexing** - single characters, literals (with a case mode)
//!   and anchored patterns, tried in declared order
//! - **Representation-agnostic parsing** - generic trees, typed documents or
//!   arbitrary models from the same token stream
//! - **Two-phase reduction** - intercept every node when it is built and
//!   again once it is complete
//! - **Exact diagnostics** - every syntax error carries line, column and offset
//!
//! ## Quick Start
//!
//! ```rust
//! use sexpr_notation::{Expression, Lexicon, Parser, SExpr, SExprParser, TokenType, Value};
//!
//! # fn main() -> sexpr_notation::Result<()> {
//! let atoms = Lexicon::new(vec![
//!     TokenType::pattern("identifier", "[A-Za-z_][A-Za-z_0-9]*")?
//!         .with_mapper(TokenType::verbatim)?,
//!     TokenType::pattern("number", "[0-9]+")?.with_mapper(|token| {
//!         token
//!             .text()
//!             .parse::<i64>()
//!             .map(Value::Int)
//!             .map_err(|e| sexpr_notation::Error::mapping("number", e.to_string()))
//!     })?,
//! ]);
//!
//! let parser: SExprParser = SExprParser::new(atoms);
//! let tree = parser.parse("(add 1 (mul 2 3))")?;
//!
//! assert_eq!(tree.len()?, 3);
//! assert_eq!(tree.child(1)?.value()?, Some(&Value::Int(1)));
//! assert_eq!(tree.notation(), "(add 1 (mul 2 3))");
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Reduction
//!
//! The reduction callback sees every node twice. Here the build phase drops
//! numbers from lists:
//!
//! ```rust
//! use sexpr_notation::{Content, Expression, Lexicon, Parser, SExpr, SExprParser, Step, TokenType, Value};
//!
//! # fn main() -> sexpr_notation::Result<()> {
//! let atoms = Lexicon::new(vec![
//!     TokenType::pattern("word", "[a-z]+")?.with_mapper(TokenType::verbatim)?,
//!     TokenType::pattern("number", "[0-9]+")?.with_mapper(|t| Ok(Value::Int(t.text().len() as i64)))?,
//! ]);
//! let parser: SExprParser = SExprParser::new(atoms);
//!
//! let tree = parser.parse_with(
//!     "(a 1 (b 22) c)",
//!     |_: &(), _: Option<&[SExpr]>, step: Step<SExpr>| match step {
//!         Step::Build(Content::List(children)) => Ok(SExpr::List(
//!             children
//!                 .into_iter()
//!                 .filter(|c| !matches!(c, SExpr::Atom(Some(Value::Int(_)))))
//!                 .collect(),
//!         )),
//!         Step::Build(content) => SExpr::create(content),
//!         Step::Finalize(node) => Ok(node),
//!     },
//!     &(),
//! )?;
//!
//! assert_eq!(tree.notation(), "(a (b) c)");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Parsing is all-or-nothing; the first syntax error ends the parse:
//!
//! ```rust
//! use sexpr_notation::{Lexicon, Parser, SExpr, SExprParser, TokenType};
//!
//! let atoms = Lexicon::new(vec![
//!     TokenType::pattern("identifier", "[a-z]+").unwrap()
//!         .with_mapper(TokenType::verbatim).unwrap(),
//! ]);
//! let parser: SExprParser = SExprParser::new(atoms);
//!
//! let err = parser.parse("(a ?!? b)").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "syntax error: ) expected but found unexpected ?!? at line 1, column 4 (offset 3)"
//! );
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Lexicon → SExprLexer → Tokens → SExprParser ⇄ reduction → Node
//! ```
//!
//! - [`TokenType`] / [`Lexicon`] - vocabulary
//! - [`Lexer`] - stateful tokenizer; [`Scanner`] and [`SExprLexer`] implement it
//! - [`Parser`] - grammar-independent driver
//! - [`SExprParser`] - S-expression recursive descent
//! - [`Expression`] / [`SExpr`] - tree capability and default tree
//!
//! Recursion depth follows list nesting one-to-one, so [`ParserConfig`]
//! bounds it (256 by default).

// Allow specific clippy warnings that are false positives or intentional design choices
#![allow(clippy::len_without_is_empty)] // Expression::len is fallible

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;
pub mod value;

// Re-export main types
pub use error::{Error, ErrorSeverity, Result};
pub use lexer::{
    CaseSensitivity, Lexer, Lexicon, SExprLexer, Scanner, SourceInfo, Token, TokenMapper,
    TokenType,
};
pub use parser::{
    syntax_error, Content, Expression, Factory, Parser, ParserConfig, SExpr, SExprParser, Step,
    DEFAULT_MAX_DEPTH,
};
pub use value::{Scalar, Value};
