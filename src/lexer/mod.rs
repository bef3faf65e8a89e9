//! Lexical analysis
//!
//! Rule-driven tokenization: a [`Lexicon`] of [`TokenType`]s is tried in
//! declared order at the current offset, and the first match wins.

mod lexicon;
mod scanner;
mod sexpr_lexer;
mod source_info;
mod token;

pub use lexicon::Lexicon;
pub use scanner::{Lexer, Scanner};
pub use sexpr_lexer::{SExprLexer, CLOSING, OPENING, UNEXPECTED, WHITESPACE};
pub use source_info::SourceInfo;
pub use token::{CaseSensitivity, Token, TokenMapper, TokenType};
