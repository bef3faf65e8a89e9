use std::sync::Arc;

use tracing::trace;

use super::{Lexicon, SourceInfo, Token, TokenType, UNEXPECTED};
use crate::error::Result;
use crate::parser::syntax_error;

/// Stateful tokenizer over one input string
///
/// Peeking with [`Lexer::next_of`] never moves the lexer past a significant
/// token; only [`Lexer::consume`] does. One instance must not be shared by
/// two parses running at the same time.
pub trait Lexer {
    /// Current position
    fn position(&self) -> SourceInfo;

    /// Move to a new position
    fn set_position(&mut self, position: SourceInfo);

    /// Vocabulary tried when no type is hinted, in priority order
    fn token_types(&self) -> &[Arc<TokenType>];

    /// Find the type matching at the current offset, with its matched text
    ///
    /// With a hint only that type is tried. Otherwise every type is tried in
    /// declared order and the first non-empty match wins.
    fn match_next<'i>(
        &self,
        input: &'i str,
        hint: Option<&Arc<TokenType>>,
    ) -> Option<(Arc<TokenType>, &'i str)> {
        let offset = self.position().offset;
        let candidates = match hint {
            Some(token_type) => std::slice::from_ref(token_type),
            None => self.token_types(),
        };
        candidates.iter().find_map(|token_type| {
            let text = token_type.match_at(input, offset);
            if text.is_empty() {
                None
            } else {
                Some((Arc::clone(token_type), text))
            }
        })
    }

    /// Creates a token positioned at the current offset
    fn new_token(&self, token_type: Arc<TokenType>, text: &str) -> Token {
        Token::new(token_type, text, self.position())
    }

    /// Peek at the next token
    ///
    /// When `skip_non_significant` is set, non-significant tokens in front of
    /// it are consumed. Returns `None` at end of input or when nothing matches.
    fn next_of(
        &mut self,
        input: &str,
        hint: Option<&Arc<TokenType>>,
        skip_non_significant: bool,
    ) -> Option<Token> {
        loop {
            if self.position().offset >= input.len() {
                return None;
            }
            let (token_type, text) = self.match_next(input, hint)?;
            let token = self.new_token(token_type, text);
            if skip_non_significant && token.token_type().is_non_significant() {
                trace!(label = token.token_type().label(), at = %token.position(), "skipping");
                self.consume(token);
                continue;
            }
            return Some(token);
        }
    }

    /// Peek using each candidate type in turn; the first that yields a token wins
    fn next_among(
        &mut self,
        input: &str,
        candidates: &[Arc<TokenType>],
        skip_non_significant: bool,
    ) -> Option<Token> {
        for candidate in candidates {
            if let Some(token) = self.next_of(input, Some(candidate), skip_non_significant) {
                return Some(token);
            }
        }
        None
    }

    /// Advance past the token's text, returning the token
    fn consume(&mut self, token: Token) -> Token {
        let next = self.position().advance(token.text());
        trace!(label = token.token_type().label(), text = token.text(), at = %token.position(), "consumed");
        self.set_position(next);
        token
    }
}

/// First-match lexer over an arbitrary lexicon
#[derive(Debug, Clone)]
pub struct Scanner {
    lexicon: Lexicon,
    position: SourceInfo,
}

impl Scanner {
    /// Creates a new scanner positioned at the start of the input
    pub fn new(lexicon: Lexicon) -> Self {
        Scanner {
            lexicon,
            position: SourceInfo::default(),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Rewind to the start of the input
    pub fn reset(&mut self) {
        self.position = SourceInfo::default();
    }

    /// Scans all significant tokens of the input
    pub fn scan_tokens(&mut self, input: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_of(input, None, true) {
            tokens.push(self.consume(token));
        }

        if self.position.offset < input.len() {
            // report the unclaimed run the way the parser reports unexpected input
            let matched = UNEXPECTED.match_at(input, self.position.offset);
            let text = if matched.is_empty() {
                input[self.position.offset..]
                    .chars()
                    .next()
                    .map(String::from)
                    .unwrap_or_default()
            } else {
                matched.to_string()
            };
            let found = self.new_token(Arc::clone(&UNEXPECTED), &text);
            return Err(syntax_error(&*self, Some(&found), None));
        }

        Ok(tokens)
    }
}

impl Lexer for Scanner {
    fn position(&self) -> SourceInfo {
        self.position
    }

    fn set_position(&mut self, position: SourceInfo) {
        self.position = position;
    }

    fn token_types(&self) -> &[Arc<TokenType>] {
        self.lexicon.token_types()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::CaseSensitivity;
    use crate::value::Value;

    fn lexicon() -> Lexicon {
        Lexicon::new(vec![
            TokenType::pattern("space", r"\s+").unwrap(),
            TokenType::literal("let", CaseSensitivity::Sensitive)
                .with_mapper(TokenType::verbatim)
                .unwrap(),
            TokenType::pattern("identifier", "[a-z]+")
                .unwrap()
                .with_mapper(TokenType::verbatim)
                .unwrap(),
        ])
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut scanner = Scanner::new(lexicon());
        let first = scanner.next_of("abc def", None, true).unwrap();
        let again = scanner.next_of("abc def", None, true).unwrap();
        assert_eq!(first.text(), again.text());
        assert_eq!(scanner.position().offset, 0);
    }

    #[test]
    fn test_first_declared_match_wins() {
        // "let" is declared before identifier, so it wins even though
        // identifier would match a longer run
        let mut scanner = Scanner::new(lexicon());
        let token = scanner.next_of("letter", None, false).unwrap();
        assert_eq!(token.token_type().label(), "let");
        assert_eq!(token.text(), "let");
    }

    #[test]
    fn test_skip_consumes_whitespace_only() {
        let mut scanner = Scanner::new(lexicon());
        let input = "  \n  abc";
        let token = scanner.next_of(input, None, true).unwrap();
        assert_eq!(token.text(), "abc");
        assert_eq!(token.position(), SourceInfo::new(5, 2, 3));
        assert_eq!(scanner.position(), token.position());
    }

    #[test]
    fn test_without_skip_whitespace_is_returned() {
        let mut scanner = Scanner::new(lexicon());
        let token = scanner.next_of("  abc", None, false).unwrap();
        assert!(token.token_type().is_non_significant());
    }

    #[test]
    fn test_hint_restricts_candidates() {
        let lexicon = lexicon();
        let identifier = Arc::clone(&lexicon.token_types()[2]);
        let mut scanner = Scanner::new(lexicon);
        let token = scanner.next_of("letter", Some(&identifier), false).unwrap();
        assert_eq!(token.text(), "letter");
    }

    #[test]
    fn test_next_among_tries_in_order() {
        let lexicon = lexicon();
        let candidates = vec![
            Arc::clone(&lexicon.token_types()[2]),
            Arc::clone(&lexicon.token_types()[1]),
        ];
        let mut scanner = Scanner::new(lexicon);
        let token = scanner.next_among("letter", &candidates, true).unwrap();
        assert_eq!(token.token_type().label(), "identifier");
    }

    #[test]
    fn test_end_of_input() {
        let mut scanner = Scanner::new(lexicon());
        assert!(scanner.next_of("   ", None, true).is_none());
        assert_eq!(scanner.position().offset, 3);
    }

    #[test]
    fn test_scan_tokens() {
        let mut scanner = Scanner::new(lexicon());
        let tokens = scanner.scan_tokens("let x\n y").unwrap();
        let values: Vec<Value> = tokens.iter().map(|t| t.value().unwrap()).collect();
        assert_eq!(
            values,
            vec![Value::from("let"), Value::from("x"), Value::from("y")]
        );
        assert_eq!(tokens[2].position(), SourceInfo::new(7, 2, 2));

        scanner.reset();
        let err = scanner.scan_tokens("ab 12 cd").unwrap_err();
        assert_eq!(
            err.to_string(),
            "syntax error: end of input expected but found unexpected 12 at line 1, column 4 (offset 3)"
        );
        assert_eq!(err.position(), Some(SourceInfo::new(3, 1, 4)));
    }
}
