use std::fmt;
use std::sync::Arc;

use regex::Regex;

use super::SourceInfo;
use crate::error::{Error, Result};
use crate::value::Value;

/// Converts a matched token into its raw atomic value
pub type TokenMapper = Arc<dyn Fn(&Token) -> Result<Value> + Send + Sync>;

/// Comparison mode for literal token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// Exact, ordinal comparison
    #[default]
    Sensitive,
    /// Comparison after lowercasing both sides
    Insensitive,
}

#[derive(Clone)]
enum Rule {
    Char(char),
    Literal {
        text: String,
        case: CaseSensitivity,
    },
    Pattern {
        source: String,
        anchored: Regex,
    },
}

/// A token-matching rule of a lexicon
///
/// A type without a mapper is non-significant: it carries no value and
/// lexers skip it on request (whitespace, comments).
#[derive(Clone)]
pub struct TokenType {
    label: String,
    rule: Rule,
    max_length: Option<usize>,
    mapper: Option<TokenMapper>,
}

impl TokenType {
    /// Single fixed character, labeled by the character itself
    pub fn character(c: char) -> Self {
        TokenType {
            label: c.to_string(),
            rule: Rule::Char(c),
            max_length: Some(c.len_utf8()),
            mapper: None,
        }
    }

    /// Fixed literal string, labeled by the literal itself
    pub fn literal(text: impl Into<String>, case: CaseSensitivity) -> Self {
        let text = text.into();
        TokenType {
            label: text.clone(),
            max_length: Some(text.len()),
            rule: Rule::Literal { text, case },
            mapper: None,
        }
    }

    /// Pattern anchored at the match offset
    pub fn pattern(label: impl Into<String>, pattern: &str) -> Result<Self> {
        let label = label.into();
        if pattern.is_empty() {
            return Err(Error::InvalidTokenType {
                label,
                reason: "pattern cannot be empty".to_string(),
            });
        }
        let anchored = Regex::new(&format!(r"\A(?:{})", pattern)).map_err(|source| {
            Error::InvalidPattern {
                label: label.clone(),
                source,
            }
        })?;
        Ok(TokenType {
            label,
            rule: Rule::Pattern {
                source: pattern.to_string(),
                anchored,
            },
            max_length: None,
            mapper: None,
        })
    }

    /// Limit how far a pattern may look ahead, in bytes
    ///
    /// A limit of 0 leaves the pattern unbounded. Has no effect on character
    /// and literal types, whose length is fixed.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        if let Rule::Pattern { .. } = self.rule {
            self.max_length = (max_length > 0).then_some(max_length);
        }
        self
    }

    /// Attach a value mapper, making the type significant
    pub fn with_mapper<F>(mut self, mapper: F) -> Result<Self>
    where
        F: Fn(&Token) -> Result<Value> + Send + Sync + 'static,
    {
        if self.label.is_empty() {
            return Err(Error::InvalidTokenType {
                label: self.label,
                reason: "a mapped token type needs a non-empty label".to_string(),
            });
        }
        self.mapper = Some(Arc::new(mapper));
        Ok(self)
    }

    /// Mapper yielding the matched text as-is
    pub fn verbatim(token: &Token) -> Result<Value> {
        Ok(Value::Text(token.text().to_string()))
    }

    /// Match this type at `offset`, returning the matched text
    ///
    /// An empty result means no match. Never mutates any state.
    pub fn match_at<'i>(&self, input: &'i str, offset: usize) -> &'i str {
        let rest = match input.get(offset..) {
            Some(rest) if !rest.is_empty() => rest,
            _ => return "",
        };
        match &self.rule {
            Rule::Char(c) => {
                if rest.starts_with(*c) {
                    &rest[..c.len_utf8()]
                } else {
                    ""
                }
            }
            Rule::Literal { text, case } => match rest.get(..text.len()) {
                Some(candidate) => {
                    let matched = match case {
                        CaseSensitivity::Sensitive => candidate == text,
                        CaseSensitivity::Insensitive => {
                            candidate.to_lowercase() == text.to_lowercase()
                        }
                    };
                    if matched {
                        candidate
                    } else {
                        ""
                    }
                }
                None => "",
            },
            Rule::Pattern { anchored, .. } => {
                let window = match self.max_length {
                    Some(max) => &rest[..floor_char_boundary(rest, max)],
                    None => rest,
                };
                anchored.find(window).map_or("", |m| m.as_str())
            }
        }
    }

    /// Apply the mapper to a token of this type
    pub fn value_of(&self, token: &Token) -> Result<Value> {
        match &self.mapper {
            Some(mapper) => mapper(token),
            None => Err(Error::NonSignificantToken {
                label: self.label.clone(),
            }),
        }
    }

    /// Identity of the type
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The character of a one-character type
    pub fn char(&self) -> Option<char> {
        match self.rule {
            Rule::Char(c) => Some(c),
            _ => None,
        }
    }

    /// The pattern of a pattern-based type
    pub fn pattern_source(&self) -> Option<&str> {
        match &self.rule {
            Rule::Pattern { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The comparison mode of a literal type
    pub fn case_sensitivity(&self) -> Option<CaseSensitivity> {
        match self.rule {
            Rule::Literal { case, .. } => Some(case),
            _ => None,
        }
    }

    /// Maximum match length in bytes, if bounded
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn is_one_char(&self) -> bool {
        matches!(self.rule, Rule::Char(_))
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self.rule, Rule::Pattern { .. })
    }

    pub fn is_non_significant(&self) -> bool {
        self.mapper.is_none()
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut index = index;
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

impl PartialEq for TokenType {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && match (&self.rule, &other.rule) {
                (Rule::Char(a), Rule::Char(b)) => a == b,
                (Rule::Literal { text: a, case: x }, Rule::Literal { text: b, case: y }) => {
                    a == b && x == y
                }
                (Rule::Pattern { source: a, .. }, Rule::Pattern { source: b, .. }) => a == b,
                _ => false,
            }
    }
}

impl fmt::Debug for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = match &self.rule {
            Rule::Char(c) => format!("char {:?}", c),
            Rule::Literal { text, case } => format!("literal {:?} ({:?})", text, case),
            Rule::Pattern { source, .. } => format!("pattern {:?}", source),
        };
        f.debug_struct("TokenType")
            .field("label", &self.label)
            .field("rule", &rule)
            .field("max_length", &self.max_length)
            .field("significant", &self.mapper.is_some())
            .finish()
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() && !self.is_pattern() {
            write!(f, "end of input")
        } else {
            write!(f, "{}", self.label)
        }
    }
}

/// A matched token
#[derive(Debug, Clone)]
pub struct Token {
    token_type: Arc<TokenType>,
    text: String,
    position: SourceInfo,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(token_type: Arc<TokenType>, text: impl Into<String>, position: SourceInfo) -> Self {
        Token {
            token_type,
            text: text.into(),
            position,
        }
    }

    pub fn token_type(&self) -> &Arc<TokenType> {
        &self.token_type
    }

    /// Matched source text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of the first matched character
    pub fn position(&self) -> SourceInfo {
        self.position
    }

    /// Check whether the token is of the given type
    pub fn is(&self, token_type: &TokenType) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.token_type), token_type) || *self.token_type == *token_type
    }

    /// Raw value of the token, through its type's mapper
    pub fn value(&self) -> Result<Value> {
        self.token_type.value_of(self)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.token_type.is_one_char() {
            write!(f, "{}", self.text)
        } else if self.token_type.is_pattern() || !self.text.is_empty() {
            write!(f, "{} {}", self.token_type, self.text)
        } else {
            write!(f, "{}", self.token_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number() -> TokenType {
        TokenType::pattern("number", "[0-9]+")
            .unwrap()
            .with_mapper(|token| {
                token
                    .text()
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|e| Error::mapping("number", e.to_string()))
            })
            .unwrap()
    }

    #[test]
    fn test_char_match() {
        let open = TokenType::character('(');
        assert_eq!(open.match_at("a(b", 1), "(");
        assert_eq!(open.match_at("a(b", 0), "");
        assert_eq!(open.match_at("a(", 2), "");
        assert!(open.is_one_char());
    }

    #[test]
    fn test_literal_case_modes() {
        let exact = TokenType::literal("nil", CaseSensitivity::Sensitive);
        let loose = TokenType::literal("nil", CaseSensitivity::Insensitive);
        assert_eq!(exact.match_at("(NIL)", 1), "");
        assert_eq!(loose.match_at("(NIL)", 1), "NIL");
        assert_eq!(exact.match_at("(ni", 1), "");
    }

    #[test]
    fn test_pattern_is_anchored_at_offset() {
        let num = number();
        assert_eq!(num.match_at("ab 123", 3), "123");
        // a match further ahead does not count
        assert_eq!(num.match_at("ab 123", 0), "");
    }

    #[test]
    fn test_pattern_lookahead_window() {
        let num = number().with_max_length(2);
        assert_eq!(num.match_at("12345", 0), "12");
    }

    #[test]
    fn test_zero_max_length_is_unbounded() {
        let num = number().with_max_length(0);
        assert_eq!(num.max_length(), None);
        assert_eq!(num.match_at("12345", 0), "12345");
    }

    #[test]
    fn test_invariants() {
        assert!(matches!(
            TokenType::pattern("empty", ""),
            Err(Error::InvalidTokenType { .. })
        ));
        assert!(matches!(
            TokenType::pattern("", "x+").unwrap().with_mapper(TokenType::verbatim),
            Err(Error::InvalidTokenType { .. })
        ));
        assert!(matches!(
            TokenType::pattern("bad", "(["),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_value_of() {
        let num = Arc::new(number());
        let token = Token::new(num, "42", SourceInfo::default());
        assert_eq!(token.value().unwrap(), Value::Int(42));

        let space = Arc::new(TokenType::pattern("space", r"\s+").unwrap());
        let token = Token::new(space.clone(), " ", SourceInfo::default());
        assert!(space.is_non_significant());
        assert!(matches!(
            token.value(),
            Err(Error::NonSignificantToken { .. })
        ));
    }

    #[test]
    fn test_token_display() {
        let pos = SourceInfo::default();
        let open = Arc::new(TokenType::character('('));
        assert_eq!(Token::new(open, "(", pos).to_string(), "(");
        let num = Arc::new(number());
        assert_eq!(Token::new(num, "7", pos).to_string(), "number 7");
    }
}
