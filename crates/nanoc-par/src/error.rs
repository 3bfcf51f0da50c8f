use nanoc_lex::TokenKind;
use nanoc_util::Span;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("expected {expected}, found {found} at line {}, column {}", span.line, span.column)]
    Unexpected {
        expected: String,
        found: String,
        span: Span,
    },
}

impl ParseError {
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        ParseError::Unexpected {
            expected: expected.into(),
            found: found.spelling(),
            span,
        }
    }
}
