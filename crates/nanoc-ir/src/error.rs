use nanoc_lex::TokenKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum IrError {
    #[error("the IR builder does not support this construct yet: found {found}")]
    UnsupportedConstruct { found: String },

    #[error("expected {expected}, found {found}")]
    Unexpected { expected: String, found: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,
}

impl IrError {
    pub fn unexpected(expected: impl Into<String>, found: TokenKind) -> Self {
        IrError::Unexpected {
            expected: expected.into(),
            found: found.spelling(),
        }
    }
}
