//! nanoc-lex - the lexer (spec component C2).
//!
//! Turns a source buffer into a token sequence: strips whitespace and
//! comments, recognizes identifiers/keywords/numbers/character literals
//! and the operator set of spec §6.1, and fails closed on anything else.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::{tokenize, LexError, Lexer};
pub use token::{Token, TokenKind};

#[cfg(test)]
mod proptests {
    use super::*;
    use nanoc_util::FileId;
    use proptest::prelude::*;

    proptest! {
        /// Spec §8 invariant 1: re-rendering a token and re-lexing it
        /// yields an equal token (modulo source location).
        #[test]
        fn integer_literal_round_trips(n in 0i64..=i64::MAX) {
            let rendered = n.to_string();
            let toks = tokenize(&rendered, FileId::DUMMY).unwrap();
            prop_assert_eq!(toks.len(), 1);
            prop_assert_eq!(toks[0].kind, TokenKind::IntLiteral(n));
        }

        #[test]
        fn identifier_round_trips(name in "[a-zA-Z_][a-zA-Z0-9_]{0,15}") {
            prop_assume!(TokenKind::keyword_for(&name).is_none());
            let toks = tokenize(&name, FileId::DUMMY).unwrap();
            prop_assert_eq!(toks.len(), 1);
            match toks[0].kind {
                TokenKind::Ident(s) => prop_assert_eq!(s.as_str(), name.as_str()),
                other => panic!("expected Ident, got {other:?}"),
            }
        }
    }
}
