//! Token kinds.
//!
//! Operator tags are kept as a plain enum rather than piggy-backing
//! single-character operators on their ASCII code — that's a C-ism not
//! worth carrying into idiomatic Rust. Diagnostics get the spelling
//! back via [`TokenKind::spelling`].

use nanoc_util::{Span, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident(Symbol),
    IntLiteral(i64),

    KwInt,
    KwVoid,
    KwReturn,
    KwIf,
    KwElse,
    KwFor,
    KwWhile,
    KwDo,
    KwBreak,
    KwContinue,

    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Tilde,
    Question,
    Colon,
    Assign,

    EqEq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    AndAnd,
    OrOr,

    Eof,
}

impl TokenKind {
    /// Look up whether `ident` is one of the reserved keywords; used by
    /// the lexer to rewrite an identifier token into a keyword token
    /// after the fact, per spec §4.1 ("Keywords ... are identifiers
    /// matched post-hoc").
    pub fn keyword_for(ident: &str) -> Option<TokenKind> {
        Some(match ident {
            "int" => TokenKind::KwInt,
            "void" => TokenKind::KwVoid,
            "return" => TokenKind::KwReturn,
            "if" => TokenKind::KwIf,
            "else" => TokenKind::KwElse,
            "for" => TokenKind::KwFor,
            "while" => TokenKind::KwWhile,
            "do" => TokenKind::KwDo,
            "break" => TokenKind::KwBreak,
            "continue" => TokenKind::KwContinue,
            _ => return None,
        })
    }

    /// The source spelling, used only in diagnostic messages.
    pub fn spelling(&self) -> String {
        match self {
            TokenKind::Ident(s) => s.to_string(),
            TokenKind::IntLiteral(n) => n.to_string(),
            TokenKind::KwInt => "int".into(),
            TokenKind::KwVoid => "void".into(),
            TokenKind::KwReturn => "return".into(),
            TokenKind::KwIf => "if".into(),
            TokenKind::KwElse => "else".into(),
            TokenKind::KwFor => "for".into(),
            TokenKind::KwWhile => "while".into(),
            TokenKind::KwDo => "do".into(),
            TokenKind::KwBreak => "break".into(),
            TokenKind::KwContinue => "continue".into(),
            TokenKind::LParen => "(".into(),
            TokenKind::RParen => ")".into(),
            TokenKind::LBrace => "{".into(),
            TokenKind::RBrace => "}".into(),
            TokenKind::Semicolon => ";".into(),
            TokenKind::Comma => ",".into(),
            TokenKind::Plus => "+".into(),
            TokenKind::Minus => "-".into(),
            TokenKind::Star => "*".into(),
            TokenKind::Slash => "/".into(),
            TokenKind::Percent => "%".into(),
            TokenKind::Bang => "!".into(),
            TokenKind::Tilde => "~".into(),
            TokenKind::Question => "?".into(),
            TokenKind::Colon => ":".into(),
            TokenKind::Assign => "=".into(),
            TokenKind::EqEq => "==".into(),
            TokenKind::NotEq => "!=".into(),
            TokenKind::Lt => "<".into(),
            TokenKind::Gt => ">".into(),
            TokenKind::Le => "<=".into(),
            TokenKind::Ge => ">=".into(),
            TokenKind::AndAnd => "&&".into(),
            TokenKind::OrOr => "||".into(),
            TokenKind::Eof => "<eof>".into(),
        }
    }
}

/// A token together with the span of source it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
