//! The lexer itself: source bytes in, a token sequence out.
//!
//! Implements spec §4.1 in full: whitespace and comments are recognized
//! and dropped rather than produced as tokens, identifiers and keywords
//! share one scan (a keyword is just an identifier that happens to match
//! a reserved spelling), numeric and character literals both resolve to
//! a single 64-bit value, and multi-character operators are matched
//! greedily before their single-character prefixes.

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use nanoc_util::{FileId, Span};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LexError {
    #[error("unrecognized byte {byte:#x} at line {line}, column {column}")]
    UnrecognizedByte { byte: u8, line: u32, column: u32 },

    #[error("unterminated block comment starting at line {line}, column {column}")]
    UnterminatedComment { line: u32, column: u32 },

    #[error("unterminated character literal at line {line}, column {column}")]
    UnterminatedCharLiteral { line: u32, column: u32 },

    #[error("empty character literal at line {line}, column {column}")]
    EmptyCharLiteral { line: u32, column: u32 },

    #[error("numeric literal out of 64-bit range at line {line}, column {column}")]
    NumberOutOfRange { line: u32, column: u32 },

    #[error("unknown escape sequence '\\{escape}' at line {line}, column {column}")]
    UnknownEscape { escape: char, line: u32, column: u32 },
}

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    file: FileId,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: FileId) -> Self {
        Self {
            cursor: Cursor::new(source),
            file,
        }
    }

    fn span_from(&self, start_pos: usize, start_line: u32, start_col: u32) -> Span {
        Span::new(
            self.file,
            start_pos as u32,
            self.cursor.position() as u32,
            start_line,
            start_col,
        )
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c => {
                    self.cursor.bump();
                }
                b'/' if self.cursor.peek() == b'/' => {
                    self.cursor.bump_while(|b| b != b'\n');
                }
                b'/' if self.cursor.peek() == b'*' => {
                    let line = self.cursor.line();
                    let column = self.cursor.column();
                    self.cursor.bump();
                    self.cursor.bump();
                    loop {
                        if self.cursor.is_at_end() {
                            return Err(LexError::UnterminatedComment { line, column });
                        }
                        if self.cursor.current() == b'*' && self.cursor.peek() == b'/' {
                            self.cursor.bump();
                            self.cursor.bump();
                            break;
                        }
                        self.cursor.bump();
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Produce the next token, or `TokenKind::Eof` once the source is
    /// exhausted. Callers drive this in a loop (see [`tokenize`]).
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let start_pos = self.cursor.position();
        let start_line = self.cursor.line();
        let start_col = self.cursor.column();

        if self.cursor.is_at_end() {
            return Ok(Token::new(
                TokenKind::Eof,
                self.span_from(start_pos, start_line, start_col),
            ));
        }

        let kind = match self.cursor.current() {
            b'(' => {
                self.cursor.bump();
                TokenKind::LParen
            }
            b')' => {
                self.cursor.bump();
                TokenKind::RParen
            }
            b'{' => {
                self.cursor.bump();
                TokenKind::LBrace
            }
            b'}' => {
                self.cursor.bump();
                TokenKind::RBrace
            }
            b';' => {
                self.cursor.bump();
                TokenKind::Semicolon
            }
            b',' => {
                self.cursor.bump();
                TokenKind::Comma
            }
            b'+' => {
                self.cursor.bump();
                TokenKind::Plus
            }
            b'-' => {
                self.cursor.bump();
                TokenKind::Minus
            }
            b'*' => {
                self.cursor.bump();
                TokenKind::Star
            }
            b'/' => {
                self.cursor.bump();
                TokenKind::Slash
            }
            b'%' => {
                self.cursor.bump();
                TokenKind::Percent
            }
            b'~' => {
                self.cursor.bump();
                TokenKind::Tilde
            }
            b'?' => {
                self.cursor.bump();
                TokenKind::Question
            }
            b':' => {
                self.cursor.bump();
                TokenKind::Colon
            }
            b'!' => {
                self.cursor.bump();
                if self.cursor.current() == b'=' {
                    self.cursor.bump();
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            b'=' => {
                self.cursor.bump();
                if self.cursor.current() == b'=' {
                    self.cursor.bump();
                    TokenKind::EqEq
                } else {
                    TokenKind::Assign
                }
            }
            b'<' => {
                self.cursor.bump();
                if self.cursor.current() == b'=' {
                    self.cursor.bump();
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            b'>' => {
                self.cursor.bump();
                if self.cursor.current() == b'=' {
                    self.cursor.bump();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            b'&' if self.cursor.peek() == b'&' => {
                self.cursor.bump();
                self.cursor.bump();
                TokenKind::AndAnd
            }
            b'|' if self.cursor.peek() == b'|' => {
                self.cursor.bump();
                self.cursor.bump();
                TokenKind::OrOr
            }
            b'\'' => self.lex_char_literal(start_line, start_col)?,
            b'0'..=b'9' => self.lex_number(start_line, start_col)?,
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.lex_identifier_or_keyword(),
            b => {
                return Err(LexError::UnrecognizedByte {
                    byte: b,
                    line: start_line,
                    column: start_col,
                })
            }
        };

        Ok(Token::new(kind, self.span_from(start_pos, start_line, start_col)))
    }

    fn lex_identifier_or_keyword(&mut self) -> TokenKind {
        let start = self.cursor.position();
        self.cursor
            .bump_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let text = self.cursor.slice(start, self.cursor.position());
        match TokenKind::keyword_for(text) {
            Some(kw) => kw,
            None => TokenKind::Ident(nanoc_util::Symbol::intern(text)),
        }
    }

    fn lex_number(&mut self, line: u32, column: u32) -> Result<TokenKind, LexError> {
        let start = self.cursor.position();
        self.cursor.bump_while(|b| b.is_ascii_digit());
        let text = self.cursor.slice(start, self.cursor.position());
        text.parse::<i64>()
            .map(TokenKind::IntLiteral)
            .map_err(|_| LexError::NumberOutOfRange { line, column })
    }

    fn lex_char_literal(&mut self, line: u32, column: u32) -> Result<TokenKind, LexError> {
        self.cursor.bump(); // opening quote
        if self.cursor.current() == b'\'' {
            return Err(LexError::EmptyCharLiteral { line, column });
        }
        let value = if self.cursor.current() == b'\\' {
            self.cursor.bump();
            let escape = self.cursor.current() as char;
            self.cursor.bump();
            match escape {
                'n' => b'\n' as i64,
                't' => b'\t' as i64,
                '\\' => b'\\' as i64,
                '\'' => b'\'' as i64,
                '0' => 0,
                other => return Err(LexError::UnknownEscape { escape: other, line, column }),
            }
        } else {
            self.cursor.bump() as i64
        };
        if self.cursor.is_at_end() || self.cursor.current() != b'\'' {
            return Err(LexError::UnterminatedCharLiteral { line, column });
        }
        self.cursor.bump(); // closing quote
        Ok(TokenKind::IntLiteral(value))
    }
}

/// Tokenize `source` completely, stopping at (and not including) `Eof`.
pub fn tokenize(source: &str, file: FileId) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source, file);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token()?;
        if tok.kind == TokenKind::Eof {
            return Ok(tokens);
        }
        tokens.push(tok);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanoc_util::Symbol;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src, FileId::DUMMY)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_a_minimal_main() {
        assert_eq!(
            kinds("int main(){return 2;}"),
            vec![
                TokenKind::KwInt,
                TokenKind::Ident(Symbol::intern("main")),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::KwReturn,
                TokenKind::IntLiteral(2),
                TokenKind::Semicolon,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn strips_line_and_block_comments() {
        assert_eq!(
            kinds("1 // comment\n/* block */ 2"),
            vec![TokenKind::IntLiteral(1), TokenKind::IntLiteral(2)]
        );
    }

    #[test]
    fn greedily_matches_multi_char_operators() {
        assert_eq!(
            kinds("<= >= == != && ||"),
            vec![
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
            ]
        );
    }

    #[test]
    fn does_not_confuse_prefix_with_multi_char_operator() {
        assert_eq!(
            kinds("< > = !"),
            vec![
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Assign,
                TokenKind::Bang,
            ]
        );
    }

    #[test]
    fn lone_ampersand_is_not_a_token_in_this_subset() {
        assert!(matches!(
            tokenize("&", FileId::DUMMY),
            Err(LexError::UnrecognizedByte { byte: b'&', .. })
        ));
    }

    #[test]
    fn char_literal_yields_its_byte_value() {
        assert_eq!(kinds("'a'"), vec![TokenKind::IntLiteral(b'a' as i64)]);
        assert_eq!(kinds("'\\n'"), vec![TokenKind::IntLiteral(b'\n' as i64)]);
    }

    #[test]
    fn unterminated_block_comment_fails() {
        assert!(matches!(
            tokenize("/* never closed", FileId::DUMMY),
            Err(LexError::UnterminatedComment { .. })
        ));
    }

    #[test]
    fn unterminated_char_literal_fails() {
        assert!(matches!(
            tokenize("'a", FileId::DUMMY),
            Err(LexError::UnterminatedCharLiteral { .. })
        ));
    }

    #[test]
    fn unrecognized_byte_fails() {
        assert!(matches!(
            tokenize("int x = @1;", FileId::DUMMY),
            Err(LexError::UnrecognizedByte { byte: b'@', .. })
        ));
    }

    #[test]
    fn number_out_of_i64_range_fails() {
        assert!(matches!(
            tokenize("99999999999999999999999", FileId::DUMMY),
            Err(LexError::NumberOutOfRange { .. })
        ));
    }
}
