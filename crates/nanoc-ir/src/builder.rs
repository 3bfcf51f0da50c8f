//! Builds [`Program`]s directly from a token stream (spec §4.6).
//!
//! Unlike [`nanoc_par`], this front end never constructs an AST: it is
//! an experimental alternative path that currently covers a single
//! function consisting of constants, unary operators applied to them,
//! and a `return`. Anything outside that (binary operators, control
//! flow, more than one function) is rejected rather than silently
//! approximated.

use crate::error::IrError;
use crate::ir::{Instruction, IrRetType, IrUnOp, Program, RegisterId};
use nanoc_lex::{Token, TokenKind};

pub struct IrBuilder<'a> {
    tokens: &'a [Token],
    pos: usize,
    next_reg: u32,
    instructions: Vec<Instruction>,
}

impl<'a> IrBuilder<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            next_reg: 0,
            instructions: Vec::new(),
        }
    }

    fn current(&self) -> TokenKind {
        self.tokens.get(self.pos).map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    fn bump(&mut self) -> TokenKind {
        let kind = self.current();
        if !matches!(kind, TokenKind::Eof) {
            self.pos += 1;
        }
        kind
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), IrError> {
        let found = self.current();
        if std::mem::discriminant(&found) == std::mem::discriminant(&kind) {
            self.bump();
            Ok(())
        } else {
            Err(IrError::unexpected(what, found))
        }
    }

    fn fresh_register(&mut self) -> RegisterId {
        let id = RegisterId::new(self.next_reg);
        self.next_reg += 1;
        id
    }

    fn parse_expr(&mut self) -> Result<RegisterId, IrError> {
        match self.current() {
            TokenKind::Minus => {
                self.bump();
                let src = self.parse_expr()?;
                let dst = self.fresh_register();
                self.instructions.push(Instruction::Unary {
                    op: IrUnOp::Neg,
                    dst,
                    src,
                });
                Ok(dst)
            }
            TokenKind::Tilde => {
                self.bump();
                let src = self.parse_expr()?;
                let dst = self.fresh_register();
                self.instructions.push(Instruction::Unary {
                    op: IrUnOp::BitNot,
                    dst,
                    src,
                });
                Ok(dst)
            }
            TokenKind::Bang => {
                self.bump();
                let src = self.parse_expr()?;
                let dst = self.fresh_register();
                self.instructions.push(Instruction::Unary {
                    op: IrUnOp::Not,
                    dst,
                    src,
                });
                Ok(dst)
            }
            TokenKind::IntLiteral(value) => {
                self.bump();
                let dst = self.fresh_register();
                self.instructions.push(Instruction::Const { dst, value });
                Ok(dst)
            }
            other => Err(IrError::UnsupportedConstruct {
                found: other.spelling(),
            }),
        }
    }

    fn parse_return(&mut self) -> Result<(), IrError> {
        self.expect(TokenKind::KwReturn, "'return'")?;
        if matches!(self.current(), TokenKind::Semicolon) {
            self.instructions.push(Instruction::Return);
        } else {
            let src = self.parse_expr()?;
            self.instructions.push(Instruction::ReturnValue { src });
        }
        self.expect(TokenKind::Semicolon, "';'")
    }

    fn parse_function(&mut self) -> Result<(), IrError> {
        let return_type = match self.current() {
            TokenKind::KwInt => {
                self.bump();
                IrRetType::Int
            }
            TokenKind::KwVoid => {
                self.bump();
                IrRetType::Void
            }
            other => return Err(IrError::unexpected("'int' or 'void'", other)),
        };
        let name = match self.current() {
            TokenKind::Ident(s) => {
                self.bump();
                s
            }
            other => return Err(IrError::unexpected("an identifier", other)),
        };
        self.expect(TokenKind::LParen, "'('")?;
        if matches!(self.current(), TokenKind::KwVoid) {
            self.bump();
        }
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::LBrace, "'{'")?;

        self.instructions.push(Instruction::FunctionStart {
            name,
            return_type,
            params: Vec::new(),
        });

        self.parse_return()?;
        self.expect(TokenKind::RBrace, "'}'")?;
        if !matches!(self.current(), TokenKind::Eof) {
            return Err(IrError::UnsupportedConstruct {
                found: self.current().spelling(),
            });
        }
        Ok(())
    }
}

/// Build a [`Program`] from a token stream covering exactly one
/// function whose body is a single `return` of a constant or a chain of
/// unary operators applied to one.
pub fn build(tokens: &[Token]) -> Result<Program, IrError> {
    let mut builder = IrBuilder::new(tokens);
    builder.parse_function()?;
    Ok(Program {
        instructions: builder.instructions,
    })
}
