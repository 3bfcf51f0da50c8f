//! Recursive-descent parser implementing spec §6.1's grammar.
//!
//! Precedence climbs through one method per level (assignment is the
//! loosest, unary/postfix the tightest); every non-terminal that can
//! fail partway through restores the token cursor to where it started
//! before trying the next alternative (spec §4.2 — "a production either
//! consumes no tokens and returns an error, or succeeds outright").

use crate::ast::{
    Ast, BinOp, BinOpNode, BlockNode, FunctionCallNode, FunctionDeclNode, FunctionDefNode,
    ForNode, IfNode, Node, NodeId, NumNode, ReturnNode, RetType, TerOpNode, UnOp, UnOpNode,
    VarNode, WhileNode,
};
use crate::error::ParseError;
use nanoc_lex::{Token, TokenKind};
use nanoc_util::Symbol;

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    ast: Ast,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            ast: Ast::new(),
        }
    }

    fn checkpoint(&self) -> usize {
        self.pos
    }

    fn restore(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| self.tokens.last().expect("token stream always has Eof"))
    }

    fn peek_at(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn bump(&mut self) -> Token {
        let tok = *self.current();
        if !matches!(tok.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        let tok = *self.current();
        if std::mem::discriminant(&tok.kind) == std::mem::discriminant(&kind) {
            self.bump();
            Ok(tok)
        } else {
            Err(ParseError::unexpected(what, tok.kind, tok.span))
        }
    }

    fn expect_ident(&mut self) -> Result<(Symbol, nanoc_util::Span), ParseError> {
        let tok = *self.current();
        match tok.kind {
            TokenKind::Ident(s) => {
                self.bump();
                Ok((s, tok.span))
            }
            other => Err(ParseError::unexpected("an identifier", other, tok.span)),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.ast.push(node)
    }

    /// Entry point: parse a complete translation unit.
    pub fn parse(mut self) -> Result<Ast, ParseError> {
        let mut items = Vec::new();
        while !matches!(self.current().kind, TokenKind::Eof) {
            let item = self.parse_top_level_item()?;
            items.push(item);
        }
        self.ast.items = items;
        Ok(self.ast)
    }

    fn parse_ret_type(&mut self) -> Result<RetType, ParseError> {
        match self.current().kind {
            TokenKind::KwInt => {
                self.bump();
                Ok(RetType::Int)
            }
            TokenKind::KwVoid => {
                self.bump();
                Ok(RetType::Void)
            }
            other => Err(ParseError::unexpected(
                "'int' or 'void'",
                other,
                self.current().span,
            )),
        }
    }

    fn parse_param_list(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        if matches!(self.current().kind, TokenKind::KwVoid)
            && matches!(self.peek_at(1), TokenKind::RParen)
        {
            self.bump();
        } else if !matches!(self.current().kind, TokenKind::RParen) {
            loop {
                self.expect(TokenKind::KwInt, "'int'")?;
                let (name, span) = self.expect_ident()?;
                let id = self.push(Node::Var(VarNode {
                    name,
                    is_declaration: true,
                    is_assignment: false,
                    is_usage: false,
                    init: None,
                    span,
                }));
                params.push(id);
                if matches!(self.current().kind, TokenKind::Comma) {
                    self.bump();
                    continue;
                }
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(params)
    }

    /// Disambiguates a function declaration from a definition by looking
    /// past the closing paren of the parameter list: `;` means a bare
    /// declaration, `{` means a definition follows. A bare identifier not
    /// followed by `(` is instead a top-level (global) variable, sharing
    /// the same `int` lead-in (spec §6.1).
    fn parse_top_level_item(&mut self) -> Result<NodeId, ParseError> {
        let start = self.checkpoint();
        let start_span = self.current().span;
        let return_type = self.parse_ret_type()?;
        let (name, name_span) = self.expect_ident()?;

        if !matches!(self.current().kind, TokenKind::LParen) {
            let init = if matches!(self.current().kind, TokenKind::Assign) {
                self.bump();
                Some(self.parse_expr()?)
            } else {
                None
            };
            let end_span = self.current().span;
            self.expect(TokenKind::Semicolon, "';'")?;
            return Ok(self.push(Node::Var(VarNode {
                name,
                is_declaration: true,
                is_assignment: init.is_some(),
                is_usage: false,
                init,
                span: start_span.to(name_span).to(end_span),
            })));
        }

        let params = self.parse_param_list()?;

        match self.current().kind {
            TokenKind::Semicolon => {
                let end_span = self.current().span;
                self.bump();
                Ok(self.push(Node::FunctionDecl(FunctionDeclNode {
                    name,
                    params,
                    span: start_span.to(end_span),
                })))
            }
            TokenKind::LBrace => {
                let body = self.parse_block_items()?;
                let end_span = self.tokens[self.pos - 1].span;
                Ok(self.push(Node::FunctionDef(FunctionDefNode {
                    name,
                    return_type,
                    params,
                    body,
                    span: start_span.to(end_span),
                })))
            }
            other => {
                self.restore(start);
                Err(ParseError::unexpected(
                    "';' or '{' after parameter list",
                    other,
                    self.current().span,
                ))
            }
        }
    }

    fn parse_block_items(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut items = Vec::new();
        while !matches!(self.current().kind, TokenKind::RBrace | TokenKind::Eof) {
            items.push(self.parse_block_item()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(items)
    }

    fn parse_block_item(&mut self) -> Result<NodeId, ParseError> {
        if matches!(self.current().kind, TokenKind::KwInt) {
            self.parse_declaration()
        } else {
            self.parse_statement()
        }
    }

    fn parse_declaration(&mut self) -> Result<NodeId, ParseError> {
        let start_span = self.current().span;
        self.expect(TokenKind::KwInt, "'int'")?;
        let (name, name_span) = self.expect_ident()?;
        let init = if matches!(self.current().kind, TokenKind::Assign) {
            self.bump();
            Some(self.parse_expr()?)
        } else {
            None
        };
        let end_span = self.current().span;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(self.push(Node::Var(VarNode {
            name,
            is_declaration: true,
            is_assignment: init.is_some(),
            is_usage: false,
            init,
            span: start_span.to(name_span).to(end_span),
        })))
    }

    fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        match self.current().kind {
            TokenKind::LBrace => {
                let start_span = self.current().span;
                let items = self.parse_block_items()?;
                let end_span = self.tokens[self.pos - 1].span;
                Ok(self.push(Node::Block(BlockNode {
                    items,
                    span: start_span.to(end_span),
                })))
            }
            TokenKind::KwReturn => {
                let start_span = self.current().span;
                self.bump();
                let expr = if matches!(self.current().kind, TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                let end_span = self.current().span;
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(self.push(Node::Return(ReturnNode {
                    expr,
                    span: start_span.to(end_span),
                })))
            }
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwFor => self.parse_for(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwDo => self.parse_do_while(),
            TokenKind::KwBreak => {
                let span = self.current().span;
                self.bump();
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(self.push(Node::Break(span)))
            }
            TokenKind::KwContinue => {
                let span = self.current().span;
                self.bump();
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(self.push(Node::Continue(span)))
            }
            TokenKind::Semicolon => {
                let span = self.current().span;
                self.bump();
                Ok(self.push(Node::Empty(span)))
            }
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(expr)
            }
        }
    }

    fn parse_if(&mut self) -> Result<NodeId, ParseError> {
        let start_span = self.current().span;
        self.bump();
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_branch = self.parse_statement()?;
        let else_branch = if matches!(self.current().kind, TokenKind::KwElse) {
            self.bump();
            Some(self.parse_statement()?)
        } else {
            None
        };
        let end_span = self.tokens[self.pos - 1].span;
        Ok(self.push(Node::If(IfNode {
            condition,
            then_branch,
            else_branch,
            span: start_span.to(end_span),
        })))
    }

    fn parse_for(&mut self) -> Result<NodeId, ParseError> {
        let start_span = self.current().span;
        self.bump();
        self.expect(TokenKind::LParen, "'('")?;

        let init = if matches!(self.current().kind, TokenKind::Semicolon) {
            self.bump();
            None
        } else if matches!(self.current().kind, TokenKind::KwInt) {
            Some(self.parse_declaration()?)
        } else {
            let e = self.parse_expr()?;
            self.expect(TokenKind::Semicolon, "';'")?;
            Some(e)
        };

        let condition = if matches!(self.current().kind, TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon, "';'")?;

        let update = if matches!(self.current().kind, TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::RParen, "')'")?;

        let body = self.parse_statement()?;
        let end_span = self.tokens[self.pos - 1].span;
        Ok(self.push(Node::For(ForNode {
            init,
            condition,
            update,
            body,
            span: start_span.to(end_span),
        })))
    }

    fn parse_while(&mut self) -> Result<NodeId, ParseError> {
        let start_span = self.current().span;
        self.bump();
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_statement()?;
        let end_span = self.tokens[self.pos - 1].span;
        Ok(self.push(Node::While(WhileNode {
            condition,
            body,
            span: start_span.to(end_span),
        })))
    }

    fn parse_do_while(&mut self) -> Result<NodeId, ParseError> {
        let start_span = self.current().span;
        self.bump();
        let body = self.parse_statement()?;
        self.expect(TokenKind::KwWhile, "'while'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let end_span = self.current().span;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(self.push(Node::DoWhile(WhileNode {
            condition,
            body,
            span: start_span.to(end_span),
        })))
    }

    /// `assignment-expr := IDENT '=' assignment-expr | conditional-expr`
    ///
    /// Assignment is right-associative and binds loosest; it needs one
    /// token of lookahead past the identifier to distinguish `x = ...`
    /// from a usage of `x` inside a larger expression, so it is tried
    /// first and falls through to the ternary level on mismatch.
    fn parse_expr(&mut self) -> Result<NodeId, ParseError> {
        if let TokenKind::Ident(name) = self.current().kind {
            if matches!(self.peek_at(1), TokenKind::Assign) {
                let span = self.current().span;
                self.bump();
                self.bump();
                let value = self.parse_expr()?;
                return Ok(self.push(Node::Var(VarNode {
                    name,
                    is_declaration: false,
                    is_assignment: true,
                    is_usage: false,
                    init: Some(value),
                    span,
                })));
            }
        }
        self.parse_ternary()
    }

    /// `conditional-expr := logical-or-expr ('?' expr ':' conditional-expr)?`
    fn parse_ternary(&mut self) -> Result<NodeId, ParseError> {
        let condition = self.parse_logical_or()?;
        if matches!(self.current().kind, TokenKind::Question) {
            let span = self.current().span;
            self.bump();
            let if_true = self.parse_expr()?;
            self.expect(TokenKind::Colon, "':'")?;
            let if_false = self.parse_ternary()?;
            return Ok(self.push(Node::TerOp(TerOpNode {
                condition,
                if_true,
                if_false,
                span,
            })));
        }
        Ok(condition)
    }

    fn parse_logical_or(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_logical_and()?;
        while matches!(self.current().kind, TokenKind::OrOr) {
            let span = self.current().span;
            self.bump();
            let right = self.parse_logical_and()?;
            left = self.push(Node::BinOp(BinOpNode {
                op: BinOp::Or,
                left,
                right,
                span,
            }));
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_equality()?;
        while matches!(self.current().kind, TokenKind::AndAnd) {
            let span = self.current().span;
            self.bump();
            let right = self.parse_equality()?;
            left = self.push(Node::BinOp(BinOpNode {
                op: BinOp::And,
                left,
                right,
                span,
            }));
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.current().kind {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            let span = self.current().span;
            self.bump();
            let right = self.parse_relational()?;
            left = self.push(Node::BinOp(BinOpNode { op, left, right, span }));
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Le => BinOp::Le,
                TokenKind::Ge => BinOp::Ge,
                _ => break,
            };
            let span = self.current().span;
            self.bump();
            let right = self.parse_additive()?;
            left = self.push(Node::BinOp(BinOpNode { op, left, right, span }));
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let span = self.current().span;
            self.bump();
            let right = self.parse_multiplicative()?;
            left = self.push(Node::BinOp(BinOpNode { op, left, right, span }));
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            let span = self.current().span;
            self.bump();
            let right = self.parse_unary()?;
            left = self.push(Node::BinOp(BinOpNode { op, left, right, span }));
        }
        Ok(left)
    }

    /// Applies the parse-time constant fold for a unary operator directly
    /// on a numeric literal operand (spec §4.2): `-5`, `~5`, `!5` collapse
    /// into a single `Num` node rather than a `UnOp` wrapping one, so
    /// later passes never see a foldable unary-on-literal pair.
    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        let (op, span) = match self.current().kind {
            TokenKind::Minus => (UnOp::Neg, self.current().span),
            TokenKind::Tilde => (UnOp::BitNot, self.current().span),
            TokenKind::Bang => (UnOp::Not, self.current().span),
            _ => return self.parse_postfix(),
        };
        self.bump();
        let operand = self.parse_unary()?;
        if let Node::Num(NumNode { value, .. }) = self.ast.get(operand) {
            let folded = match op {
                UnOp::Neg => value.wrapping_neg(),
                UnOp::BitNot => !value,
                UnOp::Not => i64::from(*value == 0),
            };
            return Ok(self.push(Node::Num(NumNode { value: folded, span })));
        }
        Ok(self.push(Node::UnOp(UnOpNode { op, operand, span })))
    }

    fn parse_postfix(&mut self) -> Result<NodeId, ParseError> {
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let tok = *self.current();
        match tok.kind {
            TokenKind::IntLiteral(value) => {
                self.bump();
                Ok(self.push(Node::Num(NumNode { value, span: tok.span })))
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Ident(name) if matches!(self.peek_at(1), TokenKind::LParen) => {
                self.bump();
                self.bump();
                let mut args = Vec::new();
                if !matches!(self.current().kind, TokenKind::RParen) {
                    loop {
                        args.push(self.parse_expr()?);
                        if matches!(self.current().kind, TokenKind::Comma) {
                            self.bump();
                            continue;
                        }
                        break;
                    }
                }
                let end_span = self.current().span;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(self.push(Node::FunctionCall(FunctionCallNode {
                    name,
                    args,
                    span: tok.span.to(end_span),
                })))
            }
            TokenKind::Ident(name) => {
                self.bump();
                Ok(self.push(Node::Var(VarNode {
                    name,
                    is_declaration: false,
                    is_assignment: false,
                    is_usage: true,
                    init: None,
                    span: tok.span,
                })))
            }
            other => Err(ParseError::unexpected(
                "an expression",
                other,
                tok.span,
            )),
        }
    }
}

/// Parse a complete token stream into an [`Ast`].
pub fn parse(tokens: &[Token]) -> Result<Ast, ParseError> {
    Parser::new(tokens).parse()
}
