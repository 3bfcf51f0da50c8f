//! Tree-walking interpreter (spec §4.4).
//!
//! Evaluates a resolved AST directly, producing the same 64-bit result
//! the codegen path's emitted binary would produce for `main`'s exit
//! code (spec §8 invariant 4, the central cross-check against the
//! generated assembly). Locals live on an explicit stack of
//! `(declaring NodeId, value)` pairs rather than `(name, value)` pairs:
//! resolution has already disambiguated every usage down to a NodeId,
//! so there is no need to re-match by name, and keying by NodeId rather
//! than name is what makes recursion safe — each activation of a
//! recursive call pushes its own entries for the same declaring node,
//! and the topmost one shadows the caller's.

use crate::error::InterpError;
use nanoc_par::{Ast, BinOp, BlockNode, ForNode, IfNode, Node, NodeId, UnOp, WhileNode};
use nanoc_sem::Resolution;
use nanoc_util::Symbol;
use std::collections::HashMap;

enum Flow {
    Normal,
    Return(i64),
    Break,
    Continue,
}

pub struct Interp<'a> {
    ast: &'a Ast,
    resolution: &'a Resolution,
    functions: HashMap<Symbol, NodeId>,
    globals: HashMap<NodeId, i64>,
    stack: Vec<(NodeId, i64)>,
}

impl<'a> Interp<'a> {
    pub fn new(ast: &'a Ast, resolution: &'a Resolution) -> Self {
        let mut functions = HashMap::new();
        let mut globals = HashMap::new();
        for &item in &ast.items {
            match ast.get(item) {
                Node::FunctionDef(f) => {
                    functions.insert(f.name, item);
                }
                Node::Var(v) => {
                    let value = match v.init {
                        Some(init) => match ast.get(init) {
                            Node::Num(n) => n.value,
                            _ => 0,
                        },
                        None => 0,
                    };
                    globals.insert(item, value);
                }
                Node::FunctionDecl(_) => {}
                _ => unreachable!("top-level items are functions or globals"),
            }
        }
        Self {
            ast,
            resolution,
            functions,
            globals,
            stack: Vec::new(),
        }
    }

    /// Run `main` with no arguments and return its exit code.
    pub fn run(&mut self) -> Result<i64, InterpError> {
        let main = *self
            .functions
            .get(&Symbol::intern("main"))
            .expect("resolution guarantees a well-formed program defines main");
        self.call(main, &[])
    }

    fn call(&mut self, def_id: NodeId, args: &[i64]) -> Result<i64, InterpError> {
        let def = match self.ast.get(def_id) {
            Node::FunctionDef(f) => f,
            _ => unreachable!("call target resolved to a non-function"),
        };
        let marker = self.stack.len();
        for (&param, &value) in def.params.iter().zip(args) {
            self.stack.push((param, value));
        }

        let mut result = 0;
        for &stmt in &def.body {
            match self.exec(stmt)? {
                Flow::Return(v) => {
                    result = v;
                    break;
                }
                Flow::Break => return Err(InterpError::BreakOutsideLoop { span: self.ast.get(stmt).span() }),
                Flow::Continue => {
                    return Err(InterpError::ContinueOutsideLoop { span: self.ast.get(stmt).span() })
                }
                Flow::Normal => {}
            }
        }
        self.stack.truncate(marker);
        Ok(result)
    }

    fn exec(&mut self, id: NodeId) -> Result<Flow, InterpError> {
        match self.ast.get(id).clone() {
            Node::Block(BlockNode { items, .. }) => {
                let marker = self.stack.len();
                for item in items {
                    match self.exec(item)? {
                        Flow::Normal => {}
                        other => {
                            self.stack.truncate(marker);
                            return Ok(other);
                        }
                    }
                }
                self.stack.truncate(marker);
                Ok(Flow::Normal)
            }
            Node::Return(r) => {
                let value = match r.expr {
                    Some(e) => self.eval(e)?,
                    None => 0,
                };
                Ok(Flow::Return(value))
            }
            Node::If(IfNode {
                condition,
                then_branch,
                else_branch,
                ..
            }) => {
                if self.eval(condition)? != 0 {
                    self.exec(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Node::For(ForNode {
                init,
                condition,
                update,
                body,
                ..
            }) => {
                let marker = self.stack.len();
                if let Some(init) = init {
                    self.exec(init)?;
                }
                loop {
                    let cond = match condition {
                        Some(c) => self.eval(c)?,
                        None => 1,
                    };
                    if cond == 0 {
                        break;
                    }
                    match self.exec(body)? {
                        Flow::Break => break,
                        Flow::Return(v) => {
                            self.stack.truncate(marker);
                            return Ok(Flow::Return(v));
                        }
                        Flow::Continue | Flow::Normal => {}
                    }
                    if let Some(update) = update {
                        self.eval_as_stmt(update)?;
                    }
                }
                self.stack.truncate(marker);
                Ok(Flow::Normal)
            }
            Node::While(WhileNode { condition, body, .. }) => {
                while self.eval(condition)? != 0 {
                    match self.exec(body)? {
                        Flow::Break => break,
                        Flow::Return(v) => return Ok(Flow::Return(v)),
                        Flow::Continue | Flow::Normal => {}
                    }
                }
                Ok(Flow::Normal)
            }
            Node::DoWhile(WhileNode { condition, body, .. }) => {
                loop {
                    match self.exec(body)? {
                        Flow::Break => break,
                        Flow::Return(v) => return Ok(Flow::Return(v)),
                        Flow::Continue | Flow::Normal => {}
                    }
                    if self.eval(condition)? == 0 {
                        break;
                    }
                }
                Ok(Flow::Normal)
            }
            Node::Break(_) => Ok(Flow::Break),
            Node::Continue(_) => Ok(Flow::Continue),
            Node::Empty(_) => Ok(Flow::Normal),
            Node::Var(v) if v.is_declaration => {
                let value = match v.init {
                    Some(init) => self.eval(init)?,
                    None => 0,
                };
                self.stack.push((id, value));
                Ok(Flow::Normal)
            }
            _ => {
                self.eval_as_stmt(id)?;
                Ok(Flow::Normal)
            }
        }
    }

    fn eval_as_stmt(&mut self, id: NodeId) -> Result<(), InterpError> {
        self.eval(id).map(|_| ())
    }

    fn lookup(&self, usage: NodeId) -> i64 {
        let decl = self.resolution.declaration_of(usage);
        for &(id, value) in self.stack.iter().rev() {
            if id == decl {
                return value;
            }
        }
        *self.globals.get(&decl).expect("resolution guarantees a binding")
    }

    fn assign(&mut self, usage: NodeId, value: i64) {
        let decl = self.resolution.declaration_of(usage);
        if let Some(slot) = self.stack.iter_mut().rev().find(|(id, _)| *id == decl) {
            slot.1 = value;
            return;
        }
        self.globals.insert(decl, value);
    }

    fn eval(&mut self, id: NodeId) -> Result<i64, InterpError> {
        match self.ast.get(id).clone() {
            Node::Num(n) => Ok(n.value),
            Node::UnOp(u) => {
                let v = self.eval(u.operand)?;
                Ok(match u.op {
                    UnOp::Neg => v.wrapping_neg(),
                    UnOp::BitNot => !v,
                    UnOp::Not => i64::from(v == 0),
                })
            }
            Node::BinOp(b) => {
                if b.op.is_short_circuit() {
                    let left = self.eval(b.left)? != 0;
                    return Ok(match b.op {
                        BinOp::And => i64::from(left && self.eval(b.right)? != 0),
                        BinOp::Or => i64::from(left || self.eval(b.right)? != 0),
                        _ => unreachable!(),
                    });
                }
                let l = self.eval(b.left)?;
                let r = self.eval(b.right)?;
                Ok(match b.op {
                    BinOp::Add => l.wrapping_add(r),
                    BinOp::Sub => l.wrapping_sub(r),
                    BinOp::Mul => l.wrapping_mul(r),
                    BinOp::Div => {
                        if r == 0 {
                            return Err(InterpError::DivisionByZero {
                                span: self.ast.get(id).span(),
                            });
                        }
                        l.wrapping_div(r)
                    }
                    BinOp::Mod => {
                        if r == 0 {
                            return Err(InterpError::ModuloByZero {
                                span: self.ast.get(id).span(),
                            });
                        }
                        l.wrapping_rem(r)
                    }
                    BinOp::Lt => i64::from(l < r),
                    BinOp::Gt => i64::from(l > r),
                    BinOp::Le => i64::from(l <= r),
                    BinOp::Ge => i64::from(l >= r),
                    BinOp::Eq => i64::from(l == r),
                    BinOp::Ne => i64::from(l != r),
                    BinOp::And | BinOp::Or => unreachable!(),
                })
            }
            Node::TerOp(t) => {
                if self.eval(t.condition)? != 0 {
                    self.eval(t.if_true)
                } else {
                    self.eval(t.if_false)
                }
            }
            Node::FunctionCall(call) => {
                let def = *self
                    .functions
                    .get(&call.name)
                    .ok_or_else(|| InterpError::UndefinedFunction {
                        name: call.name.to_string(),
                        span: call.span,
                    })?;
                let mut args = Vec::with_capacity(call.args.len());
                for &arg in &call.args {
                    args.push(self.eval(arg)?);
                }
                self.call(def, &args)
            }
            Node::Var(v) if v.is_assignment => {
                let value = self.eval(v.init.expect("assignment carries a value"))?;
                self.assign(id, value);
                Ok(value)
            }
            Node::Var(_) => Ok(self.lookup(id)),
            other => unreachable!("not an expression: {other:?}"),
        }
    }
}

/// Run `main` to completion and return its exit code.
pub fn interpret(ast: &Ast, resolution: &Resolution) -> Result<i64, InterpError> {
    Interp::new(ast, resolution).run()
}
