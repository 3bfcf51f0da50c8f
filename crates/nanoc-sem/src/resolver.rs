//! The name-resolution pass (spec §4.3).
//!
//! A single, sequential walk over the top-level item list: it both
//! grows the global-variable pool in program order (so the
//! redefinition rule in spec §4.3 sees definitions in the order they
//! appear) and threads the block-scoped [`ScopeTree`] through every
//! function body. The first error encountered aborts the walk (spec
//! §7's sticky-error rule applies to the resolver the same as the
//! parser).

use crate::error::{ResolveError, SemError, SemanticError};
use crate::resolution::Resolution;
use crate::scope::ScopeTree;
use indexmap::IndexMap;
use nanoc_par::{Ast, BlockNode, ForNode, IfNode, Node, NodeId, RetType, WhileNode};
use nanoc_util::Symbol;
use std::collections::HashMap;

const MAX_PARAMS: usize = 4;

struct FunctionSig {
    param_count: usize,
}

struct GlobalEntry {
    decl: NodeId,
    initialized: bool,
}

pub struct Resolver<'a> {
    ast: &'a Ast,
    scopes: ScopeTree,
    functions: HashMap<Symbol, FunctionSig>,
    globals: IndexMap<Symbol, GlobalEntry>,
    resolution: Resolution,
}

impl<'a> Resolver<'a> {
    pub fn new(ast: &'a Ast) -> Self {
        Self {
            ast,
            scopes: ScopeTree::new(),
            functions: HashMap::new(),
            globals: IndexMap::new(),
            resolution: Resolution::new(),
        }
    }

    pub fn resolve(mut self) -> Result<Resolution, SemError> {
        for &item in &self.ast.items {
            self.resolve_item(item)?;
        }
        Ok(self.resolution)
    }

    fn node(&self, id: NodeId) -> &Node {
        self.ast.get(id)
    }

    fn resolve_item(&mut self, id: NodeId) -> Result<(), SemError> {
        match self.node(id) {
            Node::FunctionDecl(f) => {
                if f.params.len() > MAX_PARAMS {
                    return Err(SemanticError::TooManyParameters {
                        name: f.name.to_string(),
                        count: f.params.len(),
                        span: f.span,
                    }
                    .into());
                }
                self.functions.insert(
                    f.name,
                    FunctionSig {
                        param_count: f.params.len(),
                    },
                );
                Ok(())
            }
            Node::FunctionDef(f) => {
                if f.params.len() > MAX_PARAMS {
                    return Err(SemanticError::TooManyParameters {
                        name: f.name.to_string(),
                        count: f.params.len(),
                        span: f.span,
                    }
                    .into());
                }
                if f.name.as_str() == "main" && f.return_type != RetType::Int {
                    return Err(SemanticError::MainMustReturnInt { span: f.span }.into());
                }
                self.functions.insert(
                    f.name,
                    FunctionSig {
                        param_count: f.params.len(),
                    },
                );

                self.scopes.enter_scope();
                for &param in &f.params {
                    let var = self.node(param).as_var().expect("param is a var node");
                    self.scopes.declare(var.name, param);
                    self.resolution.bind(param, param);
                }
                for &stmt in &f.body {
                    self.resolve_node(stmt)?;
                }
                self.scopes.exit_scope();
                Ok(())
            }
            Node::Var(_) => self.resolve_global(id),
            _ => unreachable!("top-level items are functions or globals"),
        }
    }

    fn resolve_global(&mut self, id: NodeId) -> Result<(), SemError> {
        let var = self.node(id).as_var().expect("global is a var node").clone();
        if let Some(init) = var.init {
            self.resolve_node(init)?;
            if !matches!(self.node(init), Node::Num(_)) {
                return Err(SemanticError::NonLiteralGlobalInitializer {
                    name: var.name.to_string(),
                    span: var.span,
                }
                .into());
            }
        }

        match self.globals.get_mut(&var.name) {
            Some(entry) if var.init.is_some() => {
                if entry.initialized {
                    return Err(ResolveError::MultipleGlobalInitializers {
                        name: var.name.to_string(),
                        span: var.span,
                    }
                    .into());
                }
                entry.initialized = true;
                entry.decl = id;
            }
            Some(_) => {}
            None => {
                self.globals.insert(
                    var.name,
                    GlobalEntry {
                        decl: id,
                        initialized: var.init.is_some(),
                    },
                );
            }
        }
        self.resolution.bind(id, id);
        Ok(())
    }

    fn resolve_node(&mut self, id: NodeId) -> Result<(), SemError> {
        let node = self.node(id).clone();
        match node {
            Node::Block(BlockNode { items, .. }) => {
                self.scopes.enter_scope();
                for item in items {
                    self.resolve_node(item)?;
                }
                self.scopes.exit_scope();
                Ok(())
            }
            Node::Return(r) => {
                if let Some(expr) = r.expr {
                    self.resolve_node(expr)?;
                }
                Ok(())
            }
            Node::If(IfNode {
                condition,
                then_branch,
                else_branch,
                ..
            }) => {
                self.resolve_node(condition)?;
                self.resolve_node(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.resolve_node(else_branch)?;
                }
                Ok(())
            }
            Node::For(ForNode {
                init,
                condition,
                update,
                body,
                ..
            }) => {
                self.scopes.enter_scope();
                if let Some(init) = init {
                    self.resolve_node(init)?;
                }
                if let Some(condition) = condition {
                    self.resolve_node(condition)?;
                }
                if let Some(update) = update {
                    self.resolve_node(update)?;
                }
                self.resolve_node(body)?;
                self.scopes.exit_scope();
                Ok(())
            }
            Node::While(WhileNode { condition, body, .. })
            | Node::DoWhile(WhileNode { condition, body, .. }) => {
                self.resolve_node(condition)?;
                self.resolve_node(body)?;
                Ok(())
            }
            Node::Break(_) | Node::Continue(_) | Node::Empty(_) | Node::Num(_) => Ok(()),
            Node::UnOp(u) => self.resolve_node(u.operand),
            Node::BinOp(b) => {
                self.resolve_node(b.left)?;
                self.resolve_node(b.right)
            }
            Node::TerOp(t) => {
                self.resolve_node(t.condition)?;
                self.resolve_node(t.if_true)?;
                self.resolve_node(t.if_false)
            }
            Node::FunctionCall(call) => {
                let sig = self
                    .functions
                    .get(&call.name)
                    .ok_or_else(|| ResolveError::UndeclaredFunction {
                        name: call.name.to_string(),
                        span: call.span,
                    })?;
                if sig.param_count != call.args.len() {
                    return Err(SemanticError::ArgumentCountMismatch {
                        name: call.name.to_string(),
                        found: call.args.len(),
                        expected: sig.param_count,
                        span: call.span,
                    }
                    .into());
                }
                for &arg in &call.args {
                    self.resolve_node(arg)?;
                }
                Ok(())
            }
            Node::Var(var) if var.is_declaration => {
                if let Some(init) = var.init {
                    self.resolve_node(init)?;
                }
                self.scopes.declare(var.name, id);
                self.resolution.bind(id, id);
                Ok(())
            }
            Node::Var(var) if var.is_assignment => {
                let init = var.init.expect("assignment carries a value expression");
                self.resolve_node(init)?;
                self.bind_usage(id, var.name, var.span)
            }
            Node::Var(var) => self.bind_usage(id, var.name, var.span),
            Node::FunctionDecl(_) | Node::FunctionDef(_) => {
                unreachable!("functions are not nested inside statements")
            }
        }
    }

    fn bind_usage(&mut self, id: NodeId, name: Symbol, span: nanoc_util::Span) -> Result<(), SemError> {
        if let Some(decl) = self.scopes.resolve(name) {
            self.resolution.bind(id, decl);
            return Ok(());
        }
        if let Some(entry) = self.globals.get(&name) {
            self.resolution.bind(id, entry.decl);
            return Ok(());
        }
        Err(ResolveError::UndeclaredIdentifier {
            name: name.to_string(),
            span,
        }
        .into())
    }
}

pub fn resolve(ast: &Ast) -> Result<Resolution, SemError> {
    Resolver::new(ast).resolve()
}
