//! Per-function stack frame layout (spec §4.5).
//!
//! Walks a function's parameters and body once, in the exact order the
//! emitter will later visit them, handing out one 8-byte slot to every
//! local variable declaration and every `binop` node (the latter holds
//! its left operand while the right is evaluated, so an expression tree
//! never has to spill through the real machine stack). Grounded on the
//! original `push_vars_recursive` walk in `gen.cpp`: a `binop` claims its
//! slot on entry, before either operand is visited, and a `var` claims
//! one only when it's the declaring occurrence.

use nanoc_par::{Ast, Node, NodeId};
use std::collections::HashMap;

pub struct FrameLayout {
    slots: HashMap<NodeId, i64>,
}

impl FrameLayout {
    pub fn build(ast: &Ast, params: &[NodeId], body: &[NodeId]) -> Self {
        let mut layout = Self {
            slots: HashMap::new(),
        };
        for &param in params {
            layout.visit(ast, param);
        }
        for &stmt in body {
            layout.visit(ast, stmt);
        }
        layout
    }

    fn claim(&mut self, id: NodeId) {
        let next = self.slots.len() as i64;
        self.slots.insert(id, next);
    }

    fn visit(&mut self, ast: &Ast, id: NodeId) {
        match ast.get(id) {
            Node::Var(var) => {
                if var.is_declaration {
                    self.claim(id);
                }
                if let Some(init) = var.init {
                    self.visit(ast, init);
                }
            }
            Node::BinOp(b) => {
                self.claim(id);
                self.visit(ast, b.left);
                self.visit(ast, b.right);
            }
            Node::Block(block) => {
                for &item in &block.items {
                    self.visit(ast, item);
                }
            }
            Node::Return(r) => {
                if let Some(expr) = r.expr {
                    self.visit(ast, expr);
                }
            }
            Node::If(n) => {
                self.visit(ast, n.condition);
                self.visit(ast, n.then_branch);
                if let Some(else_branch) = n.else_branch {
                    self.visit(ast, else_branch);
                }
            }
            Node::For(n) => {
                if let Some(init) = n.init {
                    self.visit(ast, init);
                }
                if let Some(condition) = n.condition {
                    self.visit(ast, condition);
                }
                if let Some(update) = n.update {
                    self.visit(ast, update);
                }
                self.visit(ast, n.body);
            }
            Node::While(n) | Node::DoWhile(n) => {
                self.visit(ast, n.condition);
                self.visit(ast, n.body);
            }
            Node::UnOp(n) => self.visit(ast, n.operand),
            Node::TerOp(n) => {
                self.visit(ast, n.condition);
                self.visit(ast, n.if_true);
                self.visit(ast, n.if_false);
            }
            Node::FunctionCall(call) => {
                for &arg in &call.args {
                    self.visit(ast, arg);
                }
            }
            Node::Num(_) | Node::Break(_) | Node::Continue(_) | Node::Empty(_) => {}
            Node::FunctionDecl(_) | Node::FunctionDef(_) => {
                unreachable!("functions do not nest inside a function body")
            }
        }
    }

    /// `offset(%rsp)` for a slot-holding node, if one was assigned.
    pub fn offset(&self, id: NodeId) -> Option<i64> {
        self.slots.get(&id).map(|i| 32 + 8 * i)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanoc_par::parse;
    use nanoc_lex::tokenize;
    use nanoc_util::FileId;

    fn layout_of(src: &str) -> FrameLayout {
        let tokens = tokenize(src, FileId::DUMMY).unwrap();
        let ast = parse(&tokens).unwrap();
        let Node::FunctionDef(def) = ast.get(ast.items[0]) else {
            panic!("expected a function definition")
        };
        FrameLayout::build(&ast, &def.params, &def.body)
    }

    #[test]
    fn one_slot_per_local_and_one_per_binop() {
        let layout = layout_of("int main(void) { int a = 1; int b = a + 2; return b; }");
        assert_eq!(layout.slot_count(), 3);
    }

    #[test]
    fn params_consume_slots_before_the_body_does() {
        let layout = layout_of("int f(int a, int b) { return a; }");
        assert_eq!(layout.slot_count(), 2);
    }

    #[test]
    fn a_function_with_no_locals_or_binops_needs_no_slots() {
        let layout = layout_of("int main(void) { return 0; }");
        assert_eq!(layout.slot_count(), 0);
    }
}
