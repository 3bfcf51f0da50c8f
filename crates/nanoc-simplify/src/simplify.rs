//! Structural constant folding (spec §4.7).
//!
//! A demonstration pass, not wired into the primary pipeline: folds a
//! `unop` or arithmetic `binop` whose operand(s) are already `num`
//! literals into a single `num`, iterated to a fixpoint so that folding
//! one node can expose another fold one level up (`-(-1)` style
//! nesting). The distilled grammar's own unary-constant fold already
//! handles most of this at parse time; this pass additionally restores
//! the original's folding of `-`, `*`, `/` alongside `+` (the original
//! `simplify.cpp` folds all four arithmetic binops, not just addition).

use nanoc_par::{Ast, BinOp, Node, NodeId, NumNode, UnOp};
use nanoc_util::Idx;

fn try_fold(ast: &Ast, id: NodeId) -> Option<Node> {
    match ast.get(id) {
        Node::UnOp(u) => {
            let Node::Num(operand) = ast.get(u.operand) else {
                return None;
            };
            let value = match u.op {
                UnOp::Neg => operand.value.wrapping_neg(),
                UnOp::BitNot => !operand.value,
                UnOp::Not => i64::from(operand.value == 0),
            };
            Some(Node::Num(NumNode { value, span: u.span }))
        }
        Node::BinOp(b) if matches!(b.op, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div) => {
            let (Node::Num(l), Node::Num(r)) = (ast.get(b.left), ast.get(b.right)) else {
                return None;
            };
            let value = match b.op {
                BinOp::Add => l.value.wrapping_add(r.value),
                BinOp::Sub => l.value.wrapping_sub(r.value),
                BinOp::Mul => l.value.wrapping_mul(r.value),
                BinOp::Div if r.value != 0 => l.value.wrapping_div(r.value),
                _ => return None,
            };
            Some(Node::Num(NumNode { value, span: b.span }))
        }
        _ => None,
    }
}

/// Fold every foldable `unop`/arithmetic-`binop` node in place, to a
/// fixpoint. Leaves division by a literal zero alone: that is a runtime
/// error for the interpreter and codegen to report, not something this
/// pass should silently paper over.
pub fn simplify(ast: &mut Ast) {
    loop {
        let mut changed = false;
        for idx in 0..ast.arena.len() {
            let id = NodeId::from_usize(idx);
            if let Some(folded) = try_fold(ast, id) {
                ast.arena[id] = folded;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}
