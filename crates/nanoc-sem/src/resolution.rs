use nanoc_par::NodeId;
use std::collections::HashMap;

/// The resolver's output: a side table mapping every `var` node (both
/// declarations and usages) to the declaration it refers to.
///
/// Kept separate from the AST rather than mutating a back-link field in
/// place (spec §9 design note, option (b)) — the interpreter and codegen
/// both consult it read-only alongside the [`nanoc_par::Ast`] they were
/// given.
#[derive(Debug, Default)]
pub struct Resolution {
    uses: HashMap<NodeId, NodeId>,
}

impl Resolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bind(&mut self, usage: NodeId, declaration: NodeId) {
        self.uses.insert(usage, declaration);
    }

    /// The declaration a `var` node (declaration or usage) was bound to.
    /// Panics if `node` was never resolved — every `var` node in a
    /// successfully resolved AST has an entry (spec §8 invariant 3).
    pub fn declaration_of(&self, node: NodeId) -> NodeId {
        self.uses[&node]
    }

    pub fn get(&self, node: NodeId) -> Option<NodeId> {
        self.uses.get(&node).copied()
    }
}
