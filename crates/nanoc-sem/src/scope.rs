//! The lexical scope stack (spec §4.3, §9 design note).
//!
//! Modeled as an arena of ribs rather than the original's flat array
//! with sentinel markers: each rib is a small map from name to
//! declaring node, parented by the rib it was entered from. Entering a
//! scope pushes a new rib; leaving it truncates back to the parent by
//! simply walking up the parent chain — no bulk removal is needed
//! because resolution always looks up through `current`, never by
//! scanning dead ribs.

use nanoc_par::NodeId;
use nanoc_util::{Idx, IndexVec, Symbol};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RibId(u32);

impl Idx for RibId {
    fn from_usize(idx: usize) -> Self {
        RibId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct Rib {
    bindings: HashMap<Symbol, NodeId>,
    parent: Option<RibId>,
}

/// A stack of lexical scopes, each a name-to-declaration map.
pub struct ScopeTree {
    ribs: IndexVec<RibId, Rib>,
    current: RibId,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib {
            bindings: HashMap::new(),
            parent: None,
        });
        Self { ribs, current: root }
    }

    pub fn enter_scope(&mut self) {
        let rib = self.ribs.push(Rib {
            bindings: HashMap::new(),
            parent: Some(self.current),
        });
        self.current = rib;
    }

    /// Pop back to the rib this scope was entered from, dropping every
    /// binding it introduced (spec §4.3: "truncate the stack ... dropping
    /// shadowed declarations").
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.ribs[self.current].parent {
            self.current = parent;
        }
    }

    pub fn declare(&mut self, name: Symbol, node: NodeId) {
        self.ribs[self.current].bindings.insert(name, node);
    }

    /// Innermost-first lookup, per spec §4.3 ("the first hit wins").
    pub fn resolve(&self, name: Symbol) -> Option<NodeId> {
        let mut rib_id = self.current;
        loop {
            let rib = &self.ribs[rib_id];
            if let Some(&node) = rib.bindings.get(&name) {
                return Some(node);
            }
            rib_id = rib.parent?;
        }
    }

    /// The nesting depth of the current scope; scope discipline (spec §8
    /// invariant 6) asserts this is unchanged across a matched
    /// enter/exit pair.
    pub fn depth(&self) -> usize {
        let mut rib_id = self.current;
        let mut depth = 0;
        while let Some(parent) = self.ribs[rib_id].parent {
            depth += 1;
            rib_id = parent;
        }
        depth
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
