use smallvec::SmallVec;
use super::node::NodeId;

/// The nodes a flight passes through, consumed front to back exactly once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    nodes: SmallVec<[NodeId; 8]>,
    cursor: usize,
}

impl Route {
    pub fn new(nodes: SmallVec<[NodeId; 8]>) -> Route {
        Route { nodes: nodes, cursor: 0 }
    }

    /// Advances to the next node. Returns `None` once the route is used up.
    pub fn next_node(&mut self) -> Option<NodeId> {
        let node = *self.nodes.get(self.cursor)?;
        self.cursor += 1;
        Some(node)
    }

    pub fn last_node(&self) -> Option<NodeId> {
        if self.cursor == 0 { None } else { Some(self.nodes[self.cursor - 1]) }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.nodes.len() - self.cursor
    }
}
