use std::{fmt, ptr};

use crate::{Color, NodeArena, NodeId, Side};

/// A read-only view of one node, for layout code that needs the actual
/// shape of the tree rather than its keys.
pub struct NodeRef<'a, K> {
    nodes: &'a NodeArena<K>,
    id: NodeId,
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.id == other.id
    }
}

impl<K> Eq for NodeRef<'_, K> {}

impl<'a, K> NodeRef<'a, K> {
    pub(crate) fn new(nodes: &'a NodeArena<K>, id: NodeId) -> Self {
        NodeRef { nodes, id }
    }

    fn at(&self, id: Option<NodeId>) -> Option<NodeRef<'a, K>> {
        id.map(|id| NodeRef::new(self.nodes, id))
    }

    pub fn key(&self) -> &'a K {
        &self.nodes[self.id].key
    }

    pub fn color(&self) -> Color {
        self.nodes[self.id].color
    }

    pub fn is_red(&self) -> bool {
        self.nodes[self.id].is_red()
    }

    pub fn is_black(&self) -> bool {
        self.nodes[self.id].is_black()
    }

    pub fn is_root(&self) -> bool {
        self.nodes[self.id].parent.is_none()
    }

    pub fn parent(&self) -> Option<NodeRef<'a, K>> {
        self.at(self.nodes[self.id].parent)
    }

    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        self.at(self.nodes[self.id].left)
    }

    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        self.at(self.nodes[self.id].right)
    }

    pub fn child(&self, side: Side) -> Option<NodeRef<'a, K>> {
        self.at(self.nodes[self.id].child(side))
    }

    /// The other child of this node's parent; `None` for the root or an only
    /// child.
    pub fn sibling(&self) -> Option<NodeRef<'a, K>> {
        self.at(self.nodes.sibling(self.id))
    }

    /// Which side of its parent this node hangs from; `None` for the root.
    pub fn side(&self) -> Option<Side> {
        let parent = self.nodes[self.id].parent?;
        Some(self.nodes.side_of(parent, self.id))
    }
}

impl<K> fmt::Debug for NodeRef<'_, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}
