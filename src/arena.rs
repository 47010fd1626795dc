use std::ops::{Index, IndexMut};

use generational_arena::Arena;

use crate::{Color, Link, Node, NodeId, Side, TreeError, TreeResult};

/// Storage for every node of a tree.
///
/// Parent and child links are handles into this arena, so the parent/child
/// cycle never involves ownership: dropping the arena drops every node.
pub(crate) struct NodeArena<K> {
    arena: Arena<Node<K>>,
}

impl<K> Index<NodeId> for NodeArena<K> {
    type Output = Node<K>;

    #[inline(always)]
    fn index(&self, id: NodeId) -> &Node<K> {
        &self.arena[id]
    }
}

impl<K> IndexMut<NodeId> for NodeArena<K> {
    #[inline(always)]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.arena[id]
    }
}

impl<K> NodeArena<K> {
    pub fn new() -> Self {
        NodeArena {
            arena: Arena::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            arena: Arena::with_capacity(capacity),
        }
    }

    /// Stores a new red, unlinked node.
    pub fn alloc(&mut self, key: K) -> NodeId {
        self.arena.insert(Node::new(key))
    }

    /// Takes an already unlinked node out of the arena.
    pub fn free(&mut self, id: NodeId) -> Option<Node<K>> {
        self.arena.remove(id)
    }

    pub fn clear(&mut self) {
        self.arena = Arena::new();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.arena.get(id)
    }

    /// Fails with [`TreeError::DanglingLink`] if either handle is stale.
    pub fn swap_keys(&mut self, a: NodeId, b: NodeId) -> TreeResult<()> {
        match self.arena.get2_mut(a, b) {
            (Some(a), Some(b)) => {
                std::mem::swap(&mut a.key, &mut b.key);
                Ok(())
            }
            _ => Err(TreeError::DanglingLink),
        }
    }

    /// A missing node is a black leaf.
    #[inline(always)]
    pub fn color_of(&self, link: Link) -> Color {
        link.map_or(Color::Black, |id| self[id].color)
    }

    #[inline(always)]
    pub fn is_red(&self, link: Link) -> bool {
        self.color_of(link) == Color::Red
    }

    #[inline(always)]
    pub fn is_black(&self, link: Link) -> bool {
        self.color_of(link) == Color::Black
    }

    /// The slot `child` occupies under `parent`.
    #[inline(always)]
    pub fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        if self[parent].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// The other child of `id`'s parent; `None` for the root.
    pub fn sibling(&self, id: NodeId) -> Link {
        let parent = self[id].parent?;
        self[parent].child(self.side_of(parent, id).opposite())
    }

    pub fn root_of(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self[id].parent {
            id = parent;
        }
        id
    }

    pub fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self[id].left {
            id = left;
        }
        id
    }

    pub fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self[id].right {
            id = right;
        }
        id
    }

    /// Points `parent`'s slot that held `old` at `new`. Returns false when
    /// there is no parent, i.e. `new` is the new root.
    pub fn change_child(&mut self, old: NodeId, new: Link, parent: Link) -> bool {
        let Some(parent) = parent else {
            return false;
        };
        let side = self.side_of(parent, old);
        self[parent].set_child(side, new);
        true
    }

    /// Rotates `id` down toward `direction`; its child on the other side
    /// takes its place.
    ///
    /// ```text
    ///   rotate(x, Left)
    ///
    ///      x              y
    ///     / \            / \
    ///    a   y    -->   x   c
    ///       / \        / \
    ///      b   c      a   b
    /// ```
    ///
    /// Returns the root of the whole tree after the rotation.
    pub fn rotate(&mut self, id: NodeId, direction: Side) -> TreeResult<NodeId> {
        let missing = direction.opposite();
        let pivot = self[id].child(missing).ok_or(TreeError::MissingChild {
            rotation: direction,
            missing,
        })?;
        let parent = self[id].parent;

        let inner = self[pivot].child(direction);
        self[id].set_child(missing, inner);
        if let Some(inner) = inner {
            self[inner].parent = Some(id);
        }

        self.change_child(id, Some(pivot), parent);
        self[pivot].parent = parent;
        self[pivot].set_child(direction, Some(id));
        self[id].parent = Some(pivot);

        Ok(self.root_of(pivot))
    }
}
