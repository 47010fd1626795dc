//! A red-black tree set backed by a node arena.
//!
//! Every structural step of a mutation (linking a node, a recolor, a rotation,
//! moving or removing a key) is reported to an [`Observer`], which is how a
//! visualizer animates the balancing. The default observer, [`Noop`], ignores
//! them.
mod arena;
mod cursor;
mod error;
mod iter;
mod node;
mod observer;
mod root;
#[cfg(test)]
mod testing;
mod tree;
mod validate;

use std::fmt;

use generational_arena::Index;

pub use cursor::NodeRef;
pub use error::{TreeError, TreeResult};
pub use iter::{Entries, IntoIter, Iter};
pub use observer::{Mutation, Noop, Observer, Recorder};

use arena::NodeArena;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Which child slot of a parent a node sits in; also the direction of a
/// rotation (a left rotation moves the pivot down to the left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline(always)]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

pub(crate) type NodeId = Index;
pub(crate) type Link = Option<NodeId>;

/// A keyed, colored node. Links are arena handles and never own anything.
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) color: Color,
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

/// The balancing core: the arena, the root handle and the observer.
pub(crate) struct Root<K, O> {
    nodes: NodeArena<K>,
    root: Link,
    observer: O,
}

/// An ordered set of unique keys kept balanced as a red-black tree.
///
/// `O` receives a [`Mutation`] after every atomic step of `insert` and
/// `remove`.
pub struct Tree<K, O = Noop> {
    root: Root<K, O>,
    len: usize,
}
