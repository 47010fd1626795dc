use crate::{Color, Side};

/// One atomic step of a mutation, as seen by an [`Observer`].
///
/// Observers receive `Mutation<&K>`; [`Mutation::cloned`] turns it into an
/// owned `Mutation<K>` that can outlive the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation<T> {
    /// A new red node was linked below its parent.
    Inserted(T),
    /// A node changed color.
    Recolored { key: T, color: Color },
    /// A node was rotated down toward `direction`.
    Rotated { key: T, direction: Side },
    /// While removing a node with two children, its in-order successor's key
    /// took its place.
    Moved(T),
    /// A node was spliced out of the tree.
    Removed(T),
}

impl<T> Mutation<T> {
    pub fn key(&self) -> &T {
        match self {
            Mutation::Inserted(key)
            | Mutation::Recolored { key, .. }
            | Mutation::Rotated { key, .. }
            | Mutation::Moved(key)
            | Mutation::Removed(key) => key,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mutation<U> {
        match self {
            Mutation::Inserted(key) => Mutation::Inserted(f(key)),
            Mutation::Recolored { key, color } => Mutation::Recolored { key: f(key), color },
            Mutation::Rotated { key, direction } => Mutation::Rotated {
                key: f(key),
                direction,
            },
            Mutation::Moved(key) => Mutation::Moved(f(key)),
            Mutation::Removed(key) => Mutation::Removed(f(key)),
        }
    }
}

impl<K: Clone> Mutation<&K> {
    pub fn cloned(self) -> Mutation<K> {
        self.map(K::clone)
    }
}

/// Hook notified after every atomic step of `insert` and `remove`.
///
/// Calls happen synchronously, in order, while the tree is mutably borrowed,
/// so no other mutation can interleave with them.
pub trait Observer<K> {
    fn notify(&mut self, mutation: Mutation<&K>);
}

/// The default observer; ignores every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Noop;

impl<K> Observer<K> for Noop {
    #[inline(always)]
    fn notify(&mut self, _mutation: Mutation<&K>) {}
}

impl<K, F> Observer<K> for F
where
    F: FnMut(Mutation<&K>),
{
    fn notify(&mut self, mutation: Mutation<&K>) {
        self(mutation)
    }
}

/// Keeps an owned log of every step, for a renderer that replays them at its
/// own pace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorder<K> {
    steps: Vec<Mutation<K>>,
}

impl<K> Default for Recorder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Recorder<K> {
    pub fn new() -> Self {
        Recorder { steps: Vec::new() }
    }

    pub fn steps(&self) -> &[Mutation<K>] {
        &self.steps
    }

    /// Hands over the recorded steps, oldest first, and starts a new log.
    pub fn drain(&mut self) -> Vec<Mutation<K>> {
        std::mem::take(&mut self.steps)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

impl<K: Clone> Observer<K> for Recorder<K> {
    fn notify(&mut self, mutation: Mutation<&K>) {
        self.steps.push(mutation.cloned());
    }
}
