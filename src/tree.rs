use std::{borrow::Borrow, fmt};

use log::debug;

use crate::{Noop, NodeRef, Observer, Root, Tree, TreeResult};

impl<K> Tree<K, Noop> {
    pub fn new() -> Self {
        Self::with_observer(Noop)
    }

    /// An empty tree whose arena can hold `capacity` keys before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_observer_and_capacity(Noop, capacity)
    }
}

impl<K, O: Default> Default for Tree<K, O> {
    fn default() -> Self {
        Self::with_observer(O::default())
    }
}

impl<K, O> Tree<K, O> {
    pub fn with_observer(observer: O) -> Self {
        Tree {
            root: Root::new(observer),
            len: 0,
        }
    }

    pub fn with_observer_and_capacity(observer: O, capacity: usize) -> Self {
        Tree {
            root: Root::with_capacity(observer, capacity),
            len: 0,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every key at once. The observer is not notified.
    pub fn clear(&mut self) {
        self.root.clear();
        self.len = 0;
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root.find(key).is_some()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|node| node.key())
    }

    /// The node holding `key`, to inspect its color and neighbours.
    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef<'_, K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.cursor(self.root.find(key))
    }

    pub fn first(&self) -> Option<&K> {
        self.cursor(self.root.first()).map(|node| node.key())
    }

    pub fn last(&self) -> Option<&K> {
        self.cursor(self.root.last()).map(|node| node.key())
    }

    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.cursor(self.root.root)
    }

    /// Number of nodes on the longest path from the root down to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.root.nodes[id];
            stack.extend(
                [node.left, node.right]
                    .into_iter()
                    .flatten()
                    .map(|child| (child, depth + 1)),
            );
        }
        height
    }

    pub fn observer(&self) -> &O {
        &self.root.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.root.observer
    }

    fn cursor(&self, link: crate::Link) -> Option<NodeRef<'_, K>> {
        link.map(|id| NodeRef::new(&self.root.nodes, id))
    }
}

impl<K: Ord, O: Observer<K>> Tree<K, O> {
    /// Adds `key`; returns false, leaving the tree untouched, if it was
    /// already present.
    ///
    /// # Panics
    ///
    /// Panics if rebalancing runs into a broken invariant; see
    /// [`Tree::try_insert`].
    pub fn insert(&mut self, key: K) -> bool {
        abort("insert", self.try_insert(key))
    }

    pub fn try_insert(&mut self, key: K) -> TreeResult<bool> {
        let inserted = self.root.insert(key)?;
        if inserted {
            self.len += 1;
        }
        debug!("insert: inserted={inserted} len={}", self.len);
        Ok(inserted)
    }

    /// Inserts every key in turn, each one fully rebalanced before the next.
    /// Returns how many were new.
    pub fn insert_all<I: IntoIterator<Item = K>>(&mut self, keys: I) -> usize {
        keys.into_iter()
            .map(|key| self.insert(key))
            .filter(|&new| new)
            .count()
    }

    /// Removes `key`; returns false, leaving the tree untouched, if it was
    /// absent.
    ///
    /// # Panics
    ///
    /// Panics if rebalancing runs into a broken invariant; see
    /// [`Tree::try_remove`].
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        abort("remove", self.try_remove(key))
    }

    pub fn try_remove<Q>(&mut self, key: &Q) -> TreeResult<bool>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.try_take(key).map(|key| key.is_some())
    }

    /// Removes `key` and hands back the stored key.
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        abort("take", self.try_take(key))
    }

    pub fn try_take<Q>(&mut self, key: &Q) -> TreeResult<Option<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(id) = self.root.find(key) else {
            debug!("remove: key absent");
            return Ok(None);
        };
        self.erase(id).map(Some)
    }
}

impl<K, O: Observer<K>> Tree<K, O> {
    pub fn pop_first(&mut self) -> Option<K> {
        let first = self.root.first()?;
        Some(abort("pop_first", self.erase(first)))
    }

    pub fn pop_last(&mut self) -> Option<K> {
        let last = self.root.last()?;
        Some(abort("pop_last", self.erase(last)))
    }

    fn erase(&mut self, id: crate::NodeId) -> TreeResult<K> {
        let key = self.root.erase(id)?;
        self.len -= 1;
        debug!("remove: len={}", self.len);
        Ok(key)
    }
}

impl<K, O> fmt::Debug for Tree<K, O>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[track_caller]
fn abort<T>(operation: &str, result: TreeResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("red-black {operation} aborted: {err}"),
    }
}
