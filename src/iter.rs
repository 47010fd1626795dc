use std::iter::FusedIterator;

use crate::{Link, NodeArena, NodeId, Observer, Tree};

/// In-order iterator over the keys of a [`Tree`].
///
/// Walks an explicit stack: the left spine below the next key is pushed up
/// front, and visiting a node pushes the left spine of its right child.
/// Cloning it restarts nothing; it resumes from the same position.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K> {
    nodes: &'a NodeArena<K>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(nodes: &'a NodeArena<K>, root: Link, len: usize) -> Self {
        let mut iter = Iter {
            nodes,
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(id) = link {
            self.stack.push(id);
            link = self.nodes[id].left;
        }
    }

    pub(crate) fn next_id(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.nodes[id].right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(id)
    }
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let nodes = self.nodes;
        self.next_id().map(|id| &nodes[id].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

/// Each key paired with itself, for consumers that expect map-like entries
/// from a set.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Entries<'a, K> {
    inner: Iter<'a, K>,
}

impl<K> Clone for Entries<'_, K> {
    fn clone(&self) -> Self {
        Entries {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K> Iterator for Entries<'a, K> {
    type Item = (&'a K, &'a K);

    fn next(&mut self) -> Option<(&'a K, &'a K)> {
        self.inner.next().map(|key| (key, key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Entries<'_, K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for Entries<'_, K> {}

/// An owning iterator over the keys of a [`Tree`], in order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<K> {
    keys: std::vec::IntoIter<K>,
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.keys.next_back()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    fn len(&self) -> usize {
        self.keys.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}

impl<K, O> Tree<K, O> {
    /// Gets an iterator over the keys, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use noirset::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let keys: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.root.nodes, self.root.root, self.len)
    }

    /// Gets an iterator of `(key, key)` pairs, in sorted order.
    pub fn entries(&self) -> Entries<'_, K> {
        Entries { inner: self.iter() }
    }
}

impl<'a, K, O> IntoIterator for &'a Tree<K, O> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K, O> IntoIterator for Tree<K, O> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    /// Moves the keys out in order without rebalancing; the observer is not
    /// notified.
    fn into_iter(self) -> IntoIter<K> {
        let len = self.len;
        let (mut nodes, root) = self.root.into_parts();
        let mut order = Iter::new(&nodes, root, len);
        let ids: Vec<_> = std::iter::from_fn(|| order.next_id()).collect();
        let keys: Vec<_> = ids
            .into_iter()
            .filter_map(|id| nodes.free(id))
            .map(|node| node.key)
            .collect();
        IntoIter {
            keys: keys.into_iter(),
        }
    }
}

impl<K: Ord, O: Observer<K> + Default> FromIterator<K> for Tree<K, O> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Tree<K, O> {
        let mut tree = Tree::default();
        tree.insert_all(iter);
        tree
    }
}

impl<K: Ord, O: Observer<K>> Extend<K> for Tree<K, O> {
    #[inline]
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, K: Ord + Copy + 'a, O: Observer<K>> Extend<&'a K> for Tree<K, O> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.insert_all(iter.into_iter().copied());
    }
}
