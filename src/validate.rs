use crate::{Link, NodeArena, Tree, TreeError, TreeResult};

impl<K: Ord, O> Tree<K, O> {
    /// Checks every red-black invariant and returns the tree's black-height
    /// (black nodes from the root down to any missing leaf), or the first
    /// violation found.
    pub fn validate(&self) -> TreeResult<usize> {
        let nodes = &self.root.nodes;
        let Some(root) = self.root.root else {
            return match self.len {
                0 => Ok(0),
                expected => Err(TreeError::LenMismatch { expected, found: 0 }),
            };
        };

        let root_node = nodes.get(root).ok_or(TreeError::DanglingLink)?;
        if root_node.parent.is_some() {
            return Err(TreeError::BrokenParentLink);
        }
        if root_node.is_red() {
            return Err(TreeError::RedRoot);
        }
        let black_height = black_height(nodes, Some(root))?;

        let mut found = 0;
        let mut previous = None;
        for key in self.iter() {
            if previous.is_some_and(|previous| previous >= key) {
                return Err(TreeError::OutOfOrder);
            }
            previous = Some(key);
            found += 1;
        }
        if found != self.len {
            return Err(TreeError::LenMismatch {
                expected: self.len,
                found,
            });
        }

        Ok(black_height)
    }
}

fn black_height<K>(nodes: &NodeArena<K>, link: Link) -> TreeResult<usize> {
    let Some(id) = link else {
        return Ok(0);
    };
    let node = nodes.get(id).ok_or(TreeError::DanglingLink)?;
    for child in [node.left, node.right].into_iter().flatten() {
        let child = nodes.get(child).ok_or(TreeError::DanglingLink)?;
        if child.parent != Some(id) {
            return Err(TreeError::BrokenParentLink);
        }
        if node.is_red() && child.is_red() {
            return Err(TreeError::RedChildOfRed);
        }
    }

    let left = black_height(nodes, node.left)?;
    let right = black_height(nodes, node.right)?;
    if left != right {
        return Err(TreeError::BlackHeightMismatch);
    }
    Ok(left + usize::from(node.is_black()))
}
