use std::{borrow::Borrow, cmp::Ordering::*};

use log::trace;

use super::{Color, Link, Mutation, NodeArena, NodeId, Observer, Root, Side, TreeError, TreeResult};

impl<K, O> Root<K, O> {
    pub fn new(observer: O) -> Self {
        Root {
            nodes: NodeArena::new(),
            root: None,
            observer,
        }
    }

    pub fn with_capacity(observer: O, capacity: usize) -> Self {
        Root {
            nodes: NodeArena::with_capacity(capacity),
            root: None,
            observer,
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub fn first(&self) -> Link {
        self.root.map(|root| self.nodes.leftmost(root))
    }

    pub fn last(&self) -> Link {
        self.root.map(|root| self.nodes.rightmost(root))
    }

    pub fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = self.root;
        while let Some(candidate) = link {
            let node = &self.nodes[candidate];
            match key.cmp(node.key.borrow()) {
                Equal => break,
                Less => link = node.left,
                Greater => link = node.right,
            }
        }
        link
    }

    pub fn into_parts(self) -> (NodeArena<K>, Link) {
        (self.nodes, self.root)
    }
}

impl<K: Ord, O: Observer<K>> Root<K, O> {
    /// Links `key` as a red leaf and repairs the colors above it. Equal keys
    /// are rejected untouched.
    pub fn insert(&mut self, key: K) -> TreeResult<bool> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut link = self.root;
        while let Some(candidate) = link {
            parent = Some(candidate);
            side = match key.cmp(&self.nodes[candidate].key) {
                Equal => return Ok(false),
                Less => Side::Left,
                Greater => Side::Right,
            };
            link = self.nodes[candidate].child(side);
        }

        let node = self.nodes.alloc(key);
        self.nodes[node].parent = parent;
        match parent {
            Some(parent) => self.nodes[parent].set_child(side, Some(node)),
            None => self.root = Some(node),
        }
        self.observer.notify(Mutation::Inserted(&self.nodes[node].key));

        self.insert_color(node)?;
        self.root = Some(self.nodes.root_of(node));
        Ok(true)
    }
}

impl<K, O: Observer<K>> Root<K, O> {
    /// Unlinks `id` and hands its key back. A node with two children trades
    /// keys with its in-order successor, which is unlinked in its place.
    pub fn erase(&mut self, id: NodeId) -> TreeResult<K> {
        let node = &self.nodes[id];
        let victim = if let (Some(_), Some(right)) = (node.left, node.right) {
            let successor = self.nodes.leftmost(right);
            self.nodes.swap_keys(id, successor)?;
            self.observer.notify(Mutation::Moved(&self.nodes[id].key));
            successor
        } else {
            id
        };
        self.erase_one_child(victim)
    }

    fn erase_one_child(&mut self, id: NodeId) -> TreeResult<K> {
        let child = self.nodes[id].only_child();
        let parent = self.nodes[id].parent;
        let position = parent.map(|parent| (parent, self.nodes.side_of(parent, id)));

        if let Some(child) = child {
            self.nodes[child].parent = parent;
        }
        if !self.nodes.change_child(id, child, parent) {
            self.root = child;
        }
        let removed = self.nodes.free(id).ok_or(TreeError::DanglingLink)?;
        self.observer.notify(Mutation::Removed(&removed.key));

        if removed.is_black() {
            match (child, position) {
                (Some(child), _) if self.nodes[child].is_red() => {
                    trace!("erase: red child absorbs the missing black");
                    self.paint(child, Color::Black);
                }
                (_, Some((parent, side))) => self.erase_color(parent, side)?,
                // The root itself went away; every path lost the same black.
                _ => {}
            }
        }
        Ok(removed.key)
    }

    fn insert_color(&mut self, mut node: NodeId) -> TreeResult<()> {
        loop {
            /*
             * Loop invariant: node is red.
             */
            let Some(mut parent) = self.nodes[node].parent else {
                trace!("insert: node is the root");
                self.paint(node, Color::Black);
                return Ok(());
            };

            if self.nodes[parent].is_black() {
                trace!("insert: parent is black");
                return Ok(());
            }

            let Some(gparent) = self.nodes[parent].parent else {
                trace!("insert: parent is a red root");
                self.paint(parent, Color::Black);
                return Ok(());
            };

            let uncle = self.nodes.sibling(parent);
            if let Some(uncle) = uncle.filter(|&uncle| self.nodes[uncle].is_red()) {
                /*
                 * Uncle is red: color flips, then recurse at g, whose own
                 * parent might be red.
                 *
                 *       G            g
                 *      / \          / \
                 *     p   u  -->   P   U
                 *    /            /
                 *   n            n
                 */
                trace!("insert: uncle is red");
                self.paint(parent, Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(gparent, Color::Red);
                node = gparent;
                continue;
            }

            let outer = self.nodes.side_of(gparent, parent);
            if self.nodes.side_of(parent, node) != outer {
                /*
                 * Inner grandchild: rotate at parent to straighten the line.
                 *
                 *      G             G
                 *     / \           / \
                 *    p   U  -->    n   U
                 *     \           /
                 *      n         p
                 */
                trace!("insert: inner grandchild");
                self.rotate(parent, outer)?;
                parent = node;
            }

            /*
             * Outer grandchild: rotate at gparent, then recolor.
             *
             *        G           P
             *       / \         / \
             *      p   U  -->  n   g
             *     /                 \
             *    n                   U
             */
            trace!("insert: outer grandchild");
            self.rotate(gparent, outer.opposite())?;
            self.paint(parent, Color::Black);
            self.paint(gparent, Color::Red);
            return Ok(());
        }
    }

    /// Repairs a removal that left the subtree at `side` of `parent` one
    /// black short. That slot may be empty, so the position travels as
    /// `(parent, side)` rather than as a node.
    fn erase_color(&mut self, mut parent: NodeId, mut side: Side) -> TreeResult<()> {
        loop {
            let mut sibling = self.nodes[parent].child(side.opposite());

            if let Some(red) = sibling.filter(|&sibling| self.nodes[sibling].is_red()) {
                /*
                 * Red sibling: rotate at parent so that the new sibling is
                 * black.
                 *
                 *     P               S
                 *    / \             / \
                 *   N   s    -->    p   Sr
                 *      / \         / \
                 *     Sl  Sr      N   Sl
                 */
                trace!("erase: sibling is red");
                self.paint(parent, Color::Red);
                self.paint(red, Color::Black);
                self.rotate(parent, side)?;
                sibling = self.nodes[parent].child(side.opposite());
            }

            let sibling = sibling.ok_or(TreeError::MissingSibling)?;
            let near = self.nodes[sibling].child(side);
            let far = self.nodes[sibling].child(side.opposite());
            let black_sibling = self.nodes[sibling].is_black();
            let black_nephews = self.nodes.is_black(near) && self.nodes.is_black(far);

            if self.nodes[parent].is_black() && black_sibling && black_nephews {
                /*
                 * Everything is black: paint the sibling red so both sides
                 * are short, and push the deficit up to the parent.
                 */
                trace!("erase: all black, moving up");
                self.paint(sibling, Color::Red);
                let Some(gparent) = self.nodes[parent].parent else {
                    return Ok(());
                };
                side = self.nodes.side_of(gparent, parent);
                parent = gparent;
                continue;
            }

            if self.nodes[parent].is_red() && black_sibling && black_nephews {
                trace!("erase: red parent, black sibling");
                self.paint(sibling, Color::Red);
                self.paint(parent, Color::Black);
                return Ok(());
            }

            let mut sibling = sibling;
            if black_sibling && self.nodes.is_red(near) && self.nodes.is_black(far) {
                if let Some(near) = near {
                    /*
                     * Near nephew red, far nephew black: rotate at sibling so
                     * the red ends up on the far side.
                     *
                     *   (p)           (p)
                     *   / \           / \
                     *  N   S    -->  N   Sl
                     *     / \             \
                     *    sl  Sr            s
                     *                       \
                     *                        Sr
                     */
                    trace!("erase: near nephew is red");
                    self.paint(near, Color::Black);
                    self.paint(sibling, Color::Red);
                    self.rotate(sibling, side.opposite())?;
                    sibling = near;
                }
            }

            /*
             * Far nephew red: rotate at parent, the sibling takes the
             * parent's color and both its children turn black.
             *
             *      (p)             (s)
             *      / \             / \
             *     N   S     -->   P   Sr
             *        / \         / \
             *      (sl) sr      N  (sl)
             */
            trace!("erase: far nephew is red");
            let color = self.nodes[parent].color;
            self.paint(sibling, color);
            self.paint(parent, Color::Black);
            if let Some(far) = self.nodes[sibling].child(side.opposite()) {
                self.paint(far, Color::Black);
            }
            self.rotate(parent, side)?;
            return Ok(());
        }
    }

    /// Recolors `id` and reports it; painting a node its own color is not a
    /// step.
    fn paint(&mut self, id: NodeId, color: Color) {
        let node = &mut self.nodes[id];
        if node.color == color {
            return;
        }
        node.color = color;
        self.observer.notify(Mutation::Recolored {
            key: &self.nodes[id].key,
            color,
        });
    }

    fn rotate(&mut self, id: NodeId, direction: Side) -> TreeResult<()> {
        self.root = Some(self.nodes.rotate(id, direction)?);
        self.observer.notify(Mutation::Rotated {
            key: &self.nodes[id].key,
            direction,
        });
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Noop, Recorder, Tree, testing};
    use pretty_assertions::assert_eq;

    fn recorded(keys: &[i32]) -> Tree<i32, Recorder<i32>> {
        let mut tree = Tree::with_observer(Recorder::new());
        tree.insert_all(keys.iter().copied());
        tree.observer_mut().clear();
        tree
    }

    #[test]
    fn root_ctor_works() {
        let root: Root<usize, Noop> = Root::new(Noop);
        assert_eq!(None, root.root);
        assert_eq!(None, root.first());
        assert_eq!(None, root.last());
        assert_eq!(None, root.find(&42));
    }

    #[test]
    fn first_insert_paints_the_root() {
        let mut tree = Tree::with_observer(Recorder::new());
        tree.insert(1);
        assert_eq!(
            vec![
                Mutation::Inserted(1),
                Mutation::Recolored {
                    key: 1,
                    color: Color::Black
                }
            ],
            tree.observer_mut().drain()
        );
    }

    #[test]
    fn outer_grandchild_rotates_once() {
        let mut tree = recorded(&[1, 2]);
        tree.insert(3);
        assert_eq!(
            vec![
                Mutation::Inserted(3),
                Mutation::Rotated {
                    key: 1,
                    direction: Side::Left
                },
                Mutation::Recolored {
                    key: 2,
                    color: Color::Black
                },
                Mutation::Recolored {
                    key: 1,
                    color: Color::Red
                },
            ],
            tree.observer().steps()
        );
        assert_eq!("2B(1R,3R)", testing::sketch(&tree));
    }

    #[test]
    fn inner_grandchild_rotates_twice() {
        let mut tree = recorded(&[3, 1]);
        tree.insert(2);
        assert_eq!(
            vec![
                Mutation::Inserted(2),
                Mutation::Rotated {
                    key: 1,
                    direction: Side::Left
                },
                Mutation::Rotated {
                    key: 3,
                    direction: Side::Right
                },
                Mutation::Recolored {
                    key: 2,
                    color: Color::Black
                },
                Mutation::Recolored {
                    key: 3,
                    color: Color::Red
                },
            ],
            tree.observer().steps()
        );
        assert_eq!("2B(1R,3R)", testing::sketch(&tree));
    }

    #[test]
    fn red_uncle_flips_colors() {
        let mut tree = recorded(&[2, 1, 3]);
        tree.insert(4);
        assert_eq!(
            vec![
                Mutation::Inserted(4),
                Mutation::Recolored {
                    key: 3,
                    color: Color::Black
                },
                Mutation::Recolored {
                    key: 1,
                    color: Color::Black
                },
                Mutation::Recolored {
                    key: 2,
                    color: Color::Red
                },
                Mutation::Recolored {
                    key: 2,
                    color: Color::Black
                },
            ],
            tree.observer().steps()
        );
        assert_eq!("2B(1B,3B(-,4R))", testing::sketch(&tree));
    }

    #[test]
    fn duplicates_are_rejected_silently() {
        let mut tree = recorded(&[2, 1, 3]);
        assert_eq!(false, tree.insert(1));
        assert_eq!(3, tree.len());
        assert!(tree.observer().is_empty());
    }

    #[test]
    fn erase_two_children_moves_the_successor() {
        let mut tree = recorded(&[2, 1, 3]);
        assert!(tree.remove(&2));
        assert_eq!(
            vec![Mutation::Moved(3), Mutation::Removed(2)],
            tree.observer().steps()
        );
        assert_eq!("3B(1R,-)", testing::sketch(&tree));
    }

    #[test]
    fn erase_black_with_red_child() {
        // 2B(1B,3B(-,4R))
        let mut tree = recorded(&[2, 1, 3, 4]);
        assert!(tree.remove(&3));
        assert_eq!(
            vec![
                Mutation::Removed(3),
                Mutation::Recolored {
                    key: 4,
                    color: Color::Black
                }
            ],
            tree.observer().steps()
        );
        assert_eq!("2B(1B,4B)", testing::sketch(&tree));
        testing::assert_valid(&tree);
    }

    #[test]
    fn erase_red_sibling_then_red_parent() {
        // 2B(1B,4R(3B,5B)): removing 1 meets a red sibling, then the
        // rotated-down parent is red with black nephews.
        let mut tree = recorded(&[2, 1, 4, 3, 5, 6]);
        tree.remove(&6);
        assert_eq!("2B(1B,4R(3B,5B))", testing::sketch(&tree));
        tree.observer_mut().clear();

        assert!(tree.remove(&1));
        assert_eq!(
            vec![
                Mutation::Removed(1),
                Mutation::Recolored {
                    key: 2,
                    color: Color::Red
                },
                Mutation::Recolored {
                    key: 4,
                    color: Color::Black
                },
                Mutation::Rotated {
                    key: 2,
                    direction: Side::Left
                },
                Mutation::Recolored {
                    key: 3,
                    color: Color::Red
                },
                Mutation::Recolored {
                    key: 2,
                    color: Color::Black
                },
            ],
            tree.observer().steps()
        );
        assert_eq!("4B(2B(-,3R),5B)", testing::sketch(&tree));
        testing::assert_valid(&tree);
    }

    #[test]
    fn erase_all_black_moves_up() {
        // 2B(1B,3B): removing 1 leaves nothing to borrow from.
        let mut tree = recorded(&[2, 1, 3, 4]);
        tree.remove(&4);
        assert_eq!("2B(1B,3B)", testing::sketch(&tree));
        tree.observer_mut().clear();

        assert!(tree.remove(&1));
        assert_eq!(
            vec![
                Mutation::Removed(1),
                Mutation::Recolored {
                    key: 3,
                    color: Color::Red
                },
            ],
            tree.observer().steps()
        );
        assert_eq!("2B(-,3R)", testing::sketch(&tree));
        testing::assert_valid(&tree);
    }

    #[test]
    fn erase_near_nephew_then_far_nephew() {
        // 2B(1B,4B(3R,-)): the near nephew is red, the far one missing.
        let mut tree = recorded(&[2, 1, 4, 3, 5]);
        tree.remove(&5);
        tree.observer_mut().clear();
        assert_eq!("2B(1B,4B(3R,-))", testing::sketch(&tree));

        assert!(tree.remove(&1));
        assert_eq!(
            vec![
                Mutation::Removed(1),
                Mutation::Recolored {
                    key: 3,
                    color: Color::Black
                },
                Mutation::Recolored {
                    key: 4,
                    color: Color::Red
                },
                Mutation::Rotated {
                    key: 4,
                    direction: Side::Right
                },
                Mutation::Recolored {
                    key: 4,
                    color: Color::Black
                },
                Mutation::Rotated {
                    key: 2,
                    direction: Side::Left
                },
            ],
            tree.observer().steps()
        );
        assert_eq!("3B(2B,4B)", testing::sketch(&tree));
        testing::assert_valid(&tree);
    }

    #[test]
    fn erase_far_nephew_mirrored() {
        // 3B(2B(1R,-),4B): removing 4 from the right side.
        let mut tree = recorded(&[3, 2, 4, 1]);
        assert_eq!("3B(2B(1R,-),4B)", testing::sketch(&tree));

        assert!(tree.remove(&4));
        assert_eq!("2B(1B,3B)", testing::sketch(&tree));
        testing::assert_valid(&tree);
    }

    #[test]
    fn erase_the_root_leaf() {
        let mut tree = recorded(&[1]);
        assert!(tree.remove(&1));
        assert_eq!(vec![Mutation::Removed(1)], tree.observer().steps());
        assert_eq!(None, tree.root.root);
        assert_eq!(0, tree.root.nodes.len());
    }
}
