use std::fmt::Debug;

use super::{Color, Link, Node, Side};

impl<K> Node<K> {
    /// New nodes always enter the tree red.
    pub fn new(key: K) -> Self {
        Node {
            key,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline(always)]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline(always)]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline(always)]
    pub fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline(always)]
    pub fn set_child(&mut self, side: Side, child: Link) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// The only child, if any; `None` for leaves. Callers make sure there is
    /// at most one.
    #[inline(always)]
    pub fn only_child(&self) -> Link {
        self.left.or(self.right)
    }
}

impl<K> Debug for Node<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}::({:?})", self.color, self.key))
    }
}
