use std::fmt::{Display, Write};

use simplelog::{Config, LevelFilter, TestLogger};

use crate::{Color, NodeRef, Tree};

/// Routes the crate's `log` output to the test harness. Safe to call from
/// every test.
pub(crate) fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// Compact shape and colors, e.g. `2B(1R,3R)`; `-` marks a missing child
/// of a node that has the other one.
pub(crate) fn sketch<K: Display, O>(tree: &Tree<K, O>) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        sketch_node(root, &mut out);
    }
    out
}

fn sketch_node<K: Display>(node: NodeRef<'_, K>, out: &mut String) {
    let color = match node.color() {
        Color::Red => 'R',
        Color::Black => 'B',
    };
    let _ = write!(out, "{}{color}", node.key());
    if node.left().is_none() && node.right().is_none() {
        return;
    }
    out.push('(');
    match node.left() {
        Some(left) => sketch_node(left, out),
        None => out.push('-'),
    }
    out.push(',');
    match node.right() {
        Some(right) => sketch_node(right, out),
        None => out.push('-'),
    }
    out.push(')');
}

#[track_caller]
pub(crate) fn assert_valid<K: Ord, O>(tree: &Tree<K, O>) -> usize {
    match tree.validate() {
        Ok(black_height) => black_height,
        Err(err) => panic!("invalid red-black tree: {err}"),
    }
}
