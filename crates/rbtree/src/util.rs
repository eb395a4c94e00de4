//! Read-only tree walks.
//!
//! None of these mutate the arena. They all stop at the sentinel and never
//! return it.

use std::cmp::Ordering;

use crate::arena::{Arena, NIL};

/// Leftmost node under `root`, or `None` for an empty subtree.
pub(crate) fn first<K>(arena: &Arena<K>, root: u32) -> Option<u32> {
    extreme(arena, root, |a, i| a.l(i))
}

/// Rightmost node under `root`, or `None` for an empty subtree.
pub(crate) fn last<K>(arena: &Arena<K>, root: u32) -> Option<u32> {
    extreme(arena, root, |a, i| a.r(i))
}

fn extreme<K>(arena: &Arena<K>, root: u32, step: impl Fn(&Arena<K>, u32) -> u32) -> Option<u32> {
    if root == NIL {
        return None;
    }
    let mut curr = root;
    loop {
        let next = step(arena, curr);
        if next == NIL {
            return Some(curr);
        }
        curr = next;
    }
}

/// Standard BST descent. With duplicate keys the first match met on the
/// way down wins.
pub(crate) fn find<K, C>(arena: &Arena<K>, root: u32, key: &K, comparator: &C) -> Option<u32>
where
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    while curr != NIL {
        let curr_key = arena.key(curr)?;
        curr = match comparator(key, curr_key) {
            Ordering::Equal => return Some(curr),
            Ordering::Less => arena.l(curr),
            Ordering::Greater => arena.r(curr),
        };
    }
    None
}

/// In-order walk (left, self, right) over an explicit stack.
/// `visit` returns `false` to stop early.
pub(crate) fn in_order<K>(arena: &Arena<K>, root: u32, mut visit: impl FnMut(u32) -> bool) {
    let mut stack: Vec<u32> = Vec::new();
    let mut curr = root;
    loop {
        while curr != NIL {
            stack.push(curr);
            curr = arena.l(curr);
        }
        let Some(node) = stack.pop() else {
            return;
        };
        if !visit(node) {
            return;
        }
        curr = arena.r(node);
    }
}

/// Every node under `root`, each listed after both of its children.
///
/// Freeing in this order never releases a node that a surviving node still
/// links to as a child.
pub(crate) fn post_order<K>(arena: &Arena<K>, root: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(arena.len());
    let mut stack = Vec::new();
    if root != NIL {
        stack.push(root);
    }
    // Pre-order with children pushed left then right, reversed at the end,
    // yields children before parents.
    while let Some(i) = stack.pop() {
        out.push(i);
        for child in [arena.l(i), arena.r(i)] {
            if child != NIL {
                stack.push(child);
            }
        }
    }
    out.reverse();
    out
}

/// Copies up to `limit` keys in ascending order.
pub(crate) fn sorted_keys<K: Clone>(arena: &Arena<K>, root: u32, limit: usize) -> Vec<K> {
    let mut out = Vec::with_capacity(limit.min(arena.len()));
    if limit == 0 {
        return out;
    }
    in_order(arena, root, |i| {
        if let Some(k) = arena.key(i) {
            out.push(k.clone());
        }
        out.len() < limit
    });
    out
}
