use std::cmp::Ordering;

use crate::arena::{Arena, NIL};
use crate::error::Violation;
use crate::util::in_order;

/// Checks every red-black and BST invariant of the tree rooted at `root`.
pub(crate) fn assert_red_black_tree<K, C>(
    arena: &Arena<K>,
    root: u32,
    comparator: &C,
) -> Result<(), Violation>
where
    C: Fn(&K, &K) -> Ordering,
{
    let sentinel = arena.sentinel();
    if !sentinel.color.is_black() {
        return Err(Violation::SentinelNotBlack);
    }
    if sentinel.l != NIL || sentinel.r != NIL {
        return Err(Violation::SentinelHasChildren);
    }
    if sentinel.p != NIL {
        return Err(Violation::SentinelHasParent);
    }

    if root == NIL {
        return match arena.len() {
            0 => Ok(()),
            found => Err(Violation::LengthMismatch { expected: 0, found }),
        };
    }
    if arena.p(root) != NIL {
        return Err(Violation::RootHasParent);
    }
    if !arena.color(root).is_black() {
        return Err(Violation::RootNotBlack);
    }

    fn black_height<K>(arena: &Arena<K>, node: u32) -> Result<usize, Violation> {
        if node == NIL {
            return Ok(0);
        }

        let l = arena.l(node);
        let r = arena.r(node);
        for child in [l, r] {
            if child != NIL && arena.p(child) != node {
                return Err(Violation::BrokenParentLink(child));
            }
        }

        if arena.color(node).is_red() && (arena.color(l).is_red() || arena.color(r).is_red()) {
            return Err(Violation::RedRedViolation(node));
        }

        let lh = black_height(arena, l)?;
        let rh = black_height(arena, r)?;
        if lh != rh {
            return Err(Violation::BlackHeightMismatch(node));
        }

        Ok(lh + usize::from(arena.color(node).is_black()))
    }

    black_height(arena, root)?;

    let mut result = Ok(());
    let mut count = 0usize;
    let mut prev: Option<u32> = None;
    in_order(arena, root, |i| {
        count += 1;
        if let Some(p) = prev {
            let ordered = match (arena.key(p), arena.key(i)) {
                (Some(a), Some(b)) => comparator(a, b) != Ordering::Greater,
                _ => false,
            };
            if !ordered {
                result = Err(Violation::OrderViolated(i));
                return false;
            }
        }
        prev = Some(i);
        true
    });
    result?;

    if count != arena.len() {
        return Err(Violation::LengthMismatch {
            expected: arena.len(),
            found: count,
        });
    }

    Ok(())
}
