//! Structural surgery and rebalancing.
//!
//! Every function here works on raw slot indices and the tree's root slot.
//! The sentinel ([`NIL`]) stands in for every missing child and for the
//! root's parent, so no case needs an "is there a node" branch.

use crate::arena::{Arena, NIL};
use crate::types::{Color, Side};
use crate::util::first;

#[path = "util/print.rs"]
mod print_impl;

pub(crate) use print_impl::print;

/// Rotates at `x` towards `side`: the child on the opposite side is
/// promoted into `x`'s position and `x` becomes its `side` child.
///
/// `rotate(x, Side::Left)` is the classic left rotation. In-order key
/// sequence is preserved.
pub(crate) fn rotate<K>(arena: &mut Arena<K>, root: &mut u32, x: u32, side: Side) {
    let y = arena.child(x, side.opposite());
    debug_assert_ne!(y, NIL, "rotation needs a real child to promote");

    let inner = arena.child(y, side);
    arena.set_child(x, side.opposite(), inner);
    if inner != NIL {
        arena.set_p(inner, x);
    }

    let p = arena.p(x);
    arena.set_p(y, p);
    if p == NIL {
        *root = y;
    } else if arena.l(p) == x {
        arena.set_l(p, y);
    } else {
        arena.set_r(p, y);
    }

    arena.set_child(y, side, x);
    arena.set_p(x, y);
}

#[cfg_attr(not(test), allow(dead_code))]
#[inline]
pub(crate) fn rotate_left<K>(arena: &mut Arena<K>, root: &mut u32, x: u32) {
    rotate(arena, root, x, Side::Left);
}

#[cfg_attr(not(test), allow(dead_code))]
#[inline]
pub(crate) fn rotate_right<K>(arena: &mut Arena<K>, root: &mut u32, x: u32) {
    rotate(arena, root, x, Side::Right);
}

/// Links the fresh red node `n` under `parent` on `side` (or as the root
/// when `parent` is the sentinel) and restores the red rules.
pub(crate) fn insert_at<K>(arena: &mut Arena<K>, root: &mut u32, n: u32, parent: u32, side: Side) {
    arena.set_p(n, parent);
    if parent == NIL {
        *root = n;
    } else {
        arena.set_child(parent, side, n);
    }
    insert_fixup(arena, root, n);
}

/// Clears red-red conflicts upwards from the red node `z`.
pub(crate) fn insert_fixup<K>(arena: &mut Arena<K>, root: &mut u32, mut z: u32) {
    // The root's parent is the black sentinel, so this stops at the root.
    while arena.color(arena.p(z)).is_red() {
        let p = arena.p(z);
        let g = arena.p(p);
        let side = arena.side_of(p);
        let uncle = arena.child(g, side.opposite());

        if arena.color(uncle).is_red() {
            arena.set_color(p, Color::Black);
            arena.set_color(uncle, Color::Black);
            arena.set_color(g, Color::Red);
            z = g;
            continue;
        }

        if z == arena.child(p, side.opposite()) {
            z = p;
            rotate(arena, root, z, side);
        }

        let p = arena.p(z);
        let g = arena.p(p);
        arena.set_color(p, Color::Black);
        arena.set_color(g, Color::Red);
        rotate(arena, root, g, side.opposite());
    }
    let r = *root;
    arena.set_color(r, Color::Black);
}

/// Puts `v` where `u` hangs. `v` may be the sentinel, in which case the
/// sentinel's parent slot is written so that [`remove_fixup`] can walk up
/// from it.
pub(crate) fn transplant<K>(arena: &mut Arena<K>, root: &mut u32, u: u32, v: u32) {
    let p = arena.p(u);
    if p == NIL {
        *root = v;
    } else if arena.l(p) == u {
        arena.set_l(p, v);
    } else {
        arena.set_r(p, v);
    }
    arena.set_p(v, p);
}

/// Unlinks `z` and rebalances. The slot itself is not freed.
pub(crate) fn remove<K>(arena: &mut Arena<K>, root: &mut u32, z: u32) {
    let zl = arena.l(z);
    let zr = arena.r(z);
    let mut vacated_color = arena.color(z);
    let x;

    if zl == NIL {
        x = zr;
        transplant(arena, root, z, zr);
    } else if zr == NIL {
        x = zl;
        transplant(arena, root, z, zl);
    } else {
        let y = match first(arena, zr) {
            Some(y) => y,
            None => unreachable!("right subtree is non-empty"),
        };
        vacated_color = arena.color(y);
        x = arena.r(y);
        if arena.p(y) == z {
            arena.set_p(x, y);
        } else {
            transplant(arena, root, y, x);
            arena.set_r(y, zr);
            arena.set_p(zr, y);
        }
        transplant(arena, root, z, y);
        arena.set_l(y, zl);
        arena.set_p(zl, y);
        let zc = arena.color(z);
        arena.set_color(y, zc);
    }

    if vacated_color.is_black() {
        remove_fixup(arena, root, x);
    }
    arena.reset_sentinel();
}

/// Restores black-height after a black node left the path through `x`.
///
/// `x` carries an extra black. It is pushed up until it lands on a red node
/// or the root, or is absorbed by a rotation.
pub(crate) fn remove_fixup<K>(arena: &mut Arena<K>, root: &mut u32, mut x: u32) {
    while x != *root && arena.color(x).is_black() {
        let p = arena.p(x);
        let side = if arena.l(p) == x { Side::Left } else { Side::Right };
        let far = side.opposite();
        let mut w = arena.child(p, far);

        if arena.color(w).is_red() {
            arena.set_color(w, Color::Black);
            arena.set_color(p, Color::Red);
            rotate(arena, root, p, side);
            w = arena.child(p, far);
        }

        let near_child = arena.child(w, side);
        let far_child = arena.child(w, far);
        if arena.color(near_child).is_black() && arena.color(far_child).is_black() {
            arena.set_color(w, Color::Red);
            x = p;
            continue;
        }

        if arena.color(far_child).is_black() {
            arena.set_color(near_child, Color::Black);
            arena.set_color(w, Color::Red);
            rotate(arena, root, w, far);
            w = arena.child(p, far);
        }

        let pc = arena.color(p);
        arena.set_color(w, pc);
        arena.set_color(p, Color::Black);
        let far_child = arena.child(w, far);
        arena.set_color(far_child, Color::Black);
        rotate(arena, root, p, side);
        x = *root;
    }
    arena.set_color(x, Color::Black);
}
