use std::fmt::Debug;

use crate::arena::{Arena, NIL};

/// Debug printer for red-black trees.
pub(crate) fn print<K: Debug>(arena: &Arena<K>, node: u32, tab: &str) -> String {
    if node == NIL {
        return "∅".to_string();
    }
    let color = if arena.color(node).is_black() {
        "black"
    } else {
        "red"
    };
    let left = print(arena, arena.l(node), &format!("{tab}  "));
    let right = print(arena, arena.r(node), &format!("{tab}  "));
    match arena.key(node) {
        Some(k) => format!("Node[{node}] {color} {{ {k:?} }}\n{tab}L={left}\n{tab}R={right}"),
        None => format!("Node[{node}] {color} {{ ? }}\n{tab}L={left}\n{tab}R={right}"),
    }
}
