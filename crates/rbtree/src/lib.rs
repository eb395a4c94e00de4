//! Arena-backed red-black tree.
//!
//! Keys are kept in a self-balancing binary search tree whose height stays
//! logarithmic under any mix of insertions and erasures. Nodes live in a
//! per-tree `Vec` arena; slot `0` is a permanently black sentinel that
//! terminates every leaf and parents the root, so rotations and fixups never
//! branch on missing links.
//!
//! Node handles ([`NodeRef`]) carry the owning tree's id and a slot
//! generation, so a handle from another tree or to an erased node is
//! rejected instead of corrupting the structure.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Color`], [`NodeRef`] |
//! [`error`] | [`TreeError`], [`Violation`] |
//! `arena` | slot storage, sentinel, free list |
//! `util` | read-only walks: `first`, `last`, `find`, in-order |
//! [`red_black`] | rotations, fixups, checker and [`RbTree`] |

mod arena;
pub mod error;
#[path = "red-black/mod.rs"]
pub mod red_black;
pub mod types;
mod util;

pub use error::{TreeError, Violation};
pub use red_black::RbTree;
pub use types::{Color, NodeRef};
