//! Red-black tree: structural helpers, invariant checker and the public
//! [`RbTree`] type.

#[path = "RbTree.rs"]
pub mod rb_tree;
pub(crate) mod util;
pub(crate) mod validate;

pub use rb_tree::RbTree;
