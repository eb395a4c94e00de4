//! Shared value types.
//!
//! Node links are `u32` slot indices into the tree's arena (see
//! [`crate::arena`]). Slot `0` is the sentinel, so a link is never optional:
//! an absent child or parent points at the sentinel instead.

/// Node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub fn is_black(self) -> bool {
        self == Color::Black
    }

    #[inline]
    pub fn is_red(self) -> bool {
        self == Color::Red
    }
}

/// Child direction.
///
/// Fixup cases come in mirrored pairs; they are written once in terms of a
/// `Side` and its [`opposite`](Side::opposite).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Handle to a node owned by an [`RbTree`](crate::RbTree).
///
/// Handles are only minted by the owning tree. A handle goes stale when its
/// node is erased or the tree is cleared; stale and foreign handles are
/// rejected rather than dereferenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub(crate) tree: u64,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeRef {
    /// Arena slot backing this node. Slots are reused after erase.
    pub fn index(&self) -> u32 {
        self.index
    }
}
