use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::sync::atomic::{self, AtomicU64};

use crate::arena::{Arena, NIL};
use crate::error::{TreeError, Violation};
use crate::types::{Color, NodeRef, Side};
use crate::util::{find, first, in_order, last, post_order, sorted_keys};

use super::util::{self, insert_at};
use super::validate::assert_red_black_tree;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

fn next_tree_id() -> u64 {
    NEXT_TREE_ID.fetch_add(1, atomic::Ordering::Relaxed)
}

fn natural_order<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Ordered red-black tree of keys.
///
/// Nodes live in a per-tree arena whose slot `0` is the black sentinel.
/// Equal keys are kept; a duplicate is placed to the right of its equals.
///
/// ```
/// use rbtree::RbTree;
///
/// let mut tree = RbTree::new();
/// for k in [5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(k).unwrap();
/// }
/// assert_eq!(tree.to_sorted_sequence(usize::MAX), vec![1, 3, 4, 5, 7, 8, 9]);
///
/// let eight = tree.find(&8).unwrap();
/// assert_eq!(tree.erase(eight), Ok(8));
/// assert_eq!(tree.find(&8), None);
/// ```
pub struct RbTree<K, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    id: u64,
    arena: Arena<K>,
    root: u32,
    comparator: C,
}

impl<K> RbTree<K, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(natural_order::<K>)
    }

    /// Like [`new`](Self::new), but reports allocation failure instead of
    /// aborting.
    pub fn try_new() -> Result<Self, TreeError> {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, TreeError> {
        Self::with_capacity_and_comparator(capacity, natural_order::<K>)
    }
}

impl<K> Default for RbTree<K, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> RbTree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Creates an empty tree ordered by `comparator`, which must be a total
    /// order.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            id: next_tree_id(),
            arena: Arena::new(),
            root: NIL,
            comparator,
        }
    }

    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Result<Self, TreeError> {
        Ok(Self {
            id: next_tree_id(),
            arena: Arena::try_with_capacity(capacity)?,
            root: NIL,
            comparator,
        })
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Inserts `key` and returns a handle to its node.
    ///
    /// Duplicates are allowed. If node storage cannot grow the tree is left
    /// untouched and [`TreeError::Alloc`] is returned.
    pub fn insert(&mut self, key: K) -> Result<NodeRef, TreeError> {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut curr = self.root;
        while curr != NIL {
            parent = curr;
            side = match self.arena.key(curr) {
                Some(k) if (self.comparator)(&key, k) == Ordering::Less => Side::Left,
                _ => Side::Right,
            };
            curr = self.arena.child(curr, side);
        }

        let n = self.arena.alloc(key).map_err(|err| {
            log::debug!("rbtree#{}: insert failed: {err}", self.id);
            err
        })?;
        insert_at(&mut self.arena, &mut self.root, n, parent, side);
        log::trace!("rbtree#{}: inserted slot {n} under {parent} ({side:?})", self.id);
        Ok(self.handle(n))
    }

    /// Node holding a key equal to `key`, if any.
    pub fn find(&self, key: &K) -> Option<NodeRef> {
        find(&self.arena, self.root, key, &self.comparator).map(|i| self.handle(i))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Node with the smallest key.
    pub fn min(&self) -> Option<NodeRef> {
        first(&self.arena, self.root).map(|i| self.handle(i))
    }

    /// Node with the largest key.
    pub fn max(&self) -> Option<NodeRef> {
        last(&self.arena, self.root).map(|i| self.handle(i))
    }

    /// Removes `node` from the tree and returns its key.
    ///
    /// The handle, and any copy of it, is dead afterwards. Handles from
    /// another tree or already-erased nodes are rejected without touching
    /// the tree.
    pub fn erase(&mut self, node: NodeRef) -> Result<K, TreeError> {
        let i = self.resolve(node)?;
        Ok(self.erase_slot(i))
    }

    /// Finds and erases one node equal to `key`.
    pub fn remove(&mut self, key: &K) -> Option<K> {
        let i = find(&self.arena, self.root, key, &self.comparator)?;
        Some(self.erase_slot(i))
    }

    fn erase_slot(&mut self, i: u32) -> K {
        util::remove(&mut self.arena, &mut self.root, i);
        log::trace!("rbtree#{}: erased slot {i}", self.id);
        match self.arena.free(i) {
            Some(key) => key,
            None => unreachable!("live slot holds a key"),
        }
    }

    /// Up to `capacity` smallest keys, ascending.
    pub fn to_sorted_sequence(&self, capacity: usize) -> Vec<K>
    where
        K: Clone,
    {
        sorted_keys(&self.arena, self.root, capacity)
    }

    /// Fills `out` with the smallest keys in ascending order and returns how
    /// many were written (`min(out.len(), self.len())`).
    pub fn write_sorted(&self, out: &mut [K]) -> usize
    where
        K: Clone,
    {
        let mut written = 0;
        if out.is_empty() {
            return 0;
        }
        in_order(&self.arena, self.root, |i| {
            if let Some(k) = self.arena.key(i) {
                out[written] = k.clone();
                written += 1;
            }
            written < out.len()
        });
        written
    }

    /// Frees every node, children before parents. All outstanding handles
    /// go stale; the tree stays usable.
    pub fn clear(&mut self) {
        let freed = self.arena.len();
        for i in post_order(&self.arena, self.root) {
            self.arena.free(i);
        }
        self.root = NIL;
        self.arena.reset_sentinel();
        log::debug!("rbtree#{}: cleared {freed} nodes", self.id);
    }

    /// Tears the tree down. Equivalent to dropping it after [`clear`].
    ///
    /// [`clear`]: Self::clear
    pub fn destroy(mut self) {
        self.clear();
    }

    pub fn key(&self, node: NodeRef) -> Option<&K> {
        self.resolve(node).ok().and_then(|i| self.arena.key(i))
    }

    pub fn color(&self, node: NodeRef) -> Option<Color> {
        self.resolve(node).ok().map(|i| self.arena.color(i))
    }

    pub fn root(&self) -> Option<NodeRef> {
        self.real(self.root)
    }

    pub fn left(&self, node: NodeRef) -> Option<NodeRef> {
        let i = self.resolve(node).ok()?;
        self.real(self.arena.l(i))
    }

    pub fn right(&self, node: NodeRef) -> Option<NodeRef> {
        let i = self.resolve(node).ok()?;
        self.real(self.arena.r(i))
    }

    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        let i = self.resolve(node).ok()?;
        self.real(self.arena.p(i))
    }

    /// Checks root color, red-red, black-height, parent links, key order
    /// and node count.
    pub fn assert_valid(&self) -> Result<(), Violation> {
        assert_red_black_tree(&self.arena, self.root, &self.comparator)
    }

    /// Multi-line dump of the tree shape with colors.
    pub fn print(&self) -> String
    where
        K: Debug,
    {
        util::print(&self.arena, self.root, "")
    }

    fn handle(&self, i: u32) -> NodeRef {
        NodeRef {
            tree: self.id,
            index: i,
            generation: self.arena.generation(i),
        }
    }

    fn real(&self, i: u32) -> Option<NodeRef> {
        (i != NIL).then(|| self.handle(i))
    }

    fn resolve(&self, node: NodeRef) -> Result<u32, TreeError> {
        if node.tree != self.id {
            return Err(TreeError::ForeignNode);
        }
        if !self.arena.is_live(node.index, node.generation) {
            return Err(TreeError::StaleNode);
        }
        Ok(node.index)
    }
}

impl<K, C> Debug for RbTree<K, C>
where
    K: Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        in_order(&self.arena, self.root, |i| {
            if let Some(k) = self.arena.key(i) {
                set.entry(k);
            }
            true
        });
        set.finish()
    }
}
