//! Slot arena holding every node of one tree.
//!
//! Slot [`NIL`] is the sentinel: black, keyless, and its children always
//! point back at itself. All other slots are either occupied by a node or
//! parked on the free list. Links are plain `u32` indices, so parent
//! back-references never own anything.

use crate::error::TreeError;
use crate::types::{Color, Side};

/// Index of the sentinel slot.
pub(crate) const NIL: u32 = 0;

#[derive(Clone, Debug)]
pub(crate) struct Slot<K> {
    pub(crate) key: Option<K>,
    pub(crate) p: u32,
    pub(crate) l: u32,
    pub(crate) r: u32,
    pub(crate) color: Color,
    pub(crate) generation: u32,
}

impl<K> Slot<K> {
    fn sentinel() -> Self {
        Self {
            key: None,
            p: NIL,
            l: NIL,
            r: NIL,
            color: Color::Black,
            generation: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<K> {
    slots: Vec<Slot<K>>,
    free: Vec<u32>,
    len: usize,
}

/// Index the next pushed slot would get. `u32::MAX` is never handed out.
fn slot_index(len: usize) -> Result<u32, TreeError> {
    match u32::try_from(len) {
        Ok(i) if i != u32::MAX => Ok(i),
        _ => Err(TreeError::CapacityOverflow),
    }
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Slot::sentinel()],
            free: Vec::new(),
            len: 0,
        }
    }

    /// Builds an arena with room for `capacity` nodes, failing instead of
    /// aborting when memory is short.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, TreeError> {
        let mut slots = Vec::new();
        slots.try_reserve(capacity.saturating_add(1))?;
        slots.push(Slot::sentinel());
        let mut free = Vec::new();
        free.try_reserve(capacity)?;
        Ok(Self {
            slots,
            free,
            len: 0,
        })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Stores `key` in a fresh red node with sentinel links.
    ///
    /// The free list is grown alongside the slot vector so that [`free`]
    /// never has to allocate.
    ///
    /// [`free`]: Arena::free
    pub(crate) fn alloc(&mut self, key: K) -> Result<u32, TreeError> {
        if let Some(i) = self.free.pop() {
            let slot = &mut self.slots[i as usize];
            slot.key = Some(key);
            slot.p = NIL;
            slot.l = NIL;
            slot.r = NIL;
            slot.color = Color::Red;
            self.len += 1;
            return Ok(i);
        }

        let i = slot_index(self.slots.len())?;
        self.slots.try_reserve(1)?;
        self.free.try_reserve(self.len + 1)?;
        self.slots.push(Slot {
            key: Some(key),
            p: NIL,
            l: NIL,
            r: NIL,
            color: Color::Red,
            generation: 0,
        });
        self.len += 1;
        Ok(i)
    }

    /// Releases slot `i`, returning its key. Handles to it go stale.
    ///
    /// A slot whose generation is exhausted is retired instead of recycled,
    /// so an old handle can never match it again.
    pub(crate) fn free(&mut self, i: u32) -> Option<K> {
        debug_assert_ne!(i, NIL, "sentinel cannot be freed");
        let slot = &mut self.slots[i as usize];
        let key = slot.key.take()?;
        slot.p = NIL;
        slot.l = NIL;
        slot.r = NIL;
        slot.color = Color::Black;
        match slot.generation.checked_add(1) {
            Some(generation) => {
                slot.generation = generation;
                self.free.push(i);
            }
            None => log::debug!("arena: retiring slot {i}, generations exhausted"),
        }
        self.len -= 1;
        Some(key)
    }

    #[inline]
    pub(crate) fn is_live(&self, i: u32, generation: u32) -> bool {
        i != NIL
            && self
                .slots
                .get(i as usize)
                .is_some_and(|s| s.key.is_some() && s.generation == generation)
    }

    #[inline]
    pub(crate) fn generation(&self, i: u32) -> u32 {
        self.slots[i as usize].generation
    }

    #[inline]
    pub(crate) fn key(&self, i: u32) -> Option<&K> {
        self.slots[i as usize].key.as_ref()
    }

    #[inline]
    pub(crate) fn p(&self, i: u32) -> u32 {
        self.slots[i as usize].p
    }

    #[inline]
    pub(crate) fn l(&self, i: u32) -> u32 {
        self.slots[i as usize].l
    }

    #[inline]
    pub(crate) fn r(&self, i: u32) -> u32 {
        self.slots[i as usize].r
    }

    #[inline]
    pub(crate) fn child(&self, i: u32, side: Side) -> u32 {
        match side {
            Side::Left => self.l(i),
            Side::Right => self.r(i),
        }
    }

    /// Which side of its parent `i` hangs on.
    #[inline]
    pub(crate) fn side_of(&self, i: u32) -> Side {
        if self.l(self.p(i)) == i {
            Side::Left
        } else {
            Side::Right
        }
    }

    #[inline]
    pub(crate) fn color(&self, i: u32) -> Color {
        self.slots[i as usize].color
    }

    #[inline]
    pub(crate) fn set_p(&mut self, i: u32, v: u32) {
        self.slots[i as usize].p = v;
    }

    #[inline]
    pub(crate) fn set_l(&mut self, i: u32, v: u32) {
        debug_assert_ne!(i, NIL, "sentinel children are fixed");
        self.slots[i as usize].l = v;
    }

    #[inline]
    pub(crate) fn set_r(&mut self, i: u32, v: u32) {
        debug_assert_ne!(i, NIL, "sentinel children are fixed");
        self.slots[i as usize].r = v;
    }

    #[inline]
    pub(crate) fn set_child(&mut self, i: u32, side: Side, v: u32) {
        match side {
            Side::Left => self.set_l(i, v),
            Side::Right => self.set_r(i, v),
        }
    }

    #[inline]
    pub(crate) fn set_color(&mut self, i: u32, color: Color) {
        debug_assert!(i != NIL || color.is_black(), "sentinel must stay black");
        self.slots[i as usize].color = color;
    }

    /// Drops the parent link the sentinel borrows during erase.
    #[inline]
    pub(crate) fn reset_sentinel(&mut self) {
        self.slots[NIL as usize].p = NIL;
    }

    pub(crate) fn sentinel(&self) -> &Slot<K> {
        &self.slots[NIL as usize]
    }

    /// Number of slots ever handed out, sentinel included.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
