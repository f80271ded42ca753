//! Node storage: a generational slot arena threaded with a free list.
//!
//! # Layout
//! ```text
//! slots:  [ Occupied(g0) | Vacant(g3, next_free=4) | Occupied(g1) | ... ]
//!                              ^ free_head
//! ```
//! Links between nodes are slot indices of type `I`, with `I::NONE` standing in
//! for a null pointer. Releasing a slot bumps its generation, so a
//! [`Position`](crate::Position) captured before the release no longer
//! matches and is reported as stale instead of silently aliasing whatever
//! node reuses the slot.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::IndexType;
use crate::error::AllocError;

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(1);

/// One element of the chain. Links are non-owning: the arena owns every node.
pub(crate) struct Node<T, I> {
    pub(crate) value: T,
    pub(crate) prev: I,
    pub(crate) next: I,
}

impl<T, I: IndexType> Node<T, I> {
    #[inline(always)]
    pub(crate) fn detached(value: T) -> Self {
        Self {
            value,
            prev: I::NONE,
            next: I::NONE,
        }
    }
}

enum Entry<T, I> {
    Occupied(Node<T, I>),
    Vacant { next_free: I },
}

pub(crate) struct Slot<T, I> {
    generation: u32,
    entry: Entry<T, I>,
}

impl<T, I> Slot<T, I> {
    #[inline(always)]
    pub(crate) fn node_mut(&mut self) -> &mut Node<T, I> {
        match &mut self.entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("Logic Error: linked slot is vacant"),
        }
    }
}

/// Slot storage for the nodes of a single list.
pub(crate) struct Arena<T, I> {
    id: u64,
    slots: Vec<Slot<T, I>>,
    free_head: I,
}

impl<T, I: IndexType> Arena<T, I> {
    pub(crate) fn new() -> Self {
        Self {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free_head: I::NONE,
        }
    }

    /// Identity stamped into every position handed out for this arena.
    #[inline(always)]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Total number of slots, occupied or free.
    #[inline(always)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Fails if no slot can be handed out, without changing anything.
    pub(crate) fn check_vacancy(&self) -> Result<(), AllocError> {
        if self.free_head.is_none() && self.slots.len() >= I::MAX_SLOTS {
            Err(AllocError::IndexSpaceExhausted { max: I::MAX_SLOTS })
        } else {
            Ok(())
        }
    }

    /// Stores `node` in a free slot (reusing released slots first).
    ///
    /// Callers must run [`check_vacancy`](Self::check_vacancy) first.
    pub(crate) fn insert(&mut self, node: Node<T, I>) -> I {
        if self.free_head.is_none() {
            let idx = I::from_usize(self.slots.len());
            self.slots.push(Slot {
                generation: 0,
                entry: Entry::Occupied(node),
            });
            idx
        } else {
            let idx = self.free_head;
            let slot = &mut self.slots[idx.as_usize()];
            self.free_head = match slot.entry {
                Entry::Vacant { next_free } => next_free,
                Entry::Occupied(_) => unreachable!("Logic Error: free list points at a live node"),
            };
            slot.entry = Entry::Occupied(node);
            idx
        }
    }

    /// Releases the slot at `idx` and returns its node.
    pub(crate) fn remove(&mut self, idx: I) -> Node<T, I> {
        let slot = &mut self.slots[idx.as_usize()];
        let vacant = Entry::Vacant {
            next_free: self.free_head,
        };
        match core::mem::replace(&mut slot.entry, vacant) {
            Entry::Occupied(node) => {
                slot.generation = slot.generation.wrapping_add(1);
                self.free_head = idx;
                node
            }
            Entry::Vacant { .. } => unreachable!("Logic Error: removing a vacant slot"),
        }
    }

    #[inline(always)]
    pub(crate) fn node(&self, idx: I) -> &Node<T, I> {
        match self.try_node(idx) {
            Some(node) => node,
            None => unreachable!("Logic Error: linked slot is vacant"),
        }
    }

    #[inline(always)]
    pub(crate) fn node_mut(&mut self, idx: I) -> &mut Node<T, I> {
        self.slots[idx.as_usize()].node_mut()
    }

    /// The node at `idx`, or `None` if the index is out of range or vacant.
    #[inline(always)]
    pub(crate) fn try_node(&self, idx: I) -> Option<&Node<T, I>> {
        match self.slots.get(idx.as_usize()) {
            Some(Slot {
                entry: Entry::Occupied(node),
                ..
            }) => Some(node),
            _ => None,
        }
    }

    #[inline(always)]
    pub(crate) fn generation(&self, idx: I) -> u32 {
        self.slots[idx.as_usize()].generation
    }

    /// Returns `true` if `idx` holds a live node of the given generation.
    pub(crate) fn is_current(&self, idx: I, generation: u32) -> bool {
        matches!(
            self.slots.get(idx.as_usize()),
            Some(Slot { generation: g, entry: Entry::Occupied(_) }) if *g == generation
        )
    }

    /// Raw pointer to the slot buffer, for iterators that hand out disjoint
    /// mutable borrows of individual nodes.
    #[inline(always)]
    pub(crate) fn slots_mut_ptr(&mut self) -> *mut Slot<T, I> {
        self.slots.as_mut_ptr()
    }

    /// Number of occupied slots.
    #[cfg(feature = "audit")]
    pub(crate) fn occupied(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s.entry, Entry::Occupied(_)))
            .count()
    }

    /// Length of the free list, walked from `free_head`. Stops after
    /// `slot_count` steps so a corrupted free list cannot loop forever.
    #[cfg(feature = "audit")]
    pub(crate) fn free_len(&self) -> usize {
        let mut count = 0;
        let mut cur = self.free_head;
        while !cur.is_none() && count <= self.slots.len() {
            match self.slots.get(cur.as_usize()) {
                Some(Slot {
                    entry: Entry::Vacant { next_free },
                    ..
                }) => {
                    count += 1;
                    cur = *next_free;
                }
                _ => break,
            }
        }
        count
    }
}
