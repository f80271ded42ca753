//! Memory providers for list nodes.
//!
//! A list never inspects its provider: it calls [`NodeAllocator::allocate`]
//! before a node is created and [`NodeAllocator::deallocate`] after a node is
//! destroyed, passing the node layout each time. The provider can refuse an
//! allocation, which the list reports as [`AllocError::Refused`].
//!
//! Providers are cheap handles. Passing `&P` borrows a shared provider, so
//! the borrow checker guarantees the provider outlives every list using it.

use core::alloc::Layout;
use core::cell::Cell;

use crate::error::AllocError;

/// The capability through which a list admits and releases its nodes.
pub trait NodeAllocator {
    /// Admits one node of `layout`. Returning an error aborts the insertion
    /// before any link is touched.
    fn allocate(&self, layout: Layout) -> Result<(), AllocError>;

    /// Releases one node of `layout` previously admitted by `allocate`.
    fn deallocate(&self, layout: Layout);
}

impl<P: NodeAllocator + ?Sized> NodeAllocator for &P {
    #[inline(always)]
    fn allocate(&self, layout: Layout) -> Result<(), AllocError> {
        (**self).allocate(layout)
    }

    #[inline(always)]
    fn deallocate(&self, layout: Layout) {
        (**self).deallocate(layout)
    }
}

/// The default provider: node storage comes from the global heap through the
/// list's slot arena, and every allocation is admitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Global;

impl NodeAllocator for Global {
    #[inline(always)]
    fn allocate(&self, _layout: Layout) -> Result<(), AllocError> {
        Ok(())
    }

    #[inline(always)]
    fn deallocate(&self, _layout: Layout) {}
}

/// A provider that counts node traffic and can cap the number of live nodes.
///
/// Share it between lists by reference:
///
/// ```rust
/// use linked_collections::{DoublyLinkedList, TrackingAllocator};
///
/// let tracker = TrackingAllocator::with_limit(2);
/// let mut list: DoublyLinkedList<i32, &TrackingAllocator> = DoublyLinkedList::new_in(&tracker);
/// list.push_back(1);
/// list.push_back(2);
/// assert!(list.try_push_back(3).is_err());
/// assert_eq!(tracker.live(), 2);
/// drop(list);
/// assert_eq!(tracker.live(), 0);
/// ```
#[derive(Debug, Default)]
pub struct TrackingAllocator {
    limit: Option<usize>,
    live: Cell<usize>,
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    bytes: Cell<usize>,
}

impl TrackingAllocator {
    /// Creates a provider that admits every allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that refuses allocations once `limit` nodes are live.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Nodes currently admitted and not yet released.
    pub fn live(&self) -> usize {
        self.live.get()
    }

    /// Total successful allocations since creation (or the last [`reset`](Self::reset)).
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Total deallocations since creation (or the last [`reset`](Self::reset)).
    pub fn deallocations(&self) -> usize {
        self.deallocations.get()
    }

    /// Bytes currently held by live nodes.
    pub fn live_bytes(&self) -> usize {
        self.bytes.get()
    }

    /// Zeroes the allocation and deallocation totals. Live counts are kept.
    pub fn reset(&self) {
        self.allocations.set(0);
        self.deallocations.set(0);
    }
}

impl NodeAllocator for TrackingAllocator {
    fn allocate(&self, layout: Layout) -> Result<(), AllocError> {
        let live = self.live.get();
        if self.limit.is_some_and(|limit| live >= limit) {
            log::debug!("tracking allocator refused node: {live} live");
            return Err(AllocError::Refused { live });
        }
        self.live.set(live + 1);
        self.allocations.set(self.allocations.get() + 1);
        self.bytes.set(self.bytes.get() + layout.size());
        Ok(())
    }

    fn deallocate(&self, layout: Layout) {
        debug_assert!(self.live.get() > 0, "deallocation without allocation");
        self.live.set(self.live.get().saturating_sub(1));
        self.deallocations.set(self.deallocations.get() + 1);
        self.bytes.set(self.bytes.get().saturating_sub(layout.size()));
    }
}
