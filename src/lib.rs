//! # Linked Collections
//!
//! A doubly-linked list with STL-style positions, built on a generational slot
//! arena instead of raw pointers.
//!
//! ## Key Features
//!
//! * **Index links:** Nodes live in a `Vec` of slots and link to each other by
//!   compact indices (`u8`, `u16`, `u32` or `usize`). No `unsafe` pointer
//!   juggling in the linking code.
//! * **Checked positions:** A [`Position`] is a weak handle to one node. Using a
//!   position whose node was removed reports [`ListError::StalePosition`]
//!   instead of reading freed memory.
//! * **Node-reusing assignment:** [`Clone::clone_from`] and
//!   [`DoublyLinkedList::assign`] overwrite existing nodes before allocating
//!   or trimming, so equal-length assignment allocates nothing.
//! * **Injectable memory provider:** Every node is admitted and released
//!   through a [`NodeAllocator`]; [`TrackingAllocator`] counts node traffic
//!   and can cap the number of live nodes.
//!
//! ## Example
//!
//! ```rust
//! use linked_collections::{dlist, ListError};
//!
//! let mut list = dlist![1, 2, 3];
//!
//! let mut pos = list.begin();
//! pos.increment(&list);
//! let pos = list.insert(pos, 10);
//! assert_eq!(list, [1, 10, 2, 3]);
//!
//! let next = list.erase(pos);
//! assert_eq!(list[next], 2);
//! assert_eq!(list.get(pos), Err(ListError::StalePosition));
//! ```
//!
//! ## Cargo features
//!
//! * `audit` (default): [`DoublyLinkedList::check_links`], an O(n) walk that
//!   verifies every structural invariant of a list.

// --- Module Declarations ---

pub mod alloc;
pub mod error;
pub mod lists;
pub mod utils;

// --- Re-exports ---

pub use alloc::{Global, NodeAllocator, TrackingAllocator};
pub use error::{AllocError, LinkError, ListError};
pub use lists::{DoublyLinkedList, IntoIter, Iter, IterMut, Position, Range};
pub use utils::IndexType;

/// Creates a [`DoublyLinkedList`] containing the arguments, like `vec!`.
///
/// ```rust
/// use linked_collections::dlist;
///
/// let list = dlist![1, 2, 3];
/// assert_eq!(list, [1, 2, 3]);
///
/// let filled = dlist![0u8; 4];
/// assert_eq!(filled.len(), 4);
/// ```
#[macro_export]
macro_rules! dlist {
    () => {
        $crate::DoublyLinkedList::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DoublyLinkedList::from_elem($n, &$elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DoublyLinkedList::from([$($x),+])
    };
}
