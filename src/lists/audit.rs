#![cfg(feature = "audit")]
//! White-box verification of the list's structural invariants.

use bitvec::prelude::{BitVec, Lsb0};

use super::list::DoublyLinkedList;
use crate::IndexType;
use crate::alloc::NodeAllocator;
use crate::error::LinkError;

impl<T, A: NodeAllocator, I: IndexType> DoublyLinkedList<T, A, I> {
    /// Walks the whole chain and verifies:
    ///
    /// - `len == 0` iff head and tail are both empty;
    /// - the head has no previous link and the tail no next link;
    /// - every forward link is mirrored by a backward link;
    /// - `len` equals the number of nodes reachable from the head, and the
    ///   walk ends at the tail;
    /// - every arena slot is either live or on the free list.
    ///
    /// Runs in O(n) time and uses one bit per slot.
    pub fn check_links(&self) -> Result<(), LinkError> {
        let head_empty = self.head.is_none();
        let tail_empty = self.tail.is_none();
        if (self.len == 0) != head_empty || head_empty != tail_empty {
            return Err(LinkError::Endpoints {
                len: self.len,
                head_empty,
                tail_empty,
            });
        }

        if !head_empty {
            let head = self.arena.try_node(self.head).ok_or(LinkError::Dangling(self.head.as_usize()))?;
            if !head.prev.is_none() {
                return Err(LinkError::HeadHasPrev(self.head.as_usize()));
            }
            let tail = self.arena.try_node(self.tail).ok_or(LinkError::Dangling(self.tail.as_usize()))?;
            if !tail.next.is_none() {
                return Err(LinkError::TailHasNext(self.tail.as_usize()));
            }
        }

        let total = self.arena.slot_count();
        let mut seen: BitVec<usize, Lsb0> = BitVec::repeat(false, total);
        let mut reachable = 0usize;
        let mut prev = I::NONE;
        let mut cur = self.head;

        while !cur.is_none() {
            let idx = cur.as_usize();
            let node = self.arena.try_node(cur).ok_or(LinkError::Dangling(idx))?;
            if seen[idx] {
                return Err(LinkError::Cycle(idx));
            }
            seen.set(idx, true);
            if node.prev != prev {
                return Err(LinkError::BrokenBackLink {
                    node: prev.as_usize(),
                    next: idx,
                    back: node.prev.as_usize(),
                });
            }
            reachable += 1;
            prev = cur;
            cur = node.next;
        }

        if prev != self.tail {
            return Err(LinkError::TailMismatch {
                reached: prev.as_usize(),
                tail: self.tail.as_usize(),
            });
        }
        if reachable != self.len {
            return Err(LinkError::LengthMismatch {
                len: self.len,
                reachable,
            });
        }

        let live = self.arena.occupied();
        let free = self.arena.free_len();
        if live != reachable || live + free != total {
            return Err(LinkError::LeakedSlots { live, free, total });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::LinkError;
    use crate::{DoublyLinkedList, IndexType, dlist};

    #[test]
    fn test_audit_accepts_valid_lists() {
        let mut list = dlist![1, 2, 3, 4];
        assert_eq!(list.check_links(), Ok(()));
        list.pop_front();
        list.erase(list.rbegin());
        assert_eq!(list.check_links(), Ok(()));
        list.clear();
        assert_eq!(list.check_links(), Ok(()));
        assert_eq!(DoublyLinkedList::<u8>::new().check_links(), Ok(()));
    }

    #[test]
    fn test_audit_detects_length_mismatch() {
        let mut list = dlist![1, 2, 3];
        list.len = 4;
        assert_eq!(
            list.check_links(),
            Err(LinkError::LengthMismatch { len: 4, reachable: 3 })
        );
        list.len = 3;
    }

    #[test]
    fn test_audit_detects_endpoint_disagreement() {
        let mut list = dlist![1];
        list.len = 0;
        assert!(matches!(list.check_links(), Err(LinkError::Endpoints { len: 0, .. })));
        list.len = 1;
    }

    #[test]
    fn test_audit_detects_broken_back_link() {
        let mut list = dlist![1, 2, 3];
        let second = list.arena.node(list.head).next;
        list.arena.node_mut(second).prev = u32::NONE;
        assert!(matches!(
            list.check_links(),
            Err(LinkError::BrokenBackLink { next: 1, .. })
        ));
        list.arena.node_mut(second).prev = list.head;
        assert_eq!(list.check_links(), Ok(()));
    }

    #[test]
    fn test_audit_detects_head_with_prev() {
        let mut list = dlist![1, 2];
        let tail = list.tail;
        list.arena.node_mut(list.head).prev = tail;
        assert_eq!(list.check_links(), Err(LinkError::HeadHasPrev(0)));
        list.arena.node_mut(list.head).prev = u32::NONE;
    }

    #[test]
    fn test_audit_detects_cycle() {
        let mut list = dlist![1, 2, 3];
        // Point the middle node back at itself, keeping its back link coherent
        // for the first visit.
        let second = list.arena.node(list.head).next;
        let third = list.arena.node(second).next;
        list.arena.node_mut(second).next = list.head;
        assert!(list.check_links().is_err());
        list.arena.node_mut(second).next = third;
        assert_eq!(list.check_links(), Ok(()));
    }
}
