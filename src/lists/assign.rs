//! Copy, move and sequence assignment.
//!
//! Copy assignment reuses the destination's nodes:
//!
//! ```text
//! 1. Walk destination and source in lockstep, overwriting destination values.
//! 2. Source longer:      push_back a new node for each remaining value.
//! 3. Destination longer: erase every node from the first unmatched one on.
//! ```
//!
//! An equal-length assignment therefore allocates nothing. Move assignment
//! and `swap` never touch a node: they exchange the whole arena.

use super::list::DoublyLinkedList;
use crate::IndexType;
use crate::alloc::NodeAllocator;

impl<T, A: NodeAllocator, I: IndexType> DoublyLinkedList<T, A, I> {
    /// Replaces the contents with the values of `values`, reusing existing
    /// nodes front to back before allocating or trimming.
    ///
    /// ```rust
    /// use linked_collections::dlist;
    ///
    /// let mut list = dlist![1, 2, 3, 4];
    /// list.assign([7, 8]);
    /// assert_eq!(list, [7, 8]);
    /// list.assign([1, 2, 3]);
    /// assert_eq!(list, [1, 2, 3]);
    /// ```
    pub fn assign<It: IntoIterator<Item = T>>(&mut self, values: It) {
        self.overwrite(values, |slot, value| *slot = value, |value| value);
    }

    /// Like [`assign`](Self::assign), but clones from borrowed values using
    /// [`Clone::clone_from`] on reused nodes.
    pub fn assign_cloned<'a, It>(&mut self, values: It)
    where
        It: IntoIterator<Item = &'a T>,
        T: Clone + 'a,
    {
        self.overwrite(values, |slot, value| slot.clone_from(value), T::clone);
    }

    /// Move assignment: drops this list's elements, then takes over the node
    /// chain of `source` in constant time. `source` is left empty.
    pub fn take_from(&mut self, source: &mut Self) {
        self.clear();
        self.swap(source);
    }

    /// Move construction: returns a list owning this list's nodes, leaving
    /// this list empty and reusable.
    ///
    /// ```rust
    /// use linked_collections::dlist;
    ///
    /// let mut source = dlist![1, 2];
    /// let moved = source.take();
    /// assert!(source.is_empty());
    /// assert_eq!(moved, [1, 2]);
    /// ```
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let mut out = Self::new_in(self.alloc.clone());
        out.swap(self);
        out
    }

    /// Exchanges the contents of two lists in constant time.
    ///
    /// The memory provider travels with the nodes, so each node is still
    /// released through the provider that admitted it. Positions keep
    /// referring to their nodes, now inside `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    fn overwrite<S, It>(
        &mut self,
        values: It,
        mut store: impl FnMut(&mut T, S),
        mut make: impl FnMut(S) -> T,
    ) where
        It: IntoIterator<Item = S>,
    {
        let mut values = values.into_iter();
        let mut cur = self.head;
        let mut reused = 0usize;

        while !cur.is_none() {
            let Some(value) = values.next() else { break };
            let node = self.arena.node_mut(cur);
            store(&mut node.value, value);
            cur = node.next;
            reused += 1;
        }

        let mut appended = 0usize;
        if cur.is_none() {
            for value in values {
                self.push_back(make(value));
                appended += 1;
            }
        }

        let mut trimmed = 0usize;
        while !cur.is_none() {
            let next = self.arena.node(cur).next;
            self.unlink(cur);
            cur = next;
            trimmed += 1;
        }

        log::trace!("assign: reused {reused}, appended {appended}, trimmed {trimmed} nodes");
    }
}

impl<T: Clone, A: NodeAllocator + Clone, I: IndexType> Clone for DoublyLinkedList<T, A, I> {
    /// Deep copy into a fresh arena. Positions into `self` are foreign to the copy.
    fn clone(&self) -> Self {
        let mut list = Self::new_in(self.alloc.clone());
        list.extend(self.iter().cloned());
        list
    }

    /// Copy assignment that keeps the existing nodes of `self` where it can.
    fn clone_from(&mut self, source: &Self) {
        self.assign_cloned(source.iter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListError;
    use crate::{DoublyLinkedList, TrackingAllocator, dlist};

    type Tracked<'a, T> = DoublyLinkedList<T, &'a TrackingAllocator>;

    fn tracked<'a>(tracker: &'a TrackingAllocator, values: &[i32]) -> Tracked<'a, i32> {
        let mut list = DoublyLinkedList::new_in(tracker);
        list.extend(values);
        list
    }

    #[test]
    fn test_clone_is_deep_and_independent() {
        let mut a = dlist![String::from("x"), String::from("y")];
        let mut b = a.clone();
        assert_eq!(a, b);

        b.front_mut().unwrap().push('!');
        a.push_back(String::from("z"));
        assert_eq!(a, ["x", "y", "z"].map(String::from));
        assert_eq!(b, ["x!", "y"].map(String::from));

        // Positions of the source do not resolve in the copy.
        assert_eq!(b.get(a.begin()), Err(ListError::ForeignPosition));
    }

    #[test]
    fn test_clone_from_equal_length_reuses_all_nodes() {
        let tracker = TrackingAllocator::new();
        let mut dst = tracked(&tracker, &[1, 2, 3]);
        let src = tracked(&tracker, &[7, 8, 9]);
        let first = dst.begin();
        tracker.reset();

        dst.clone_from(&src);
        assert_eq!(dst, [7, 8, 9]);
        assert_eq!(tracker.allocations(), 0);
        assert_eq!(tracker.deallocations(), 0);
        // Reused nodes keep their identity.
        assert_eq!(dst.get(first), Ok(&7));
    }

    #[test]
    fn test_clone_from_longer_source_appends() {
        let tracker = TrackingAllocator::new();
        let mut dst = tracked(&tracker, &[1]);
        let src = tracked(&tracker, &[4, 5, 6]);
        tracker.reset();

        dst.clone_from(&src);
        assert_eq!(dst, [4, 5, 6]);
        assert_eq!(tracker.allocations(), 2);
        assert_eq!(tracker.deallocations(), 0);
        assert_eq!(src, [4, 5, 6]);
    }

    #[test]
    fn test_clone_from_shorter_source_trims() {
        let tracker = TrackingAllocator::new();
        let mut dst = tracked(&tracker, &[1, 2, 3, 4]);
        let src = tracked(&tracker, &[9]);
        let second = dst.next_position(dst.begin()).unwrap();
        tracker.reset();

        dst.clone_from(&src);
        assert_eq!(dst, [9]);
        assert_eq!(dst.len(), 1);
        assert_eq!(tracker.allocations(), 0);
        assert_eq!(tracker.deallocations(), 3);
        assert_eq!(dst.get(second), Err(ListError::StalePosition));
        assert_eq!(dst.back(), Ok(&9));
    }

    #[test]
    fn test_clone_from_empty_source_clears() {
        let mut dst = dlist![1, 2];
        dst.clone_from(&DoublyLinkedList::new());
        assert!(dst.is_empty());
        assert_eq!(dst.front(), Err(ListError::Empty));
    }

    #[test]
    fn test_clone_from_identical_content() {
        let tracker = TrackingAllocator::new();
        let mut list = tracked(&tracker, &[1, 2, 3]);
        let snapshot = list.clone();
        tracker.reset();

        list.clone_from(&snapshot);
        assert_eq!(list, snapshot);
        assert_eq!(list.len(), 3);
        assert_eq!(tracker.allocations(), 0);
        assert_eq!(tracker.deallocations(), 0);
    }

    #[test]
    fn test_assign_literal_sequence() {
        let tracker = TrackingAllocator::new();
        let mut list = tracked(&tracker, &[1, 2, 3]);
        tracker.reset();

        list.assign([4, 5, 6]);
        assert_eq!(list, [4, 5, 6]);
        assert_eq!(tracker.allocations(), 0);

        list.assign([7]);
        assert_eq!(list, [7]);
        assert_eq!(tracker.deallocations(), 2);

        list.assign([1, 2, 3, 4]);
        assert_eq!(list, [1, 2, 3, 4]);
        assert_eq!(tracker.allocations(), 3);

        list.assign([]);
        assert!(list.is_empty());
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn test_assign_cloned_from_slice() {
        let mut list = dlist![String::from("a")];
        let values = [String::from("b"), String::from("c")];
        list.assign_cloned(&values);
        assert_eq!(list, values);
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut source = dlist![1, 2, 3];
        let pos = source.begin();
        let moved = source.take();

        assert!(source.is_empty());
        assert_eq!(source.len(), 0);
        assert_eq!(source.front(), Err(ListError::Empty));
        assert_eq!(moved, [1, 2, 3]);
        // The position followed its node.
        assert_eq!(moved.get(pos), Ok(&1));

        source.push_back(4);
        assert_eq!(source, [4]);
    }

    #[test]
    fn test_take_from_clears_destination() {
        let tracker = TrackingAllocator::new();
        let mut dst = tracked(&tracker, &[1, 2]);
        let mut src = tracked(&tracker, &[3, 4, 5]);
        tracker.reset();

        dst.take_from(&mut src);
        assert_eq!(dst, [3, 4, 5]);
        assert!(src.is_empty());
        assert_eq!(tracker.deallocations(), 2);
        assert_eq!(tracker.allocations(), 0);
        assert_eq!(tracker.live(), 3);
    }

    #[test]
    fn test_swap_exchanges_without_touching_nodes() {
        let tracker = TrackingAllocator::new();
        let mut a = tracked(&tracker, &[1, 2]);
        let mut b = tracked(&tracker, &[3]);
        let a_first = a.begin();
        tracker.reset();

        a.swap(&mut b);
        assert_eq!(a, [3]);
        assert_eq!(b, [1, 2]);
        assert_eq!(b.get(a_first), Ok(&1));
        assert_eq!(tracker.allocations() + tracker.deallocations(), 0);

        let mut empty: Tracked<'_, i32> = DoublyLinkedList::new_in(&tracker);
        empty.swap(&mut b);
        assert!(b.is_empty());
        assert_eq!(empty, [1, 2]);
    }

    #[test]
    fn test_copy_independence_after_assign() {
        let mut a = dlist![vec![1], vec![2]];
        let b = dlist![vec![3], vec![4], vec![5]];
        a.clone_from(&b);
        a.front_mut().unwrap().push(9);
        assert_eq!(b.front(), Ok(&vec![3]));
        assert_eq!(a.front(), Ok(&vec![3, 9]));
    }
}
