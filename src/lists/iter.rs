//! Borrowing and owning iterators over a list.

use core::iter::FusedIterator;
use core::marker::PhantomData;

use super::list::DoublyLinkedList;
use super::node::{Arena, Slot};
use super::position::Position;
use crate::IndexType;
use crate::alloc::NodeAllocator;
use crate::error::ListError;

/// Immutable iterator, front to back. Created by [`DoublyLinkedList::iter`].
pub struct Iter<'a, T, I: IndexType = u32> {
    arena: &'a Arena<T, I>,
    head: I,
    tail: I,
    remaining: usize,
}

impl<'a, T, I: IndexType> Iterator for Iter<'a, T, I> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.node(self.head);
        self.head = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, I: IndexType> DoubleEndedIterator for Iter<'a, T, I> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.node(self.tail);
        self.tail = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T, I: IndexType> ExactSizeIterator for Iter<'_, T, I> {}
impl<T, I: IndexType> FusedIterator for Iter<'_, T, I> {}

impl<T, I: IndexType> Clone for Iter<'_, T, I> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Mutable iterator, front to back. Created by [`DoublyLinkedList::iter_mut`].
///
/// # Safety
/// Holds a raw pointer into the slot buffer of a mutably borrowed list. The
/// chain is acyclic and `remaining` bounds the walk from both ends, so each
/// slot is visited at most once and the handed-out `&mut T` never alias.
pub struct IterMut<'a, T, I: IndexType = u32> {
    slots: *mut Slot<T, I>,
    head: I,
    tail: I,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T, I: IndexType> Iterator for IterMut<'a, T, I> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let node = unsafe { (*self.slots.add(self.head.as_usize())).node_mut() };
        self.head = node.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, I: IndexType> DoubleEndedIterator for IterMut<'a, T, I> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let node = unsafe { (*self.slots.add(self.tail.as_usize())).node_mut() };
        self.tail = node.prev;
        self.remaining -= 1;
        Some(&mut node.value)
    }
}

impl<T, I: IndexType> ExactSizeIterator for IterMut<'_, T, I> {}
impl<T, I: IndexType> FusedIterator for IterMut<'_, T, I> {}

/// Owning iterator. Created by [`IntoIterator`] on a list by value.
pub struct IntoIter<T, A: NodeAllocator, I: IndexType = u32> {
    list: DoublyLinkedList<T, A, I>,
}

impl<T, A: NodeAllocator, I: IndexType> Iterator for IntoIter<T, A, I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, A: NodeAllocator, I: IndexType> DoubleEndedIterator for IntoIter<T, A, I> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A: NodeAllocator, I: IndexType> ExactSizeIterator for IntoIter<T, A, I> {}
impl<T, A: NodeAllocator, I: IndexType> FusedIterator for IntoIter<T, A, I> {}

/// Iterator over the half-open range `[first, last)` of a list. Created by
/// [`DoublyLinkedList::range`].
pub struct Range<'a, T, I: IndexType = u32> {
    arena: &'a Arena<T, I>,
    cur: I,
    stop: I,
}

impl<'a, T, I: IndexType> Iterator for Range<'a, T, I> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cur.is_none() || self.cur == self.stop {
            return None;
        }
        let node = self.arena.node(self.cur);
        self.cur = node.next;
        Some(&node.value)
    }
}

impl<T, I: IndexType> FusedIterator for Range<'_, T, I> {}

impl<T, A: NodeAllocator, I: IndexType> DoublyLinkedList<T, A, I> {
    /// Returns a front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T, I> {
        Iter {
            arena: &self.arena,
            head: self.head,
            tail: self.tail,
            remaining: self.len,
        }
    }

    /// Returns a front-to-back iterator yielding mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T, I> {
        IterMut {
            slots: self.arena.slots_mut_ptr(),
            head: self.head,
            tail: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Iterates over `[first, last)`. Iteration also stops at the end of the
    /// list, so a `last` that does not follow `first` yields the suffix.
    ///
    /// # Errors
    /// A stale or foreign `first` or `last`.
    pub fn range(&self, first: Position<I>, last: Position<I>) -> Result<Range<'_, T, I>, ListError> {
        Ok(Range {
            arena: &self.arena,
            cur: self.resolve(first)?,
            stop: self.resolve(last)?,
        })
    }
}

impl<'a, T, A: NodeAllocator, I: IndexType> IntoIterator for &'a DoublyLinkedList<T, A, I> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: NodeAllocator, I: IndexType> IntoIterator for &'a mut DoublyLinkedList<T, A, I> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A: NodeAllocator, I: IndexType> IntoIterator for DoublyLinkedList<T, A, I> {
    type Item = T;
    type IntoIter = IntoIter<T, A, I>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
