//! Positions: weak, copyable handles to a node of a list.
//!
//! A [`Position`] plays the role of a bidirectional iterator that does not
//! borrow its list. It records the node's slot and the slot generation at the
//! time it was taken, so after the node is removed every use of the position
//! reports [`ListError::StalePosition`] instead of reading a reused slot.
//!
//! ```text
//!          begin()                 rbegin()        end()
//!             v                        v             v
//! NONE <- [ a ] <-> [ b ] <-> ... <-> [ z ] ->     NONE
//! ```

use core::hash::{Hash, Hasher};
use core::ops::{Index, IndexMut};

use super::list::DoublyLinkedList;
use crate::IndexType;
use crate::alloc::NodeAllocator;
use crate::error::ListError;

/// A handle to one element of a [`DoublyLinkedList`], or to the end position.
///
/// Positions compare by node identity; every end position equals every other
/// end position. Moving a position needs the list it points into:
///
/// ```rust
/// use linked_collections::dlist;
///
/// let list = dlist!['a', 'b', 'c'];
/// let mut pos = list.begin();
/// let old = pos.post_increment(&list);
/// assert_eq!((list[old], list[pos]), ('a', 'b'));
///
/// let mut back = list.end();
/// back.decrement(&list);
/// assert_eq!(list[back], 'c');
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Position<I: IndexType = u32> {
    pub(crate) arena: u64,
    pub(crate) slot: I,
    pub(crate) generation: u32,
}

impl<I: IndexType> Position<I> {
    /// The end position ("one past the tail").
    #[inline(always)]
    pub fn end() -> Self {
        Self {
            arena: 0,
            slot: I::NONE,
            generation: 0,
        }
    }

    /// Returns `true` for the end position.
    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.slot.is_none()
    }

    /// Advances to the next element (or to the end position after the tail).
    ///
    /// # Panics
    /// Panics if this is the end position or its node has been removed.
    pub fn increment<T, A: NodeAllocator>(&mut self, list: &DoublyLinkedList<T, A, I>) -> &mut Self {
        match list.next_position(*self) {
            Ok(next) => *self = next,
            Err(err) => panic!("increment: {err}"),
        }
        self
    }

    /// Advances like [`increment`](Self::increment) and returns the old position.
    pub fn post_increment<T, A: NodeAllocator>(&mut self, list: &DoublyLinkedList<T, A, I>) -> Self {
        let old = *self;
        self.increment(list);
        old
    }

    /// Steps back to the previous element; the end position steps to the tail.
    ///
    /// # Panics
    /// Panics at the head, at the end of an empty list, or if the node has
    /// been removed.
    pub fn decrement<T, A: NodeAllocator>(&mut self, list: &DoublyLinkedList<T, A, I>) -> &mut Self {
        match list.prev_position(*self) {
            Ok(prev) => *self = prev,
            Err(err) => panic!("decrement: {err}"),
        }
        self
    }

    /// Steps back like [`decrement`](Self::decrement) and returns the old position.
    pub fn post_decrement<T, A: NodeAllocator>(&mut self, list: &DoublyLinkedList<T, A, I>) -> Self {
        let old = *self;
        self.decrement(list);
        old
    }
}

impl<I: IndexType> Default for Position<I> {
    fn default() -> Self {
        Self::end()
    }
}

impl<I: IndexType> PartialEq for Position<I> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_end() || other.is_end() {
            return self.is_end() && other.is_end();
        }
        self.arena == other.arena && self.slot == other.slot && self.generation == other.generation
    }
}

impl<I: IndexType> Eq for Position<I> {}

impl<I: IndexType> Hash for Position<I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_end() {
            I::NONE.hash(state);
        } else {
            self.slot.hash(state);
            self.arena.hash(state);
            self.generation.hash(state);
        }
    }
}

impl<T, A: NodeAllocator, I: IndexType> DoublyLinkedList<T, A, I> {
    /// Position of the first element, or the end position if the list is empty.
    pub fn begin(&self) -> Position<I> {
        self.position_of(self.head)
    }

    /// Position of the last element, or the end position if the list is empty.
    pub fn rbegin(&self) -> Position<I> {
        self.position_of(self.tail)
    }

    /// The end position.
    #[inline(always)]
    pub fn end(&self) -> Position<I> {
        Position::end()
    }

    /// The position after `position`.
    ///
    /// # Errors
    /// [`ListError::EndPosition`] when called on the end position, or a
    /// stale/foreign error.
    pub fn next_position(&self, position: Position<I>) -> Result<Position<I>, ListError> {
        let idx = self.resolve(position)?;
        if idx.is_none() {
            return Err(ListError::EndPosition);
        }
        Ok(self.position_of(self.arena.node(idx).next))
    }

    /// The position before `position`. The end position maps to the tail.
    ///
    /// # Errors
    /// [`ListError::BeforeBegin`] at the head, [`ListError::Empty`] for the
    /// end position of an empty list, or a stale/foreign error.
    pub fn prev_position(&self, position: Position<I>) -> Result<Position<I>, ListError> {
        let idx = self.resolve(position)?;
        if idx.is_none() {
            return if self.tail.is_none() {
                Err(ListError::Empty)
            } else {
                Ok(self.position_of(self.tail))
            };
        }
        let prev = self.arena.node(idx).prev;
        if prev.is_none() {
            return Err(ListError::BeforeBegin);
        }
        Ok(self.position_of(prev))
    }

    /// Returns the element at `position`.
    ///
    /// # Errors
    /// [`ListError::EndPosition`] for the end position, or a stale/foreign error.
    pub fn get(&self, position: Position<I>) -> Result<&T, ListError> {
        let idx = self.resolve(position)?;
        if idx.is_none() {
            return Err(ListError::EndPosition);
        }
        Ok(&self.arena.node(idx).value)
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut(&mut self, position: Position<I>) -> Result<&mut T, ListError> {
        let idx = self.resolve(position)?;
        if idx.is_none() {
            return Err(ListError::EndPosition);
        }
        Ok(&mut self.arena.node_mut(idx).value)
    }
}

impl<T, A: NodeAllocator, I: IndexType> Index<Position<I>> for DoublyLinkedList<T, A, I> {
    type Output = T;

    /// # Panics
    /// Panics if `position` is the end position, stale, or foreign.
    fn index(&self, position: Position<I>) -> &T {
        match self.get(position) {
            Ok(value) => value,
            Err(err) => panic!("index: {err}"),
        }
    }
}

impl<T, A: NodeAllocator, I: IndexType> IndexMut<Position<I>> for DoublyLinkedList<T, A, I> {
    fn index_mut(&mut self, position: Position<I>) -> &mut T {
        match self.get_mut(position) {
            Ok(value) => value,
            Err(err) => panic!("index: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dlist;

    #[test]
    fn test_position_forward_traversal() {
        let list = dlist![1, 2, 3];
        let mut seen = Vec::new();
        let mut pos = list.begin();
        while pos != list.end() {
            seen.push(list[pos]);
            pos.increment(&list);
        }
        assert_eq!(seen, [1, 2, 3]);
    }

    #[test]
    fn test_position_reverse_traversal_from_end() {
        let list = dlist![1, 2, 3];
        let mut seen = Vec::new();
        let mut pos = list.end();
        while pos != list.begin() {
            pos.decrement(&list);
            seen.push(list[pos]);
        }
        assert_eq!(seen, [3, 2, 1]);
    }

    #[test]
    fn test_position_reverse_traversal_from_rbegin() {
        let list = dlist!["a", "b"];
        let mut pos = list.rbegin();
        assert_eq!(list[pos], "b");
        let old = pos.post_decrement(&list);
        assert_eq!(list[old], "b");
        assert_eq!(list[pos], "a");
        assert_eq!(list.prev_position(pos), Err(ListError::BeforeBegin));
    }

    #[test]
    fn test_position_post_increment_returns_old() {
        let list = dlist![5, 6];
        let mut pos = list.begin();
        let old = pos.post_increment(&list);
        assert_eq!(old, list.begin());
        assert_eq!(list[pos], 6);
        pos.increment(&list);
        assert!(pos.is_end());
    }

    #[test]
    fn test_position_end_errors() {
        let list = dlist![1];
        assert_eq!(list.next_position(list.end()), Err(ListError::EndPosition));
        assert_eq!(list.get(list.end()), Err(ListError::EndPosition));

        let empty: DoublyLinkedList<i32> = DoublyLinkedList::new();
        assert_eq!(empty.begin(), empty.end());
        assert_eq!(empty.rbegin(), empty.end());
        assert_eq!(empty.prev_position(empty.end()), Err(ListError::Empty));
    }

    #[test]
    #[should_panic(expected = "increment")]
    fn test_position_increment_end_panics() {
        let list = dlist![1];
        let mut pos = list.end();
        pos.increment(&list);
    }

    #[test]
    #[should_panic(expected = "decrement")]
    fn test_position_decrement_head_panics() {
        let list = dlist![1];
        let mut pos = list.begin();
        pos.decrement(&list);
    }

    #[test]
    #[should_panic(expected = "index")]
    fn test_position_index_end_panics() {
        let list = dlist![1];
        let _ = list[list.end()];
    }

    #[test]
    fn test_position_equality() {
        let a = dlist![1, 2];
        let b = dlist![1, 2];
        assert_eq!(a.end(), b.end());
        assert_eq!(Position::<u32>::default(), a.end());
        assert_ne!(a.begin(), b.begin());
        assert_ne!(a.begin(), a.end());
        assert_eq!(a.begin(), a.begin());
    }

    #[test]
    fn test_position_copies_share_node() {
        let mut list = dlist![1, 2];
        let pos = list.begin();
        let copy = pos;
        list[pos] = 10;
        assert_eq!(list[copy], 10);
        *list.get_mut(copy).unwrap() += 1;
        assert_eq!(list.get(pos), Ok(&11));
    }

    #[test]
    fn test_position_foreign_rejected() {
        let mut a = dlist![1];
        let b = dlist![1];
        assert_eq!(a.get(b.begin()), Err(ListError::ForeignPosition));
        assert_eq!(a.try_erase(b.begin()), Err(ListError::ForeignPosition));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_position_survives_unrelated_mutation() {
        let mut list = dlist![1, 2, 3];
        let mut pos = list.begin();
        pos.increment(&list);
        list.push_front(0);
        list.pop_back();
        list.insert(pos, 9);
        assert_eq!(list[pos], 2);
        assert_eq!(list, [0, 1, 9, 2]);
    }
}
