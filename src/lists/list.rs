//! The doubly-linked list container.

use core::alloc::Layout;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use super::node::{Arena, Node};
use super::position::Position;
use crate::alloc::{Global, NodeAllocator};
use crate::error::ListError;
use crate::IndexType;

/// A doubly-linked list whose nodes live in a generational slot arena.
///
/// # Storage strategy
/// Nodes are kept in a `Vec` of slots and linked by compact indices of type
/// `I` rather than by pointers. Every node is admitted by the memory provider
/// `A` when it is created and released through the same provider when it is
/// destroyed. The list owns its nodes exclusively; [`Position`]s are weak
/// handles that are checked on every use.
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|--------|
/// | `T` | Element type |
/// | `A` | Memory provider, [`Global`] by default |
/// | `I` | Link width, `u32` by default (`u8` caps the list at 255 nodes) |
///
/// # Example
/// ```rust
/// use linked_collections::{DoublyLinkedList, ListError};
///
/// let mut list = DoublyLinkedList::new();
/// list.push_back(1);
/// list.push_back(2);
/// list.push_back(3);
///
/// let mut pos = list.begin();
/// pos.increment(&list);
/// let after = list.erase(pos);
/// assert_eq!(list[after], 3);
/// assert_eq!(list, [1, 3]);
///
/// list.pop_front();
/// list.pop_back();
/// assert_eq!(list.front(), Err(ListError::Empty));
/// ```
pub struct DoublyLinkedList<T, A: NodeAllocator = Global, I: IndexType = u32> {
    pub(crate) len: usize,
    pub(crate) head: I,
    pub(crate) tail: I,
    pub(crate) arena: Arena<T, I>,
    pub(crate) alloc: A,
}

impl<T> DoublyLinkedList<T> {
    /// Creates an empty list using the [`Global`] provider.
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates a list holding `n` clones of `value`.
    pub fn from_elem(n: usize, value: &T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(n, value, Global)
    }

    /// Creates a list holding `n` default values.
    pub fn with_len(n: usize) -> Self
    where
        T: Default,
    {
        Self::with_len_in(n, Global)
    }

    /// Deep-copies the elements of `source` in `[first, last)`.
    ///
    /// Copying stops early at the end of `source` if `last` is never reached.
    ///
    /// # Errors
    /// Returns an error if either position is stale or belongs to another list.
    pub fn from_range<B, J>(
        source: &DoublyLinkedList<T, B, J>,
        first: Position<J>,
        last: Position<J>,
    ) -> Result<Self, ListError>
    where
        T: Clone,
        B: NodeAllocator,
        J: IndexType,
    {
        Ok(source.range(first, last)?.cloned().collect())
    }
}

impl<T, A: NodeAllocator, I: IndexType> DoublyLinkedList<T, A, I> {
    /// Creates an empty list that allocates its nodes through `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            len: 0,
            head: I::NONE,
            tail: I::NONE,
            arena: Arena::new(),
            alloc,
        }
    }

    /// Creates a list holding `n` clones of `value`, allocated through `alloc`.
    pub fn from_elem_in(n: usize, value: &T, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut list = Self::new_in(alloc);
        for _ in 0..n {
            list.push_back(value.clone());
        }
        list
    }

    /// Creates a list holding `n` default values, allocated through `alloc`.
    pub fn with_len_in(n: usize, alloc: A) -> Self
    where
        T: Default,
    {
        let mut list = Self::new_in(alloc);
        for _ in 0..n {
            list.push_back(T::default());
        }
        list
    }

    /// Returns the memory provider.
    #[inline(always)]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns the number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of node slots held by the arena, live or free.
    pub fn slot_capacity(&self) -> usize {
        self.arena.slot_count()
    }

    // ─── access ───────────────────────────────────────────────────────────────

    /// Returns the first element.
    ///
    /// # Errors
    /// [`ListError::Empty`] if the list is empty.
    pub fn front(&self) -> Result<&T, ListError> {
        if self.head.is_none() {
            return Err(ListError::Empty);
        }
        Ok(&self.arena.node(self.head).value)
    }

    /// Returns the last element.
    ///
    /// # Errors
    /// [`ListError::Empty`] if the list is empty.
    pub fn back(&self) -> Result<&T, ListError> {
        if self.tail.is_none() {
            return Err(ListError::Empty);
        }
        Ok(&self.arena.node(self.tail).value)
    }

    /// Mutable counterpart of [`front`](Self::front).
    pub fn front_mut(&mut self) -> Result<&mut T, ListError> {
        if self.head.is_none() {
            return Err(ListError::Empty);
        }
        Ok(&mut self.arena.node_mut(self.head).value)
    }

    /// Mutable counterpart of [`back`](Self::back).
    pub fn back_mut(&mut self) -> Result<&mut T, ListError> {
        if self.tail.is_none() {
            return Err(ListError::Empty);
        }
        Ok(&mut self.arena.node_mut(self.tail).value)
    }

    /// Returns `true` if some element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    // ─── insertion ────────────────────────────────────────────────────────────

    /// Appends `value` after the tail.
    ///
    /// # Panics
    /// Panics if the node cannot be allocated.
    pub fn push_back(&mut self, value: T) {
        if let Err(err) = self.try_push_back(value) {
            panic!("push_back: {err}");
        }
    }

    /// Prepends `value` before the head.
    ///
    /// # Panics
    /// Panics if the node cannot be allocated.
    pub fn push_front(&mut self, value: T) {
        if let Err(err) = self.try_push_front(value) {
            panic!("push_front: {err}");
        }
    }

    /// Fallible [`push_back`](Self::push_back). On error the list is unchanged.
    pub fn try_push_back(&mut self, value: T) -> Result<(), ListError> {
        let idx = self.alloc_node(value)?;
        self.link_before(idx, I::NONE);
        Ok(())
    }

    /// Fallible [`push_front`](Self::push_front). On error the list is unchanged.
    pub fn try_push_front(&mut self, value: T) -> Result<(), ListError> {
        let idx = self.alloc_node(value)?;
        self.link_before(idx, self.head);
        Ok(())
    }

    /// Inserts `value` immediately before `position` and returns the position
    /// of the new element. Inserting before [`end`](Self::end) appends.
    ///
    /// # Panics
    /// Panics if `position` is stale or foreign, or the node cannot be allocated.
    pub fn insert(&mut self, position: Position<I>, value: T) -> Position<I> {
        match self.try_insert(position, value) {
            Ok(pos) => pos,
            Err(err) => panic!("insert: {err}"),
        }
    }

    /// Fallible [`insert`](Self::insert). On error the list is unchanged.
    pub fn try_insert(&mut self, position: Position<I>, value: T) -> Result<Position<I>, ListError> {
        let at = self.resolve(position)?;
        let idx = self.alloc_node(value)?;
        self.link_before(idx, at);
        Ok(self.position_of(idx))
    }

    // ─── removal ──────────────────────────────────────────────────────────────

    /// Removes and returns the last element, or `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.tail.is_none() {
            None
        } else {
            Some(self.unlink(self.tail))
        }
    }

    /// Removes and returns the first element, or `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.head.is_none() {
            None
        } else {
            Some(self.unlink(self.head))
        }
    }

    /// Removes the element at `position` and returns the position that followed
    /// it. Erasing [`end`](Self::end) does nothing and returns `end`.
    ///
    /// # Panics
    /// Panics if `position` is stale or foreign.
    pub fn erase(&mut self, position: Position<I>) -> Position<I> {
        match self.try_erase(position) {
            Ok(pos) => pos,
            Err(err) => panic!("erase: {err}"),
        }
    }

    /// Fallible [`erase`](Self::erase).
    pub fn try_erase(&mut self, position: Position<I>) -> Result<Position<I>, ListError> {
        let idx = self.resolve(position)?;
        if idx.is_none() {
            return Ok(Position::end());
        }
        let next = self.arena.node(idx).next;
        self.unlink(idx);
        Ok(self.position_of(next))
    }

    /// Removes the element at `position` and returns it.
    ///
    /// # Errors
    /// [`ListError::EndPosition`] for the end position, or a stale/foreign error.
    pub fn remove(&mut self, position: Position<I>) -> Result<T, ListError> {
        let idx = self.resolve(position)?;
        if idx.is_none() {
            return Err(ListError::EndPosition);
        }
        Ok(self.unlink(idx))
    }

    /// Removes every element, front to back.
    pub fn clear(&mut self) {
        let len = self.len;
        while self.pop_front().is_some() {}
        if len > 0 {
            log::trace!("cleared {len} nodes");
        }
    }

    // ─── internals ────────────────────────────────────────────────────────────

    #[inline(always)]
    fn node_layout() -> Layout {
        Layout::new::<Node<T, I>>()
    }

    /// Admits and stores a detached node. Nothing is linked yet, so a failure
    /// leaves the chain untouched.
    fn alloc_node(&mut self, value: T) -> Result<I, ListError> {
        self.arena.check_vacancy()?;
        self.alloc.allocate(Self::node_layout())?;
        let idx = self.arena.insert(Node::detached(value));
        log::trace!("allocated node {}", idx.as_usize());
        Ok(idx)
    }

    /// Splices the detached node `idx` before `at`; `I::NONE` appends.
    fn link_before(&mut self, idx: I, at: I) {
        let prev = if at.is_none() {
            self.tail
        } else {
            self.arena.node(at).prev
        };

        let node = self.arena.node_mut(idx);
        node.prev = prev;
        node.next = at;

        if prev.is_none() {
            self.head = idx;
        } else {
            self.arena.node_mut(prev).next = idx;
        }
        if at.is_none() {
            self.tail = idx;
        } else {
            self.arena.node_mut(at).prev = idx;
        }
        self.len += 1;
    }

    /// Detaches `idx` from the chain, frees its slot and returns its value.
    pub(crate) fn unlink(&mut self, idx: I) -> T {
        let (prev, next) = {
            let node = self.arena.node(idx);
            (node.prev, node.next)
        };

        if prev.is_none() {
            self.head = next;
        } else {
            self.arena.node_mut(prev).next = next;
        }
        if next.is_none() {
            self.tail = prev;
        } else {
            self.arena.node_mut(next).prev = prev;
        }
        self.len -= 1;

        let node = self.arena.remove(idx);
        self.alloc.deallocate(Self::node_layout());
        log::trace!("freed node {}", idx.as_usize());
        node.value
    }

    /// Maps a position to a slot index (`I::NONE` for the end position).
    pub(crate) fn resolve(&self, position: Position<I>) -> Result<I, ListError> {
        if position.slot.is_none() {
            return Ok(I::NONE);
        }
        if position.arena != self.arena.id() {
            return Err(ListError::ForeignPosition);
        }
        if !self.arena.is_current(position.slot, position.generation) {
            return Err(ListError::StalePosition);
        }
        Ok(position.slot)
    }

    /// Builds a position for a live slot, or the end position for `I::NONE`.
    pub(crate) fn position_of(&self, idx: I) -> Position<I> {
        if idx.is_none() {
            Position::end()
        } else {
            Position {
                arena: self.arena.id(),
                slot: idx,
                generation: self.arena.generation(idx),
            }
        }
    }
}

impl<T, A: NodeAllocator, I: IndexType> Drop for DoublyLinkedList<T, A, I> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, A: NodeAllocator + Default, I: IndexType> Default for DoublyLinkedList<T, A, I> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: fmt::Debug, A: NodeAllocator, I: IndexType> fmt::Debug for DoublyLinkedList<T, A, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A, B, I, J> PartialEq<DoublyLinkedList<T, B, J>> for DoublyLinkedList<T, A, I>
where
    T: PartialEq,
    A: NodeAllocator,
    B: NodeAllocator,
    I: IndexType,
    J: IndexType,
{
    fn eq(&self, other: &DoublyLinkedList<T, B, J>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: NodeAllocator, I: IndexType> Eq for DoublyLinkedList<T, A, I> {}

impl<T: PartialEq, A: NodeAllocator, I: IndexType, const N: usize> PartialEq<[T; N]>
    for DoublyLinkedList<T, A, I>
{
    fn eq(&self, other: &[T; N]) -> bool {
        self.len == N && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq, A: NodeAllocator, I: IndexType> PartialEq<[T]> for DoublyLinkedList<T, A, I> {
    fn eq(&self, other: &[T]) -> bool {
        self.len == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialOrd, A: NodeAllocator, I: IndexType> PartialOrd for DoublyLinkedList<T, A, I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, A: NodeAllocator, I: IndexType> Ord for DoublyLinkedList<T, A, I> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, A: NodeAllocator, I: IndexType> Hash for DoublyLinkedList<T, A, I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T, A: NodeAllocator, I: IndexType> Extend<T> for DoublyLinkedList<T, A, I> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, A: NodeAllocator, I: IndexType> Extend<&'a T> for DoublyLinkedList<T, A, I> {
    fn extend<It: IntoIterator<Item = &'a T>>(&mut self, iter: It) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, A: NodeAllocator + Default, I: IndexType> FromIterator<T> for DoublyLinkedList<T, A, I> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut list = Self::default();
        list.extend(iter);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for DoublyLinkedList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for DoublyLinkedList<T> {
    fn from(values: &[T]) -> Self {
        values.iter().cloned().collect()
    }
}


// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use std::collections::VecDeque;

    use proptest::prelude::*;

    use super::*;

    #[derive(Clone, Debug)]
    enum Op {
        PushBack(u8),
        PushFront(u8),
        PopBack,
        PopFront,
        Insert(usize, u8),
        Erase(usize),
        Assign(Vec<u8>),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => any::<u8>().prop_map(Op::PushBack),
            3 => any::<u8>().prop_map(Op::PushFront),
            2 => Just(Op::PopBack),
            2 => Just(Op::PopFront),
            3 => (any::<usize>(), any::<u8>()).prop_map(|(i, v)| Op::Insert(i, v)),
            3 => any::<usize>().prop_map(Op::Erase),
            1 => prop::collection::vec(any::<u8>(), 0..12).prop_map(Op::Assign),
            1 => Just(Op::Clear),
        ]
    }

    /// Position of the `n`-th element, or end when `n == len`.
    fn nth_position(list: &DoublyLinkedList<u8>, n: usize) -> Position {
        let mut pos = list.begin();
        for _ in 0..n {
            pos.increment(list);
        }
        pos
    }

    proptest! {
        #[test]
        fn list_matches_vecdeque_model(ops in prop::collection::vec(op(), 0..200)) {
            let mut list = DoublyLinkedList::new();
            let mut model: VecDeque<u8> = VecDeque::new();

            for op in ops {
                match op {
                    Op::PushBack(v) => {
                        list.push_back(v);
                        model.push_back(v);
                    }
                    Op::PushFront(v) => {
                        list.push_front(v);
                        model.push_front(v);
                    }
                    Op::PopBack => prop_assert_eq!(list.pop_back(), model.pop_back()),
                    Op::PopFront => prop_assert_eq!(list.pop_front(), model.pop_front()),
                    Op::Insert(i, v) => {
                        let n = i % (model.len() + 1);
                        let pos = list.insert(nth_position(&list, n), v);
                        model.insert(n, v);
                        prop_assert_eq!(list.get(pos), Ok(&v));
                    }
                    Op::Erase(i) => {
                        if !model.is_empty() {
                            let n = i % model.len();
                            let next = list.erase(nth_position(&list, n));
                            model.remove(n);
                            prop_assert_eq!(list.get(next).ok(), model.get(n));
                        }
                    }
                    Op::Assign(values) => {
                        list.assign(values.iter().copied());
                        model = values.into_iter().collect();
                    }
                    Op::Clear => {
                        list.clear();
                        model.clear();
                    }
                }

                #[cfg(feature = "audit")]
                prop_assert_eq!(list.check_links(), Ok(()));
                prop_assert_eq!(list.len(), model.len());
                prop_assert!(list.iter().eq(model.iter()));
                prop_assert!(list.iter().rev().eq(model.iter().rev()));
            }
        }
    }
}
