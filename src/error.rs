//! Error types reported by [`DoublyLinkedList`](crate::DoublyLinkedList).

use thiserror::Error;

/// A node could not be admitted.
///
/// Allocation failure is not recoverable inside an operation: the panicking
/// insertion methods abort with this message, the `try_*` variants return it
/// and leave the list untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The memory provider refused to admit another node.
    #[error("memory provider refused a node allocation ({live} nodes live)")]
    Refused { live: usize },

    /// Every handle of the list's index type is in use.
    #[error("index space exhausted: at most {max} nodes can be addressed")]
    IndexSpaceExhausted { max: usize },
}

/// Failure of a list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("unable to access data from an empty list")]
    Empty,

    #[error("position is the end position and refers to no element")]
    EndPosition,

    #[error("cannot move a position before the first element")]
    BeforeBegin,

    #[error("position refers to a node that has been removed")]
    StalePosition,

    #[error("position belongs to a different list")]
    ForeignPosition,

    #[error(transparent)]
    Alloc(#[from] AllocError),
}

/// A violated structural invariant, found by
/// [`check_links`](crate::DoublyLinkedList::check_links).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("length is {len} but head/tail emptiness disagrees (head empty: {head_empty}, tail empty: {tail_empty})")]
    Endpoints {
        len: usize,
        head_empty: bool,
        tail_empty: bool,
    },

    #[error("head node {0} has a previous link")]
    HeadHasPrev(usize),

    #[error("tail node {0} has a next link")]
    TailHasNext(usize),

    #[error("link to slot {0} does not refer to a live node")]
    Dangling(usize),

    #[error("node {node} links forward to {next}, but {next} links back to {back}")]
    BrokenBackLink { node: usize, next: usize, back: usize },

    #[error("node {0} is reachable twice from the head")]
    Cycle(usize),

    #[error("walk from the head ended at {reached}, but the tail is {tail}")]
    TailMismatch { reached: usize, tail: usize },

    #[error("length is {len} but {reachable} nodes are reachable from the head")]
    LengthMismatch { len: usize, reachable: usize },

    #[error("{live} live slots and {free} free slots do not account for {total} slots")]
    LeakedSlots {
        live: usize,
        free: usize,
        total: usize,
    },
}
