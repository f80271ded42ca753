//! The doubly-linked list and its positions.

mod assign;
mod audit;
mod iter;
mod list;
mod node;
mod position;

pub use iter::{IntoIter, Iter, IterMut, Range};
pub use list::DoublyLinkedList;
pub use position::Position;
