//! Compact index types used as node handles inside the slot arena.

use core::hash::Hash;
use std::fmt::Debug;

/// A sealed trait for integer types used as **doubly-linked-list node indices**.
///
/// Instead of pointer-based links, the list stores indices into its slot arena.
/// A narrower index type shrinks every node by the difference in link width, at
/// the price of a smaller maximum number of slots.
pub trait IndexType: Copy + Eq + Hash + Debug + 'static {
    /// Sentinel value indicating "no node" (analogous to a null pointer).
    /// Used for an empty head/tail and for the end position.
    const NONE: Self;

    /// Number of distinct slots this type can address; `NONE` is reserved.
    const MAX_SLOTS: usize;

    /// Converts this index to a `usize` for slot access.
    fn as_usize(self) -> usize;

    /// Converts a `usize` slot index to this compact type.
    ///
    /// # Panics
    /// Panics if `i` does not fit below [`MAX_SLOTS`](IndexType::MAX_SLOTS).
    fn from_usize(i: usize) -> Self;

    /// Returns `true` if this is the [`NONE`](IndexType::NONE) sentinel.
    #[inline(always)]
    fn is_none(self) -> bool {
        self == Self::NONE
    }
}

macro_rules! impl_index_type {
    ($($ty:ty),*) => {
        $(
            impl IndexType for $ty {
                const NONE: Self = <$ty>::MAX;
                const MAX_SLOTS: usize = <$ty>::MAX as usize;

                #[inline(always)]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline(always)]
                fn from_usize(i: usize) -> Self {
                    assert!(i < Self::MAX_SLOTS, "slot index {i} out of range");
                    i as $ty
                }
            }
        )*
    };
}

impl_index_type!(u8, u16, u32, usize);
