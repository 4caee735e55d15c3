// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Strongly Typed Indices
//!
//! Phantom-typed wrappers around `usize` that keep the engine's index spaces
//! apart. A lineup solve juggles players, roster slots and teams at the same
//! time, and a raw `usize` invites accidental swaps between them.
//! `TypedIndex<T>` carries a tag type `T: TypedIndexTag` and compiles down to
//! a transparent `usize`.
//!
//! ## Usage
//!
//! ```rust
//! use lineup_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct PlayerTag;
//! impl TypedIndexTag for PlayerTag { const NAME: &'static str = "PlayerIndex"; }
//!
//! type PlayerIndex = TypedIndex<PlayerTag>;
//! let p = PlayerIndex::new(3);
//! assert_eq!(p.get(), 3);
//! assert_eq!(format!("{}", p), "PlayerIndex(3)");
//! ```

/// A trait to tag typed indices with a name for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed index associated with the tag type `T`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` wrapping `index`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns `true` if the index is zero.
    #[inline(always)]
    pub const fn is_zero(&self) -> bool {
        self.index == 0
    }

    /// Returns the next index in the same index space.
    #[inline(always)]
    pub const fn next(&self) -> Self {
        Self::new(self.index + 1)
    }

    /// Iterates over all indices `0..len` of this index space.
    #[inline]
    pub fn range(len: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..len).map(Self::new)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(index: TypedIndex<T>) -> Self {
        index.index
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct TestTag;

    impl TypedIndexTag for TestTag {
        const NAME: &'static str = "TestIndex";
    }

    type TestIndex = TypedIndex<TestTag>;

    #[test]
    fn test_new_get_and_conversions() {
        let idx = TestIndex::new(7);
        assert_eq!(idx.get(), 7);
        assert!(!idx.is_zero());
        assert!(TestIndex::new(0).is_zero());

        let from: TestIndex = 4usize.into();
        assert_eq!(from.get(), 4);
        let back: usize = from.into();
        assert_eq!(back, 4);
    }

    #[test]
    fn test_next_and_range() {
        assert_eq!(TestIndex::new(2).next(), TestIndex::new(3));
        let all: Vec<usize> = TestIndex::range(3).map(|i| i.get()).collect();
        assert_eq!(all, vec![0, 1, 2]);
        assert_eq!(TestIndex::range(5).len(), 5);
        assert_eq!(TestIndex::range(2).next_back(), Some(TestIndex::new(1)));
    }

    #[test]
    fn test_display_debug_ordering_and_hash() {
        let a = TestIndex::new(1);
        let b = TestIndex::new(2);
        assert_eq!(format!("{}", a), "TestIndex(1)");
        assert_eq!(format!("{:?}", b), "TestIndex(2)");
        assert!(a < b);

        let set: HashSet<TestIndex> = [a, b, TestIndex::new(1)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
