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

//! By-value saturating arithmetic.
//!
//! The inherent `saturating_add` / `saturating_sub` methods on primitive
//! integers are not reachable through a generic bound, and the
//! `num_traits::Saturating*` traits take their operand by reference. These
//! traits expose the by-value form so generic salary code reads the same as
//! code written against a concrete integer.

use core::ops::{Add, Sub};

macro_rules! saturating_impl_binary_val {
    ($trait_name:ident, $method:ident, $src_method:ident, $($t:ty),* $(,)?) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, v: Self) -> Self {
                    <$t>::$src_method(self, v)
                }
            }
        )*
    };
}

/// Saturating addition by value, clamping at the numeric maximum.
///
/// # Examples
///
/// ```rust
/// # use lineup_core::num::saturating::SaturatingAddVal;
///
/// let a: u8 = 250;
/// assert_eq!(a.saturating_add_val(10), 255);
/// ```
pub trait SaturatingAddVal: Sized + Add<Self, Output = Self> {
    /// Performs saturating addition by value.
    fn saturating_add_val(self, v: Self) -> Self;
}

/// Saturating subtraction by value, clamping at the numeric minimum.
///
/// # Examples
///
/// ```rust
/// # use lineup_core::num::saturating::SaturatingSubVal;
///
/// let a: u16 = 5;
/// assert_eq!(a.saturating_sub_val(10), 0);
/// ```
pub trait SaturatingSubVal: Sized + Sub<Self, Output = Self> {
    /// Performs saturating subtraction by value.
    fn saturating_sub_val(self, v: Self) -> Self;
}

saturating_impl_binary_val!(
    SaturatingAddVal,
    saturating_add_val,
    saturating_add,
    u8,
    u16,
    u32,
    u64,
    usize,
    u128
);

saturating_impl_binary_val!(
    SaturatingSubVal,
    saturating_sub_val,
    saturating_sub,
    u8,
    u16,
    u32,
    u64,
    usize,
    u128
);
