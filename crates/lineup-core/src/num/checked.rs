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

//! By-value checked arithmetic.
//!
//! Salary sums must detect overflow instead of clamping: a total clamped to
//! the numeric maximum is indistinguishable from a lineup spending exactly a
//! cap of `T::MAX`.

use core::ops::Add;

/// Checked addition by value, returning `None` on overflow.
///
/// # Examples
///
/// ```rust
/// # use lineup_core::num::checked::CheckedAddVal;
///
/// let a: u8 = 200;
/// assert_eq!(a.checked_add_val(100), None);
/// assert_eq!(a.checked_add_val(55), Some(255));
/// ```
pub trait CheckedAddVal: Sized + Add<Self, Output = Self> {
    /// Performs checked addition by value.
    fn checked_add_val(self, v: Self) -> Option<Self>;
}

macro_rules! checked_impl_val {
    ($trait_name:ident, $method:ident, $src_method:ident, $($t:ty),* $(,)?) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, v: Self) -> Option<Self> {
                    <$t>::$src_method(self, v)
                }
            }
        )*
    };
}

checked_impl_val!(
    CheckedAddVal,
    checked_add_val,
    checked_add,
    u8,
    u16,
    u32,
    u64,
    usize,
    u128
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add_reports_overflow() {
        assert_eq!(200u8.checked_add_val(56), None);
        assert_eq!(u64::MAX.checked_add_val(1), None);
        assert_eq!(u32::MAX.checked_add_val(0), Some(u32::MAX));
        assert_eq!(3usize.checked_add_val(4), Some(7));
    }
}
