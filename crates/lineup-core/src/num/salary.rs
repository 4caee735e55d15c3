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

//! # Salary Numeric Trait
//!
//! Salaries, caps and running totals are non-negative integers in contest
//! currency units. `SalaryNumeric` collects the bounds every salary-generic
//! component needs into one alias: primitive unsigned integer semantics, the
//! `Zero`/`PlusOne` constants, by-value checked and saturating arithmetic,
//! formatting, hashing and thread-safety for concurrent solves.
//!
//! Salary totals are summed with `checked_add_val`. An overflowing sum is
//! `None` and counts as over any cap, including a cap of `T::MAX`. Saturating
//! addition is only used for counters where clamping is harmless.

use crate::num::{
    checked::CheckedAddVal,
    constants::{PlusOne, Zero},
    saturating::{SaturatingAddVal, SaturatingSubVal},
};
use num_traits::{PrimInt, ToPrimitive, Unsigned};
use std::hash::Hash;

/// A trait alias for integer types that can carry salaries.
/// These are the unsigned primitive integers `u8` through `u128` and `usize`.
pub trait SalaryNumeric:
    PrimInt
    + Unsigned
    + Zero
    + PlusOne
    + CheckedAddVal
    + SaturatingAddVal
    + SaturatingSubVal
    + std::fmt::Debug
    + std::fmt::Display
    + Hash
    + Send
    + Sync
    + 'static
{
    /// Converts the salary into an `f64` for ratio computations.
    #[inline]
    fn as_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::INFINITY)
    }
}

impl<T> SalaryNumeric for T where
    T: PrimInt
        + Unsigned
        + Zero
        + PlusOne
        + CheckedAddVal
        + SaturatingAddVal
        + SaturatingSubVal
        + std::fmt::Debug
        + std::fmt::Display
        + Hash
        + Send
        + Sync
        + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total<T: SalaryNumeric>(values: &[T]) -> Option<T> {
        values
            .iter()
            .try_fold(T::ZERO, |acc, &v| acc.checked_add_val(v))
    }

    #[test]
    fn test_salary_numeric_sum_detects_overflow() {
        assert_eq!(total::<u32>(&[10, 20, 30]), Some(60));
        assert_eq!(total::<u8>(&[200, 55]), Some(u8::MAX));
        assert_eq!(total::<u8>(&[200, 100]), None);
    }

    #[test]
    fn test_as_f64_converts_exactly_for_small_values() {
        assert_eq!(50_000u32.as_f64(), 50_000.0);
        assert_eq!(0u64.as_f64(), 0.0);
    }
}
