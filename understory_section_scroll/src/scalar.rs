// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The number type shared by section extents and scroll offsets.

use core::fmt::{Debug, Display};
use core::ops::{Add, Div, Mul, Sub};

/// A scroll coordinate: `f32` or `f64`.
///
/// Hosts pick the width their scroll container reports. Sections, layouts,
/// and trackers are all generic over it, so a layout built for an `f32` host
/// never round-trips through `f64`.
pub trait Scalar:
    'static
    + Copy
    + PartialOrd
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// `0.0`.
    fn zero() -> Self;

    /// The larger of `self` and `other`, ignoring NaN.
    fn max(self, other: Self) -> Self;

    /// The smaller of `self` and `other`, ignoring NaN.
    fn min(self, other: Self) -> Self;

    /// A row or item count as a coordinate.
    fn from_usize(value: usize) -> Self;

    /// Whether `self` can be used as a section extent or spacing: finite and
    /// not below zero. `-0.0` qualifies.
    fn is_valid_extent(self) -> bool;

    /// Maps offsets before the start of the layout (negative values and
    /// `-0.0`) to `0.0`.
    fn clamp_non_negative(self) -> Self;

    /// How many whole strides fit in `self`.
    ///
    /// Rounds toward zero. Negative values and NaN give `0`; values beyond
    /// `usize::MAX` saturate. Callers clamp the result to a row range.
    fn whole_steps(self) -> usize;
}

macro_rules! impl_scalar {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                fn zero() -> Self {
                    0.0
                }

                fn max(self, other: Self) -> Self {
                    <$ty>::max(self, other)
                }

                fn min(self, other: Self) -> Self {
                    <$ty>::min(self, other)
                }

                fn from_usize(value: usize) -> Self {
                    value as Self
                }

                fn is_valid_extent(self) -> bool {
                    self.is_finite() && self >= 0.0
                }

                fn clamp_non_negative(self) -> Self {
                    if self.is_sign_negative() { 0.0 } else { self }
                }

                fn whole_steps(self) -> usize {
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "Float-to-int `as` saturates; row lookups clamp the result."
                    )]
                    {
                        self as usize
                    }
                }
            }
        )*
    };
}

impl_scalar!(f32, f64);
