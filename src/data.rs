// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Simple data types

use crate::conv::{to_u32, to_usize};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// 2D vector
///
/// Usually used as either a coordinate or a difference of coordinates, but
/// may have some other uses (e.g. texture coordinates).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2(pub f32, pub f32);

impl Vec2 {
    /// Zero
    pub const ZERO: Vec2 = Vec2(0.0, 0.0);

    /// Extend with a `z` component
    #[inline]
    pub fn extend(self, z: f32) -> Vec3 {
        Vec3(self.0, self.1, z)
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Vec2(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec2(self.0 - other.0, self.1 - other.1)
    }
}

/// 3D vector
///
/// Quad vertex positions are emitted in this form with `z = 0`, matching the
/// vertex layout expected by most instanced-quad pipelines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3(pub f32, pub f32, pub f32);

impl Vec3 {
    /// Drop the `z` component
    #[inline]
    pub fn truncate(self) -> Vec2 {
        Vec2(self.0, self.1)
    }
}

/// Range type
///
/// Essentially this is just a `std::ops::Range<u32>`, but with convenient
/// implementations.
///
/// Note that we consider `u32` large enough for any text we wish to lay out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

impl Range {
    /// The start, as `usize`
    #[inline]
    pub fn start(self) -> usize {
        to_usize(self.start)
    }

    /// The end, as `usize`
    #[inline]
    pub fn end(self) -> usize {
        to_usize(self.end)
    }

    /// True if the range is empty
    #[inline]
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// True if the given value is contained, inclusive of end points
    #[inline]
    pub fn includes(self, value: usize) -> bool {
        to_usize(self.start) <= value && value <= to_usize(self.end)
    }

    /// Convert to a standard range
    #[inline]
    pub fn to_std(self) -> std::ops::Range<usize> {
        to_usize(self.start)..to_usize(self.end)
    }
}

impl From<std::ops::Range<usize>> for Range {
    #[inline]
    fn from(range: std::ops::Range<usize>) -> Range {
        Range {
            start: to_u32(range.start),
            end: to_u32(range.end),
        }
    }
}

impl IntoIterator for Range {
    type Item = usize;
    type IntoIter = std::ops::Range<usize>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.to_std()
    }
}
