// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type conversion utilities
//!
//! Text indices are represented as `u32` instead of `usize` by this library in
//! order to save space (layout is performed per label or paragraph; text is
//! never expected to approach `u32::MAX` chars, so `u32` is always an
//! appropriate index type).

use easy_cast::Cast;

/// Convert `usize` → `u32`
///
/// This is a "safer" wrapper around `as` ensuring (on debug builds) that the
/// input value may be represented correctly by `u32`.
#[inline]
pub fn to_u32(x: usize) -> u32 {
    x.cast()
}

/// Convert `u32` → `usize`
///
/// This is a "safer" wrapper around `as` ensuring that the operation is
/// zero-extension.
#[inline]
pub fn to_usize(x: u32) -> usize {
    x.cast()
}

/// Convert a width in pixels to a character budget
///
/// Used by monospace measurement, where the width bound counts characters.
/// Negative and NaN widths yield zero; infinite widths are unbounded.
#[inline]
pub fn width_to_chars(width: f32) -> usize {
    if width.is_nan() || width <= 0.0 {
        0
    } else if width.is_finite() {
        // Truncation towards zero is intended here
        width as usize
    } else {
        usize::MAX
    }
}

/// Convert a count to `f32`
#[inline]
pub fn count_to_f32(n: usize) -> f32 {
    // Counts here are line counts: far below 2^24, so exactly representable
    n as f32
}
