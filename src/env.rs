// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Layout environment
//!
//! All configuration of a layout call lives here. Every type is
//! default-constructible and may be (de)serialized; missing fields take their
//! default value, thus a host may load partial configuration.

use serde::{Deserialize, Serialize};

/// Environment in which text is laid out
///
/// An `Environment` can be default-constructed: greedy wrapping without a
/// width bound (thus only explicit line-breaks such as `\n` start new lines),
/// the font's line height, left alignment and un-flipped texture coordinates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Line breaking
    pub wrap: WrapOptions,
    /// Glyph placement
    pub place: PlaceOptions,
    /// Flip texture coordinates vertically
    ///
    /// Set this when the atlas image is stored bottom-up (origin at the
    /// bottom-left), as with most GPU texture uploads.
    pub flip_y: bool,
    /// Winding order of the two triangles of each quad
    pub winding: Winding,
}

impl Environment {
    /// Alternative default constructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width bound, enabling greedy word wrap
    ///
    /// A bound of `None` means unbounded.
    pub fn with_max_width(mut self, width: Option<f32>) -> Self {
        self.wrap.max_width = width;
        self
    }

    /// Set horizontal alignment
    pub fn with_align(mut self, align: Align) -> Self {
        self.place.align = align;
        self
    }

    /// Set vertical flipping of texture coordinates
    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }
}

/// Line wrapping policy
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WrapMode {
    /// No explicit policy
    ///
    /// This behaves as [`WrapMode::Greedy`].
    #[default]
    None,
    /// Do not wrap
    ///
    /// Lines only end at explicit line-breaks. Leading white-space of each
    /// line is still skipped and a zero width bound yields no lines at all.
    NoWrap,
    /// Pre-formatted text
    ///
    /// Lines end only at explicit line-breaks; white-space is preserved and
    /// the width bound is ignored.
    Pre,
    /// Greedy word wrap
    ///
    /// Pack as many whole words on each line as fit within the width bound,
    /// breaking mid-word only when a single word is wider than the bound.
    Greedy,
}

/// Line breaking configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapOptions {
    /// Wrap policy
    pub mode: WrapMode,
    /// Width bound in pixels
    ///
    /// `None` is substituted by positive infinity. With
    /// [`WrapOptions::monospace`] this bound counts characters instead.
    pub max_width: Option<f32>,
    /// Measure in characters instead of glyph metrics
    pub monospace: bool,
    /// First character index to lay out (default: 0)
    pub start: Option<usize>,
    /// End of the character range to lay out (default: text length)
    ///
    /// This is clamped to the text length.
    pub end: Option<usize>,
}

impl Default for WrapOptions {
    fn default() -> Self {
        WrapOptions {
            mode: WrapMode::None,
            max_width: None,
            monospace: false,
            start: None,
            end: None,
        }
    }
}

impl WrapOptions {
    /// Resolved width bound
    #[inline]
    pub fn width_bound(&self) -> f32 {
        self.max_width.unwrap_or(f32::INFINITY)
    }

    /// Resolve `(start, end)` for a text of `len` characters
    ///
    /// Guarantees `start <= end <= len`.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let end = self.end.unwrap_or(len).min(len);
        let start = self.start.unwrap_or(0).min(end);
        (start, end)
    }
}

/// Glyph placement configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceOptions {
    /// Distance between successive baselines, in pixels
    ///
    /// `None` or zero uses the font's own line height.
    pub line_height: Option<f32>,
    /// Extra horizontal space after each placed glyph, in pixels
    pub letter_spacing: f32,
    /// Horizontal alignment of lines against the widest line
    pub align: Align,
    /// Width of a tab, in multiples of the space advance
    pub tab_size: f32,
}

impl Default for PlaceOptions {
    fn default() -> Self {
        PlaceOptions {
            line_height: None,
            letter_spacing: 0.0,
            align: Align::default(),
            tab_size: 4.0,
        }
    }
}

impl PlaceOptions {
    /// Resolve the line height against the font's default
    #[inline]
    pub fn resolve_line_height(&self, font_line_height: f32) -> f32 {
        match self.line_height {
            Some(lh) if lh != 0.0 => lh,
            _ => font_line_height,
        }
    }
}

/// Horizontal alignment of lines
///
/// Lines are aligned within the width of the widest line of the layout (not
/// within the wrap bound).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Align {
    /// Align to left
    #[default]
    Left,
    /// Align to centre
    Centre,
    /// Align to right
    Right,
}

impl Align {
    /// Horizontal offset of a line of width `line_width` within `max_width`
    #[inline]
    pub fn offset(self, max_width: f32, line_width: f32) -> f32 {
        match self {
            Align::Left => 0.0,
            Align::Centre => (max_width - line_width) * 0.5,
            Align::Right => max_width - line_width,
        }
    }
}

/// Triangle winding order
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winding {
    /// Clockwise: `0, 3, 1, 1, 3, 2`
    #[default]
    Clockwise,
    /// Counter-clockwise: `0, 1, 3, 3, 1, 2`
    CounterClockwise,
}

impl Winding {
    /// Per-quad index table over vertices ordered `TL, BL, BR, TR`
    #[inline]
    pub fn table(self) -> [u32; 6] {
        match self {
            Winding::Clockwise => [0, 3, 1, 1, 3, 2],
            Winding::CounterClockwise => [0, 1, 3, 3, 1, 2],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounds_are_clamped() {
        let mut opts = WrapOptions::default();
        assert_eq!(opts.bounds(5), (0, 5));
        opts.end = Some(9);
        assert_eq!(opts.bounds(5), (0, 5));
        opts.start = Some(7);
        assert_eq!(opts.bounds(5), (5, 5));
        opts.start = Some(1);
        opts.end = Some(3);
        assert_eq!(opts.bounds(5), (1, 3));
    }

    #[test]
    fn line_height_substitution() {
        let mut opts = PlaceOptions::default();
        assert_eq!(opts.resolve_line_height(42.0), 42.0);
        opts.line_height = Some(0.0);
        assert_eq!(opts.resolve_line_height(42.0), 42.0);
        opts.line_height = Some(30.0);
        assert_eq!(opts.resolve_line_height(42.0), 30.0);
    }

    #[test]
    fn align_offsets() {
        assert_eq!(Align::Left.offset(100.0, 60.0), 0.0);
        assert_eq!(Align::Centre.offset(100.0, 60.0), 20.0);
        assert_eq!(Align::Right.offset(100.0, 60.0), 40.0);
    }
}
