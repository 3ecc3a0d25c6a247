// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text laid out for display

use crate::conv::to_usize;
use crate::fonts::FontAtlas;
use crate::{Environment, Vec2};
use smallvec::SmallVec;

mod glyph_pos;
mod wrap_lines;
pub use glyph_pos::{place, PlacedGlyph};
pub use wrap_lines::{break_lines, LineSpan, Lines};

/// Text laid out against a font
///
/// This is the immutable result of one layout pass: line breaking followed by
/// glyph placement. Nothing is retained between passes; to lay out again
/// (e.g. with new text or a new [`Environment`]), construct a new
/// `TextDisplay`.
///
/// ### Coordinates
///
/// Glyph positions are pen positions in pixels. The `x` axis points right
/// and starts from `0` on each line (before alignment). The `y` axis points
/// up: the first line is placed at `y = -height` and each following line is
/// one line height further along `y`.
///
/// ### Text indices
///
/// All text indices are char indices (positions within `text.chars()`).
#[derive(Clone, Debug, Default)]
pub struct TextDisplay {
    // NOTE: most texts are single-line labels, thus SmallVec<[T; 1]>
    lines: SmallVec<[LineSpan; 1]>,
    /// All placed glyphs, including white-space
    placed: Vec<PlacedGlyph>,
    /// Glyphs with non-zero bitmap area
    visible: Vec<PlacedGlyph>,
    #[cfg(feature = "num_glyphs")]
    num_glyphs: u32,
    text_len: usize,
    width: f32,
    height: f32,
    line_height: f32,
    descender: f32,
    baseline: f32,
    x_height: f32,
    cap_height: f32,
}

impl TextDisplay {
    /// Lay out `text` against `font`
    pub fn new(text: &str, font: &FontAtlas, env: &Environment) -> Self {
        let text: Vec<char> = text.chars().collect();
        let lines = wrap_lines::wrap_chars(&text, font, &env.wrap, env.place.tab_size);
        let placement = glyph_pos::place_chars(&text, &lines, font, &env.place);

        let visible: Vec<PlacedGlyph> = placement
            .glyphs
            .iter()
            .filter(|g| g.glyph.is_visible())
            .cloned()
            .collect();

        let metrics = font.metrics();
        let line_height = placement.line_height;

        log::trace!(
            "TextDisplay::new: {} chars, {} lines, {} visible glyphs",
            text.len(),
            lines.len(),
            visible.len(),
        );

        TextDisplay {
            lines,
            #[cfg(feature = "num_glyphs")]
            num_glyphs: crate::conv::to_u32(visible.len()),
            placed: placement.glyphs,
            visible,
            text_len: text.len(),
            width: placement.width,
            height: placement.height,
            line_height,
            descender: metrics.descender(line_height),
            baseline: metrics.baseline,
            x_height: font.x_height(),
            cap_height: font.cap_height(),
        }
    }

    /// Length of the source text, in chars
    #[inline]
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Get the number of lines (after wrapping)
    #[inline]
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Get the number of visible glyphs
    #[cfg(feature = "num_glyphs")]
    #[inline]
    pub fn num_glyphs(&self) -> usize {
        to_usize(self.num_glyphs)
    }

    /// Access the measured lines
    #[inline]
    pub fn lines(&self) -> &[LineSpan] {
        &self.lines
    }

    /// Visible glyphs: those with a bitmap of non-zero area
    ///
    /// Ordered by line, then by text index.
    #[inline]
    pub fn glyphs(&self) -> &[PlacedGlyph] {
        &self.visible
    }

    /// All placed glyphs, including those without bitmap
    ///
    /// Chars without glyph in the font are absent.
    #[inline]
    pub fn all_glyphs(&self) -> &[PlacedGlyph] {
        &self.placed
    }

    /// Width of the widest line
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height of the block of lines: `line_height * num_lines - descender`
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Size of the bounding box
    ///
    /// This is zero when there is no visible glyph.
    pub fn bounding_size(&self) -> Vec2 {
        if self.visible.is_empty() {
            Vec2::ZERO
        } else {
            Vec2(self.width, self.height)
        }
    }

    /// Resolved line height
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Space below the baseline: `line_height - baseline`
    #[inline]
    pub fn descender(&self) -> f32 {
        self.descender
    }

    /// The font's baseline
    #[inline]
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// The font's x-height
    #[inline]
    pub fn x_height(&self) -> f32 {
        self.x_height
    }

    /// The font's cap-height
    #[inline]
    pub fn cap_height(&self) -> f32 {
        self.cap_height
    }

    /// Space above the x-height: `line_height - descender - x_height`
    #[inline]
    pub fn ascender(&self) -> f32 {
        self.line_height - self.descender - self.x_height
    }

    /// Get the range of a line, by line number
    pub fn line_range(&self, line: usize) -> Option<std::ops::Range<usize>> {
        self.lines.get(line).map(|line| line.range.to_std())
    }

    /// Find the line containing text `index`
    ///
    /// Returns the line number and the text-range of the line.
    ///
    /// An index at the end of a line matches that line unless the next line
    /// starts at the same index. Returns `None` if `index` is not on any line
    /// (e.g. it is white-space consumed at a wrap point or a line break).
    pub fn find_line(&self, index: usize) -> Option<(usize, std::ops::Range<usize>)> {
        let mut first = None;
        for (n, line) in self.lines.iter().enumerate() {
            if line.range.end() == index {
                // When line wrapping, this may also match the start of the
                // next line, which is preferred.
                first = Some((n, line.range.to_std()));
            } else if line.range.includes(index) {
                return Some((n, line.range.to_std()));
            }
        }
        first
    }

    /// Find the placed glyph for text `index`, if any
    pub fn glyph_at(&self, index: usize) -> Option<&PlacedGlyph> {
        self.placed.iter().find(|g| to_usize(g.index) == index)
    }
}
