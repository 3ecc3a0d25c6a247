// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text preparation: line breaking

use crate::conv::{to_u32, width_to_chars};
use crate::fonts::{FontAtlas, Glyph};
use crate::util::{is_wrap_space, next_line_break, LineIterator};
use crate::{Environment, Range, WrapMode, WrapOptions};
use smallvec::SmallVec;

/// A measured line
///
/// `range` is a half-open range of character indices into the source text.
/// The line-break character ending a line (if any) and white-space consumed
/// at a wrap point are not part of any line.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LineSpan {
    /// Range in text (character indices)
    pub range: Range,
    /// Measured width in pixels
    pub width: f32,
}

impl LineSpan {
    /// Start index
    #[inline]
    pub fn start(&self) -> usize {
        self.range.start()
    }

    /// End index (exclusive)
    #[inline]
    pub fn end(&self) -> usize {
        self.range.end()
    }

    /// True if the line contains no characters
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Lines as returned by [`break_lines`]
pub type Lines = SmallVec<[LineSpan; 1]>;

/// Break `text` into measured lines
///
/// This never fails. Except where [`WrapMode::NoWrap`] is used with a zero
/// width bound (which yields no lines), at least one line is returned; empty
/// input yields a single empty line.
///
/// Wrapping follows `env.wrap`. Tabs are measured with the width given by
/// `env.place.tab_size`, as they are placed.
pub fn break_lines(text: &str, font: &FontAtlas, env: &Environment) -> Lines {
    let text: Vec<char> = text.chars().collect();
    wrap_chars(&text, font, &env.wrap, env.place.tab_size)
}

pub(crate) fn wrap_chars(
    text: &[char],
    font: &FontAtlas,
    options: &WrapOptions,
    tab_size: f32,
) -> Lines {
    if options.mode == WrapMode::NoWrap && options.max_width == Some(0.0) {
        return Lines::new();
    }

    let (start, end) = options.bounds(text.len());
    let measurer = Measurer {
        font,
        text,
        tab: font.tab_glyph(tab_size),
        monospace: options.monospace,
    };

    let mut lines = match options.mode {
        WrapMode::Pre => measurer.pre(start, end),
        WrapMode::NoWrap => measurer.greedy(start, end, f32::INFINITY),
        WrapMode::None | WrapMode::Greedy => measurer.greedy(start, end, options.width_bound()),
    };

    if lines.is_empty() {
        lines.push(LineSpan {
            range: (start..start).into(),
            width: 0.0,
        });
    }
    lines
}

struct Measurer<'a> {
    font: &'a FontAtlas,
    text: &'a [char],
    tab: Glyph,
    monospace: bool,
}

impl<'a> Measurer<'a> {
    /// Lines ending only at explicit breaks
    fn pre(&self, start: usize, end: usize) -> Lines {
        LineIterator::new(self.text, start, end)
            .map(|range| self.span(range.start, range.end))
            .collect()
    }

    /// Greedy word wrap
    fn greedy(&self, mut start: usize, end: usize, width: f32) -> Lines {
        let text = self.text;
        let mut lines = Lines::new();

        while start < end {
            let line_break = next_line_break(text, start, end);

            while start < line_break && is_wrap_space(text[start]) {
                start += 1;
            }

            let fit = self.fit(start, line_break, width);
            let mut line_end = start + fit;
            let mut next_start = line_end + 1;

            if line_end < line_break {
                // Back-track to the last white-space at or before the char
                // which did not fit.
                let mut index = line_end;
                while index > start && !is_wrap_space(text[index]) {
                    index -= 1;
                }

                if index == start {
                    // A single word exceeds the bound: break within it, but
                    // always make progress.
                    line_end = start + fit.max(1);
                    next_start = line_end;
                } else {
                    next_start = index;
                    line_end = index;
                    while line_end > start && is_wrap_space(text[line_end - 1]) {
                        line_end -= 1;
                    }
                }
            }

            lines.push(self.span(start, line_end));
            start = next_start;
        }

        lines
    }

    /// Construct a measured span over `start..end`
    fn span(&self, start: usize, end: usize) -> LineSpan {
        let (_, width) = self.measure(start, end, f32::INFINITY);
        LineSpan {
            range: Range {
                start: to_u32(start),
                end: to_u32(end),
            },
            width,
        }
    }

    /// Number of chars from `start` which fit within `width`
    fn fit(&self, start: usize, end: usize, width: f32) -> usize {
        if self.monospace {
            width_to_chars(width).min(end - start)
        } else {
            self.measure(start, end, width).0
        }
    }

    /// Measure `text[start..end]` up to the bound `width`
    ///
    /// Returns `(count, width)`: the number of chars accepted and their
    /// measured width. Chars resolve to glyphs as in placement (see
    /// [`FontAtlas::layout_glyph`]). A glyph is rejected when either the pen
    /// or the right edge of its bitmap would reach `width`; all following
    /// chars are rejected too. Chars without a glyph are accepted without
    /// advancing the pen. The final width includes the left bearing of the
    /// last glyph.
    fn measure(&self, start: usize, end: usize, width: f32) -> (usize, f32) {
        let font = self.font;
        let mut pen = 0.0;
        let mut extent = 0.0;
        let mut count = 0;
        let mut last: Option<Glyph> = None;

        for c in &self.text[start..end] {
            if let Some(glyph) = font.layout_glyph(*c, &self.tab) {
                if let Some(last) = last {
                    pen += font.kerning(last.id, glyph.id);
                }

                let next_pen = pen + glyph.xadvance;
                let next_extent = pen + glyph.width();
                if next_extent >= width || next_pen >= width {
                    break;
                }

                pen = next_pen;
                extent = next_extent;
                last = Some(glyph);
            }

            count += 1;
        }

        if let Some(last) = last {
            extent += last.xoffset;
        }

        (count, extent)
    }
}
