// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text preparation: glyph placement

use super::LineSpan;
use crate::conv::{count_to_f32, to_u32};
use crate::fonts::{FontAtlas, Glyph};
use crate::{PlaceOptions, Vec2};

/// A positioned glyph
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacedGlyph {
    /// Pen position (x, y), including alignment offset
    ///
    /// The glyph's bitmap is offset from this by its bearing.
    pub position: Vec2,
    /// The glyph
    ///
    /// This is a copy of the font's glyph, except for tabs, which use a
    /// synthesized glyph.
    pub glyph: Glyph,
    /// Index of char in source text
    pub index: u32,
    /// Line number
    pub line: u32,
}

/// Place visible glyphs
///
/// Lays out `text` over the given `lines` (usually the result of
/// [`crate::break_lines`] on the same text and font). The result is ordered
/// by line, then text index, and contains only glyphs with a bitmap of
/// non-zero area. Chars without a glyph are skipped.
pub fn place(
    text: &str,
    lines: &[LineSpan],
    font: &FontAtlas,
    options: &PlaceOptions,
) -> Vec<PlacedGlyph> {
    let text: Vec<char> = text.chars().collect();
    let mut glyphs = place_chars(&text, lines, font, options).glyphs;
    glyphs.retain(|g| g.glyph.is_visible());
    glyphs
}

/// Output of [`place_chars`]
#[derive(Clone, Debug, Default)]
pub(crate) struct Placement {
    /// All placed glyphs, including those without bitmap
    pub glyphs: Vec<PlacedGlyph>,
    /// Resolved line height
    pub line_height: f32,
    /// Height of the block of lines
    pub height: f32,
    /// Width of the widest line
    pub width: f32,
}

/// Place all glyphs, including those without bitmap
pub(crate) fn place_chars(
    text: &[char],
    lines: &[LineSpan],
    font: &FontAtlas,
    options: &PlaceOptions,
) -> Placement {
    let metrics = font.metrics();
    let tab = font.tab_glyph(options.tab_size);

    let max_line_width = lines.iter().fold(0.0f32, |w, line| w.max(line.width));
    let line_height = options.resolve_line_height(metrics.line_height);
    let descender = metrics.descender(line_height);
    let height = if lines.is_empty() {
        0.0
    } else {
        line_height * count_to_f32(lines.len()) - descender
    };

    let mut glyphs = Vec::with_capacity(text.len());
    let mut y = -height;

    for (line_index, line) in lines.iter().enumerate() {
        let line_index = to_u32(line_index);
        let offset = options.align.offset(max_line_width, line.width);
        let mut x = 0.0;
        let mut last: Option<Glyph> = None;

        for index in line.range {
            let Some(glyph) = font.layout_glyph(text[index], &tab) else {
                continue;
            };

            if let Some(last) = last {
                x += font.kerning(last.id, glyph.id);
            }

            glyphs.push(PlacedGlyph {
                position: Vec2(x + offset, y),
                glyph,
                index: to_u32(index),
                line: line_index,
            });

            x += glyph.xadvance + options.letter_spacing;
            last = Some(glyph);
        }

        y += line_height;
    }

    Placement {
        glyphs,
        line_height,
        height,
        width: max_line_width,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::display::wrap_lines::wrap_chars;
    use crate::{Align, WrapMode, WrapOptions};
    use serde_json::json;

    // 'a' (adv 10, w 8, xoffset 1), 'b' (adv 12, w 10), ' ' (adv 5);
    // kerning (a, b) = -2; line height 20, base 16.
    fn font() -> FontAtlas {
        let v = json!({
            "common": {"lineHeight": 20, "base": 16, "scaleW": 64, "scaleH": 64},
            "chars": [
                {"id": 97, "width": 8, "height": 8, "xoffset": 1, "yoffset": 2,
                 "xadvance": 10, "x": 0, "y": 0},
                {"id": 98, "width": 10, "height": 12, "xoffset": 0, "yoffset": 0,
                 "xadvance": 12, "x": 10, "y": 0},
                {"id": 32, "width": 0, "height": 0, "xoffset": 0, "yoffset": 0,
                 "xadvance": 5, "x": 0, "y": 0},
            ],
            "kernings": [{"first": 97, "second": 98, "amount": -2}],
        });
        FontAtlas::load(serde_json::from_value(v).unwrap()).unwrap()
    }

    fn layout(s: &str, wrap: &WrapOptions, place: &PlaceOptions) -> Placement {
        let font = font();
        let text: Vec<char> = s.chars().collect();
        let lines = wrap_chars(&text, &font, wrap, place.tab_size);
        place_chars(&text, &lines, &font, place)
    }

    #[test]
    fn pen_and_kerning() {
        let p = layout("ab a", &Default::default(), &Default::default());
        let xs: Vec<f32> = p.glyphs.iter().map(|g| g.position.0).collect();
        // a at 0; b at 10 - 2; space at 20; a at 25
        assert_eq!(xs, vec![0.0, 8.0, 20.0, 25.0]);
        // one line: height = 20 - (20 - 16)
        assert_eq!(p.height, 16.0);
        assert!(p.glyphs.iter().all(|g| g.position.1 == -16.0));
    }

    #[test]
    fn letter_spacing() {
        let place = PlaceOptions {
            letter_spacing: 3.0,
            ..Default::default()
        };
        let p = layout("aa", &Default::default(), &place);
        assert_eq!(p.glyphs[1].position.0, 13.0);
    }

    #[test]
    fn lines_advance() {
        let place = PlaceOptions {
            line_height: Some(30.0),
            ..Default::default()
        };
        let p = layout("a\nb\na", &Default::default(), &place);
        // height = 30 * 3 - (30 - 16)
        assert_eq!(p.height, 76.0);
        let ys: Vec<f32> = p.glyphs.iter().map(|g| g.position.1).collect();
        assert_eq!(ys, vec![-76.0, -46.0, -16.0]);
        let lines: Vec<u32> = p.glyphs.iter().map(|g| g.line).collect();
        assert_eq!(lines, vec![0, 1, 2]);
        // kerning does not apply across lines
        assert_eq!(p.glyphs[1].position.0, 0.0);
    }

    #[test]
    fn alignment() {
        let mut place = PlaceOptions::default();
        // widths: "ab" = 18 + 0, "a" = 8 + 1
        place.align = Align::Right;
        let p = layout("ab\na", &Default::default(), &place);
        assert_eq!(p.width, 18.0);
        assert_eq!(p.glyphs[0].position.0, 0.0);
        assert_eq!(p.glyphs[2].position.0, 9.0);

        place.align = Align::Centre;
        let p = layout("ab\na", &Default::default(), &place);
        assert_eq!(p.glyphs[2].position.0, 4.5);
    }

    #[test]
    fn tab_and_missing() {
        let place = PlaceOptions {
            tab_size: 4.0,
            ..Default::default()
        };
        let wrap = WrapOptions {
            mode: WrapMode::Pre,
            ..Default::default()
        };
        let p = layout("\tb\u{4E00}a", &wrap, &place);
        let indices: Vec<u32> = p.glyphs.iter().map(|g| g.index).collect();
        assert_eq!(indices, vec![0, 1, 3]);
        assert_eq!(p.glyphs[0].glyph.xadvance, 20.0);
        assert!(!p.glyphs[0].glyph.is_visible());
        assert_eq!(p.glyphs[1].position.0, 20.0);
        assert_eq!(p.glyphs[2].position.0, 32.0);
    }

    #[test]
    fn visible_only() {
        let font = font();
        let lines = crate::break_lines("a b", &font, &Default::default());
        let glyphs = place("a b", &lines, &font, &Default::default());
        let indices: Vec<u32> = glyphs.iter().map(|g| g.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }
}
