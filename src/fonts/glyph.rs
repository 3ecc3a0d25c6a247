// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph types

use super::descriptor::{CharRecord, KerningRecord};
use bitflags::bitflags;

bitflags! {
    /// Atlas channels holding a glyph's bitmap
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Channels: u8 {
        const BLUE = 1;
        const GREEN = 2;
        const RED = 4;
        const ALPHA = 8;
    }
}

/// Location of a glyph bitmap within the atlas
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SourceRect {
    /// Left edge, in atlas pixels
    pub x: f32,
    /// Top edge, in atlas pixels
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Atlas page
    pub page: u32,
    pub channels: Channels,
}

impl SourceRect {
    /// Bitmap area
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// A glyph of a bitmap font
///
/// Glyphs are immutable once loaded.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Glyph {
    /// Code point
    pub id: u32,
    /// Glyph index in the source font
    pub index: u32,
    /// Bitmap location
    pub rect: SourceRect,
    /// Horizontal offset from the pen to the bitmap's left edge
    pub xoffset: f32,
    /// Vertical offset from the line top to the bitmap's top edge
    pub yoffset: f32,
    /// Horizontal pen advance
    pub xadvance: f32,
}

impl Glyph {
    /// The glyph's character, if its code point is a valid `char`
    #[inline]
    pub fn char(&self) -> Option<char> {
        char::from_u32(self.id)
    }

    /// Bitmap width
    #[inline]
    pub fn width(&self) -> f32 {
        self.rect.width
    }

    /// Bitmap height
    #[inline]
    pub fn height(&self) -> f32 {
        self.rect.height
    }

    /// True if the glyph has a bitmap of non-zero area
    ///
    /// Only visible glyphs produce geometry; others (e.g. white-space) only
    /// advance the pen.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.rect.area() > 0.0
    }

    /// Synthesize a tab glyph
    ///
    /// The tab has no bitmap and advances by `tab_size` times the advance of
    /// `space`. Page, channels and index are taken from `space`.
    pub fn tab(space: &Glyph, tab_size: f32) -> Glyph {
        Glyph {
            id: u32::from(crate::util::TAB),
            index: space.index,
            rect: SourceRect {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
                page: space.rect.page,
                channels: space.rect.channels,
            },
            xoffset: 0.0,
            yoffset: 0.0,
            xadvance: tab_size * space.xadvance,
        }
    }
}

impl From<&CharRecord> for Glyph {
    fn from(rec: &CharRecord) -> Self {
        Glyph {
            id: rec.id,
            index: rec.index,
            rect: SourceRect {
                x: rec.x,
                y: rec.y,
                width: rec.width,
                height: rec.height,
                page: rec.page,
                channels: Channels::from_bits_truncate(rec.chnl),
            },
            xoffset: rec.xoffset,
            yoffset: rec.yoffset,
            xadvance: rec.xadvance,
        }
    }
}

/// An ordered kerning pair
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct KerningPair {
    /// Code point of the left glyph
    pub first: u32,
    /// Code point of the right glyph
    pub second: u32,
    /// Pen adjustment, in pixels
    pub amount: f32,
}

impl From<&KerningRecord> for KerningPair {
    fn from(rec: &KerningRecord) -> Self {
        KerningPair {
            first: rec.first,
            second: rec.second,
            amount: rec.amount,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tab_glyph() {
        let space = Glyph {
            id: 32,
            index: 3,
            rect: SourceRect {
                page: 1,
                channels: Channels::all(),
                ..Default::default()
            },
            xadvance: 5.0,
            ..Default::default()
        };
        let tab = Glyph::tab(&space, 4.0);
        assert_eq!(tab.id, 9);
        assert_eq!(tab.xadvance, 20.0);
        assert_eq!(tab.rect.page, 1);
        assert_eq!(tab.rect.channels, Channels::all());
        assert!(!tab.is_visible());
    }

    #[test]
    fn from_record() {
        let rec = CharRecord {
            id: 65,
            width: 10.0,
            height: 12.0,
            chnl: 15,
            xadvance: 11.0,
            ..Default::default()
        };
        let glyph = Glyph::from(&rec);
        assert_eq!(glyph.char(), Some('A'));
        assert_eq!(glyph.rect.channels, Channels::all());
        assert!(glyph.is_visible());
    }
}
