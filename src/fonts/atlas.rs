// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font atlas model

use super::descriptor::FontDescriptor;
use super::{Glyph, KerningPair};
use crate::conv::{to_u32, to_usize};
use crate::util::{SPACE, TAB};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::{Entry, HashMap};
use std::io::Read;
use std::sync::OnceLock;
use thiserror::Error;

/// Font descriptor loading errors
///
/// These are only raised when loading a font; layout never fails.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Malformed JSON or a missing required section or field
    #[error("malformed font descriptor")]
    Json(#[from] serde_json::Error),
    /// Reading the descriptor failed
    #[error("failed to read font descriptor")]
    Io(#[from] std::io::Error),
    /// The `chars` section is empty
    #[error("font descriptor has no glyphs")]
    NoGlyphs,
    /// Two glyph records share a code point
    #[error("duplicate glyph for code point {0}")]
    DuplicateGlyph(u32),
    /// Atlas width or height is not positive
    #[error("invalid atlas size {width}×{height}")]
    InvalidAtlasSize { width: f32, height: f32 },
}

/// Candidates for the x-height, in probe order
const X_HEIGHT_CHARS: [char; 13] = [
    'x', 'e', 'a', 'o', 'n', 's', 'r', 'c', 'u', 'm', 'v', 'w', 'z',
];
/// Candidates for the cap-height, in probe order
const CAP_HEIGHT_CHARS: [char; 14] = [
    'H', 'I', 'N', 'E', 'F', 'K', 'L', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];
/// Em-width glyphs used to approximate a missing space
const M_WIDTH_CHARS: [char; 2] = ['m', 'w'];

/// Common font metrics
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance between baselines of successive lines
    pub line_height: f32,
    /// Distance from the top of a line to the baseline
    pub baseline: f32,
    /// Atlas width in pixels
    pub atlas_width: f32,
    /// Atlas height in pixels
    pub atlas_height: f32,
    /// Number of atlas pages
    pub pages: u32,
}

impl FontMetrics {
    /// Space below the baseline, given a line height
    #[inline]
    pub fn descender(&self, line_height: f32) -> f32 {
        line_height - self.baseline
    }
}

/// Distance field parameters
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistanceField {
    /// Field type, e.g. `"msdf"`
    pub field_type: String,
    /// Distance range in atlas pixels
    pub range: f32,
}

/// Selection of the last-resort fallback glyph
///
/// When a font has no space glyph and neither `m` nor `w`, some glyph must
/// stand in for the space (and, scaled, for the tab).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefaultGlyph {
    /// The first glyph of the descriptor's `chars` section
    #[default]
    FirstInserted,
    /// The first present glyph from this list, else as `FirstInserted`
    Priority(Vec<char>),
}

/// A loaded bitmap font: glyph table, kerning table and metrics
///
/// The model is immutable after loading. It may be shared (e.g. via `Arc`)
/// between threads performing layout concurrently.
#[derive(Debug)]
pub struct FontAtlas {
    // In descriptor order
    glyphs: Vec<Glyph>,
    // Code point → index in glyphs
    glyph_index: HashMap<u32, u32>,
    kerning: HashMap<(u32, u32), f32>,
    metrics: FontMetrics,
    pages: Vec<String>,
    face: Option<String>,
    size: Option<f32>,
    distance_field: Option<DistanceField>,
    // Index in glyphs
    space: u32,
    x_height: OnceLock<f32>,
    cap_height: OnceLock<f32>,
}

impl FontAtlas {
    /// Load from a parsed descriptor
    ///
    /// Uses [`DefaultGlyph::FirstInserted`] as last-resort space fallback.
    pub fn load(descriptor: FontDescriptor) -> Result<Self, ParseError> {
        Self::load_with(descriptor, &DefaultGlyph::default())
    }

    /// Load from a parsed descriptor with a given default-glyph strategy
    pub fn load_with(
        descriptor: FontDescriptor,
        default_glyph: &DefaultGlyph,
    ) -> Result<Self, ParseError> {
        let common = &descriptor.common;
        let (width, height) = (common.scale_w, common.scale_h);
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ParseError::InvalidAtlasSize { width, height });
        }
        if descriptor.chars.is_empty() {
            return Err(ParseError::NoGlyphs);
        }

        let mut glyphs = Vec::with_capacity(descriptor.chars.len());
        let mut glyph_index = HashMap::with_capacity(descriptor.chars.len());
        for rec in &descriptor.chars {
            match glyph_index.entry(rec.id) {
                Entry::Occupied(_) => return Err(ParseError::DuplicateGlyph(rec.id)),
                Entry::Vacant(entry) => {
                    entry.insert(to_u32(glyphs.len()));
                    glyphs.push(Glyph::from(rec));
                }
            }
        }

        let mut kerning = HashMap::with_capacity(descriptor.kernings.len());
        for rec in &descriptor.kernings {
            let pair = KerningPair::from(rec);
            match kerning.entry((pair.first, pair.second)) {
                Entry::Occupied(_) => {
                    log::warn!(
                        "FontAtlas: ignoring duplicate kerning pair ({}, {})",
                        pair.first,
                        pair.second
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(pair.amount);
                }
            }
        }

        let metrics = FontMetrics {
            line_height: common.line_height,
            baseline: common.baseline,
            atlas_width: width,
            atlas_height: height,
            pages: common.pages,
        };

        let (face, size) = match descriptor.info {
            Some(info) => (Some(info.face), Some(info.size)),
            None => (None, None),
        };
        let distance_field = descriptor.distance_field.map(|df| DistanceField {
            field_type: df.field_type,
            range: df.distance_range,
        });

        let mut atlas = FontAtlas {
            glyphs,
            glyph_index,
            kerning,
            metrics,
            pages: descriptor.pages,
            face,
            size,
            distance_field,
            space: 0,
            x_height: OnceLock::new(),
            cap_height: OnceLock::new(),
        };
        atlas.space = atlas.resolve_space(default_glyph);

        log::debug!(
            "FontAtlas: loaded {} glyphs, {} kerning pairs, atlas {}×{}",
            atlas.glyphs.len(),
            atlas.kerning.len(),
            width,
            height,
        );
        Ok(atlas)
    }

    /// Parse and load from a JSON string
    pub fn from_json_str(s: &str) -> Result<Self, ParseError> {
        Self::load(FontDescriptor::from_json_str(s)?)
    }

    /// Parse and load from a reader yielding JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParseError> {
        Self::load(FontDescriptor::from_reader(reader)?)
    }

    fn index_of(&self, c: char) -> Option<u32> {
        self.glyph_index.get(&u32::from(c)).cloned()
    }

    fn resolve_space(&self, default_glyph: &DefaultGlyph) -> u32 {
        if let Some(index) = self.index_of(SPACE) {
            return index;
        }
        if let Some(index) = M_WIDTH_CHARS.iter().find_map(|c| self.index_of(*c)) {
            return index;
        }

        let index = match default_glyph {
            DefaultGlyph::FirstInserted => 0,
            DefaultGlyph::Priority(list) => {
                list.iter().find_map(|c| self.index_of(*c)).unwrap_or(0)
            }
        };
        log::warn!(
            "FontAtlas: no space, 'm' or 'w' glyph; using code point {} as space",
            self.glyphs[to_usize(index)].id
        );
        index
    }

    /// True if the font has a glyph for `code_point`
    #[inline]
    pub fn has_glyph(&self, code_point: u32) -> bool {
        self.glyph_index.contains_key(&code_point)
    }

    /// Get the glyph for `code_point`, if any
    #[inline]
    pub fn glyph(&self, code_point: u32) -> Option<&Glyph> {
        self.glyph_index
            .get(&code_point)
            .map(|index| &self.glyphs[to_usize(*index)])
    }

    /// Get the glyph for `c`, if any
    #[inline]
    pub fn glyph_for_char(&self, c: char) -> Option<&Glyph> {
        self.glyph(u32::from(c))
    }

    /// Kerning adjustment for the ordered pair `(first, second)`
    ///
    /// Returns zero when the font has no entry for the pair.
    #[inline]
    pub fn kerning(&self, first: u32, second: u32) -> f32 {
        self.kerning.get(&(first, second)).cloned().unwrap_or(0.0)
    }

    /// The glyph standing in for a space
    ///
    /// This is the space glyph if present, else `m` or `w` (approximating a
    /// space by an em-width), else a glyph chosen by the [`DefaultGlyph`]
    /// strategy given at load time.
    #[inline]
    pub fn fallback_space_glyph(&self) -> &Glyph {
        &self.glyphs[to_usize(self.space)]
    }

    /// Synthesize a tab glyph advancing by `tab_size` spaces
    #[inline]
    pub fn tab_glyph(&self, tab_size: f32) -> Glyph {
        Glyph::tab(self.fallback_space_glyph(), tab_size)
    }

    /// Resolve the glyph used to lay out `c`
    ///
    /// Tab resolves to `tab` (see [`Self::tab_glyph`]) and space to
    /// [`Self::fallback_space_glyph`]; other chars are looked up directly.
    /// Line breaking and glyph placement both resolve chars this way.
    pub fn layout_glyph(&self, c: char, tab: &Glyph) -> Option<Glyph> {
        match c {
            TAB => Some(*tab),
            SPACE => Some(*self.fallback_space_glyph()),
            c => self.glyph_for_char(c).copied(),
        }
    }

    /// The first of `m`, `w` present in the font
    pub fn m_glyph(&self) -> Option<&Glyph> {
        M_WIDTH_CHARS.iter().find_map(|c| self.glyph_for_char(*c))
    }

    /// Common metrics
    #[inline]
    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// Number of glyphs
    #[inline]
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// All glyphs, in descriptor order
    #[inline]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Number of kerning pairs
    #[inline]
    pub fn kerning_count(&self) -> usize {
        self.kerning.len()
    }

    /// Atlas page image identifiers
    #[inline]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Face name, if declared
    #[inline]
    pub fn face(&self) -> Option<&str> {
        self.face.as_deref()
    }

    /// Generated size (pixels per em), if declared
    #[inline]
    pub fn size(&self) -> Option<f32> {
        self.size
    }

    /// Distance field parameters, if declared
    #[inline]
    pub fn distance_field(&self) -> Option<&DistanceField> {
        self.distance_field.as_ref()
    }

    /// Height of lower-case letters
    ///
    /// This is the bitmap height of the first present glyph of
    /// `x e a o n s r c u m v w z`, or zero.
    pub fn x_height(&self) -> f32 {
        *self
            .x_height
            .get_or_init(|| self.probe_height(&X_HEIGHT_CHARS))
    }

    /// Height of capital letters
    ///
    /// This is the bitmap height of the first present glyph of
    /// `H I N E F K L T U V W X Y Z`, or zero.
    pub fn cap_height(&self) -> f32 {
        *self
            .cap_height
            .get_or_init(|| self.probe_height(&CAP_HEIGHT_CHARS))
    }

    fn probe_height(&self, chars: &[char]) -> f32 {
        chars
            .iter()
            .find_map(|c| self.glyph_for_char(*c))
            .map(|glyph| glyph.height())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn glyph(c: char, w: f32, h: f32, adv: f32) -> serde_json::Value {
        json!({
            "id": u32::from(c), "char": c.to_string(), "width": w, "height": h,
            "xoffset": 0, "yoffset": 0, "xadvance": adv, "x": 0, "y": 0,
        })
    }

    fn font(chars: Vec<serde_json::Value>, kernings: serde_json::Value) -> FontDescriptor {
        let v = json!({
            "common": {"lineHeight": 40, "base": 32, "scaleW": 64, "scaleH": 64},
            "chars": chars,
            "kernings": kernings,
        });
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn lookup() {
        let desc = font(
            vec![glyph('a', 8.0, 8.0, 10.0), glyph('b', 10.0, 12.0, 12.0)],
            json!([{"first": 97, "second": 98, "amount": -2}]),
        );
        let atlas = FontAtlas::load(desc).unwrap();
        assert_eq!(atlas.glyph_count(), 2);
        assert!(atlas.has_glyph(97));
        assert!(!atlas.has_glyph(99));
        assert_eq!(atlas.glyph(98).unwrap().xadvance, 12.0);
        assert!(atlas.glyph(0x4E00).is_none());
        assert_eq!(atlas.kerning(97, 98), -2.0);
        assert_eq!(atlas.kerning(98, 97), 0.0);
        assert_eq!(atlas.metrics().line_height, 40.0);
        assert_eq!(atlas.metrics().descender(40.0), 8.0);
    }

    #[test]
    fn duplicate_kerning_first_wins() {
        let desc = font(
            vec![glyph('a', 8.0, 8.0, 10.0)],
            json!([
                {"first": 97, "second": 97, "amount": -1},
                {"first": 97, "second": 97, "amount": -5},
            ]),
        );
        let atlas = FontAtlas::load(desc).unwrap();
        assert_eq!(atlas.kerning(97, 97), -1.0);
        assert_eq!(atlas.kerning_count(), 1);
    }

    #[test]
    fn load_errors() {
        let desc = font(vec![], json!([]));
        assert!(matches!(FontAtlas::load(desc), Err(ParseError::NoGlyphs)));

        let desc = font(
            vec![glyph('a', 1.0, 1.0, 1.0), glyph('a', 2.0, 2.0, 2.0)],
            json!([]),
        );
        assert!(matches!(
            FontAtlas::load(desc),
            Err(ParseError::DuplicateGlyph(97))
        ));

        let mut desc = font(vec![glyph('a', 1.0, 1.0, 1.0)], json!([]));
        desc.common.scale_h = 0.0;
        assert!(matches!(
            FontAtlas::load(desc),
            Err(ParseError::InvalidAtlasSize { .. })
        ));
    }

    #[test]
    fn space_fallback_order() {
        let with_space = font(
            vec![
                glyph('x', 5.0, 5.0, 6.0),
                glyph('m', 9.0, 5.0, 11.0),
                glyph(' ', 0.0, 0.0, 4.0),
            ],
            json!([]),
        );
        let atlas = FontAtlas::load(with_space).unwrap();
        assert_eq!(atlas.fallback_space_glyph().id, 32);

        let with_w = font(
            vec![glyph('x', 5.0, 5.0, 6.0), glyph('w', 9.0, 5.0, 12.0)],
            json!([]),
        );
        let atlas = FontAtlas::load(with_w).unwrap();
        assert_eq!(atlas.fallback_space_glyph().id, u32::from('w'));
        assert_eq!(atlas.m_glyph().unwrap().id, u32::from('w'));

        let neither = font(
            vec![glyph('x', 5.0, 5.0, 6.0), glyph('y', 5.0, 7.0, 6.0)],
            json!([]),
        );
        let atlas = FontAtlas::load(neither.clone()).unwrap();
        assert_eq!(atlas.fallback_space_glyph().id, u32::from('x'));

        let strategy = DefaultGlyph::Priority(vec!['q', 'y']);
        let atlas = FontAtlas::load_with(neither.clone(), &strategy).unwrap();
        assert_eq!(atlas.fallback_space_glyph().id, u32::from('y'));

        let strategy = DefaultGlyph::Priority(vec!['q']);
        let atlas = FontAtlas::load_with(neither, &strategy).unwrap();
        assert_eq!(atlas.fallback_space_glyph().id, u32::from('x'));
    }

    #[test]
    fn layout_glyphs() {
        let desc = font(
            vec![glyph('x', 5.0, 5.0, 6.0), glyph('m', 9.0, 5.0, 11.0)],
            json!([]),
        );
        let atlas = FontAtlas::load(desc).unwrap();
        let tab = atlas.tab_glyph(2.0);
        assert_eq!(tab.xadvance, 22.0);
        assert!(!tab.is_visible());

        assert_eq!(atlas.layout_glyph('\t', &tab), Some(tab));
        let space = atlas.layout_glyph(' ', &tab).unwrap();
        assert_eq!(space.id, u32::from('m'));
        assert_eq!(atlas.layout_glyph('x', &tab).map(|g| g.xadvance), Some(6.0));
        assert!(atlas.layout_glyph('q', &tab).is_none());
    }

    #[test]
    fn derived_heights() {
        let desc = font(
            vec![
                glyph('z', 5.0, 6.0, 6.0),
                glyph('o', 5.0, 7.0, 6.0),
                glyph('T', 5.0, 11.0, 6.0),
            ],
            json!([]),
        );
        let atlas = FontAtlas::load(desc).unwrap();
        // 'o' precedes 'z' in the probe list
        assert_eq!(atlas.x_height(), 7.0);
        assert_eq!(atlas.cap_height(), 11.0);

        let desc = font(vec![glyph('1', 5.0, 6.0, 6.0)], json!([]));
        let atlas = FontAtlas::load(desc).unwrap();
        assert_eq!(atlas.x_height(), 0.0);
        assert_eq!(atlas.cap_height(), 0.0);
    }

    #[test]
    fn share_between_threads() {
        fn check<T: Send + Sync>() {}
        check::<FontAtlas>();
    }
}
