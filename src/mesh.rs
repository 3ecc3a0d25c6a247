// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Quad meshes for rendering
//!
//! Each visible glyph is drawn as one quad: four vertices ordered top-left,
//! bottom-left, bottom-right, top-right, and two triangles. Vertex positions
//! and texture coordinates are emitted as separate buffers with matching
//! order, four entries per glyph.
//!
//! # Example
//!
//! ```
//! use msdf_text::{compute_layout, fonts::FontAtlas};
//!
//! let font = FontAtlas::from_json_str(r#"{
//!     "common": {"lineHeight": 20, "base": 16, "scaleW": 64, "scaleH": 64},
//!     "chars": [{"id": 104, "width": 8, "height": 12, "xoffset": 1,
//!                "yoffset": 4, "xadvance": 10, "x": 0, "y": 0}]
//! }"#).unwrap();
//!
//! let mesh = compute_layout("hh", &font, true);
//! assert_eq!(mesh.visible_glyph_count, 2);
//! assert_eq!(mesh.quad_positions.len(), 8);
//! for instance in mesh.instances() {
//!     // write instance.min, instance.max, instance.uv_offset and
//!     // instance.uv_scale to a per-instance GPU buffer here ...
//! #   assert!(instance.max.0 > instance.min.0);
//! }
//! ```

use crate::conv::to_u32;
use crate::display::{PlacedGlyph, TextDisplay};
use crate::fonts::FontAtlas;
use crate::{Environment, Vec2, Vec3, Winding};

/// Quad vertex positions: `TL, BL, BR, TR` per glyph
///
/// The bitmap's top-left is offset from the pen position by the glyph's
/// bearing: `x = pen.x + xoffset`, `y = pen.y - yoffset`. The quad extends
/// right by the bitmap width and down (towards negative `y`) by its height.
pub fn build_positions(glyphs: &[PlacedGlyph]) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(glyphs.len() * 4);

    for pg in glyphs {
        let glyph = &pg.glyph;
        let tl = pg.position + Vec2(glyph.xoffset, -glyph.yoffset);
        let (w, h) = (glyph.width(), glyph.height());

        positions.push(tl.extend(0.0));
        positions.push((tl + Vec2(0.0, -h)).extend(0.0));
        positions.push((tl + Vec2(w, -h)).extend(0.0));
        positions.push((tl + Vec2(w, 0.0)).extend(0.0));
    }

    positions
}

/// Quad texture coordinates: `TL, BL, BR, TR` per glyph
///
/// Coordinates are normalized by the atlas size. Without `flip_y`, `v`
/// increases downwards through the atlas image (the image's first row is
/// `v = 0`); with `flip_y` it increases upwards.
pub fn build_uvs(
    glyphs: &[PlacedGlyph],
    atlas_width: f32,
    atlas_height: f32,
    flip_y: bool,
) -> Vec<Vec2> {
    let mut uvs = Vec::with_capacity(glyphs.len() * 4);

    for pg in glyphs {
        let rect = &pg.glyph.rect;
        let right = rect.x + rect.width;
        let bottom = rect.y + rect.height;

        let u0 = rect.x / atlas_width;
        let u1 = right / atlas_width;
        let (v0, v1) = if flip_y {
            (
                (atlas_height - bottom) / atlas_height,
                (atlas_height - rect.y) / atlas_height,
            )
        } else {
            (bottom / atlas_height, rect.y / atlas_height)
        };

        uvs.push(Vec2(u0, v1));
        uvs.push(Vec2(u0, v0));
        uvs.push(Vec2(u1, v0));
        uvs.push(Vec2(u1, v1));
    }

    uvs
}

/// Atlas page index per vertex (four per glyph)
pub fn build_pages(glyphs: &[PlacedGlyph]) -> Vec<u32> {
    glyphs
        .iter()
        .flat_map(|pg| [pg.glyph.rect.page; 4])
        .collect()
}

/// Triangle indices for `count` quads
///
/// Six indices per quad, following the `winding` table; quad `i` uses
/// vertices `start + 4 * i ..= start + 4 * i + 3`.
pub fn build_indices(count: usize, winding: Winding, start: u32) -> Vec<u32> {
    let table = winding.table();
    let mut indices = Vec::with_capacity(count * 6);

    for i in 0..count {
        let base = start + 4 * to_u32(i);
        indices.extend(table.iter().map(|j| base + j));
    }

    indices
}

/// Per-glyph data for instanced drawing
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct QuadInstance {
    /// Bottom-left corner of the quad
    pub min: Vec2,
    /// Top-right corner of the quad
    pub max: Vec2,
    /// Texture coordinate of the bottom-left corner
    pub uv_offset: Vec2,
    /// Texture coordinate of the top-right corner, minus `uv_offset`
    pub uv_scale: Vec2,
    /// Atlas page
    pub page: u32,
}

/// Renderable geometry for a text
///
/// This is everything a renderer needs; it does not reference the font or
/// layout types.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextMesh {
    /// Vertex positions, four per glyph (`TL, BL, BR, TR`)
    pub quad_positions: Vec<Vec3>,
    /// Texture coordinates, four per glyph (same order)
    pub quad_uvs: Vec<Vec2>,
    /// Atlas page per vertex
    pub pages: Vec<u32>,
    /// Triangle indices, six per glyph
    pub indices: Vec<u32>,
    /// Number of glyphs (quads)
    pub visible_glyph_count: usize,
    /// Width of the laid-out text (zero without visible glyphs)
    pub bounding_width: f32,
    /// Height of the laid-out text (zero without visible glyphs)
    pub bounding_height: f32,
}

impl TextMesh {
    /// Build from a laid-out text
    pub fn new(display: &TextDisplay, font: &FontAtlas, env: &Environment) -> Self {
        let metrics = font.metrics();
        let glyphs = display.glyphs();
        let size = display.bounding_size();

        TextMesh {
            quad_positions: build_positions(glyphs),
            quad_uvs: build_uvs(glyphs, metrics.atlas_width, metrics.atlas_height, env.flip_y),
            pages: build_pages(glyphs),
            indices: build_indices(glyphs.len(), env.winding, 0),
            visible_glyph_count: glyphs.len(),
            bounding_width: size.0,
            bounding_height: size.1,
        }
    }

    /// True if there is nothing to draw
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visible_glyph_count == 0
    }

    /// Iterate over per-glyph instance data
    pub fn instances(&self) -> impl Iterator<Item = QuadInstance> + '_ {
        self.quad_positions
            .chunks_exact(4)
            .zip(self.quad_uvs.chunks_exact(4))
            .zip(self.pages.chunks_exact(4))
            .map(|((pos, uv), page)| QuadInstance {
                min: pos[1].truncate(),
                max: pos[3].truncate(),
                uv_offset: uv[1],
                uv_scale: uv[3] - uv[1],
                page: page[0],
            })
    }
}

/// Lay out `text` and build its mesh
///
/// Uses a default [`Environment`] (no wrapping except at explicit line
/// breaks, left alignment, font line height) with the given `flip_y`.
pub fn compute_layout(text: &str, font: &FontAtlas, flip_y: bool) -> TextMesh {
    compute_layout_with(text, font, &Environment::default().with_flip_y(flip_y))
}

/// Lay out `text` in `env` and build its mesh
pub fn compute_layout_with(text: &str, font: &FontAtlas, env: &Environment) -> TextMesh {
    let display = TextDisplay::new(text, font, env);
    TextMesh::new(&display, font, env)
}
