// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Bitmap fonts
//!
//! A bitmap font consists of a pre-rasterized glyph atlas (one or more
//! texture pages) plus a descriptor listing, for each glyph, where its bitmap
//! lives in the atlas and how it is positioned relative to the pen.
//!
//! ### Glyph metrics
//!
//! All metrics are in atlas pixels:
//!
//! -   *Advance* (`xadvance`): how far the pen moves after the glyph,
//!     independent of the bitmap size
//! -   *Bearing* (`xoffset`, `yoffset`): offset from the pen position to the
//!     top-left of the bitmap; `yoffset` is measured down from the line top
//! -   *Kerning*: a per-pair adjustment added to the pen between two glyphs
//!
//! Common vertical metrics are the *line height* (baseline-to-baseline
//! distance) and the *baseline* (line top to baseline). The space below the
//! baseline, the *descender*, is `line_height - baseline`.
//!
//! ### Missing glyphs
//!
//! A code point absent from the glyph table is never an error: such
//! characters are skipped by layout (they neither advance the pen nor break
//! lines). Only space and tab have substitutes, see
//! [`FontAtlas::fallback_space_glyph`].

mod atlas;
pub mod descriptor;
mod glyph;

pub use atlas::{DefaultGlyph, DistanceField, FontAtlas, FontMetrics, ParseError};
pub use descriptor::FontDescriptor;
pub use glyph::{Channels, Glyph, KerningPair, SourceRect};
