// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! MSDF bitmap-font text layout
//!
//! This library converts a string plus a pre-rasterized (multi-channel
//! signed distance field) font atlas into renderable quad geometry.
//!
//! Layout proceeds in stages:
//!
//! 1.  A [`fonts::FontAtlas`] is loaded from a BMFont-style JSON descriptor
//! 2.  [`break_lines`] breaks text into measured lines
//! 3.  [`place`] assigns a pen position to each glyph
//! 4.  [`mesh`] converts placed glyphs into vertex, texture-coordinate and
//!     index buffers
//!
//! [`TextDisplay`] runs steps 2 and 3 and retains derived metrics, while
//! [`compute_layout`] runs the whole pipeline in one call.
//!
//! All stages are pure functions of their inputs; the font atlas is read-only
//! after loading and may be shared between threads.

#![cfg_attr(doc_cfg, feature(doc_cfg))]

mod env;
pub use env::*;

mod data;
pub use data::*;

pub mod conv;
pub mod fonts;
pub mod util;

mod display;
pub use display::*;

pub mod mesh;
pub use mesh::{compute_layout, compute_layout_with, TextMesh};
