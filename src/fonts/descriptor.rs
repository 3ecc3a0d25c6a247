// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font descriptor schema
//!
//! This is the JSON flavour of the BMFont format as written by MSDF atlas
//! generators. Sections `common` and `chars` are required; `pages`, `info`,
//! `distanceField` and `kernings` are optional. Unknown sections and fields
//! are ignored.

use super::ParseError;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A parsed (but not yet validated) font descriptor
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Atlas page image identifiers, by page index
    #[serde(default)]
    pub pages: Vec<String>,
    /// Face metadata
    #[serde(default)]
    pub info: Option<InfoSection>,
    /// Common vertical metrics and atlas size
    pub common: CommonSection,
    /// Distance field parameters
    #[serde(default, rename = "distanceField")]
    pub distance_field: Option<DistanceFieldSection>,
    /// Glyph records
    pub chars: Vec<CharRecord>,
    /// Kerning records
    #[serde(default)]
    pub kernings: Vec<KerningRecord>,
}

impl FontDescriptor {
    /// Parse from a JSON string
    pub fn from_json_str(s: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse from a JSON byte slice
    pub fn from_json_slice(v: &[u8]) -> Result<Self, ParseError> {
        Ok(serde_json::from_slice(v)?)
    }

    /// Parse from a reader yielding JSON
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ParseError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::from_json_slice(&buf)
    }
}

/// The `info` section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InfoSection {
    /// Face name
    pub face: String,
    /// Size the atlas was generated at (pixels per em)
    pub size: f32,
    pub bold: i32,
    pub italic: i32,
    /// Declared character set
    pub charset: Vec<String>,
    pub unicode: i32,
    pub stretch_h: i32,
    pub smooth: i32,
    pub aa: i32,
    pub padding: Vec<f32>,
    pub spacing: Vec<f32>,
}

/// The `common` section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonSection {
    /// Distance between baselines of successive lines
    pub line_height: f32,
    /// Distance from the top of a line to the baseline
    #[serde(rename = "base")]
    pub baseline: f32,
    /// Atlas width in pixels
    pub scale_w: f32,
    /// Atlas height in pixels
    pub scale_h: f32,
    /// Number of atlas pages
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub packed: i32,
    #[serde(default)]
    pub alpha_chnl: i32,
    #[serde(default)]
    pub red_chnl: i32,
    #[serde(default)]
    pub green_chnl: i32,
    #[serde(default)]
    pub blue_chnl: i32,
}

/// The `distanceField` section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DistanceFieldSection {
    /// Field type, e.g. `"msdf"`, `"sdf"` or `"psdf"`
    pub field_type: String,
    /// Distance range in atlas pixels
    pub distance_range: f32,
}

/// One record of the `chars` section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CharRecord {
    /// Code point
    pub id: u32,
    /// Glyph index in the source font
    #[serde(default)]
    pub index: u32,
    /// The character, as a string
    #[serde(default, rename = "char")]
    pub character: String,
    pub width: f32,
    pub height: f32,
    pub xoffset: f32,
    pub yoffset: f32,
    pub xadvance: f32,
    /// Channel bit set
    #[serde(default)]
    pub chnl: u8,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub page: u32,
}

/// One record of the `kernings` section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KerningRecord {
    pub first: u32,
    pub second: u32,
    pub amount: f32,
}
