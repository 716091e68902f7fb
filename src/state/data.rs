/// Shared data structures for the gallery
///
/// These structs represent the data model that flows between
/// the manifest loader and the UI layer.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::room_id;

/// A pixel position in a source photo (origin top-left, x right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "[f32; 2]")]
pub struct Corner {
    pub x: f32,
    pub y: f32,
}

impl Corner {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Multiply both coordinates by `factor`
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl From<[f32; 2]> for Corner {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// The four corners marking a whiteboard inside its photo.
/// Only `tl`, `tr` and `bl` drive the crop; `br` is carried for completeness.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Corners {
    pub tl: Corner,
    pub tr: Corner,
    pub br: Corner,
    pub bl: Corner,
}

impl Corners {
    /// Express the corners in the coordinate space of an asset
    /// resized by `factor` (1.0 for the full asset)
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            tl: self.tl.scaled(factor),
            tr: self.tr.scaled(factor),
            br: self.br.scaled(factor),
            bl: self.bl.scaled(factor),
        }
    }
}

/// One value of the manifest object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManifestEntry {
    /// File name shared by the full and small asset sets
    pub file: String,
    /// Corners in full-asset pixel space
    pub corners: Corners,
}

/// The manifest: room id → entry
pub type Manifest = BTreeMap<String, ManifestEntry>;

/// Parse a manifest from raw JSON bytes
pub fn parse_manifest(bytes: &[u8]) -> Result<Manifest, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// A whiteboard derived from a manifest entry
#[derive(Debug, Clone, PartialEq)]
pub struct Whiteboard {
    /// Room identifier, also the display label
    pub room_id: String,
    pub file: String,
    pub corners: Corners,
    /// Floor derived from the room id; `None` when it has no digit
    pub floor: Option<u32>,
}

impl Whiteboard {
    pub fn new(room_id: impl Into<String>, entry: &ManifestEntry) -> Self {
        let room_id = room_id.into();
        let floor = room_id::floor_of(&room_id);
        Self {
            room_id,
            file: entry.file.clone(),
            corners: entry.corners,
            floor,
        }
    }
}
