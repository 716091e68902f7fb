/// Crop-and-fit geometry for whiteboard cards
///
/// A card shows the region of a photo bounded by the whiteboard's corners,
/// stretched to a fixed box. This module computes the translate + scale that
/// does that; it never touches pixels.
///
/// # Algorithm
/// 1. Source extent: `src_w = tr.x - tl.x`, `src_h = bl.y - tl.y`
/// 2. Scale per axis: `target / src`, or 1.0 when the extent is not positive
/// 3. Translate so the top-left corner lands on the box origin

use crate::state::data::{Corner, Corners};

/// Card box width in pixels
pub const CARD_WIDTH: f32 = 280.0;
/// Card box height in pixels
pub const CARD_HEIGHT: f32 = 360.0;

/// Default divisor used to produce the small asset set
pub const SMALL_DIVISOR: u32 = 3;

/// Translate-then-scale transform about the origin (no rotation)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl CropTransform {
    /// Map a source-image point into target-box space
    pub fn apply(&self, point: Corner) -> Corner {
        Corner::new(
            point.x * self.scale_x + self.translate_x,
            point.y * self.scale_y + self.translate_y,
        )
    }

    /// Where a whole `width × height` image lands in target-box space,
    /// as `(x, y, width, height)`
    pub fn place(&self, width: f32, height: f32) -> (f32, f32, f32, f32) {
        let origin = self.apply(Corner::new(0.0, 0.0));
        let far = self.apply(Corner::new(width, height));
        (origin.x, origin.y, far.x - origin.x, far.y - origin.y)
    }
}

/// Compute the transform that fits the corners' bounding box to
/// `target_w × target_h`. Aspect ratio is not preserved.
pub fn map_to_target(
    tl: Corner,
    tr: Corner,
    bl: Corner,
    target_w: f32,
    target_h: f32,
) -> CropTransform {
    let src_w = tr.x - tl.x;
    let src_h = bl.y - tl.y;

    // Degenerate extents fall back to identity scale
    let scale_x = if src_w > 0.0 { target_w / src_w } else { 1.0 };
    let scale_y = if src_h > 0.0 { target_h / src_h } else { 1.0 };

    CropTransform {
        scale_x,
        scale_y,
        translate_x: -tl.x * scale_x,
        translate_y: -tl.y * scale_y,
    }
}

/// Which asset set a card displays, and how its coordinates relate to the
/// full-size photo the manifest corners were measured on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetScale {
    Full,
    /// Assets shrunk by `divisor` in both dimensions
    Small { divisor: u32 },
}

impl Default for AssetScale {
    fn default() -> Self {
        AssetScale::Small {
            divisor: SMALL_DIVISOR,
        }
    }
}

impl AssetScale {
    /// Factor applied to manifest corners before mapping
    pub fn factor(self) -> f32 {
        match self {
            AssetScale::Full => 1.0,
            AssetScale::Small { divisor } => 1.0 / divisor.max(1) as f32,
        }
    }

    /// Transform for a card showing these corners on this asset set
    pub fn card_transform(self, corners: &Corners) -> CropTransform {
        let c = corners.scaled(self.factor());
        map_to_target(c.tl, c.tr, c.bl, CARD_WIDTH, CARD_HEIGHT)
    }
}
