//! Per-pixel shape rules for the badge and its glyph.
//!
//! Everything here is a pure function of the canvas size and a pixel coordinate, so the
//! shapes can be checked without allocating a canvas.

use crate::error::GenerateError;

/// Smallest canvas whose glyph box can hold a full stroke (`size >= 2 * padding + thickness`).
///
/// Below this the box is degenerate and the vertical strokes would leave it.
pub const MIN_SIZE: u32 = 8;

/// Upper bound on the canvas side length.
pub const MAX_SIZE: u32 = 4096;

/// What a single pixel of the icon is painted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelClass {
    Transparent,
    Background,
    Glyph,
}

/// Layout values derived from the canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryParams {
    pub size: u32,
    pub corner_radius: u32,
    pub stroke_thickness: u32,
    pub padding: u32,
}

/// Box the glyph is drawn in. Edges are inclusive.
///
/// Signed so that degenerate boxes on tiny canvases (`right < left`) are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBounds {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
    pub mid_y: i64,
}

impl GlyphBounds {
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

impl GeometryParams {
    pub fn for_size(size: u32) -> Result<Self, GenerateError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GenerateError::InvalidSize { size });
        }

        // round(size / 8), halves rounding up
        let corner_radius = ((size + 4) / 8).max(2);
        let stroke_thickness = (size / 6).max(2);
        let padding = if size <= 16 {
            3
        } else {
            // floor(size * 0.15) in f64, the arithmetic the existing icons were laid out with
            ((size as f64 * 0.15).floor() as u32).max(2)
        };

        Ok(Self {
            size,
            corner_radius,
            stroke_thickness,
            padding,
        })
    }

    pub fn bounds(&self) -> GlyphBounds {
        let size = self.size as i64;
        let pad = self.padding as i64;
        GlyphBounds {
            left: pad,
            right: size - pad - 1,
            top: pad,
            bottom: size - pad - 1,
            mid_y: size / 2,
        }
    }

    /// Whether `(x, y)` lies inside the rounded square.
    ///
    /// Pixels in the straight horizontal or vertical band are inside. The remaining pixels
    /// sit in one of the four corner squares and are tested against the quarter circle
    /// anchored at that corner's nearest interior point.
    pub fn is_background(&self, x: u32, y: u32) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }

        let size = self.size as i64;
        let r = self.corner_radius as i64;
        let (x, y) = (x as i64, y as i64);
        let band = r..size - r;

        if band.contains(&x) || band.contains(&y) {
            return true;
        }

        let near = r;
        let far = size - r - 1;
        let (anchor_x, anchor_y) = match (x < r, y < r) {
            (true, true) => (near, near),
            (false, true) => (far, near),
            (true, false) => (near, far),
            (false, false) => (far, far),
        };

        let dx = x - anchor_x;
        let dy = y - anchor_y;
        dx * dx + dy * dy <= r * r
    }

    /// Whether `(x, y)` belongs to one of the five strokes of the "S".
    pub fn is_glyph(&self, x: u32, y: u32) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }

        let b = self.bounds();
        let t = self.stroke_thickness as i64;
        let (x, y) = (x as i64, y as i64);
        let full_width = x >= b.left && x <= b.right;

        let top_bar = full_width && y >= b.top && y < b.top + t;
        let upper_left = x >= b.left && x < b.left + t && y >= b.top && y <= b.mid_y;
        // odd thicknesses put the extra row below the midline
        let middle_bar = full_width && y >= b.mid_y - t / 2 && y < b.mid_y + (t + 1) / 2;
        let lower_right = x > b.right - t && x <= b.right && y >= b.mid_y && y <= b.bottom;
        let bottom_bar = full_width && y > b.bottom - t && y <= b.bottom;

        top_bar || upper_left || middle_bar || lower_right || bottom_bar
    }

    /// Glyph wins over background.
    pub fn classify(&self, x: u32, y: u32) -> PixelClass {
        if self.is_glyph(x, y) {
            PixelClass::Glyph
        } else if self.is_background(x, y) {
            PixelClass::Background
        } else {
            PixelClass::Transparent
        }
    }
}
