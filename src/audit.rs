//! Check a decoded icon against the badge geometry.

use crate::error::GenerateError;
use crate::geometry::{GeometryParams, PixelClass};
use crate::raster::{BadgeColor, GLYPH_COLOR, TRANSPARENT};
use image::{Rgba, RgbaImage};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub size: u32,
    pub transparent: usize,
    pub background: usize,
    pub glyph: usize,
    /// Pixels whose value does not match their class.
    pub mismatches: usize,
    /// First mismatching pixel, as `(x, y)`.
    pub first_mismatch: Option<(u32, u32)>,
    /// Badge color the background was compared against.
    pub color: Option<BadgeColor>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches == 0
    }

    pub fn total(&self) -> usize {
        self.transparent + self.background + self.glyph
    }
}

/// Classify every pixel of `image` and compare it with the value it should have been painted.
///
/// Without an `expected` color the first background pixel sets the reference.
pub fn audit(image: &RgbaImage, expected: Option<BadgeColor>) -> Result<AuditReport, GenerateError> {
    let (width, height) = image.dimensions();
    if width != height {
        return Err(GenerateError::InvalidSize {
            size: width.max(height),
        });
    }
    let params = GeometryParams::for_size(width)?;

    let mut report = AuditReport {
        size: width,
        color: expected,
        ..AuditReport::default()
    };

    for (x, y, pixel) in image.enumerate_pixels() {
        let wanted = match params.classify(x, y) {
            PixelClass::Transparent => {
                report.transparent += 1;
                TRANSPARENT
            }
            PixelClass::Glyph => {
                report.glyph += 1;
                GLYPH_COLOR
            }
            PixelClass::Background => {
                report.background += 1;
                let color = *report.color.get_or_insert_with(|| {
                    let Rgba([r, g, b, _]) = *pixel;
                    BadgeColor::new(r, g, b)
                });
                color.to_rgba()
            }
        };

        if *pixel != wanted {
            report.mismatches += 1;
            if report.first_mismatch.is_none() {
                report.first_mismatch = Some((x, y));
            }
        }
    }

    Ok(report)
}
