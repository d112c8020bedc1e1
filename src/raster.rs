use crate::error::GenerateError;
use crate::geometry::{GeometryParams, PixelClass};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, ImageFormat, Rgba, RgbaImage,
};
use serde::Deserialize;
use std::{fmt, io::Write, str::FromStr};
use tracing::debug;

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
pub const GLYPH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Opaque RGB color of a state's badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct BadgeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BadgeColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for BadgeColor {
    type Err = anyhow::Error;

    /// Accepts a bare `r,g,b` triple or any CSS color without transparency.
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() == 3 && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
            let channel = |p: &str| {
                if p.is_empty() {
                    anyhow::bail!("Missing color channel in '{s}'");
                }
                p.parse::<u8>()
                    .map_err(|_| anyhow::anyhow!("Color channel out of range in '{s}': {p}"))
            };
            return Ok(Self::new(
                channel(parts[0])?,
                channel(parts[1])?,
                channel(parts[2])?,
            ));
        }

        let color = css_color::Srgb::from_str(s)
            .map_err(|_| anyhow::anyhow!("Invalid color: '{s}'"))?;
        if color.alpha < 1.0 {
            anyhow::bail!("Badge color must be opaque: '{s}'");
        }

        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Ok(Self::new(
            channel(color.red),
            channel(color.green),
            channel(color.blue),
        ))
    }
}

impl TryFrom<String> for BadgeColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> anyhow::Result<Self> {
        value.parse()
    }
}

/// Encoded icon for one `(state, size)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconAsset {
    pub state: String,
    pub size: u32,
    pub bytes: Vec<u8>,
}

/// Paint a `size`x`size` canvas: glyph pixels white, remaining badge pixels in `color`,
/// everything else fully transparent.
pub fn compose(size: u32, color: BadgeColor) -> Result<RgbaImage, GenerateError> {
    let params = GeometryParams::for_size(size)?;
    debug!(?params, "composing canvas");

    let fill = color.to_rgba();
    let mut canvas = RgbaImage::from_pixel(size, size, TRANSPARENT);
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        match params.classify(x, y) {
            PixelClass::Glyph => *pixel = GLYPH_COLOR,
            PixelClass::Background => *pixel = fill,
            PixelClass::Transparent => {}
        }
    }

    Ok(canvas)
}

/// Encode raw RGBA8 data of a square canvas as a losslessly compressed PNG.
pub fn encode_png(data: &[u8], size: u32) -> Result<Vec<u8>, GenerateError> {
    let expected = size as usize * size as usize * 4;
    if data.len() != expected {
        return Err(GenerateError::encoding(
            size,
            format!("expected {expected} bytes of RGBA data, got {}", data.len()),
        ));
    }

    let mut buf = Vec::new();
    write_png(data, &mut buf, size).map_err(|e| GenerateError::encoding(size, e))?;
    Ok(buf)
}

fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> image::ImageResult<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)
}

pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, GenerateError> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
    Ok(image.to_rgba8())
}

pub fn generate_asset(
    state: &str,
    size: u32,
    color: BadgeColor,
) -> Result<IconAsset, GenerateError> {
    let canvas = compose(size, color)?;
    let bytes = encode_png(canvas.as_raw(), size)?;

    Ok(IconAsset {
        state: state.to_string(),
        size,
        bytes,
    })
}
