use anyhow::{Context, Result};
use badge_gen::{audit::audit, raster::decode_png, BadgeColor, GeometryParams};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| "icons/enabled/icon128.png".to_string());
    let expected: Option<BadgeColor> = args.next().map(|c| c.parse()).transpose()?;

    let bytes = std::fs::read(&path).with_context(|| format!("Failed to open {path}"))?;
    let img = decode_png(&bytes)?;

    println!("Checking badge in: {}", path);
    println!("Image dimensions: {}x{}", img.width(), img.height());

    let report = audit(&img, expected)?;
    let params = GeometryParams::for_size(report.size)?;
    let bounds = params.bounds();

    println!(
        "Corner radius {}, stroke {}, padding {}",
        params.corner_radius, params.stroke_thickness, params.padding
    );
    println!(
        "Glyph box: x={}..={}, y={}..={}, midline y={}",
        bounds.left, bounds.right, bounds.top, bounds.bottom, bounds.mid_y
    );
    if let Some(color) = report.color {
        println!("Badge color: {}", color);
    }

    println!("\nPixel classes:");
    println!("  transparent: {}", report.transparent);
    println!("  background:  {}", report.background);
    println!("  glyph:       {}", report.glyph);

    if report.is_clean() {
        println!("✓ Badge matches the expected geometry");
        Ok(())
    } else {
        let (x, y) = report.first_mismatch.unwrap_or_default();
        println!(
            "⚠ {} pixels differ from the expected geometry (first at x={}, y={})",
            report.mismatches, x, y
        );
        std::process::exit(1);
    }
}
