//! Procedural generator for rounded-badge state icons.
//!
//! Each icon is a rounded square in a state color with a white blocky "S" on top,
//! rasterized without anti-aliasing and stored as a lossless RGBA PNG.

pub mod audit;
pub mod config;
pub mod error;
pub mod geometry;
pub mod icon_gen;
pub mod manifest;
pub mod raster;
pub mod sink;

pub use error::GenerateError;
pub use geometry::{GeometryParams, PixelClass};
pub use raster::{BadgeColor, IconAsset};
