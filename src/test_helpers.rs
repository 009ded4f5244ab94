//! Shared test utilities for the favicons test suite.
//!
//! Writes small source images into temp directories and reads back what the
//! generator produced.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let source = tmp.path().join("logo.png");
//! write_png(&source, 128, 128, [255, 0, 0, 255]);
//!
//! // ... generate into tmp.path().join("out") ...
//!
//! assert_eq!(read_dimensions(&out.join("favicon-16x16.png")), Dimensions::new(16, 16));
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::types::Dimensions;

// =========================================================================
// Source fixtures
// =========================================================================

/// Write a solid-color PNG.
pub fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write an SVG of the given size with a `fill`-colored rectangle covering
/// its middle half. The outer quarter on every side is left empty.
pub fn write_svg(path: &Path, width: u32, height: u32, fill: &str) {
    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/></svg>"#,
        x = width as f32 / 4.0,
        y = height as f32 / 4.0,
        w = width as f32 / 2.0,
        h = height as f32 / 2.0,
    );
    std::fs::write(path, svg).unwrap();
}

// =========================================================================
// Output inspection
// =========================================================================

/// Pixel size of an image on disk.
pub fn read_dimensions(path: &Path) -> Dimensions {
    let (width, height) = image::image_dimensions(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    Dimensions::new(width, height)
}

/// File names present in a directory, sorted.
pub fn list_files(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}
