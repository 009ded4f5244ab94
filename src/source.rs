//! Source image classification and vector pre-rasterization.
//!
//! The compositing backend only decodes raster formats. A source is
//! classified by its extension (case-insensitive):
//!
//! | Extension | Kind | Preparation |
//! |---|---|---|
//! | `svg` | vector | rendered with resvg onto the background color, written to a temporary PNG |
//! | `png`, `jpg`, `jpeg`, `tif`, `tiff` | raster | used as-is |
//! | anything else | rejected | [`SourceError::UnsupportedFormat`] |
//!
//! The temporary PNG is owned by [`PreparedSource`] and deleted when it is
//! dropped, whether or not generation succeeded.

use crate::catalog;
use crate::color::Color;
use crate::imaging::calculations::upscale_factor;
use crate::imaging::supported_input_extensions;
use resvg::tiny_skia::{self, Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

const VECTOR_EXTENSION: &str = "svg";

#[derive(Error, Debug)]
pub enum SourceError {
    #[error(
        "Extension '.{extension}' is not supported ({}). Must be one of {}",
        path.display(),
        accepted_extensions().join(", ")
    )]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("Failed to rasterize {}: {reason}", path.display())]
    Rasterize { path: PathBuf, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Raster,
    Vector,
}

/// Every accepted source extension, vector first.
pub fn accepted_extensions() -> Vec<&'static str> {
    std::iter::once(VECTOR_EXTENSION)
        .chain(supported_input_extensions().iter().copied())
        .collect()
}

/// Decide how a source must be prepared, from its extension alone.
///
/// Touches nothing on disk; the path does not need to exist.
pub fn classify(path: &Path) -> Result<SourceKind, SourceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if extension == VECTOR_EXTENSION {
        Ok(SourceKind::Vector)
    } else if supported_input_extensions().contains(&extension.as_str()) {
        Ok(SourceKind::Raster)
    } else {
        Err(SourceError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        })
    }
}

/// A source the raster backend can open.
#[derive(Debug)]
pub enum PreparedSource {
    /// The user's file, used directly.
    Raster(PathBuf),
    /// A PNG rendered from a vector source. The file is removed on drop.
    Rasterized {
        original: PathBuf,
        raster: NamedTempFile,
    },
}

impl PreparedSource {
    /// Path handed to the image decoder.
    pub fn path(&self) -> &Path {
        match self {
            PreparedSource::Raster(path) => path,
            PreparedSource::Rasterized { raster, .. } => raster.path(),
        }
    }

    /// The path the user supplied.
    pub fn original(&self) -> &Path {
        match self {
            PreparedSource::Raster(path) => path,
            PreparedSource::Rasterized { original, .. } => original,
        }
    }

    pub fn is_rasterized(&self) -> bool {
        matches!(self, PreparedSource::Rasterized { .. })
    }
}

/// Normalize `path` into something the raster backend can decode.
///
/// Raster sources come back unchanged. Vector sources are rendered onto
/// `background` at a size whose longest edge covers the largest catalog icon.
pub fn prepare(path: &Path, background: Color) -> Result<PreparedSource, SourceError> {
    match classify(path)? {
        SourceKind::Raster => Ok(PreparedSource::Raster(path.to_path_buf())),
        SourceKind::Vector => {
            let raster = rasterize_svg(path, background, catalog::largest_edge())?;
            Ok(PreparedSource::Rasterized {
                original: path.to_path_buf(),
                raster,
            })
        }
    }
}

/// Render an SVG file to a temporary PNG filled with `background`.
///
/// Drawings smaller than `min_edge` on their longest side are scaled up so
/// the later thumbnail step only ever has to shrink.
pub fn rasterize_svg(
    path: &Path,
    background: Color,
    min_edge: u32,
) -> Result<NamedTempFile, SourceError> {
    let rasterize_err = |reason: String| SourceError::Rasterize {
        path: path.to_path_buf(),
        reason,
    };

    let data = std::fs::read(path)?;
    let mut options = Options::default();
    options.resources_dir = path.parent().map(Path::to_path_buf);
    options.fontdb_mut().load_system_fonts();

    let tree = Tree::from_data(&data, &options).map_err(|e| rasterize_err(e.to_string()))?;

    let size = tree.size();
    let scale = upscale_factor(size.width().max(size.height()), min_edge);
    let width = ((size.width() * scale).ceil() as u32).max(1);
    let height = ((size.height() * scale).ceil() as u32).max(1);

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| rasterize_err(format!("invalid raster size {width}x{height}")))?;
    let [r, g, b] = background.channels();
    pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|e| rasterize_err(e.to_string()))?;

    let mut file = tempfile::Builder::new()
        .prefix("favicons-")
        .suffix(".png")
        .tempfile()?;
    file.write_all(&png)?;
    file.flush()?;

    tracing::debug!(
        source = %path.display(),
        raster = %file.path().display(),
        width,
        height,
        "rasterized vector source"
    );
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{read_dimensions, write_svg};
    use tempfile::TempDir;

    #[test]
    fn raster_extensions_classified_case_insensitively() {
        for name in ["logo.png", "logo.PNG", "logo.jpg", "logo.JPEG", "logo.tif", "logo.Tiff"] {
            assert_eq!(classify(Path::new(name)).unwrap(), SourceKind::Raster, "{name}");
        }
    }

    #[test]
    fn svg_classified_as_vector() {
        assert_eq!(classify(Path::new("logo.svg")).unwrap(), SourceKind::Vector);
        assert_eq!(classify(Path::new("logo.SVG")).unwrap(), SourceKind::Vector);
    }

    #[test]
    fn unknown_extension_rejected() {
        let err = classify(Path::new("logo.bmp")).unwrap_err();
        assert!(matches!(
            &err,
            SourceError::UnsupportedFormat { extension, .. } if extension == "bmp"
        ));
        assert!(err.to_string().contains("'.bmp'"));
        assert!(err.to_string().contains("svg, jpeg, jpg, png, tiff, tif"));
    }

    #[test]
    fn missing_extension_rejected() {
        assert!(matches!(
            classify(Path::new("logo")),
            Err(SourceError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn raster_source_prepared_without_io() {
        let prepared = prepare(Path::new("/does/not/exist.png"), Color::BLACK).unwrap();
        assert!(!prepared.is_rasterized());
        assert_eq!(prepared.path(), Path::new("/does/not/exist.png"));
    }

    #[test]
    fn svg_rasterized_onto_background() {
        let tmp = TempDir::new().unwrap();
        let svg = tmp.path().join("logo.svg");
        write_svg(&svg, 32, 16, "#ff0000");

        let prepared = prepare(&svg, Color::rgb(0, 0, 255)).unwrap();
        assert!(prepared.is_rasterized());
        assert_eq!(prepared.original(), svg.as_path());
        assert_eq!(prepared.path().extension().unwrap(), "png");

        let raster = image::open(prepared.path()).unwrap().into_rgba8();
        // 32x16 scaled up so the long edge reaches the largest icon
        assert_eq!(raster.dimensions(), (310, 155));
        assert_eq!(raster.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(raster.get_pixel(155, 77).0, [255, 0, 0, 255]);
    }

    #[test]
    fn large_svg_keeps_intrinsic_size() {
        let tmp = TempDir::new().unwrap();
        let svg = tmp.path().join("logo.svg");
        write_svg(&svg, 400, 400, "#00ff00");

        let raster = rasterize_svg(&svg, Color::BLACK, 310).unwrap();
        assert_eq!(read_dimensions(raster.path()).width, 400);
    }

    #[test]
    fn temporary_raster_removed_on_drop() {
        let tmp = TempDir::new().unwrap();
        let svg = tmp.path().join("logo.svg");
        write_svg(&svg, 16, 16, "#000");

        let prepared = prepare(&svg, Color::BLACK).unwrap();
        let raster_path = prepared.path().to_path_buf();
        assert!(raster_path.exists());

        drop(prepared);
        assert!(!raster_path.exists());
    }

    #[test]
    fn invalid_svg_is_rasterize_error() {
        let tmp = TempDir::new().unwrap();
        let svg = tmp.path().join("broken.svg");
        std::fs::write(&svg, "<svg").unwrap();

        assert!(matches!(
            prepare(&svg, Color::BLACK),
            Err(SourceError::Rasterize { .. })
        ));
    }

    #[test]
    fn missing_svg_is_io_error() {
        assert!(matches!(
            prepare(Path::new("/does/not/exist.svg"), Color::BLACK),
            Err(SourceError::Io(_))
        ));
    }
}
