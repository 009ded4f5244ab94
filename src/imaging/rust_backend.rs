//! Pure Rust image backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF) | `image::ImageReader` |
//! | Identify | `ImageReader::into_dimensions` (header only) |
//! | Resize | `image::imageops::resize` with `Lanczos3` |
//! | Canvas | `image::RgbaImage::from_pixel` |
//! | Paste | `image::imageops::replace` (pixels copied, no blending) |
//! | Encode → PNG / ICO | `ImageBuffer::save_with_format` |

use super::backend::{BackendError, ImageBackend};
use super::params::CompositeParams;
use crate::types::Dimensions;
use image::imageops::FilterType;
use image::{ImageFormat, ImageReader, RgbaImage};
use std::path::Path;
use std::sync::LazyLock;

/// Raster extensions accepted as icon sources, with the decoder each needs.
const RASTER_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpeg", ImageFormat::Jpeg),
    ("jpg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tiff", ImageFormat::Tiff),
    ("tif", ImageFormat::Tiff),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    RASTER_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Lowercase raster extensions that have a decoder compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk as 8-bit RGBA.
fn load_rgba(path: &Path) -> Result<RgbaImage, BackendError> {
    let img = ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })?;
    Ok(img.into_rgba8())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let failed = |e: &dyn std::fmt::Display| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        };
        let (width, height) = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| failed(&e))?
            .into_dimensions()
            .map_err(|e| failed(&e))?;
        Ok(Dimensions { width, height })
    }

    fn composite(&self, params: &CompositeParams) -> Result<(), BackendError> {
        let source = load_rgba(&params.source)?;
        let target = params.placement.size;

        let placed = if source.dimensions() == (target.width, target.height) {
            source
        } else {
            image::imageops::resize(&source, target.width, target.height, FilterType::Lanczos3)
        };

        let mut canvas =
            RgbaImage::from_pixel(params.canvas.width, params.canvas.height, params.background);
        image::imageops::replace(&mut canvas, &placed, params.placement.x, params.placement.y);

        canvas
            .save_with_format(&params.output, params.encoding.image_format())
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to write {}: {}",
                    params.output.display(),
                    e
                ))
            })
    }
}
