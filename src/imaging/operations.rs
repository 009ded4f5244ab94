//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take a descriptor, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{center_offset, fit_within};
use super::params::{CompositeParams, Placement};
use crate::descriptor::IconDescriptor;
use crate::types::Dimensions;
use image::Rgba;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

/// Plan a composite operation without executing it.
///
/// The source is shrunk to fit the descriptor's canvas (never enlarged) and
/// centered with floored offsets.
pub fn plan_composite(
    source: &Path,
    source_dims: Dimensions,
    output_path: &Path,
    descriptor: &IconDescriptor,
    background: Rgba<u8>,
) -> CompositeParams {
    let canvas = descriptor.dimensions();
    let size = fit_within(source_dims, canvas);
    let (x, y) = center_offset(canvas, size);

    CompositeParams {
        source: source.to_path_buf(),
        output: output_path.to_path_buf(),
        canvas,
        background,
        placement: Placement { size, x, y },
        encoding: descriptor.encoding(),
    }
}

/// Render one catalog entry into `output_dir`.
///
/// Reads the source size, plans the placement and composites. Returns the
/// path of the written file.
pub fn create_icon(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    descriptor: &IconDescriptor,
    background: Rgba<u8>,
) -> Result<PathBuf> {
    let source_dims = get_dimensions(backend, source)?;
    let output_path = output_dir.join(descriptor.filename());

    let params = plan_composite(source, source_dims, &output_path, descriptor, background);
    backend.composite(&params)?;

    Ok(output_path)
}
