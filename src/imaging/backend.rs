//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the generator needs:
//! identify (read the source size) and composite (resize, center on a canvas,
//! encode).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` below.

use super::params::CompositeParams;
use crate::types::Dimensions;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
///
/// `Sync` because the concurrent mode shares one backend across rayon tasks.
/// Implementations must open the source on every call; nothing is cached
/// between calls.
pub trait ImageBackend: Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Draw the source onto a filled canvas and write it in the requested
    /// encoding.
    fn composite(&self, params: &CompositeParams) -> Result<(), BackendError>;
}
