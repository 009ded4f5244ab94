//! Parameter types for image operations.
//!
//! These describe *what* to do, not *how*. The backend turns them into pixels.

use crate::types::{Dimensions, IconEncoding};
use image::Rgba;
use std::path::PathBuf;

/// Where the resized source lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Size the source is resized to (equal to the source size when it
    /// already fits).
    pub size: Dimensions,
    /// Top-left corner on the canvas.
    pub x: i64,
    pub y: i64,
}

/// Parameters for compositing one icon.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub canvas: Dimensions,
    /// Canvas fill. Alpha is 0 for transparent icons, 255 otherwise.
    pub background: Rgba<u8>,
    pub placement: Placement,
    pub encoding: IconEncoding,
}
