//! Shared types used across the catalog, the imaging backend and the generator.
//!
//! These are small `Copy` values that several modules need to agree on: the
//! pixel size of an icon, the encoding it is written in, and how a batch of
//! icons is scheduled.

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[u32; 2]", from = "[u32; 2]")]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when both axes are no larger than `bounds`.
    pub fn fits_within(&self, bounds: Dimensions) -> bool {
        self.width <= bounds.width && self.height <= bounds.height
    }

    /// The longer of the two edges.
    pub fn longest_edge(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl From<Dimensions> for [u32; 2] {
    fn from(dims: Dimensions) -> Self {
        [dims.width, dims.height]
    }
}

impl From<[u32; 2]> for Dimensions {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Output encoding of a generated icon.
///
/// The lowercase name doubles as the file extension and as the subtype in the
/// `image/{encoding}` MIME string emitted in link tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconEncoding {
    Ico,
    Png,
}

impl IconEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconEncoding::Ico => "ico",
            IconEncoding::Png => "png",
        }
    }

    /// Value for the `type` attribute of a `<link>` tag.
    pub fn mime_type(&self) -> String {
        format!("image/{}", self.as_str())
    }

    /// Encoder the `image` crate should use when writing this icon.
    pub fn image_format(&self) -> ImageFormat {
        match self {
            IconEncoding::Ico => ImageFormat::Ico,
            IconEncoding::Png => ImageFormat::Png,
        }
    }
}

impl fmt::Display for IconEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How [`Generator::generate`](crate::generator::Generator::generate) schedules
/// the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One icon after the other, in catalog order. Stops at the first failure.
    #[default]
    Sequential,
    /// One rayon task per icon, joined before returning. Every failure is
    /// collected once the whole batch has settled.
    Concurrent,
}

/// Progress notification sent while a batch is being rendered.
///
/// In concurrent mode events arrive in completion order, not catalog order.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateEvent {
    Rendered {
        filename: String,
        dimensions: Dimensions,
    },
    Failed {
        filename: String,
        reason: String,
    },
}
