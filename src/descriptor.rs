//! One entry of the icon catalog.
//!
//! An [`IconDescriptor`] says what to write (encoding and pixel size), what to
//! call it (name prefix) and whether it gets a `<link>` tag (role). The file
//! name is derived, never stored:
//!
//! ```text
//! ico  → {prefix}.ico                    favicon.ico
//! png  → {prefix}-{width}x{height}.png   apple-touch-icon-180x180.png
//! ```

use crate::types::{Dimensions, IconEncoding};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconDescriptor {
    encoding: IconEncoding,
    dimensions: Dimensions,
    prefix: &'static str,
    role: Option<&'static str>,
}

impl IconDescriptor {
    pub const fn new(
        encoding: IconEncoding,
        dimensions: Dimensions,
        prefix: &'static str,
        role: Option<&'static str>,
    ) -> Self {
        Self {
            encoding,
            dimensions,
            prefix,
            role,
        }
    }

    pub fn encoding(&self) -> IconEncoding {
        self.encoding
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// The `rel` value for markup, or `None` for icons that are only
    /// referenced by platform conventions (tile images, `favicon.ico`).
    pub fn role(&self) -> Option<&'static str> {
        self.role
    }

    pub fn filename(&self) -> String {
        match self.encoding {
            IconEncoding::Ico => format!("{}.{}", self.prefix, self.encoding),
            _ => format!("{}-{}.{}", self.prefix, self.dimensions, self.encoding),
        }
    }

    /// `<link rel=".." type="image/.." href="{base_url}{filename}" />`, or
    /// `None` when the descriptor has no role.
    ///
    /// `base_url` is prepended verbatim; no escaping or URL joining.
    pub fn link_tag(&self, base_url: &str) -> Option<String> {
        let role = self.role?;
        Some(format!(
            r#"<link rel="{}" type="{}" href="{}{}" />"#,
            role,
            self.encoding.mime_type(),
            base_url,
            self.filename()
        ))
    }

    pub fn to_record(&self) -> IconRecord {
        IconRecord {
            encoding: self.encoding,
            dimensions: self.dimensions,
            prefix: self.prefix.to_string(),
            role: self.role.map(str::to_string),
        }
    }
}

impl fmt::Display for IconDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filename())
    }
}

/// Serializable view of a descriptor.
///
/// `role` is always present in the JSON, as `null` when the icon has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    pub encoding: IconEncoding,
    pub dimensions: Dimensions,
    pub prefix: String,
    pub role: Option<String>,
}
