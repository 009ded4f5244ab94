//! The built-in icon catalog.
//!
//! Order matters only for output: file name lists, link tags and JSON records
//! follow it. Several entries share a prefix (told apart by size) and several
//! share a role; every entry is rendered on its own.

use crate::descriptor::IconDescriptor;
use crate::types::{Dimensions, IconEncoding};

const fn png(size: (u32, u32), prefix: &'static str, role: Option<&'static str>) -> IconDescriptor {
    IconDescriptor::new(
        IconEncoding::Png,
        Dimensions::new(size.0, size.1),
        prefix,
        role,
    )
}

const ICON: Option<&str> = Some("icon");
const TOUCH_ICON: Option<&str> = Some("apple-touch-icon");

static CATALOG: [IconDescriptor; 21] = [
    IconDescriptor::new(IconEncoding::Ico, Dimensions::new(64, 64), "favicon", None),
    // Generic favicons
    png((16, 16), "favicon", ICON),
    png((32, 32), "favicon", ICON),
    png((64, 64), "favicon", ICON),
    png((96, 96), "favicon", ICON),
    png((180, 180), "favicon", ICON),
    // iOS home screen
    png((57, 57), "apple-touch-icon", TOUCH_ICON),
    png((60, 60), "apple-touch-icon", TOUCH_ICON),
    png((72, 72), "apple-touch-icon", TOUCH_ICON),
    png((76, 76), "apple-touch-icon", TOUCH_ICON),
    png((114, 114), "apple-touch-icon", TOUCH_ICON),
    png((120, 120), "apple-touch-icon", TOUCH_ICON),
    png((144, 144), "apple-touch-icon", TOUCH_ICON),
    png((152, 152), "apple-touch-icon", TOUCH_ICON),
    png((167, 167), "apple-touch-icon", TOUCH_ICON),
    png((180, 180), "apple-touch-icon", TOUCH_ICON),
    // Windows tiles, referenced from browserconfig.xml rather than markup
    png((70, 70), "mstile", None),
    png((270, 270), "mstile", None),
    png((310, 310), "mstile", None),
    png((310, 150), "mstile", None),
    png((196, 196), "favicon", Some("shortcut icon")),
];

/// Every icon the generator produces, in output order.
pub fn all() -> &'static [IconDescriptor] {
    &CATALOG
}

/// Longest edge of any catalog entry.
pub fn largest_edge() -> u32 {
    CATALOG
        .iter()
        .map(|d| d.dimensions().longest_edge())
        .max()
        .unwrap_or(0)
}
