//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Composite** | Lanczos3 resize + `imageops::replace` onto a filled canvas |
//! | **Encode** | `image` PNG and ICO encoders |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
pub(crate) mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use operations::{create_icon, get_dimensions, plan_composite};
pub use params::{CompositeParams, Placement};
pub use rust_backend::{RustBackend, supported_input_extensions};
