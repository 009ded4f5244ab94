//! # Favicons
//!
//! Turns one logo into the full set of browser, touch and tile icons a site
//! needs, plus the `<link>` tags that reference them.
//!
//! ```text
//! logo.svg ──► source::prepare ──► normalized raster
//!                                       │
//!              catalog::all() ──► Generator ──► favicon.ico
//!                                       │       favicon-16x16.png
//!                                       │       apple-touch-icon-180x180.png
//!                                       │       mstile-310x150.png ...
//!                                       ▼
//!                        filenames() / markup_lines() / records()
//! ```
//!
//! Every output file corresponds to exactly one catalog entry, and the three
//! projections walk the same catalog in the same order, so names, markup and
//! JSON always describe exactly the files that were written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Shared value types: `Dimensions`, `IconEncoding`, `ExecutionMode`, `GenerateEvent` |
//! | [`color`] | Background color parsing (`#rgb`, `#rrggbb`, `rgb(r, g, b)`, `[r, g, b]`) |
//! | [`descriptor`] | One catalog entry: file name, link tag and JSON record derivation |
//! | [`catalog`] | The fixed, ordered list of icons to produce |
//! | [`source`] | Source extension checks and SVG rasterization via resvg |
//! | [`imaging`] | Pure-Rust compositing: fit, center, paste, encode PNG/ICO |
//! | [`generator`] | The orchestrator: validation, sequential or rayon fan-out rendering, projections |
//! | [`config`] | `favicons.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Built-In Catalog
//!
//! The icon list is a `static` array, not configuration. The set of sizes
//! browsers and platforms ask for changes rarely, and a fixed list keeps file
//! names stable across runs so markup pasted into a template never goes stale.
//!
//! ## Explicit Execution Mode
//!
//! [`generator::Generator::generate`] takes an [`types::ExecutionMode`].
//! Sequential mode stops at the first failure. Concurrent mode renders every
//! entry on the rayon pool and reports all failures together once the batch
//! has settled.
//!
//! ## Backend Trait
//!
//! Compositing goes through [`imaging::ImageBackend`], so the orchestrator is
//! tested against a recording mock without decoding a single pixel.

pub mod catalog;
pub mod color;
pub mod config;
pub mod descriptor;
pub mod generator;
pub mod imaging;
pub mod output;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
