//! Icon set generation.
//!
//! A [`Generator`] turns one source image into every entry of the built-in
//! [catalog](crate::catalog) and exposes three projections of that catalog:
//! file names, `<link>` tags and serializable records.
//!
//! ## Lifecycle
//!
//! ```text
//! Generator::new      parse color, classify source extension   (no I/O)
//!     │
//! validate()          source exists, output dir created, SVG rasterized
//!     │               (idempotent, run implicitly by every render call)
//!     ▼
//! generate(mode)      one composite per catalog entry
//! ```
//!
//! ## Execution modes
//!
//! - [`ExecutionMode::Sequential`]: catalog order, first failure aborts with
//!   [`GenerateError::Render`]. Files already written stay on disk.
//! - [`ExecutionMode::Concurrent`]: one rayon task per entry. Every task runs
//!   to completion; failures come back together as
//!   [`GenerateError::Incomplete`].
//!
//! Either way the result carries how many icons that call wrote, while
//! [`Generator::completed`] keeps growing across calls.
//!
//! A rasterized SVG lives in a temporary file owned by the generator and is
//! removed when the generator is dropped.

use crate::catalog;
use crate::color::{Color, ColorError, ColorSpec};
use crate::descriptor::{IconDescriptor, IconRecord};
use crate::imaging::{BackendError, ImageBackend, RustBackend, create_icon};
use crate::source::{self, PreparedSource, SourceError};
use crate::types::{ExecutionMode, GenerateEvent};
use image::Rgba;
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    InvalidColor(#[from] ColorError),
    #[error(
        "Extension '.{extension}' is not supported ({}). Must be one of {}",
        path.display(),
        source::accepted_extensions().join(", ")
    )]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("Source image not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Source preparation failed: {0}")]
    Source(#[from] SourceError),
    #[error("Failed to render {filename} ({completed} completed): {source}")]
    Render {
        filename: String,
        completed: usize,
        source: BackendError,
    },
    #[error("{} icon(s) failed to render, {completed} completed", failures.len())]
    Incomplete {
        completed: usize,
        failures: Vec<RenderFailure>,
    },
}

/// One catalog entry that could not be rendered in concurrent mode.
#[derive(Debug)]
pub struct RenderFailure {
    pub filename: String,
    pub error: BackendError,
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.filename, self.error)
    }
}

/// User-facing generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    pub background_color: ColorSpec,
    /// Fill the canvas with a fully transparent version of the background.
    pub transparent: bool,
    /// Prepended verbatim to file names in links and prefixed name lists.
    pub base_url: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            background_color: ColorSpec::default(),
            transparent: true,
            base_url: "/".to_string(),
        }
    }
}

pub struct Generator<B: ImageBackend = RustBackend> {
    backend: B,
    source: PathBuf,
    output_dir: PathBuf,
    color: Color,
    transparent: bool,
    base_url: String,
    catalog: &'static [IconDescriptor],
    prepared: Option<PreparedSource>,
    validated: bool,
    completed: AtomicUsize,
}

impl Generator<RustBackend> {
    /// Build a generator using the pure Rust image backend.
    ///
    /// Fails on an unparseable background color or an unrecognized source
    /// extension. Neither path is touched.
    pub fn new(
        source: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        options: &GeneratorOptions,
    ) -> Result<Self, GenerateError> {
        Self::with_backend(RustBackend::new(), source, output_dir, options)
    }
}

impl<B: ImageBackend> Generator<B> {
    pub fn with_backend(
        backend: B,
        source: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        options: &GeneratorOptions,
    ) -> Result<Self, GenerateError> {
        let source = source.into();
        let color = options.background_color.parse()?;

        match source::classify(&source) {
            Ok(kind) => tracing::debug!(source = %source.display(), ?kind, "classified source"),
            Err(SourceError::UnsupportedFormat { path, extension }) => {
                return Err(GenerateError::UnsupportedFormat { path, extension });
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            backend,
            source,
            output_dir: output_dir.into(),
            color,
            transparent: options.transparent,
            base_url: options.base_url.clone(),
            catalog: catalog::all(),
            prepared: None,
            validated: false,
            completed: AtomicUsize::new(0),
        })
    }

    /// Check the source, create the output directory and rasterize a vector
    /// source. Later calls return immediately once one has succeeded.
    pub fn validate(&mut self) -> Result<(), GenerateError> {
        if self.validated {
            return Ok(());
        }

        if !self.source.exists() {
            return Err(GenerateError::SourceNotFound(self.source.clone()));
        }

        if !self.output_dir.is_dir() {
            std::fs::create_dir_all(&self.output_dir).map_err(|source| {
                GenerateError::OutputDirectory {
                    path: self.output_dir.clone(),
                    source,
                }
            })?;
            tracing::debug!(path = %self.output_dir.display(), "created output directory");
        }

        self.prepared = Some(source::prepare(&self.source, self.color)?);
        self.validated = true;
        Ok(())
    }

    /// Render a single descriptor into the output directory.
    ///
    /// Validates first if needed. Returns the written path.
    pub fn generate_one(&mut self, descriptor: &IconDescriptor) -> Result<PathBuf, GenerateError> {
        self.validate()?;
        self.render(descriptor)
            .map_err(|source| GenerateError::Render {
                filename: descriptor.filename(),
                completed: 0,
                source,
            })
    }

    /// Render the whole catalog. Returns how many icons this call wrote.
    pub fn generate(&mut self, mode: ExecutionMode) -> Result<usize, GenerateError> {
        self.generate_with_events(mode, None)
    }

    /// Render the whole catalog, reporting each settled entry on `events`.
    ///
    /// A closed receiver does not interrupt rendering.
    pub fn generate_with_events(
        &mut self,
        mode: ExecutionMode,
        events: Option<Sender<GenerateEvent>>,
    ) -> Result<usize, GenerateError> {
        self.validate()?;
        tracing::info!(?mode, icons = self.catalog.len(), "generating icon set");

        let before = self.completed();
        match mode {
            ExecutionMode::Sequential => self.run_sequential(events.as_ref(), before)?,
            ExecutionMode::Concurrent => self.run_concurrent(events, before)?,
        }

        let completed = self.completed() - before;
        tracing::info!(completed, "icon set generated");
        Ok(completed)
    }

    /// Sequential mode.
    pub fn generate_all(&mut self) -> Result<usize, GenerateError> {
        self.generate(ExecutionMode::Sequential)
    }

    /// Concurrent mode.
    pub fn generate_all_concurrent(&mut self) -> Result<usize, GenerateError> {
        self.generate(ExecutionMode::Concurrent)
    }

    /// `before` is the completed count when this batch started.
    fn run_sequential(
        &self,
        events: Option<&Sender<GenerateEvent>>,
        before: usize,
    ) -> Result<(), GenerateError> {
        for descriptor in self.catalog {
            let result = self.render(descriptor);
            notify(events, descriptor, &result);
            if let Err(source) = result {
                tracing::error!(icon = %descriptor, error = %source, "render failed, stopping");
                return Err(GenerateError::Render {
                    filename: descriptor.filename(),
                    completed: self.completed() - before,
                    source,
                });
            }
        }
        Ok(())
    }

    fn run_concurrent(
        &self,
        events: Option<Sender<GenerateEvent>>,
        before: usize,
    ) -> Result<(), GenerateError> {
        let failures: Vec<RenderFailure> = self
            .catalog
            .par_iter()
            .map_with(events, |events, descriptor| {
                let result = self.render(descriptor);
                notify(events.as_ref(), descriptor, &result);
                result.map(|_| ()).map_err(|error| RenderFailure {
                    filename: descriptor.filename(),
                    error,
                })
            })
            .filter_map(Result::err)
            .collect();

        if failures.is_empty() {
            return Ok(());
        }

        for failure in &failures {
            tracing::error!(icon = %failure.filename, error = %failure.error, "render failed");
        }
        Err(GenerateError::Incomplete {
            completed: self.completed() - before,
            failures,
        })
    }

    /// Composite one entry. Caller must have validated.
    fn render(&self, descriptor: &IconDescriptor) -> Result<PathBuf, BackendError> {
        let path = create_icon(
            &self.backend,
            self.normalized_source().unwrap_or(self.source.as_path()),
            &self.output_dir,
            descriptor,
            self.background(),
        )?;
        self.completed.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(icon = %descriptor, "rendered");
        Ok(path)
    }

    /// Canvas fill: the background color, fully transparent when requested.
    pub fn background(&self) -> Rgba<u8> {
        self.color.with_alpha(if self.transparent { 0 } else { 255 })
    }

    /// File names in catalog order, optionally prefixed with the base URL.
    ///
    /// Each call walks the catalog afresh.
    pub fn filenames(&self, include_prefix: bool) -> impl Iterator<Item = String> + '_ {
        self.catalog.iter().map(move |descriptor| {
            if include_prefix {
                format!("{}{}", self.base_url, descriptor.filename())
            } else {
                descriptor.filename()
            }
        })
    }

    /// One `<link>` tag per descriptor with a role, in catalog order.
    pub fn markup_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.catalog
            .iter()
            .filter_map(|descriptor| descriptor.link_tag(&self.base_url))
    }

    pub fn records(&self) -> Vec<IconRecord> {
        self.catalog.iter().map(IconDescriptor::to_record).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.records())
    }

    /// Icons written so far, across every generation call.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    pub fn catalog(&self) -> &'static [IconDescriptor] {
        self.catalog
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The raster file actually decoded. `None` until validated.
    pub fn normalized_source(&self) -> Option<&Path> {
        self.prepared.as_ref().map(PreparedSource::path)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn notify(
    events: Option<&Sender<GenerateEvent>>,
    descriptor: &IconDescriptor,
    result: &Result<PathBuf, BackendError>,
) {
    let Some(tx) = events else { return };
    let event = match result {
        Ok(_) => GenerateEvent::Rendered {
            filename: descriptor.filename(),
            dimensions: descriptor.dimensions(),
        },
        Err(e) => GenerateEvent::Failed {
            filename: descriptor.filename(),
            reason: e.to_string(),
        },
    };
    // Receiver gone means nobody is listening; rendering carries on.
    let _ = tx.send(event);
}
