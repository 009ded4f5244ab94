use clap::{Parser, Subcommand};
use favicons::color::ColorSpec;
use favicons::config::{self, ConfigError, FaviconsConfig};
use favicons::generator::{GenerateError, Generator};
use favicons::output;
use favicons::types::ExecutionMode;
use std::path::{Path, PathBuf};

/// Shared flags for every command that works on a source image.
#[derive(clap::Args, Clone)]
struct IconArgs {
    /// Source image (svg, png, jpg, jpeg, tif, tiff)
    #[arg(long)]
    source: PathBuf,

    /// Output directory for the generated icons
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Canvas color: "#rgb", "#rrggbb" or "rgb(r, g, b)"
    #[arg(long)]
    background_color: Option<String>,

    /// Fully transparent canvas (true) or opaque background color (false)
    #[arg(long)]
    transparent: Option<bool>,

    /// Prefix for link hrefs and prefixed names
    #[arg(long)]
    base_url: Option<String>,

    /// Config file (defaults to ./favicons.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "favicons")]
#[command(about = "Generate favicons and platform icons from a single image")]
#[command(long_about = "\
Generate favicons and platform icons from a single image

One source (SVG or raster) becomes the whole icon set: favicon.ico, generic
PNG favicons, Apple touch icons, Windows tiles and a shortcut icon. Each is
the source shrunk to fit (never enlarged) and centered on a canvas of the
background color.

Settings come from favicons.toml (optional), then command-line flags.
Run 'favicons gen-config' to print a documented favicons.toml.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every icon into the output directory
    Generate {
        #[command(flatten)]
        args: IconArgs,

        /// Render icons in parallel instead of one after another
        #[arg(long)]
        concurrent: bool,
    },
    /// Print the icon records as JSON
    Json(IconArgs),
    /// Print the icon file names
    Names {
        #[command(flatten)]
        args: IconArgs,

        /// Prepend the base URL to every name
        #[arg(long)]
        prefixed: bool,
    },
    /// Print the <link> tags for an HTML <head>
    Html(IconArgs),
    /// Print a stock favicons.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { args, concurrent } => {
            let config = resolve_config(&args)?;
            init_thread_pool(&config.processing);
            let mut generator =
                Generator::new(&args.source, &args.output, &config.generator_options())?;

            let mode = if concurrent {
                ExecutionMode::Concurrent
            } else {
                ExecutionMode::Sequential
            };
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for (index, event) in rx.into_iter().enumerate() {
                    output::print_generate_event(index + 1, &event);
                }
            });
            let result = generator.generate_with_events(mode, Some(tx));
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;

            match result {
                Ok(completed) => output::print_generate_summary(
                    completed,
                    generator.output_dir(),
                    generator.filenames(false),
                ),
                Err(e) => {
                    if let GenerateError::Incomplete { failures, .. } = &e {
                        output::print_failures(failures);
                    }
                    return Err(e.into());
                }
            }
        }
        Command::Json(args) => {
            let generator = build_generator(&args)?;
            output::print_json(&generator.records())?;
        }
        Command::Names { args, prefixed } => {
            let generator = build_generator(&args)?;
            output::print_names(generator.filenames(prefixed));
        }
        Command::Html(args) => {
            let generator = build_generator(&args)?;
            output::print_html(generator.markup_lines());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG`, so stdout stays clean for piping.
fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Config file first, then command-line overrides, validated together.
fn resolve_config(args: &IconArgs) -> Result<FaviconsConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(Path::new("."))?,
    };

    if let Some(color) = &args.background_color {
        config.background_color = ColorSpec::from(color.as_str());
    }
    if let Some(transparent) = args.transparent {
        config.transparent = transparent;
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Generator for the read-only commands. Nothing is validated or written.
fn build_generator(args: &IconArgs) -> Result<Generator, Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    Ok(Generator::new(
        &args.source,
        &args.output,
        &config.generator_options(),
    )?)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
