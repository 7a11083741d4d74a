use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use webpify::config::{self, AppConfig};
use webpify::convert::Converter;
use webpify::save::{DirectorySink, save_result};
use webpify::session::{PreviewOutcome, Session};
use webpify::stats::ConversionStats;
use webpify::target::TargetSpec;
use webpify::types::{MediaType, SourceImage};
use webpify::{output, validate};

/// Declared type for files whose extension says nothing, as a browser would.
const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Parser)]
#[command(name = "webpify")]
#[command(about = "Convert PNG/JPEG images to WebP")]
#[command(long_about = "\
Convert PNG/JPEG images to WebP

Accepts PNG and JPEG files up to 10 MB. Every output is lossy WebP at
quality 0.8. Fixed sizes are exact canvases: the image is scaled to fit,
centered, and padded with white.

Sizes:
  1920x1080   Hero/Banner
  1200x800    Blog Post
  300x300     Thumbnail
  100x100     Icon
  original    Same dimensions as the source

Outputs are named {base}_{size}.webp, where base is the file name up to its
first dot (holiday.2024.jpg → holiday_300x300.webp).

Run 'webpify gen-config' to generate a documented webpify.toml.")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./webpify.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory (overrides output_dir from the config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// The image to work on.
#[derive(clap::Args, Clone)]
struct InputArgs {
    /// PNG or JPEG file
    file: PathBuf,

    /// Declared media type (default: derived from the file extension)
    #[arg(long, value_name = "TYPE")]
    media_type: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether a file would be accepted
    Check(InputArgs),
    /// Convert at original size and report the saving, without writing files
    Convert {
        #[command(flatten)]
        input: InputArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert to one or more sizes and save each as {base}_{size}.webp
    Download {
        #[command(flatten)]
        input: InputArgs,

        /// Size to produce (repeatable): 1920x1080, 1200x800, 300x300, 100x100, original
        #[arg(
            long = "size",
            value_name = "SIZE",
            required_unless_present = "all",
            conflicts_with = "all"
        )]
        sizes: Vec<TargetSpec>,

        /// Produce every size on the menu
        #[arg(long)]
        all: bool,
    },
    /// List the available output sizes
    Sizes,
    /// Print a stock webpify.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        config: config_path,
        output: output_override,
        command,
    } = Cli::parse();

    match command {
        Command::Sizes => {
            output::print_size_menu();
            return Ok(());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        _ => {}
    }

    let app_config = load_app_config(config_path.as_deref())?;
    init_tracing(&app_config.logging);
    let output_dir = output_override.unwrap_or_else(|| PathBuf::from(&app_config.output_dir));

    let runtime = build_runtime(&app_config.processing)?;
    runtime.block_on(async move {
        match command {
            Command::Check(input) => check(&input),
            Command::Convert { input, json } => convert(&input, json).await,
            Command::Download { input, sizes, all } => {
                let targets = if all {
                    TargetSpec::all().collect()
                } else {
                    dedup(sizes)
                };
                download(&input, &targets, &output_dir).await
            }
            Command::Sizes | Command::GenConfig => Ok(()),
        }
    })
}

/// Load the config file. An explicitly named file must exist; the default
/// one is optional.
fn load_app_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) if !path.exists() => {
            Err(format!("config file not found: {}", path.display()).into())
        }
        Some(path) => Ok(config::load_config(path)?),
        None => Ok(config::load_config(Path::new(config::DEFAULT_CONFIG_FILE))?),
    }
}

/// Logs go to stderr so `--json` output stays clean. `RUST_LOG` wins over the
/// configured filter.
fn init_tracing(logging: &config::LoggingConfig) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build the tokio runtime with the blocking pool sized by processing config.
///
/// Decode and encode run on the blocking pool, so its size is the number of
/// conversions that can make progress at once.
fn build_runtime(
    processing: &config::ProcessingConfig,
) -> std::io::Result<tokio::runtime::Runtime> {
    let threads = config::effective_threads(processing);
    tracing::debug!(threads, "starting runtime");
    tokio::runtime::Builder::new_multi_thread()
        .max_blocking_threads(threads)
        .enable_all()
        .build()
}

/// Keep the first occurrence of each size, in the order given.
fn dedup(sizes: Vec<TargetSpec>) -> Vec<TargetSpec> {
    let mut out = Vec::with_capacity(sizes.len());
    for size in sizes {
        if !out.contains(&size) {
            out.push(size);
        }
    }
    out
}

fn declared_type(input: &InputArgs) -> String {
    if let Some(media_type) = &input.media_type {
        return media_type.clone();
    }
    input
        .file
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(MediaType::from_extension)
        .map(|t| t.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_MEDIA_TYPE.to_string())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Validate against the file's length, then read it. Oversized files are
/// rejected before their bytes are loaded.
fn load_source(input: &InputArgs) -> Result<SourceImage, Box<dyn std::error::Error>> {
    let declared = declared_type(input);
    let byte_len = std::fs::metadata(&input.file)?.len();
    validate::check(&declared, byte_len)?;
    let bytes = std::fs::read(&input.file)?;
    Ok(SourceImage::accept(display_name(&input.file), &declared, bytes)?)
}

fn check(input: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let declared = declared_type(input);
    let byte_len = std::fs::metadata(&input.file)?.len();
    let verdict = validate::check(&declared, byte_len);
    output::print_check(&display_name(&input.file), &declared, byte_len, &verdict);
    verdict?;
    Ok(())
}

async fn convert(input: &InputArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let converter = Converter::new();
    let mut session = Session::new();
    session.select(load_source(input)?);

    let ticket = session
        .begin_preview()
        .ok_or("no image selected for conversion")?;
    let result = converter.convert_preview(ticket.source()).await;
    let failure = result.as_ref().err().map(|e| e.to_string());

    match session.finish_preview(ticket, result) {
        PreviewOutcome::Attached => {}
        PreviewOutcome::Failed => {
            return Err(failure.unwrap_or_else(|| "conversion failed".into()).into());
        }
        PreviewOutcome::Discarded => return Err("conversion result was discarded".into()),
    }

    let (Some(source), Some(preview)) = (session.source(), session.preview()) else {
        return Err("conversion produced no preview".into());
    };
    let stats = ConversionStats::new(&source, &preview);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        output::print_conversion(&stats);
    }
    Ok(())
}

async fn download(
    input: &InputArgs,
    targets: &[TargetSpec],
    output_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let converter = Converter::new();
    let mut session = Session::new();
    let id = session.select(load_source(input)?);
    let source = session.source().ok_or("no image selected for download")?;
    let sink = DirectorySink::new(output_dir);

    let mut tasks = tokio::task::JoinSet::new();
    for &target in targets {
        let converter = converter.clone();
        let source = Arc::clone(&source);
        tasks.spawn(async move { (target, converter.convert_for_size(source, target).await) });
    }

    let mut saved = 0;
    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        let (target, result) = joined?;
        let encoded = match result {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!(size = %target, "conversion failed: {e}");
                failed += 1;
                continue;
            }
        };
        let Some(encoded) = session.accept_download(id, encoded) else {
            continue;
        };
        match save_result(&sink, &source, &encoded) {
            Ok(path) => {
                println!("{}", output::format_saved(target, &path, encoded.byte_len()));
                saved += 1;
            }
            Err(e) => {
                tracing::error!(size = %target, "save failed: {e}");
                failed += 1;
            }
        }
    }

    println!("{}", output::format_download_summary(saved, failed));
    if failed > 0 {
        return Err(format!("{failed} of {} sizes failed", targets.len()).into());
    }
    Ok(())
}
