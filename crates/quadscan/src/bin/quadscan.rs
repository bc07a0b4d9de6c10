use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use quadscan::detect::{self, DetectError};
use quadscan::overlay::{draw_quadrilateral, OverlayStyle};
use quadscan::{CandidateStrategy, ConfigError, LocateConfig, LocateMode, LocateReport};

#[cfg(feature = "tracing")]
use quadscan::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use quadscan::core::init_from_name;

/// Locate a document in an image by its corner markers or by its outline.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image (PNG or JPEG).
    image: PathBuf,
    /// JSON config; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the locate mode from the config.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Override the marker candidate strategy from the config.
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    /// Override the marker band height from the config.
    #[arg(long)]
    band_height: Option<i32>,
    /// Write a copy of the image with the located outline drawn on it.
    #[arg(long)]
    overlay: Option<PathBuf>,
    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Emit tracing output as JSON lines.
    #[cfg(feature = "tracing")]
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ModeArg {
    Markers,
    Outline,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum StrategyArg {
    EllipseFit,
    HoughCircles,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write overlay: {0}")]
    Overlay(#[from] image::ImageError),
}

fn main() -> ExitCode {
    let args = Args::parse();

    #[cfg(not(feature = "tracing"))]
    if let Err(err) = init_from_name(&args.log_level) {
        eprintln!("logger: {err}");
    }
    #[cfg(feature = "tracing")]
    init_tracing(args.json_logs);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => LocateConfig::load_json(path)?,
        None => LocateConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = match mode {
            ModeArg::Markers => LocateMode::Markers,
            ModeArg::Outline => LocateMode::Outline,
        };
    }
    if let Some(strategy) = args.strategy {
        config.markers.strategy = match strategy {
            StrategyArg::EllipseFit => CandidateStrategy::EllipseFit,
            StrategyArg::HoughCircles => CandidateStrategy::HoughCircles,
        };
    }
    if let Some(band_height) = args.band_height {
        config.markers.band_height = band_height;
    }

    let img = detect::load_image(&args.image)?;
    let located = detect::locate_in_image(&img, &config)?;
    log::info!(
        "{}: mode={:?} found={}",
        args.image.display(),
        located.mode(),
        located.is_found()
    );

    if let Some(path) = &args.overlay {
        let rgb = img.to_rgb8();
        let drawn = match located.quad() {
            Some(quad) => draw_quadrilateral(&rgb, &quad, &OverlayStyle::default()),
            None => rgb,
        };
        drawn.save(path)?;
    }

    let report = LocateReport::new(img.width() as usize, img.height() as usize, located)
        .with_image_path(args.image.display().to_string());
    match &args.report {
        Some(path) => report.write_json(path)?,
        None => println!("{}", report.to_json_pretty()?),
    }
    Ok(())
}
