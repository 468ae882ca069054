use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use starfm::{io, Backend, FusionParams, Parallel, Raster, Sequential, Starfm};

/// Predict a fine-resolution image at t1 with STARFM.
#[derive(Debug, Parser)]
#[command(name = "starfm-cli", version, about, long_about = None)]
struct Cli {
    /// Fine-resolution image at t0
    #[arg(long)]
    fine_t0: PathBuf,

    /// Coarse-resolution image at t0, resampled to the fine grid
    #[arg(long)]
    coarse_t0: PathBuf,

    /// Coarse-resolution image at t1, resampled to the fine grid
    #[arg(long)]
    coarse_t1: PathBuf,

    /// Where to write the predicted fine image at t1
    #[arg(short, long)]
    output: PathBuf,

    /// Search window size in pixels (odd)
    #[arg(short, long, default_value_t = 31)]
    window_size: usize,

    /// Value marking invalid pixels
    #[arg(long, default_value_t = -9999.0, allow_hyphen_values = true)]
    mask_val: f64,

    /// Ignore the temporal difference when filtering and weighting
    #[arg(long)]
    no_temporal: bool,

    #[arg(long, default_value_t = 0.0)]
    spectral_uncertainty: f64,

    #[arg(long, default_value_t = 0.0)]
    temporal_uncertainty: f64,

    /// Spatial distance divisor; smaller values favour nearby pixels
    #[arg(long, default_value_t = 25.0)]
    spatial_impact_factor: f64,

    /// Number of classes for the spectral similarity threshold
    #[arg(short, long, default_value_t = 4)]
    n_classes: usize,

    /// Spread rows over all cores
    #[arg(short, long)]
    parallel: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn params(&self) -> FusionParams {
        FusionParams::default()
            .with_window_size(self.window_size)
            .with_mask_val(self.mask_val)
            .with_temporal(!self.no_temporal)
            .with_uncertainties(self.spectral_uncertainty, self.temporal_uncertainty)
            .with_spatial_impact_factor(self.spatial_impact_factor)
            .with_classes(self.n_classes)
    }
}

fn load(path: &Path) -> anyhow::Result<Raster> {
    io::read_raster(path).with_context(|| format!("loading {}", path.display()))
}

fn fuse<B: Backend>(cli: &Cli, backend: B) -> anyhow::Result<Raster> {
    let fine_t0 = load(&cli.fine_t0)?;
    let coarse_t0 = load(&cli.coarse_t0)?;
    let coarse_t1 = load(&cli.coarse_t1)?;

    let fusion = Starfm::with_backend(cli.params(), backend);
    log::debug!("parameters: {:?}", fusion.params());

    let (fine_t1, report) = fusion
        .run_with_report(&fine_t0, &coarse_t0, &coarse_t1)
        .context("fusion failed")?;

    log::info!(
        "threshold {:.6}, {} weighted / {} fallback pixels in {:.2?}",
        report.spectral_threshold,
        report.weighted_pixels,
        report.fallback_pixels,
        report.elapsed
    );

    Ok(fine_t1)
}

pub fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let fine_t1 = if cli.parallel {
        fuse(&cli, Parallel)?
    } else {
        fuse(&cli, Sequential)?
    };

    io::write_raster(&cli.output, &fine_t1)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    log::info!("Wrote {}", cli.output.display());

    Ok(())
}
