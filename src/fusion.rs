use std::time::{Duration, Instant};

use crate::backend::{Backend, RowStats, Sequential};
use crate::error::{FusionError, Result};
use crate::params::FusionParams;
use crate::raster::Raster;

mod difference;
mod filter;
mod predict;
mod spatial;
mod threshold;
mod weights;

pub use difference::{spectral_difference, temporal_difference};
pub use filter::{CenterValues, SimilarityFilter};
pub use predict::{predict_unweighted, predict_weighted};
pub use spatial::SpatialDistance;
pub use threshold::spectral_threshold;
pub use weights::{synthesize_weights, DegenerateWeights};

/// Summary of a completed fusion run.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionReport {
    pub spectral_threshold: f64,
    pub weighted_pixels: usize,
    pub fallback_pixels: usize,
    pub elapsed: Duration,
}

/// STARFM driver: predicts the fine image at t1 from a fine/coarse pair at t0 and a coarse image
/// at t1.
#[derive(Debug, Clone)]
pub struct Starfm<B: Backend = Sequential> {
    params: FusionParams,
    backend: B,
}

impl Starfm<Sequential> {
    pub fn new(params: FusionParams) -> Self {
        Self::with_backend(params, Sequential)
    }
}

impl<B: Backend> Starfm<B> {
    pub fn with_backend(params: FusionParams, backend: B) -> Self {
        Self { params, backend }
    }

    pub fn params(&self) -> &FusionParams {
        &self.params
    }

    pub fn run(&self, fine_t0: &Raster, coarse_t0: &Raster, coarse_t1: &Raster) -> Result<Raster> {
        self.run_with_report(fine_t0, coarse_t0, coarse_t1)
            .map(|(raster, _)| raster)
    }

    pub fn run_with_report(
        &self,
        fine_t0: &Raster,
        coarse_t0: &Raster,
        coarse_t1: &Raster,
    ) -> Result<(Raster, FusionReport)> {
        let started = Instant::now();
        let params = &self.params;

        params.validate()?;
        check_inputs(fine_t0, coarse_t0, coarse_t1, params.mask_val)?;

        let (rows, cols) = fine_t0.shape();
        log::info!(
            "Fusing {}x{} scene, window {}, {} backend",
            rows,
            cols,
            params.window_size,
            self.backend.name()
        );

        let spatial = SpatialDistance::new(params.window_size, params.spatial_impact_factor);
        let threshold = spectral_threshold(fine_t0, params.n_classes)?;
        log::debug!("spectral threshold: {threshold}");

        let half = params.half_window();
        let scene = Scene {
            fine_t0: fine_t0.padded(half, params.mask_val),
            coarse_t0: coarse_t0.padded(half, params.mask_val),
            coarse_t1: coarse_t1.padded(half, params.mask_val),
            spatial: &spatial,
            filter: SimilarityFilter {
                spectral_threshold: threshold,
                spectral_uncertainty: params.spectral_uncertainty,
                temporal_uncertainty: params.temporal_uncertainty,
                use_temporal: params.use_temporal,
            },
            window_size: params.window_size,
            mask_val: params.mask_val,
        };

        let mut output = vec![0.0; rows * cols];
        let stats = self
            .backend
            .map_rows(&mut output, cols, |row, cells| scene.predict_row(row, cells))?;

        let report = FusionReport {
            spectral_threshold: threshold,
            weighted_pixels: stats.weighted,
            fallback_pixels: stats.fallback,
            elapsed: started.elapsed(),
        };
        log::info!(
            "Fusion finished in {:.2?}: {} weighted, {} fallback pixels",
            report.elapsed,
            report.weighted_pixels,
            report.fallback_pixels
        );

        Ok((Raster::new(rows, cols, output)?, report))
    }
}

/// Sequential STARFM over three co-registered rasters of the same shape.
pub fn starfm(
    fine_t0: &Raster,
    coarse_t0: &Raster,
    coarse_t1: &Raster,
    params: &FusionParams,
) -> Result<Raster> {
    Starfm::new(params.clone()).run(fine_t0, coarse_t0, coarse_t1)
}

/// Shapes must agree and every sample must be finite unless it is the mask value.
fn check_inputs(
    fine_t0: &Raster,
    coarse_t0: &Raster,
    coarse_t1: &Raster,
    mask_val: f64,
) -> Result<()> {
    if fine_t0.is_empty() {
        return Err(FusionError::EmptyRaster);
    }

    for (name, raster) in [("coarse_t0", coarse_t0), ("coarse_t1", coarse_t1)] {
        if raster.shape() != fine_t0.shape() {
            return Err(FusionError::ShapeMismatch {
                name,
                expected: fine_t0.shape(),
                actual: raster.shape(),
            });
        }
    }

    let cols = fine_t0.cols();
    for (name, raster) in [
        ("fine_t0", fine_t0),
        ("coarse_t0", coarse_t0),
        ("coarse_t1", coarse_t1),
    ] {
        if let Some(i) = raster
            .data()
            .iter()
            .position(|&v| !v.is_finite() && v != mask_val)
        {
            return Err(FusionError::NonFiniteSample {
                name,
                row: i / cols,
                col: i % cols,
            });
        }
    }

    Ok(())
}

enum Prediction {
    Weighted(f64),
    Fallback(f64),
}

/// Padded inputs and run-wide tables, shared read-only by all rows.
struct Scene<'a> {
    fine_t0: Raster,
    coarse_t0: Raster,
    coarse_t1: Raster,
    spatial: &'a SpatialDistance,
    filter: SimilarityFilter,
    window_size: usize,
    mask_val: f64,
}

/// Per-window buffers, reused from pixel to pixel within a row.
#[derive(Default)]
struct Scratch {
    fine_t0: Vec<f64>,
    coarse_t0: Vec<f64>,
    coarse_t1: Vec<f64>,
    spectral: Vec<f64>,
    temporal: Vec<f64>,
    valid: Vec<bool>,
    selected: Vec<bool>,
    weights: Vec<f64>,
}

impl Scene<'_> {
    fn predict_row(&self, row: usize, cells: &mut [f64]) -> Result<RowStats> {
        let mut scratch = Scratch::default();
        let mut stats = RowStats::default();

        for (col, cell) in cells.iter_mut().enumerate() {
            *cell = match self.predict_pixel(row, col, &mut scratch)? {
                Prediction::Weighted(value) => {
                    stats.weighted += 1;
                    value
                }
                Prediction::Fallback(value) => {
                    stats.fallback += 1;
                    value
                }
            };
        }

        Ok(stats)
    }

    fn predict_pixel(&self, row: usize, col: usize, s: &mut Scratch) -> Result<Prediction> {
        let size = self.window_size;
        let half = size / 2;

        // output (row, col) sits at (row + half, col + half) in the padded rasters
        let fine_t0 = self.fine_t0.window(row, col, size);
        let coarse_t0 = self.coarse_t0.window(row, col, size);
        let coarse_t1 = self.coarse_t1.window(row, col, size);

        fine_t0.flatten_into(&mut s.fine_t0);
        s.valid.clear();
        s.valid.extend(s.fine_t0.iter().map(|&v| v != self.mask_val));

        let center = CenterValues {
            fine_t0: fine_t0.center(),
            spectral: spectral_difference(&fine_t0, &coarse_t0, half, half, &mut s.spectral),
            temporal: temporal_difference(&coarse_t0, &coarse_t1, half, half, &mut s.temporal),
        };

        let selected = self.filter.select(
            &s.fine_t0,
            center,
            &s.spectral,
            &s.temporal,
            &s.valid,
            &mut s.selected,
        );

        if selected == 0 {
            return Ok(Prediction::Fallback(predict_unweighted(
                center.fine_t0,
                coarse_t0.center(),
                coarse_t1.center(),
            )));
        }

        synthesize_weights(
            &s.spectral,
            &s.temporal,
            self.filter.use_temporal,
            self.spatial.as_slice(),
            &s.selected,
            &mut s.weights,
        )
        .map_err(|DegenerateWeights| FusionError::DegenerateWeights { row, col })?;

        coarse_t0.flatten_into(&mut s.coarse_t0);
        coarse_t1.flatten_into(&mut s.coarse_t1);

        Ok(Prediction::Weighted(predict_weighted(
            &s.weights,
            &s.fine_t0,
            &s.coarse_t0,
            &s.coarse_t1,
            &s.selected,
        )))
    }
}
