use crate::error::{FusionError, Result};
use crate::raster::Raster;

/// Spectral similarity threshold: `2 * σ(fine_t0) / n_classes`.
///
/// σ is the population standard deviation over every cell, fill values included.
pub fn spectral_threshold(fine_t0: &Raster, n_classes: usize) -> Result<f64> {
    if n_classes == 0 {
        return Err(FusionError::ZeroClasses);
    }
    if fine_t0.is_empty() {
        return Err(FusionError::EmptyRaster);
    }

    let threshold = std_dev(fine_t0.data()) * 2.0 / n_classes as f64;
    if !threshold.is_finite() {
        return Err(FusionError::NonFiniteThreshold(threshold));
    }

    Ok(threshold)
}

// shifted two-pass: a constant scene gives exactly zero, whatever its value
fn std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let shift = values[0];
    let mean = values.iter().map(|&v| v - shift).sum::<f64>() / n;
    let var = values
        .iter()
        .map(|&v| {
            let d = v - shift - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    var.sqrt()
}
