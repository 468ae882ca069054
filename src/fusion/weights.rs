/// The synthesized weights had no finite positive normaliser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateWeights;

/// Normalized inverse combined distance for every selected cell, eqn (11) of Gao et al. (2006).
///
/// `weights` receives one entry per selected cell in window order and sums to one. At least one
/// cell must be selected.
pub fn synthesize_weights(
    spectral: &[f64],
    temporal: &[f64],
    use_temporal: bool,
    spatial: &[f64],
    selected: &[bool],
    weights: &mut Vec<f64>,
) -> Result<(), DegenerateWeights> {
    debug_assert_eq!(spectral.len(), selected.len());
    debug_assert_eq!(spatial.len(), selected.len());

    weights.clear();
    for (i, _) in selected.iter().enumerate().filter(|&(_, &s)| s) {
        let temporal_dist = if use_temporal { temporal[i] + 1.0 } else { 1.0 };
        let combined = (spectral[i] + 1.0) * spatial[i] * temporal_dist;

        if !(combined.is_finite() && combined > 0.0) {
            return Err(DegenerateWeights);
        }
        weights.push(1.0 / combined);
    }

    let sum: f64 = weights.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return Err(DegenerateWeights);
    }

    for w in weights.iter_mut() {
        *w /= sum;
    }

    Ok(())
}
