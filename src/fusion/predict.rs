/// Weighted STARFM prediction over the selected cells.
///
/// Each selected cell contributes `coarse_t1 + fine_t0 - coarse_t0`; `weights` holds one entry per
/// selected cell in window order.
pub fn predict_weighted(
    weights: &[f64],
    fine_t0: &[f64],
    coarse_t0: &[f64],
    coarse_t1: &[f64],
    selected: &[bool],
) -> f64 {
    selected
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s)
        .zip(weights)
        .map(|((i, _), &w)| w * (coarse_t1[i] + fine_t0[i] - coarse_t0[i]))
        .sum()
}

/// Local additive prediction from the center pixel alone.
#[inline]
pub fn predict_unweighted(fine_t0: f64, coarse_t0: f64, coarse_t1: f64) -> f64 {
    coarse_t1 + fine_t0 - coarse_t0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unweighted_is_additive() {
        assert_eq!(predict_unweighted(100.0, 80.0, 90.0), 110.0);
        assert_relative_eq!(predict_unweighted(0.25, 0.3, 0.3), 0.25);
    }

    #[test]
    fn weighted_skips_unselected() {
        let fine = [1.0, 100.0, 3.0];
        let coarse_t0 = [1.0, 100.0, 2.0];
        let coarse_t1 = [2.0, 500.0, 4.0];
        let selected = [true, false, true];

        // local predictions 2 and 5
        let value = predict_weighted(&[0.25, 0.75], &fine, &coarse_t0, &coarse_t1, &selected);
        assert_relative_eq!(value, 0.25 * 2.0 + 0.75 * 5.0);
    }

    #[test]
    fn uniform_change_is_preserved() {
        let fine = [10.0, 12.0, 14.0];
        let coarse_t0 = [11.0, 11.0, 11.0];
        let coarse_t1 = [16.0, 16.0, 16.0];
        let selected = [true, true, true];
        let weights = [0.2, 0.3, 0.5];

        let value = predict_weighted(&weights, &fine, &coarse_t0, &coarse_t1, &selected);
        assert_relative_eq!(value, 0.2 * 15.0 + 0.3 * 17.0 + 0.5 * 19.0);
    }
}
