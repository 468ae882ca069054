/// Center-pixel values a window's candidates are compared against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterValues {
    pub fine_t0: f64,
    pub spectral: f64,
    pub temporal: f64,
}

/// Picks the window pixels that may contribute to a weighted prediction.
///
/// A pixel is selected when it is spectrally similar to the center (eqn 14 of Gao et al. 2006)
/// AND its spectral difference is within the center's plus uncertainty (eqn 15), AND, with the
/// temporal term enabled, the same holds for its temporal difference (eqn 16). Padding pixels are
/// never selected. Some implementations combine eqn 15 and 16 with OR; the conjunction here is
/// the stricter reading of the paper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityFilter {
    pub spectral_threshold: f64,
    pub spectral_uncertainty: f64,
    pub temporal_uncertainty: f64,
    pub use_temporal: bool,
}

impl SimilarityFilter {
    /// Writes the selection mask into `selected` and returns how many cells were selected.
    ///
    /// All slices are flattened windows of the same length.
    pub fn select(
        &self,
        fine_t0: &[f64],
        center: CenterValues,
        spectral: &[f64],
        temporal: &[f64],
        valid: &[bool],
        selected: &mut Vec<bool>,
    ) -> usize {
        debug_assert_eq!(fine_t0.len(), spectral.len());
        debug_assert_eq!(fine_t0.len(), temporal.len());
        debug_assert_eq!(fine_t0.len(), valid.len());

        let spectral_limit = center.spectral + self.spectral_uncertainty;
        let temporal_limit = center.temporal + self.temporal_uncertainty;

        selected.clear();
        selected.extend((0..fine_t0.len()).map(|i| {
            let similar = (center.fine_t0 - fine_t0[i]).abs() < self.spectral_threshold;
            let quality = spectral[i] < spectral_limit;
            let temporal_ok = !self.use_temporal || temporal[i] < temporal_limit;

            similar && quality && temporal_ok && valid[i]
        }));

        selected.iter().filter(|&&s| s).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(threshold: f64, use_temporal: bool) -> SimilarityFilter {
        SimilarityFilter {
            spectral_threshold: threshold,
            spectral_uncertainty: 0.0,
            temporal_uncertainty: 0.0,
            use_temporal,
        }
    }

    #[test]
    fn requires_similarity_and_quality() {
        let fine = [10.0, 10.5, 20.0, 10.2];
        let spectral = [0.5, 3.0, 0.5, 0.5];
        let temporal = [0.0; 4];
        let valid = [true; 4];
        let center = CenterValues {
            fine_t0: 10.0,
            spectral: 1.0,
            temporal: 0.0,
        };
        let mut selected = Vec::new();

        let count = filter(1.0, false).select(&fine, center, &spectral, &temporal, &valid, &mut selected);

        // index 1 is similar but fails quality, index 2 passes quality but is not similar
        assert_eq!(selected, vec![true, false, false, true]);
        assert_eq!(count, 2);
    }

    #[test]
    fn temporal_term_only_when_enabled() {
        let fine = [10.0, 10.0];
        let spectral = [0.0, 0.0];
        let temporal = [0.5, 5.0];
        let valid = [true, true];
        let center = CenterValues {
            fine_t0: 10.0,
            spectral: 1.0,
            temporal: 1.0,
        };
        let mut selected = Vec::new();

        filter(1.0, false).select(&fine, center, &spectral, &temporal, &valid, &mut selected);
        assert_eq!(selected, vec![true, true]);

        filter(1.0, true).select(&fine, center, &spectral, &temporal, &valid, &mut selected);
        assert_eq!(selected, vec![true, false]);
    }

    #[test]
    fn uncertainty_relaxes_quality() {
        let fine = [10.0];
        let spectral = [2.0];
        let temporal = [3.0];
        let valid = [true];
        let center = CenterValues {
            fine_t0: 10.0,
            spectral: 1.5,
            temporal: 2.5,
        };
        let mut strict = filter(1.0, true);
        let mut selected = Vec::new();

        assert_eq!(strict.select(&fine, center, &spectral, &temporal, &valid, &mut selected), 0);

        strict.spectral_uncertainty = 1.0;
        strict.temporal_uncertainty = 1.0;
        assert_eq!(strict.select(&fine, center, &spectral, &temporal, &valid, &mut selected), 1);
    }

    #[test]
    fn padding_never_selected() {
        let fine = [10.0, 10.0, 10.0];
        let zeros = [0.0; 3];
        let valid = [false, true, false];
        let center = CenterValues {
            fine_t0: 10.0,
            spectral: 0.0,
            temporal: 0.0,
        };
        let mut loose = filter(f64::MAX, true);
        loose.spectral_uncertainty = 1.0;
        loose.temporal_uncertainty = 1.0;
        let mut selected = Vec::new();

        let count = loose.select(&fine, center, &zeros, &zeros, &valid, &mut selected);
        assert_eq!(count, 1);
        assert_eq!(selected, vec![false, true, false]);
    }

    #[test]
    fn zero_threshold_selects_nothing() {
        let fine = [7.0; 9];
        let zeros = [0.0; 9];
        let valid = [true; 9];
        let center = CenterValues {
            fine_t0: 7.0,
            spectral: 0.0,
            temporal: 0.0,
        };
        let mut selected = Vec::new();

        assert_eq!(
            filter(0.0, false).select(&fine, center, &zeros, &zeros, &valid, &mut selected),
            0
        );
    }
}
