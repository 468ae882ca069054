use crate::error::{FusionError, Result};

/// Tuning knobs of a fusion run.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionParams {
    /// Side of the square search window, odd.
    pub window_size: usize,
    /// Sentinel marking invalid pixels and the padding around the scene.
    pub mask_val: f64,
    /// Include the coarse temporal difference in filtering and weighting.
    pub use_temporal: bool,
    /// Slack on the spectral difference, eqn (15) of Gao et al. (2006).
    pub spectral_uncertainty: f64,
    /// Slack on the temporal difference, eqn (16) of Gao et al. (2006).
    pub temporal_uncertainty: f64,
    /// Spatial distance divisor in pixel units; smaller values weight distance more.
    pub spatial_impact_factor: f64,
    /// Number of classes used to derive the spectral similarity threshold.
    pub n_classes: usize,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            window_size: 31,
            mask_val: -9999.0,
            use_temporal: true,
            spectral_uncertainty: 0.0,
            temporal_uncertainty: 0.0,
            spatial_impact_factor: 25.0,
            n_classes: 4,
        }
    }
}

impl FusionParams {
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_mask_val(mut self, mask_val: f64) -> Self {
        self.mask_val = mask_val;
        self
    }

    pub fn with_temporal(mut self, use_temporal: bool) -> Self {
        self.use_temporal = use_temporal;
        self
    }

    pub fn with_uncertainties(mut self, spectral: f64, temporal: f64) -> Self {
        self.spectral_uncertainty = spectral;
        self.temporal_uncertainty = temporal;
        self
    }

    pub fn with_spatial_impact_factor(mut self, factor: f64) -> Self {
        self.spatial_impact_factor = factor;
        self
    }

    pub fn with_classes(mut self, n_classes: usize) -> Self {
        self.n_classes = n_classes;
        self
    }

    #[inline]
    pub fn half_window(&self) -> usize {
        self.window_size.saturating_sub(1) / 2
    }

    /// Rejects configurations that cannot produce a finite prediction.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(FusionError::ZeroWindowSize);
        }
        if self.window_size % 2 == 0 {
            return Err(FusionError::EvenWindowSize(self.window_size));
        }
        if self.n_classes == 0 {
            return Err(FusionError::ZeroClasses);
        }
        if self.mask_val.is_nan() {
            return Err(FusionError::InvalidParameter {
                name: "mask_val",
                value: self.mask_val,
            });
        }
        if !(self.spatial_impact_factor.is_finite() && self.spatial_impact_factor > 0.0) {
            return Err(FusionError::InvalidParameter {
                name: "spatial_impact_factor",
                value: self.spatial_impact_factor,
            });
        }

        for (name, value) in [
            ("spectral_uncertainty", self.spectral_uncertainty),
            ("temporal_uncertainty", self.temporal_uncertainty),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FusionError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = FusionParams::default();
        params.validate().unwrap();
        assert_eq!(params.half_window(), 15);
    }

    #[test]
    fn half_window_of_one_is_zero() {
        assert_eq!(FusionParams::default().with_window_size(1).half_window(), 0);
    }

    #[test]
    fn rejects_bad_window() {
        let even = FusionParams::default().with_window_size(4);
        assert!(matches!(
            even.validate(),
            Err(FusionError::EvenWindowSize(4))
        ));

        let zero = FusionParams::default().with_window_size(0);
        assert!(matches!(zero.validate(), Err(FusionError::ZeroWindowSize)));
    }

    #[test]
    fn rejects_zero_classes() {
        let params = FusionParams::default().with_classes(0);
        assert!(matches!(params.validate(), Err(FusionError::ZeroClasses)));
    }

    #[test]
    fn rejects_non_positive_impact_factor() {
        for factor in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let params = FusionParams::default().with_spatial_impact_factor(factor);
            assert!(matches!(
                params.validate(),
                Err(FusionError::InvalidParameter {
                    name: "spatial_impact_factor",
                    ..
                })
            ));
        }
    }

    #[test]
    fn rejects_negative_uncertainty() {
        let params = FusionParams::default().with_uncertainties(0.5, -0.1);
        assert!(matches!(
            params.validate(),
            Err(FusionError::InvalidParameter {
                name: "temporal_uncertainty",
                ..
            })
        ));
    }

    #[test]
    fn rejects_nan_mask() {
        let params = FusionParams::default().with_mask_val(f64::NAN);
        assert!(params.validate().is_err());
    }
}
