/// Per-offset spatial distance factors for a square window, eqn (9) of Gao et al. (2006).
///
/// Each cell holds `sqrt(dr² + dc²) / spatial_impact_factor + 1`, so the center is exactly 1
/// and values grow with distance from it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialDistance {
    size: usize,
    table: Vec<f64>,
}

impl SpatialDistance {
    pub fn new(window_size: usize, spatial_impact_factor: f64) -> Self {
        let half = (window_size / 2) as f64;
        let mut table = Vec::with_capacity(window_size * window_size);

        for r in 0..window_size {
            let dr = r as f64 - half;
            for c in 0..window_size {
                let dc = c as f64 - half;
                table.push(dr.hypot(dc) / spatial_impact_factor + 1.0);
            }
        }

        Self {
            size: window_size,
            table,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.table
    }

    pub fn center(&self) -> f64 {
        let half = self.size / 2;
        self.table[half * self.size + half]
    }
}
