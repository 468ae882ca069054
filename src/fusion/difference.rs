use crate::raster::Window;

/// `|fine_t0 - coarse_t0|` per window cell, written row-major into `out`.
///
/// Returns the difference at `(center_row, center_col)`.
pub fn spectral_difference(
    fine_t0: &Window,
    coarse_t0: &Window,
    center_row: usize,
    center_col: usize,
    out: &mut Vec<f64>,
) -> f64 {
    abs_difference(fine_t0, coarse_t0, center_row, center_col, out)
}

/// `|coarse_t1 - coarse_t0|` per window cell, written row-major into `out`.
///
/// Returns the difference at `(center_row, center_col)`.
pub fn temporal_difference(
    coarse_t0: &Window,
    coarse_t1: &Window,
    center_row: usize,
    center_col: usize,
    out: &mut Vec<f64>,
) -> f64 {
    abs_difference(coarse_t1, coarse_t0, center_row, center_col, out)
}

fn abs_difference(
    a: &Window,
    b: &Window,
    center_row: usize,
    center_col: usize,
    out: &mut Vec<f64>,
) -> f64 {
    debug_assert_eq!(a.size(), b.size());

    out.clear();
    out.extend(a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()));

    out[center_row * a.size() + center_col]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Raster;

    #[test]
    fn spectral_is_absolute() {
        let fine = Raster::from_fn(3, 3, |r, c| (r * 3 + c) as f64);
        let coarse = Raster::filled(3, 3, 4.0);
        let mut out = Vec::new();

        let center = spectral_difference(
            &fine.window(0, 0, 3),
            &coarse.window(0, 0, 3),
            1,
            1,
            &mut out,
        );

        assert_eq!(center, 0.0);
        assert_eq!(out, vec![4.0, 3.0, 2.0, 1.0, 0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn temporal_uses_requested_center() {
        let t0 = Raster::filled(3, 3, 10.0);
        let t1 = Raster::from_fn(3, 3, |r, c| if (r, c) == (0, 2) { 3.0 } else { 12.0 });
        let mut out = vec![99.0; 20];

        let center = temporal_difference(&t0.window(0, 0, 3), &t1.window(0, 0, 3), 0, 2, &mut out);

        assert_eq!(center, 7.0);
        assert_eq!(out.len(), 9);
        assert_eq!(out[4], 2.0);
    }

    #[test]
    fn sub_window_of_larger_raster() {
        let fine = Raster::from_fn(5, 5, |r, c| (r * 5 + c) as f64);
        let coarse = Raster::filled(5, 5, 0.0);
        let mut out = Vec::new();

        let center = spectral_difference(
            &fine.window(2, 2, 3),
            &coarse.window(2, 2, 3),
            1,
            1,
            &mut out,
        );

        assert_eq!(center, 18.0);
        assert_eq!(out[0], 12.0);
        assert_eq!(out[8], 24.0);
    }
}
