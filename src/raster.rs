use std::ops::{Index, IndexMut};

use crate::error::{FusionError, Result};

/// Row-major grid of reflectance samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Raster {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(FusionError::BufferLength {
                expected: rows * cols,
                actual: data.len(),
            });
        }

        Ok(Self { data, rows, cols })
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }

        Self { data, rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns a copy enlarged by `pad` cells on every side, the border filled with `fill`.
    pub fn padded(&self, pad: usize, fill: f64) -> Raster {
        let cols = self.cols + 2 * pad;
        let rows = self.rows + 2 * pad;
        let mut data = vec![fill; rows * cols];

        for (r, src) in self.data.chunks_exact(self.cols.max(1)).enumerate() {
            let start = (r + pad) * cols + pad;
            data[start..start + self.cols].copy_from_slice(src);
        }

        Raster { data, rows, cols }
    }

    /// Square view of `size` cells whose top-left corner is `(top, left)`.
    pub fn window(&self, top: usize, left: usize, size: usize) -> Window<'_> {
        debug_assert!(top + size <= self.rows && left + size <= self.cols);
        Window {
            raster: self,
            top,
            left,
            size,
        }
    }
}

impl Index<(usize, usize)> for Raster {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Raster {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.cols + col]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    raster: &'a Raster,
    top: usize,
    left: usize,
    size: usize,
}

impl<'a> Window<'a> {
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.size && col < self.size);
        self.raster.get(self.top + row, self.left + col)
    }

    pub fn center(&self) -> f64 {
        let half = self.size / 2;
        self.get(half, half)
    }

    fn row(&self, row: usize) -> &'a [f64] {
        let start = (self.top + row) * self.raster.cols + self.left;
        &self.raster.data[start..start + self.size]
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        let window = *self;
        (0..self.size).flat_map(move |r| window.row(r).iter().copied())
    }

    pub fn flatten_into(&self, out: &mut Vec<f64>) {
        out.clear();
        for r in 0..self.size {
            out.extend_from_slice(self.row(r));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_wrong_length() {
        let err = Raster::new(2, 3, vec![0.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            FusionError::BufferLength {
                expected: 6,
                actual: 5
            }
        ));
    }

    #[test]
    fn padding_surrounds_with_fill() {
        let raster = Raster::from_fn(2, 3, |r, c| (r * 3 + c) as f64);
        let padded = raster.padded(1, -1.0);

        assert_eq!(padded.shape(), (4, 5));
        assert_eq!(padded[(0, 0)], -1.0);
        assert_eq!(padded[(3, 4)], -1.0);
        assert_eq!(padded[(1, 1)], 0.0);
        assert_eq!(padded[(2, 3)], 5.0);
        assert_eq!(padded.data().iter().filter(|&&v| v == -1.0).count(), 14);
    }

    #[test]
    fn zero_padding_is_a_copy() {
        let raster = Raster::from_fn(3, 2, |r, c| (r + c) as f64);
        assert_eq!(raster.padded(0, 9.0), raster);
    }

    #[test]
    fn window_iterates_row_major() {
        let raster = Raster::from_fn(4, 4, |r, c| (r * 10 + c) as f64);
        let window = raster.window(1, 1, 3);

        let cells: Vec<f64> = window.iter().collect();
        assert_eq!(
            cells,
            vec![11.0, 12.0, 13.0, 21.0, 22.0, 23.0, 31.0, 32.0, 33.0]
        );
        assert_eq!(window.center(), 22.0);

        let mut flat = vec![1.0; 2];
        window.flatten_into(&mut flat);
        assert_eq!(flat, cells);
    }
}
