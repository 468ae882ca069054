use std::ops::{Add, AddAssign};

use crate::error::Result;

mod parallel;

pub use parallel::Parallel;

/// How many output pixels took each prediction path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStats {
    pub weighted: usize,
    pub fallback: usize,
}

impl Add for RowStats {
    type Output = RowStats;

    fn add(self, rhs: Self) -> Self::Output {
        RowStats {
            weighted: self.weighted + rhs.weighted,
            fallback: self.fallback + rhs.fallback,
        }
    }
}

impl AddAssign for RowStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

pub trait Backend {
    fn name(&self) -> &'static str;

    /// Run `kernel` once per output row.
    ///
    /// `output` is a row-major buffer of rows of `cols` cells; the kernel receives the row index
    /// and that row's cells. The first kernel error aborts the run.
    fn map_rows<F>(&self, output: &mut [f64], cols: usize, kernel: F) -> Result<RowStats>
    where
        F: Fn(usize, &mut [f64]) -> Result<RowStats> + Sync;
}

/// Rows in raster order on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Backend for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn map_rows<F>(&self, output: &mut [f64], cols: usize, kernel: F) -> Result<RowStats>
    where
        F: Fn(usize, &mut [f64]) -> Result<RowStats> + Sync,
    {
        let mut stats = RowStats::default();
        if cols == 0 {
            return Ok(stats);
        }

        for (r, row) in output.chunks_mut(cols).enumerate() {
            stats += kernel(r, row)?;
        }

        Ok(stats)
    }
}
