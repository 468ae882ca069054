use rayon::prelude::*;

use super::{Backend, RowStats};
use crate::error::Result;

/// Chunks per rayon thread, slack for rows that finish early.
const CHUNKS_PER_THREAD: usize = 2;

/// Row chunks spread over the rayon thread pool.
///
/// Every pixel runs the same code as with [`super::Sequential`], so output is bit-identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel;

fn rows_per_chunk(rows: usize) -> usize {
    let num_chunks = rayon::current_num_threads() * CHUNKS_PER_THREAD;
    (rows / num_chunks).max(1)
}

impl Backend for Parallel {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn map_rows<F>(&self, output: &mut [f64], cols: usize, kernel: F) -> Result<RowStats>
    where
        F: Fn(usize, &mut [f64]) -> Result<RowStats> + Sync,
    {
        if output.is_empty() || cols == 0 {
            return Ok(RowStats::default());
        }

        let chunk_rows = rows_per_chunk(output.len() / cols);

        output
            .par_chunks_mut(chunk_rows * cols)
            .enumerate()
            .map(|(chunk_idx, chunk)| {
                let first = chunk_idx * chunk_rows;
                chunk
                    .chunks_mut(cols)
                    .enumerate()
                    .try_fold(RowStats::default(), |acc, (i, row)| {
                        kernel(first + i, row).map(|stats| acc + stats)
                    })
            })
            .try_reduce(RowStats::default, |a, b| Ok(a + b))
    }
}
