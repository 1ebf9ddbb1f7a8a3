use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row length must be valid.
    #[error("row length must be > 0 and divide the buffer, got {0}")]
    InvalidRowLength(usize),
}

/// Controls how the row-wise stencil passes are executed.
///
/// Every strategy computes each output pixel with the same sequential
/// accumulation, so the results are bit-identical across strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Check that the strategy can be executed.
    pub fn validate(&self) -> Result<(), ParallelError> {
        match self {
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            _ => Ok(()),
        }
    }
}

/// Fill a row-major buffer row by row with the given strategy.
///
/// # Arguments
///
/// * `dst` - The destination buffer, `rows * row_len` elements.
/// * `row_len` - The number of elements per row.
/// * `strategy` - The execution strategy.
/// * `f` - Called with the row index and the mutable row slice.
pub fn fill_rows<T: Send>(
    dst: &mut [T],
    row_len: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) -> Result<(), ParallelError> {
    if row_len == 0 || dst.len() % row_len != 0 {
        return Err(ParallelError::InvalidRowLength(row_len));
    }

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(row_len)
                    .enumerate()
                    .for_each(|(r, row)| f(r, row));
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_index_times_col(strategy: ExecutionStrategy) -> Result<Vec<usize>, ParallelError> {
        let mut dst = vec![0usize; 6];
        fill_rows(&mut dst, 3, strategy, |r, row| {
            row.iter_mut().enumerate().for_each(|(c, v)| *v = r * 10 + c);
        })?;
        Ok(dst)
    }

    #[test]
    fn test_fill_rows_serial() -> Result<(), ParallelError> {
        assert_eq!(
            row_index_times_col(ExecutionStrategy::Serial)?,
            vec![0, 1, 2, 10, 11, 12]
        );
        Ok(())
    }

    #[test]
    fn test_fill_rows_strategies_agree() -> Result<(), ParallelError> {
        let serial = row_index_times_col(ExecutionStrategy::Serial)?;
        assert_eq!(row_index_times_col(ExecutionStrategy::ParallelRows)?, serial);
        assert_eq!(row_index_times_col(ExecutionStrategy::Fixed(2))?, serial);
        Ok(())
    }

    #[test]
    fn test_fill_rows_invalid_row_length() {
        let mut dst = vec![0u8; 5];
        let res = fill_rows(&mut dst, 2, ExecutionStrategy::Serial, |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidRowLength(2)));
        let res = fill_rows(&mut dst, 0, ExecutionStrategy::Serial, |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidRowLength(0)));
    }

    #[test]
    fn test_fixed_zero_threads() {
        let mut dst = vec![0u8; 4];
        let res = fill_rows(&mut dst, 2, ExecutionStrategy::Fixed(0), |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
        assert!(ExecutionStrategy::Fixed(0).validate().is_err());
        assert!(ExecutionStrategy::default().validate().is_ok());
    }
}
