//! Scheduling of the angle loop across worker threads.
//!
//! Two accumulation disciplines are provided:
//!
//! + `disjoint_columns`: every angle owns one column of the output, so the
//!   angles can be processed in any order, on any thread, with no reduction.
//!   Used by the forward projectors.
//!
//! + `private_buffers`: every angle contributes to the *whole* output. Each
//!   worker gets its own zeroed copy of the output, accumulates its share of
//!   the angles into it, and the copies are summed in a single serial pass at
//!   the end. Used by the backprojector.

use ndarray::{Array2, ArrayViewMut1, Axis};
use rayon::prelude::*;

use crate::error::{RadonError, Result};

/// How the angle loop is distributed across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Schedule {
    /// Everything on the calling thread
    Serial,
    /// Rayon's current thread pool
    #[default]
    Parallel,
    /// A dedicated pool with exactly this many workers
    Threads(usize),
}

impl Schedule {

    /// Build from an optional thread count, as found in configuration
    pub fn from_threads(threads: Option<usize>) -> Self {
        match threads {
            None    => Self::Parallel,
            Some(1) => Self::Serial,
            Some(n) => Self::Threads(n),
        }
    }

    /// Run `job` inside the pool selected by this schedule.
    pub fn install<R, F>(self, job: F) -> Result<R>
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match self {
            Self::Serial | Self::Parallel => Ok(job()),
            Self::Threads(0) => Err(RadonError::Config("worker pool needs at least one thread".into())),
            Self::Threads(n) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                Ok(pool.install(job))
            }
        }
    }

    /// Number of workers which will share the angle loop. Only meaningful
    /// inside `install`.
    fn workers(self) -> usize {
        match self {
            Self::Serial => 1,
            _            => rayon::current_num_threads(),
        }
    }
}

/// Call `fill(k, column)` for every column `k` of `output`.
///
/// Columns are disjoint, so no synchronization is needed.
pub fn disjoint_columns<F>(schedule: Schedule, output: &mut Array2<f64>, fill: F) -> Result<()>
where
    F: Fn(usize, ArrayViewMut1<f64>) + Sync + Send,
{
    match schedule {
        Schedule::Serial => {
            for (k, column) in output.axis_iter_mut(Axis(1)).enumerate() {
                fill(k, column);
            }
            Ok(())
        }
        _ => schedule.install(|| {
            output.axis_iter_mut(Axis(1))
                .into_par_iter()
                .enumerate()
                .for_each(|(k, column)| fill(k, column))
        }),
    }
}

/// Accumulate every item into a `shape`-sized output, via one private buffer
/// per worker and a final serial reduction.
///
/// `accumulate(buffer, k, item)` adds the contribution of item number `k` to
/// `buffer`.
pub fn private_buffers<T, F>(
    schedule  : Schedule,
    items     : &[T],
    shape     : (usize, usize),
    accumulate: F,
) -> Result<Array2<f64>>
where
    T: Sync,
    F: Fn(&mut Array2<f64>, usize, &T) + Sync + Send,
{
    let partials = schedule.install(|| {
        // One contiguous chunk of items per worker: rayon would otherwise
        // split the work much more finely, and every split costs a whole
        // image-sized buffer.
        let chunk_len = items.len().div_ceil(schedule.workers()).max(1);

        let accumulate_chunk = |(c, chunk): (usize, &[T])| {
            let mut buffer = Array2::zeros(shape);
            for (i, item) in chunk.iter().enumerate() {
                accumulate(&mut buffer, c * chunk_len + i, item);
            }
            buffer
        };

        match schedule {
            Schedule::Serial => items.chunks    (chunk_len).enumerate().map(accumulate_chunk).collect::<Vec<_>>(),
            _                => items.par_chunks(chunk_len).enumerate().map(accumulate_chunk).collect::<Vec<_>>(),
        }
    })?;

    tracing::trace!(buffers = partials.len(), "reducing private accumulation buffers");

    // Serial reduction, in chunk order
    let mut output = Array2::zeros(shape);
    for partial in &partials {
        output += partial;
    }
    Ok(output)
}
