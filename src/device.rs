//! Data-parallel offload of the transforms.
//!
//! The queue abstraction mirrors a single one-dimensional kernel launch: the
//! kernel is invoked once per global index and each invocation owns a
//! disjoint slot of the output buffer. No invocation reads another's slot, so
//! none of them need atomics or barriers.
//!
//! + Forward projection: one work item per angle, its slot being that angle's
//!   column of the sinogram.
//!
//! + Backprojection: one work item per image *column*. Each work item loops
//!   over all angles, accumulating into its own column, which replaces the
//!   private-buffer reduction needed when work is split by angle.
//!
//! Setting up a real device (context, queue, kernel compilation) is the job of
//! whoever implements `ComputeQueue`. `HostQueue` runs the kernels on a rayon
//! pool.

/// Something which can launch a kernel over a one-dimensional index space.
pub trait ComputeQueue {
    /// Invoke `kernel(i, slot)` for every `i` in `0..global_size`, where `slot`
    /// is the `item_len` elements of the output owned by work item `i`.
    ///
    /// Returns the whole output buffer, `global_size * item_len` elements
    /// long, with slot `i` starting at `i * item_len`.
    fn enqueue(
        &self,
        global_size: usize,
        item_len   : usize,
        kernel     : &(dyn Fn(usize, &mut [f64]) + Sync),
    ) -> Result<Vec<f64>>;
}

/// Runs kernels on the host, on rayon's current pool or on a dedicated one.
#[derive(Debug, Default)]
pub struct HostQueue {
    pool: Option<rayon::ThreadPool>,
}

impl HostQueue {
    /// `None` uses rayon's current pool when kernels are enqueued.
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let pool = match threads {
            None    => None,
            Some(0) => return Err(RadonError::Config("host queue needs at least one thread".into())),
            Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
        };
        Ok(Self { pool })
    }
}

impl ComputeQueue for HostQueue {
    fn enqueue(
        &self,
        global_size: usize,
        item_len   : usize,
        kernel     : &(dyn Fn(usize, &mut [f64]) + Sync),
    ) -> Result<Vec<f64>> {
        let mut buffer = vec![0.0; global_size * item_len];
        if item_len == 0 { return Ok(buffer) }
        let mut launch = || {
            buffer.par_chunks_mut(item_len)
                .enumerate()
                .for_each(|(i, slot)| kernel(i, slot))
        };
        match &self.pool {
            Some(pool) => pool.install(launch),
            None       => launch(),
        }
        Ok(buffer)
    }
}

/// Joseph forward projection, one work item per angle.
pub fn project(
    queue        : &impl ComputeQueue,
    image        : &Image,
    angles       : &[f64],
    radial       : &[f64],
    interpolation: Interpolation,
) -> Result<Sinogram> {
    check_inputs(image, radial)?;
    tracing::debug!(shape = ?image.shape(), angles = angles.len(), radial = radial.len(),
                    %interpolation, "offloaded Joseph forward projection");
    let (rows, cols) = image.shape();
    let origin = Origin::of_image(rows, cols);
    let image = image.view();
    let data = queue.enqueue(angles.len(), radial.len(), &|k, slot| {
        project_angle(slot.into(), image, origin, radial, angles[k], interpolation)
    })?;
    Sinogram::from_columns(radial.len(), angles.len(), data)
}

/// Pixel-driven forward projection, one work item per angle.
pub fn project_pixels(
    queue : &impl ComputeQueue,
    image : &Image,
    angles: &[f64],
    radial: &[f64],
) -> Result<Sinogram> {
    check_inputs(image, radial)?;
    let r_size = radial.len();
    let active = ActivePixels::within(image, ActivePixels::support_radius(r_size));
    tracing::debug!(shape = ?image.shape(), angles = angles.len(), r_size,
                    active = active.len(), "offloaded pixel-driven forward projection");
    let r_first = RadialRange::of(r_size).first as f64;
    let data = queue.enqueue(angles.len(), r_size, &|k, slot| {
        project_pixels_angle(slot.into(), &active, angles[k], r_first)
    })?;
    Sinogram::from_columns(r_size, angles.len(), data)
}

/// Backprojection, one work item per image column.
pub fn backproject(
    queue   : &impl ComputeQueue,
    sinogram: &Sinogram,
    angles  : &[f64],
    n       : usize,
) -> Result<Image> {
    let geometry = Geometry::checked(sinogram, angles, n)?;
    tracing::debug!(n, r_size = sinogram.n_radial(), angles = angles.len(), "offloaded backprojection");
    let trig: Vec<Trig> = angles.iter().copied().map(Trig::of).collect();
    let data = queue.enqueue(n, n, &|x, slot| {
        let mut column = ArrayViewMut1::from(slot);
        for (k, &trig) in trig.iter().enumerate() {
            geometry.accumulate_column(column.view_mut(), x, sinogram.profile(k), trig);
        }
    })?;
    let len = data.len();
    // Slot `x` is image column `x`
    let columns = Array2::from_shape_vec((n, n).f(), data)
        .map_err(|_| RadonError::shape("device output", n * n, len))?;
    Ok(Image::new(columns.as_standard_layout().into_owned()))
}


// ----- Imports ------------------------------------------------------------------------------------------
use ndarray::{Array2, ArrayViewMut1, ShapeBuilder};
use rayon::prelude::*;

use geometry::{Origin, RadialRange, Trig};

use crate::{
    backprojector::Geometry,
    error::{RadonError, Result},
    image::Image,
    interpolation::Interpolation,
    projector::{check_inputs, joseph::project_angle, pixel_driven::project_pixels_angle, ActivePixels},
    sinogram::Sinogram,
};
