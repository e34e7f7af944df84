//! Backprojection: smear every projection back across a square image.
//!
//! For pixel `(y, x)` of an `n` × `n` image and angle `θ`, the projection is
//! sampled at
//!
//! ```text
//! t = (x - ctr)·cos θ + (ctr - y)·sin θ        ctr = floor((n - 1) / 2)
//! ```
//!
//! with linear interpolation between samples `floor(t) + centre` and
//! `floor(t) + centre + 1`, where `centre = len / 2` is the index of `t = 0`
//! in a projection of `len` samples. Within a column `t` is not recomputed:
//! it starts at the top row and is decremented by `sin θ` for each row.
//!
//! Every angle contributes to every pixel, so the angles are spread over
//! workers which each own a private copy of the image (see
//! `parallel::private_buffers`).

/// Backprojector over a configurable schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Backprojector {
    pub schedule: Schedule,
}

impl Backprojector {

    pub fn new(schedule: Schedule) -> Self { Self { schedule } }

    /// Backproject `sinogram`, measured at `angles` (radians), into an `n` ×
    /// `n` image.
    pub fn backproject(&self, sinogram: &Sinogram, angles: &[f64], n: usize) -> Result<Image> {
        let geometry = Geometry::checked(sinogram, angles, n)?;
        tracing::debug!(n, r_size = sinogram.n_radial(), angles = angles.len(),
                        schedule = ?self.schedule, "backprojection");

        let trig: Vec<Trig> = angles.iter().copied().map(Trig::of).collect();
        let data = private_buffers(self.schedule, &trig, (n, n), |image, k, &trig| {
            let projection = sinogram.profile(k);
            for (x, column) in image.axis_iter_mut(Axis(1)).enumerate() {
                geometry.accumulate_column(column, x, projection, trig);
            }
        })?;
        Ok(Image::new(data))
    }
}

/// Backproject on rayon's current thread pool
pub fn backproject(sinogram: &Sinogram, angles: &[f64], n: usize) -> Result<Image> {
    Backprojector::default().backproject(sinogram, angles, n)
}

/// Side of the largest square image whose diagonal fits within `r_size`
/// radial samples, rounded down to an even number.
pub fn default_image_size(r_size: usize) -> usize {
    2 * (r_size as f64 / (2.0 * SQRT_2)).floor() as usize
}

/// Fixed quantities of one backprojection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Geometry {
    /// Image index of the spatial origin, along both axes
    pub ctr: f64,
    /// Projection index of `t = 0`
    pub centre: usize,
}

impl Geometry {

    /// Validate the inputs of a backprojection and derive its geometry
    pub fn checked(sinogram: &Sinogram, angles: &[f64], n: usize) -> Result<Self> {
        sinogram.ensure_angles(angles.len())?;
        if n == 0 {
            return Err(RadonError::shape("backprojected image", "at least 1 x 1", "0 x 0"));
        }
        Ok(Self { ctr: image_centre(n), centre: projection_centre(sinogram.n_radial()) })
    }

    /// Add the contribution of one projection to image column `x`.
    pub fn accumulate_column(&self, mut column: ArrayViewMut1<f64>, x: usize, projection: ArrayView1<f64>, trig: Trig) {
        let mut t = (x as f64 - self.ctr) * trig.cos + self.ctr * trig.sin;
        for pixel in column.iter_mut() {
            *pixel += interpolate_projection(projection, t, self.centre);
            t -= trig.sin;
        }
    }
}

/// Linear interpolation of `projection` at offset `t` from index `centre`.
///
/// Zero if either of the two samples needed lies outside the projection.
#[inline]
pub fn interpolate_projection(projection: ArrayView1<f64>, t: f64, centre: usize) -> f64 {
    let (a, fraction) = split_floor(t);
    let low = a + centre as i64;
    if low < 0 || low + 1 >= projection.len() as i64 { return 0.0 }
    let low = low as usize;
    let (here, next) = (projection[low], projection[low + 1]);
    fraction * (next - here) + here
}


// ----- Imports ------------------------------------------------------------------------------------------
use std::f64::consts::SQRT_2;

use ndarray::{ArrayView1, ArrayViewMut1, Axis};

use geometry::{image_centre, projection_centre, split_floor, Trig};

use crate::{
    error::{RadonError, Result},
    image::Image,
    parallel::{private_buffers, Schedule},
    sinogram::Sinogram,
};
