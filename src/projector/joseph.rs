//! Joseph's method: interpolate the image where the ray crosses each lane of
//! the dominant axis.
//!
//! For a ray at radial offset `r`, when stepping over columns `n` the row at
//! which the ray crosses column `n` is
//!
//! ```text
//! idx = (r - (n - x_origin)·cos) / sin + y_origin
//! ```
//!
//! and symmetrically when stepping over rows. The interpolated values are
//! summed and divided by the magnitude of the direction cosine used as the
//! divisor, which converts the sum into a line integral per unit length.

/// Joseph forward projector with a selectable interpolation kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Joseph {
    pub interpolation: Interpolation,
    pub schedule: Schedule,
}

impl Joseph {
    pub fn new(interpolation: Interpolation) -> Self {
        Self { interpolation, schedule: Schedule::default() }
    }

    pub fn with_schedule(self, schedule: Schedule) -> Self { Self { schedule, ..self } }
}

impl ForwardProjector for Joseph {
    fn project(&self, image: &Image, angles: &[f64], radial: &[f64]) -> Result<Sinogram> {
        check_inputs(image, radial)?;
        let (rows, cols) = image.shape();
        tracing::debug!(rows, cols, angles = angles.len(), radial = radial.len(),
                        interpolation = %self.interpolation, schedule = ?self.schedule,
                        "Joseph forward projection");

        let origin = Origin::of_image(rows, cols);
        let image = image.view();
        let mut sinogram = Sinogram::zeros(radial.len(), angles.len());
        disjoint_columns(self.schedule, &mut sinogram.data, |k, column| {
            project_angle(column, image, origin, radial, angles[k], self.interpolation)
        })?;
        Ok(sinogram)
    }
}

/// Accumulate the projection of `image` at a single `angle` into `column`,
/// which must have one element per radial sample.
///
/// The angle is negated before use: see the module-level documentation of
/// `projector`.
pub fn project_angle(
    mut column   : ArrayViewMut1<f64>,
    image        : ArrayView2<f64>,
    origin       : Origin,
    radial       : &[f64],
    angle        : f64,
    interpolation: Interpolation,
) {
    let trig = Trig::of(-angle);
    let Trig { cos, sin } = trig;

    // Lanes of the dominant axis, the position of the stepping index relative
    // to the origin, and how the crossing index is derived from it
    let (lanes, kernel, step_origin, lane_origin, along, across) = match trig.dominant_axis() {
        DominantAxis::Columns => (image.axis_iter(Axis(1)), interpolation.kernel(cos.abs(), sin.abs()), origin.x, origin.y, cos, sin),
        DominantAxis::Rows    => (image.axis_iter(Axis(0)), interpolation.kernel(sin.abs(), cos.abs()), origin.y, origin.x, sin, cos),
    };
    let norm = across.abs();

    for (out, &r) in column.iter_mut().zip(radial) {
        let sum: f64 = lanes.clone()
            .enumerate()
            .map(|(n, lane)| {
                let idx = (r - (n as f64 - step_origin) * along) / across + lane_origin;
                kernel.sample(lane, idx)
            })
            .sum();
        *out += sum / norm;
    }
}


// ----- Imports ------------------------------------------------------------------------------------------
use ndarray::{ArrayView2, ArrayViewMut1, Axis};
#[cfg(test)] use ndarray::Array2;

use geometry::{DominantAxis, Origin, Trig};

use crate::{
    error::Result,
    image::Image,
    interpolation::Interpolation,
    parallel::{disjoint_columns, Schedule},
    sinogram::Sinogram,
};
#[cfg(test)] use super::project;
use super::{check_inputs, ForwardProjector};
