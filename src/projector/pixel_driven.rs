//! Pixel-driven forward projection.
//!
//! Instead of following rays through the image, every contributing pixel is
//! projected onto the radial axis and its value split between the two
//! nearest bins with a triangular footprint whose width shrinks with the
//! angle's slope factor `1 / max(|cos|, |sin|)`.
//!
//! Only non-zero pixels within the circular support are considered; they are
//! collected once, in `ActivePixels`, and reused for every angle.
//!
//! The radial bins are fixed: `r_size` unit-spaced bins, bin `p` centred on
//! `r = RadialRange::first + p`. Only the number of requested radial samples
//! is used, not their values.

/// Non-zero pixels inside the circular support, as offsets from the origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivePixels {
    /// `column - x_origin`
    pub dx: Vec<f64>,
    /// `row - y_origin`
    pub dy: Vec<f64>,
    pub value: Vec<f64>,
}

impl ActivePixels {

    /// Collect the non-zero pixels of `image` whose distance from the image
    /// origin does not exceed `radius`.
    pub fn within(image: &Image, radius: f64) -> Self {
        let (rows, cols) = image.shape();
        let origin = Origin::of_image(rows, cols);
        let mut active = Self::default();
        for (row, col) in iproduct!(0..rows, 0..cols) {
            let value = image[(row, col)];
            if value == 0.0 { continue }
            let dx = col as f64 - origin.x;
            let dy = row as f64 - origin.y;
            if dx.hypot(dy) <= radius {
                active.dx.push(dx);
                active.dy.push(dy);
                active.value.push(value);
            }
        }
        active
    }

    /// Support radius used for a sinogram with `r_size` radial bins
    pub fn support_radius(r_size: usize) -> f64 { (r_size as f64 / 2.0).ceil() }

    pub fn len(&self) -> usize { self.value.len() }
    pub fn is_empty(&self) -> bool { self.value.is_empty() }
}

/// The "optimized" forward projector: cost proportional to the number of
/// non-zero pixels rather than to the image size times the number of bins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelDriven {
    pub schedule: Schedule,
}

impl PixelDriven {
    pub fn new(schedule: Schedule) -> Self { Self { schedule } }
}

impl ForwardProjector for PixelDriven {
    fn project(&self, image: &Image, angles: &[f64], radial: &[f64]) -> Result<Sinogram> {
        check_inputs(image, radial)?;
        let r_size = radial.len();
        let active = ActivePixels::within(image, ActivePixels::support_radius(r_size));
        tracing::debug!(shape = ?image.shape(), angles = angles.len(), r_size,
                        schedule = ?self.schedule, "pixel-driven forward projection");
        tracing::trace!(active = active.len(), total = image.data.len(), "pixels in support");

        let r_first = RadialRange::of(r_size).first as f64;
        let mut sinogram = Sinogram::zeros(r_size, angles.len());
        disjoint_columns(self.schedule, &mut sinogram.data, |k, column| {
            project_pixels_angle(column, &active, angles[k], r_first)
        })?;
        Ok(sinogram)
    }
}

/// Splat every active pixel onto `column` at a single `angle`.
///
/// Bin `p` of `column` is centred on `r = r_first + p`. Contributions to bins
/// outside the column are dropped.
pub fn project_pixels_angle(mut column: ArrayViewMut1<f64>, active: &ActivePixels, angle: f64, r_first: f64) {
    let trig = Trig::of(-angle);
    let slope = trig.slope();
    let len = column.len() as i64;
    let mut deposit = |bin: i64, amount: f64| {
        if (0..len).contains(&bin) { column[bin as usize] += amount }
    };

    for ((&dx, &dy), &value) in active.dx.iter().zip(&active.dy).zip(&active.value) {
        let r = dx * trig.cos + dy * trig.sin - r_first;
        let (bin, fraction) = split_floor(r);
        let distance = fraction * slope;
        let left  = (1.0 - distance).max(0.0);
        let right = (1.0 + distance - slope).max(0.0);
        let sloped = value * slope;
        deposit(bin    , left  * sloped);
        deposit(bin + 1, right * sloped);
    }
}


// ----- Imports ------------------------------------------------------------------------------------------
use itertools::iproduct;
use ndarray::ArrayViewMut1;

use geometry::{split_floor, Origin, RadialRange, Trig};

use crate::{
    error::Result,
    image::Image,
    parallel::{disjoint_columns, Schedule},
    sinogram::Sinogram,
};
use super::{check_inputs, ForwardProjector};
