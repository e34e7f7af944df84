//! Forward projection: from an image to its sinogram.
//!
//! Two algorithms are available, behind the `ForwardProjector` trait:
//!
//! + `Joseph`: for every angle and every requested radial sample, steps along
//!   the dominant image axis and interpolates the image where the ray crosses
//!   each lane. Any of the `Interpolation` kernels may be used.
//!
//! + `PixelDriven`: enumerates the non-zero pixels inside the circular support
//!   once, then splats each of them onto the two nearest radial bins of every
//!   angle with a triangular weight. Much cheaper for sparse images, but
//!   restricted to unit-spaced, centred radial bins.
//!
//! Angle convention: the angles given to the forward projectors are negated
//! before their sines and cosines are taken. The backprojector does *not*
//! negate its angles. Together the two conventions describe the same rays, so
//! the same angle set must be passed to both.

pub use joseph::Joseph;
pub use pixel_driven::{PixelDriven, ActivePixels};

pub mod joseph;
pub mod pixel_driven;

/// Abstract interface for forward projection implementations
pub trait ForwardProjector {
    /// Project `image` at every angle in `angles` (radians), sampling the
    /// radial coordinates in `radial`.
    ///
    /// The result has one row per radial sample and one column per angle.
    fn project(&self, image: &Image, angles: &[f64], radial: &[f64]) -> Result<Sinogram>;
}

/// Joseph projection with the given interpolation kernel, on rayon's current
/// thread pool.
pub fn project(image: &Image, angles: &[f64], radial: &[f64], interpolation: Interpolation) -> Result<Sinogram> {
    Joseph::new(interpolation).project(image, angles, radial)
}

/// Project the real and imaginary parts of a complex image independently.
pub fn project_complex<P: ForwardProjector>(
    projector: &P,
    image    : &Array2<Complex64>,
    angles   : &[f64],
    radial   : &[f64],
) -> Result<ComplexSinogram> {
    let re = projector.project(&Image::new(image.mapv(|z| z.re)), angles, radial)?;
    let im = projector.project(&Image::new(image.mapv(|z| z.im)), angles, radial)?;
    Ok(ComplexSinogram { re, im })
}

/// Checks shared by all forward projectors, performed before any parallel
/// work starts.
pub(crate) fn check_inputs(image: &Image, radial: &[f64]) -> Result<()> {
    image.ensure_not_empty()?;
    if radial.is_empty() {
        return Err(RadonError::shape("radial samples", "at least 1", 0));
    }
    Ok(())
}


// ----- Imports ------------------------------------------------------------------------------------------
use ndarray::Array2;
use num_complex::Complex64;

use crate::{
    error::{RadonError, Result},
    image::Image,
    interpolation::Interpolation,
    sinogram::{Sinogram, ComplexSinogram},
};
