//! Angle and coordinate conventions shared by the forward projector and the
//! backprojector.
//!
//! Everything in here is a pure function of image dimensions and projection
//! angles: no allocation of images, no parallelism.

mod origin;
mod trig;
mod radial;

pub use origin::{Origin, image_centre};
pub use trig::{Trig, DominantAxis};
pub use radial::{RadialRange, centred_samples, projection_centre, split_floor};
