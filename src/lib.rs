//! Forward and adjoint 2-D parallel-beam Radon transforms.
//!
//! + `projector`: image → sinogram, by Joseph's method with a choice of
//!   interpolation kernels, or pixel-driven.
//!
//! + `backprojector`: sinogram → image, the adjoint of the forward projection
//!   with linear interpolation.
//!
//! Both run their angle loop on rayon worker threads (`parallel`), or as a
//! single data-parallel launch through a `device::ComputeQueue`.

mod exports;
pub use exports::*;

pub mod error;
pub mod image;
pub mod sinogram;
pub mod interpolation;
pub mod projector;
pub mod backprojector;
pub mod parallel;
pub mod device;
pub mod config;
pub mod io;
pub mod utils;
