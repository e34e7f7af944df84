pub use crate::error::{RadonError, Result};
pub use crate::image::{Image, ImageData};
pub use crate::sinogram::{Sinogram, ComplexSinogram};
pub use crate::interpolation::{Interpolation, Kernel};
pub use crate::projector::{ForwardProjector, Joseph, PixelDriven, project, project_complex};
pub use crate::backprojector::{Backprojector, backproject};
pub use crate::parallel::Schedule;
pub use crate::device::{ComputeQueue, HostQueue};

pub use geometry::{RadialRange, centred_samples};
pub use units::{Angle, deg, rad, rad_, deg_};
