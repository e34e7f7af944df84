//! One-dimensional resampling kernels used by the Joseph forward projector.
//!
//! A ray crossing one lane (a row or a column) of the image hits it at a
//! fractional index. Each kernel turns the samples around that index into a
//! single interpolated value. Indices too close to the edges of the lane for
//! the kernel's support yield zero: such rays simply miss the image.
//!
//! The selector (`Interpolation`) is fixed for a whole projection; per angle
//! it is turned into a `Kernel`, which carries any angle-dependent parameters
//! (only Siddon has some).

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use ndarray::ArrayView1;
use serde::Deserialize;

use crate::error::{RadonError, Result};

/// Below this, a direction cosine is treated as zero by the Siddon kernel
pub const SMALL: f64 = 1e-9;

/// Below this (in radians), a sinc tap is taken to be exactly 1
const SINC_SINGULARITY: f64 = 0.001;

/// Choice of interpolation kernel, fixed for an entire forward projection.
///
/// The discriminants are the historic numeric selector codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Interpolation {
    Siddon   = 0,
    Nearest  = 1,
    #[default]
    Linear   = 2,
    Cubic    = 3,
    Sinc077  = 4,
    Sinc0605 = 5,
}

impl Interpolation {

    pub const ALL: [Self; 6] = [
        Self::Siddon, Self::Nearest, Self::Linear, Self::Cubic, Self::Sinc077, Self::Sinc0605,
    ];

    /// Prepare the kernel for one angle.
    ///
    /// `primary` is the magnitude of the direction cosine along the axis
    /// being stepped over, `secondary` that of the one being divided by.
    pub fn kernel(self, primary: f64, secondary: f64) -> Kernel {
        match self {
            Self::Nearest  => Kernel::Nearest,
            Self::Linear   => Kernel::Linear,
            Self::Cubic    => Kernel::Cubic,
            Self::Sinc077  => Kernel::Sinc { window: 0.77  },
            Self::Sinc0605 => Kernel::Sinc { window: 0.605 },
            Self::Siddon   => {
                if primary < SMALL {
                    Kernel::Siddon { m: 0.0, l: 0.0, k: 0.5 }
                } else {
                    let m = secondary / primary;
                    let l = 0.5 * (1.0 + m);
                    let k = (l - 1.0) / m;
                    Kernel::Siddon { m, l, k }
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Siddon   => "siddon",
            Self::Nearest  => "nearest",
            Self::Linear   => "linear",
            Self::Cubic    => "cubic",
            Self::Sinc077  => "sinc-0.77",
            Self::Sinc0605 => "sinc-0.605",
        }
    }
}

impl TryFrom<i64> for Interpolation {
    type Error = RadonError;
    fn try_from(code: i64) -> Result<Self> {
        Self::ALL.iter()
            .copied()
            .find(|&i| i as i64 == code)
            .ok_or_else(|| RadonError::UnsupportedKernel(code.to_string()))
    }
}

impl FromStr for Interpolation {
    type Err = RadonError;
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() { return Self::try_from(code) }
        Self::ALL.iter()
            .copied()
            .find(|i| i.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| RadonError::UnsupportedKernel(s.to_string()))
    }
}

impl TryFrom<String> for Interpolation {
    type Error = RadonError;
    fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An interpolation kernel, prepared for a single projection angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Kernel {
    Nearest,
    Linear,
    /// Hermite smoothstep weights `2t³ - 3t² + 1`
    Cubic,
    /// Trapezoidal footprint of width `m`, flat top `l`, shoulders at `k`
    Siddon { m: f64, l: f64, k: f64 },
    /// Four-tap cosine-windowed sinc
    Sinc { window: f64 },
}

impl Kernel {

    /// Number of samples needed on either side of the interpolation point
    pub fn margin(&self) -> usize {
        match self {
            Self::Sinc { .. } => 2,
            _                 => 1,
        }
    }

    /// Interpolated value of `lane` at fractional index `idx`, or zero if
    /// `idx` is outside the kernel's valid interior.
    #[inline]
    pub fn sample(&self, lane: ArrayView1<f64>, idx: f64) -> f64 {
        let margin = self.margin() as f64;
        if !(idx > margin - 1.0 && idx < lane.len() as f64 - margin) { return 0.0 }
        // `idx` is positive here, so truncation is floor
        let low = idx as usize;
        let frac = idx - low as f64;
        let (here, next) = (lane[low], lane[low + 1]);
        match *self {
            Self::Nearest => if frac < 0.5 { here } else { next },
            Self::Linear  => here * (1.0 - frac) + next * frac,
            Self::Cubic   => here * smoothstep(frac) + next * smoothstep(1.0 - frac),
            Self::Siddon { m, l, k } => {
                let rest = 1.0 - frac;
                if      rest >= 1.0 - k { here }
                else if rest <= k       { next }
                else { next * (l - m * rest) + here * (1.0 - l + m * rest) }
            }
            Self::Sinc { window } => {
                (-1..=2_isize)
                    .map(|tap| {
                        let sample = lane[(low as isize + tap) as usize];
                        let a = PI * (tap as f64 - frac);
                        // Only the centre tap is pinned to 1 near its singularity
                        let weight = if tap == 0 && a.abs() < SINC_SINGULARITY { 1.0 }
                                     else { windowed_sinc(a, window) };
                        sample * weight
                    })
                    .sum()
            }
        }
    }
}

#[inline]
fn smoothstep(t: f64) -> f64 { 2.0 * t * t * t - 3.0 * t * t + 1.0 }

/// `sin(a)·cot(a/4)·(w + (1-w)·cos(a/2)) / 4`, which tends to 1 as `a → 0`
/// but is undefined at 0 itself.
#[inline]
fn windowed_sinc(a: f64, window: f64) -> f64 {
    let quarter = a / 4.0;
    a.sin() * (quarter.cos() / quarter.sin()) * (window + (1.0 - window) * (a / 2.0).cos()) / 4.0
}
