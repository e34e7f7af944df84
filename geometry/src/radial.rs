/// Integer radial coordinates of the first and last sinogram rows.
///
/// `first = (1 - r_size) / 2` in integer arithmetic (truncating towards
/// zero), `last = -first`. For odd `r_size` this spans exactly `r_size`
/// values; for even `r_size` it spans one fewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadialRange {
    pub first: i64,
    pub last: i64,
}

impl RadialRange {
    pub fn of(r_size: usize) -> Self {
        let first = (1 - r_size as i64) / 2;
        Self { first, last: -first }
    }

    /// The integers `first..=last`, verbatim.
    pub fn coordinates(&self) -> impl Iterator<Item = i64> {
        self.first..=self.last
    }
}

/// `r_size` unit-spaced radial samples starting at `RadialRange::first`.
pub fn centred_samples(r_size: usize) -> Vec<f64> {
    let first = RadialRange::of(r_size).first;
    (0..r_size as i64).map(|p| (first + p) as f64).collect()
}

/// Index of the sample at `t = 0` in a projection of length `len`.
pub fn projection_centre(len: usize) -> usize { len / 2 }

/// Split `t` into `floor(t)` and the remaining fraction in `[0, 1)`.
#[inline]
pub fn split_floor(t: f64) -> (i64, f64) {
    let a = t.floor();
    (a as i64, t - a)
}
