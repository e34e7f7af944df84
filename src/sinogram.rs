use ndarray::{Array2, ArrayView1, ShapeBuilder};

use geometry::RadialRange;

use crate::error::{RadonError, Result};

/// Line-integral samples: one row per radial offset, one column per angle.
///
/// Stored column-major, so that all the radial samples belonging to a single
/// angle are contiguous in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct Sinogram {
    pub data: Array2<f64>,
}

/// Separate real and imaginary sinograms of a complex image.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexSinogram {
    pub re: Sinogram,
    pub im: Sinogram,
}

impl Sinogram {

    pub fn new(data: Array2<f64>) -> Self { Self { data } }

    pub fn zeros(r_size: usize, n_angles: usize) -> Self {
        Self::new(Array2::zeros((r_size, n_angles).f()))
    }

    /// Build a sinogram from column-major `data`: all radial samples of the
    /// first angle, then all of the second, and so on.
    pub fn from_columns(r_size: usize, n_angles: usize, data: Vec<f64>) -> Result<Self> {
        let n = data.len();
        Array2::from_shape_vec((r_size, n_angles).f(), data)
            .map(Self::new)
            .map_err(|_| RadonError::shape("sinogram data", format!("{r_size} x {n_angles} = {}", r_size * n_angles), n))
    }

    /// Build a sinogram from row-major `data`
    pub fn from_shape_vec(r_size: usize, n_angles: usize, data: Vec<f64>) -> Result<Self> {
        let n = data.len();
        Array2::from_shape_vec((r_size, n_angles), data)
            .map(Self::new)
            .map_err(|_| RadonError::shape("sinogram data", format!("{r_size} x {n_angles} = {}", r_size * n_angles), n))
    }

    pub fn n_radial(&self) -> usize { self.data.nrows() }
    pub fn n_angles(&self) -> usize { self.data.ncols() }

    /// The radial profile measured at angle number `k`
    pub fn profile(&self, k: usize) -> ArrayView1<'_, f64> { self.data.column(k) }

    /// The integer radial coordinates of the rows, `first..=last`
    pub fn radial_coordinates(&self) -> Vec<i64> {
        RadialRange::of(self.n_radial()).coordinates().collect()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        (&self.data * &other.data).sum()
    }

    pub(crate) fn ensure_angles(&self, n_angles: usize) -> Result<()> {
        if self.n_angles() != n_angles {
            return Err(RadonError::shape("sinogram", format!("{n_angles} angle columns"), self.n_angles()));
        }
        if self.n_radial() == 0 {
            return Err(RadonError::shape("sinogram", "at least 1 radial sample", 0));
        }
        Ok(())
    }
}

impl core::ops::Index<(usize, usize)> for Sinogram {
    type Output = f64;
    #[inline]
    fn index(&self, i: (usize, usize)) -> &Self::Output { &self.data[i] }
}

impl core::ops::IndexMut<(usize, usize)> for Sinogram {
    #[inline]
    fn index_mut(&mut self, i: (usize, usize)) -> &mut Self::Output { &mut self.data[i] }
}

#[cfg(test)]
mod test {
    use super::*;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn columns_are_contiguous() {
        let s = Sinogram::zeros(5, 3);
        assert!(s.profile(1).as_slice().is_some());
    }

    #[test]
    fn column_and_row_major_agree() {
        let by_column = Sinogram::from_columns  (2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let by_row    = Sinogram::from_shape_vec(2, 3, vec![1.0, 3.0, 5.0, 2.0, 4.0, 6.0]).unwrap();
        assert_eq!(by_column, by_row);
        assert_eq!(by_column.profile(2).to_vec(), vec![5.0, 6.0]);
    }

    #[test]
    fn radial_coordinates() {
        assert_eq!(Sinogram::zeros(7, 1).radial_coordinates(), vec![-3, -2, -1, 0, 1, 2, 3]);
    }

    #[test]
    fn angle_count_must_match() {
        let s = Sinogram::zeros(5, 3);
        assert!(s.ensure_angles(3).is_ok());
        assert!(matches!(s.ensure_angles(4), Err(RadonError::InvalidShape { .. })));
    }
}
