use ndarray::{Array2, ArrayView2};

use crate::error::{RadonError, Result};

pub type ImageData = Array2<f64>;

/// 2-D grid of densities indexed by `(row, column)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub data: ImageData,
}

impl Image {

    pub fn new(data: ImageData) -> Self { Self { data } }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(Array2::zeros((rows, cols)))
    }

    /// Build an image from row-major `data`
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let n = data.len();
        Array2::from_shape_vec((rows, cols), data)
            .map(Self::new)
            .map_err(|_| RadonError::shape("image data", format!("{rows} x {cols} = {}", rows * cols), n))
    }

    pub fn rows(&self) -> usize { self.data.nrows() }
    pub fn cols(&self) -> usize { self.data.ncols() }
    pub fn shape(&self) -> (usize, usize) { self.data.dim() }

    pub fn view(&self) -> ArrayView2<'_, f64> { self.data.view() }

    /// Sum of elementwise products with an image of the same shape
    pub fn dot(&self, other: &Self) -> f64 {
        (&self.data * &other.data).sum()
    }

    pub fn scaled(&self, factor: f64) -> Self { Self::new(&self.data * factor) }

    pub(crate) fn ensure_not_empty(&self) -> Result<()> {
        let (rows, cols) = self.shape();
        if rows == 0 || cols == 0 {
            return Err(RadonError::shape("image", "at least 1 x 1", format!("{rows} x {cols}")));
        }
        Ok(())
    }
}

impl From<ImageData> for Image {
    fn from(data: ImageData) -> Self { Self::new(data) }
}

impl core::ops::Index<(usize, usize)> for Image {
    type Output = f64;
    #[inline]
    fn index(&self, i: (usize, usize)) -> &Self::Output { &self.data[i] }
}

impl core::ops::IndexMut<(usize, usize)> for Image {
    #[inline]
    fn index_mut(&mut self, i: (usize, usize)) -> &mut Self::Output { &mut self.data[i] }
}

impl core::ops::Add for &Image {
    type Output = Image;
    fn add(self, rhs: Self) -> Image { Image::new(&self.data + &rhs.data) }
}
