/// Position of the coordinate system's origin in an image, in (fractional)
/// pixel indices.
///
/// `x` is measured along columns, `y` along rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

impl Origin {
    /// Origin of an image with `rows` × `cols` pixels: `(cols-1)/2` and
    /// `(rows-1)/2`, in integer arithmetic, never negative.
    pub fn of_image(rows: usize, cols: usize) -> Self {
        Self {
            x: (cols.saturating_sub(1) / 2) as f64,
            y: (rows.saturating_sub(1) / 2) as f64,
        }
    }
}

/// Centre of a square `n` × `n` backprojection image: `floor((n-1)/2)`.
pub fn image_centre(n: usize) -> f64 { (n.saturating_sub(1) / 2) as f64 }
