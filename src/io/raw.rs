//! Read / write `f64` grids as raw little-endian binary, in row-major order.
//!
//! The files carry no header: the shape must be supplied when reading.

use std::fs::File;
use std::io::{Write, Read, BufWriter, BufReader};
use std::path::Path;

use crate::{
    error::Result,
    image::Image,
    sinogram::Sinogram,
};

pub fn write(data: impl Iterator<Item = f64>, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut buf = BufWriter::new(file);
    for datum in data {
        buf.write_all(&datum.to_le_bytes())?;
    }
    buf.flush()
}

type IORes<T> = std::io::Result<T>;
pub fn read<'a>(path: &Path) -> IORes<impl Iterator<Item = IORes<f64>> + 'a> {
    let file = File::open(path)?;
    let mut buf = BufReader::new(file);
    let mut buffer = [0; 8];

    Ok(std::iter::from_fn(move || {
        use std::io::ErrorKind::UnexpectedEof;
        match buf.read_exact(&mut buffer) {
            Ok(()) => Some(Ok(f64::from_le_bytes(buffer))),
            Err(e) if e.kind() == UnexpectedEof => None,
            Err(e) => Some(Err(e)),
        }
    }))
}

fn read_all(path: &Path) -> Result<Vec<f64>> {
    Ok(read(path)?.collect::<IORes<_>>()?)
}

impl Image {

    /// Read a `rows` × `cols` image. The file must contain exactly that many
    /// values.
    pub fn from_raw_file(path: &Path, rows: usize, cols: usize) -> Result<Self> {
        Self::from_shape_vec(rows, cols, read_all(path)?)
    }

    pub fn write_to_raw_file(&self, path: &Path) -> Result<()> {
        Ok(write(self.data.iter().copied(), path)?)
    }
}

impl Sinogram {

    /// Read a sinogram of `r_size` rows by `n_angles` columns, stored row by
    /// row.
    pub fn from_raw_file(path: &Path, r_size: usize, n_angles: usize) -> Result<Self> {
        Self::from_shape_vec(r_size, n_angles, read_all(path)?)
    }

    /// Write row by row, whatever the layout in memory
    pub fn write_to_raw_file(&self, path: &Path) -> Result<()> {
        Ok(write(self.data.iter().copied(), path)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use tempfile::tempdir;
    use crate::error::RadonError;

    #[test]
    fn raw_io_roundtrip() -> std::io::Result<()> {
        // Harmless temporary location for output file
        let dir = tempdir()?;
        let file_path = dir.path().join("test.bin");

        // Some test data
        let original_data = vec![1.23, -4.56, 7.89e-300, f64::MAX];

        // Write data to file
        write(original_data.iter().copied(), &file_path)?;
        assert_eq!(std::fs::metadata(&file_path)?.len(), 4 * 8);

        // Read data back from file
        let reloaded_data: Vec<_> = read(&file_path)?
            .collect::<std::result::Result<_, _>>()?;

        // Check that roundtrip didn't corrupt the data
        assert_eq!(original_data, reloaded_data);
        Ok(())
    }

    #[test]
    fn sinogram_is_written_row_by_row() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("sinogram.raw");

        // Column-major in memory
        let sinogram = Sinogram::from_columns(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        sinogram.write_to_raw_file(&file_path)?;

        let on_disk: Vec<f64> = read(&file_path)?.collect::<IORes<_>>()?;
        assert_eq!(on_disk, vec![1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);
        assert_eq!(Sinogram::from_raw_file(&file_path, 2, 3)?, sinogram);
        Ok(())
    }

    #[test]
    fn image_with_wrong_size_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("image.raw");
        Image::zeros(3, 4).write_to_raw_file(&file_path)?;
        assert_eq!(Image::from_raw_file(&file_path, 3, 4)?, Image::zeros(3, 4));
        let result = Image::from_raw_file(&file_path, 4, 4);
        assert!(matches!(result, Err(RadonError::InvalidShape { .. })));
        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Image::from_raw_file(Path::new("/no/such/image.raw"), 1, 1);
        assert!(matches!(result, Err(RadonError::Io(_))));
    }
}
