//! Loading APA matrices from `.npy` files.

use std::path::Path;

use ndarray::Array2;
use ndarray_npy::{ReadNpyError, read_npy};
use tracing::debug;

use crate::error::ApaError;

/// Read a 2-D `.npy` array as `f64`.
///
/// Float and common integer dtypes are accepted and widened; anything else,
/// or an array that is not 2-D, is a load error. Errors are returned as-is,
/// there is no retry.
pub fn load_matrix(path: impl AsRef<Path>) -> Result<Array2<f64>, ApaError> {
    let path = path.as_ref();
    let matrix = read_as_f64(path).map_err(|source| ApaError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), shape = ?matrix.dim(), "loaded matrix");
    Ok(matrix)
}

fn read_as_f64(path: &Path) -> Result<Array2<f64>, ReadNpyError> {
    match read_npy::<_, Array2<f64>>(path) {
        Err(ReadNpyError::WrongDescriptor(_)) => {}
        other => return other,
    }
    match read_npy::<_, Array2<f32>>(path) {
        Err(ReadNpyError::WrongDescriptor(_)) => {}
        other => return other.map(|m| m.mapv(f64::from)),
    }
    match read_npy::<_, Array2<i64>>(path) {
        Err(ReadNpyError::WrongDescriptor(_)) => {}
        other => return other.map(|m| m.mapv(|v| v as f64)),
    }
    match read_npy::<_, Array2<i32>>(path) {
        Err(ReadNpyError::WrongDescriptor(_)) => {}
        other => return other.map(|m| m.mapv(f64::from)),
    }
    read_npy::<_, Array2<u8>>(path).map(|m| m.mapv(f64::from))
}
