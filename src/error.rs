use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApaError {
    #[error("failed to load matrix {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    #[error("matrix {path} has shape {rows}x{cols}; centre element is out of range")]
    Shape {
        path: PathBuf,
        rows: usize,
        cols: usize,
    },

    #[error("unsupported output format for {path}: {extension:?}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("render error: {0}")]
    Render(String),

    #[error("pdf conversion error: {0}")]
    Pdf(String),

    #[error("image encode error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl ApaError {
    pub(crate) fn render<E>(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        Self::Render(err.to_string())
    }
}
