use std::path::PathBuf;

pub type Result<T, E = FusionError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum FusionError {
    #[error("window size must be at least 1")]
    ZeroWindowSize,

    #[error("window size must be odd, got {0}")]
    EvenWindowSize(usize),

    #[error("number of classes must be positive")]
    ZeroClasses,

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("raster `{name}` has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        name: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("raster has no cells")]
    EmptyRaster,

    #[error("buffer holds {actual} samples, shape requires {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("raster `{name}` has a non-finite sample at ({row}, {col})")]
    NonFiniteSample {
        name: &'static str,
        row: usize,
        col: usize,
    },

    #[error("spectral threshold is not finite: {0}")]
    NonFiniteThreshold(f64),

    #[error("weights degenerate at pixel ({row}, {col})")]
    DegenerateWeights { row: usize, col: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum RasterIoError {
    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TIFF error in '{path}': {source}")]
    Tiff {
        path: PathBuf,
        #[source]
        source: tiff::TiffError,
    },

    #[error("'{path}' is not a single-band raster: {color_type}")]
    UnsupportedColorType { path: PathBuf, color_type: String },

    #[error("'{path}' uses an unsupported sample format: {format}")]
    UnsupportedSampleFormat { path: PathBuf, format: String },

    #[error("raster of {rows}x{cols} is too large for TIFF")]
    TooLarge { rows: usize, cols: usize },

    #[error(transparent)]
    Fusion(#[from] FusionError),
}
