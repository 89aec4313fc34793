use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("no position buffer with id {0}")]
    UnknownPositions(usize),

    #[error("no index buffer with id {0}")]
    UnknownIndices(usize),

    #[error("vertex index {index} out of range for {len} positions")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to write image")]
    Image(#[from] image::ImageError),
}
