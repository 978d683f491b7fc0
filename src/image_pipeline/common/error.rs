use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownsampleError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode source image: {0}")]
    DecodeError(String),

    #[error("Failed to encode output image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid stride: reference dimension {reference} / target dimension {target} is not a positive integer")]
    InvalidStride { reference: usize, target: usize },

    #[error("Stride {stride} does not align with target {target}: sampled grid is {columns}x{rows}")]
    StrideMisalignment {
        stride: usize,
        target: usize,
        columns: usize,
        rows: usize,
    },

    #[error("Region {x},{y} {width}x{height} lies outside the {source_width}x{source_height} source")]
    RegionOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        source_width: usize,
        source_height: usize,
    },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DownsampleError>;
