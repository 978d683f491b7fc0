//! Image processing pipeline module
//!
//! This module downsamples an image by nearest-point sampling, with separate
//! modules for reading source pixels, sampling/rendering, encoding output and
//! the orchestration that ties them together.

pub mod source;
pub mod sampling;
pub mod surface;
pub mod conversions;
pub mod common;

pub use common::{
    DownsampleError,
    Result,
};

pub use source::{
    DecodedImage,
    PixelGrid,
    PixelSource,
    Region,
    Rgba,
};

pub use sampling::{
    DownsampleConfig,
    DownsampleConfigBuilder,
    SampleSequence,
    render,
    sample_grid,
    sample_source,
};

pub use surface::{
    EncodedImage,
    OutputFormat,
    PixelSink,
    PngSurface,
    StandardSurface,
    TiffCompression,
    TiffSurface,
};

pub use conversions::{
    Downsampled,
    DownsamplePipeline,
};
