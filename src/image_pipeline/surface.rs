//! Output surface module
//!
//! This module provides the write side of the pipeline: committing a pixel
//! grid to an encoder and handing back the encoded bytes.

mod writer;
mod png_surface;
mod tiff_surface;
mod standard_surface;
pub mod types;

pub use writer::PixelSink;
pub use png_surface::PngSurface;
pub use tiff_surface::TiffSurface;
pub use standard_surface::StandardSurface;
pub use types::{EncodedImage, OutputFormat, TiffCompression};
