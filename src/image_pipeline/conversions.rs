//! Pipeline conversions module
//!
//! This module contains the orchestration that takes a source image through
//! sampling, rendering and encoding.

mod downsample;


pub use downsample::{Downsampled, DownsamplePipeline};
