//! Sampling module
//!
//! The two phases of a downsample: the sampler collects one colour per stride
//! cell, the renderer writes those colours into the target grid.

pub mod sampler;
pub mod renderer;
pub mod types;

pub use sampler::{sample_grid, sample_source};
pub use renderer::render;
pub use types::{DownsampleConfig, DownsampleConfigBuilder, SampleSequence, DEFAULT_MAX_DIMENSION, DEFAULT_TARGET_DIMENSION};
