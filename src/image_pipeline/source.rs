//! Source image module
//!
//! This module provides the pixel buffer types and the read side of the
//! pipeline: anything that can hand out decoded RGBA8 pixels by region.

mod reader;
mod decoded_image;
pub mod types;

pub use reader::PixelSource;
pub use decoded_image::DecodedImage;
pub use types::{PixelGrid, Region, Rgba, CHANNELS};
