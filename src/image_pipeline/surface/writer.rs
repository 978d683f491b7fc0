use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::source::types::PixelGrid;
use crate::image_pipeline::surface::types::EncodedImage;

/// Drawing surface the rendered grid is committed to.
pub trait PixelSink {
    fn write_pixels(&self, grid: &PixelGrid) -> Result<EncodedImage>;
}
