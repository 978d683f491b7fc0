use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::source::types::PixelGrid;
use crate::image_pipeline::surface::png_surface::PngSurface;
use crate::image_pipeline::surface::tiff_surface::TiffSurface;
use crate::image_pipeline::surface::types::{EncodedImage, OutputFormat, TiffCompression};
use crate::image_pipeline::surface::writer::PixelSink;

/// Picks the encoder from the configured output format.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSurface {
    pub format: OutputFormat,
    pub tiff_compression: TiffCompression,
}

impl StandardSurface {
    pub fn new(format: OutputFormat, tiff_compression: TiffCompression) -> Self {
        Self { format, tiff_compression }
    }
}

impl PixelSink for StandardSurface {
    fn write_pixels(&self, grid: &PixelGrid) -> Result<EncodedImage> {
        match self.format {
            OutputFormat::Png => PngSurface.write_pixels(grid),
            OutputFormat::Tiff => TiffSurface::new(self.tiff_compression).write_pixels(grid),
        }
    }
}
