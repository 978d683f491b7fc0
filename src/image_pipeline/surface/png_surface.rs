use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;
use crate::image_pipeline::common::error::{DownsampleError, Result};
use crate::image_pipeline::source::types::PixelGrid;
use crate::image_pipeline::surface::types::{EncodedImage, OutputFormat};
use crate::image_pipeline::surface::writer::PixelSink;

pub struct PngSurface;

impl PixelSink for PngSurface {
    fn write_pixels(&self, grid: &PixelGrid) -> Result<EncodedImage> {
        debug!("Encoding PNG image: {}x{}", grid.width(), grid.height());

        let mut buffer = Vec::new();

        PngEncoder::new(&mut buffer)
            .write_image(
                grid.as_bytes(),
                grid.width() as u32,
                grid.height() as u32,
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| DownsampleError::EncodeError(e.to_string()))?;

        debug!("PNG encoding complete, {} bytes", buffer.len());
        Ok(EncodedImage {
            format: OutputFormat::Png,
            width: grid.width(),
            height: grid.height(),
            bytes: buffer,
        })
    }
}
