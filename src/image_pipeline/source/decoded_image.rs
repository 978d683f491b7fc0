//! Pixel source backed by the `image` crate's decoders.
//!
//! Any format `image` was built with (PNG, JPEG, GIF, BMP, TIFF) is decoded
//! once up front and normalised to RGBA8, so later region reads are plain
//! buffer copies.

use std::path::Path;

use tracing::debug;
use crate::image_pipeline::common::error::{DownsampleError, Result};
use crate::image_pipeline::source::reader::PixelSource;
use crate::image_pipeline::source::types::{PixelGrid, Region};

#[derive(Debug, Clone)]
pub struct DecodedImage {
    grid: PixelGrid,
}

impl DecodedImage {
    /// Decodes an encoded image held in memory.
    ///
    /// Zero-sized images decode successfully; rejecting them is the
    /// pipeline's job.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        debug!("Decoding source image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| DownsampleError::DecodeError(e.to_string()))?;

        let rgba = decoded.to_rgba8();
        let (width, height) = (rgba.width() as usize, rgba.height() as usize);

        debug!("Decoded image: {}x{}", width, height);

        let grid = PixelGrid::from_raw(width, height, rgba.into_raw())?;
        Ok(Self { grid })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            DownsampleError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_bytes(&data)
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }
}

impl PixelSource for DecodedImage {
    fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    fn read_pixels(&self, region: Region) -> Result<PixelGrid> {
        self.grid.crop(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use image::{ImageFormat, RgbaImage};

    fn encode_png(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png_to_rgba() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba([10, 20, 30, 40]));
        let decoded = DecodedImage::from_bytes(&encode_png(&img)).unwrap();

        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(
            decoded.grid().get_pixel(2, 1).map(|c| c.to_array()),
            Some([10, 20, 30, 40])
        );
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = DecodedImage::from_bytes(b"definitely not an image");
        assert!(matches!(result.unwrap_err(), DownsampleError::DecodeError(_)));
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DecodedImage::from_path(dir.path().join("missing.png"));
        assert!(matches!(result.unwrap_err(), DownsampleError::InputReadError(_)));
    }

    #[test]
    fn test_region_read() {
        let img = RgbaImage::from_fn(4, 4, |x, y| image::Rgba([x as u8, y as u8, 0, 255]));
        let decoded = DecodedImage::from_bytes(&encode_png(&img)).unwrap();
        let region = decoded.read_pixels(Region::new(2, 1, 2, 3)).unwrap();

        assert_eq!(region.dimensions(), (2, 3));
        assert_eq!(region.get_pixel(1, 2).map(|c| c.rgb()), Some((3, 3, 0)));
    }
}
