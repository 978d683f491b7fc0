use std::io::Cursor;

use tracing::debug;
use crate::image_pipeline::common::error::{DownsampleError, Result};
use crate::image_pipeline::source::types::PixelGrid;
use crate::image_pipeline::surface::types::{EncodedImage, OutputFormat, TiffCompression};
use crate::image_pipeline::surface::writer::PixelSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TiffSurface {
    pub compression: TiffCompression,
}

impl TiffSurface {
    pub fn new(compression: TiffCompression) -> Self {
        Self { compression }
    }
}

impl PixelSink for TiffSurface {
    fn write_pixels(&self, grid: &PixelGrid) -> Result<EncodedImage> {
        debug!("Encoding TIFF image: {}x{}", grid.width(), grid.height());

        let mut buffer = Vec::new();

        let compression = match self.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::Deflate => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
        };

        {
            let mut encoder = tiff::encoder::TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| DownsampleError::EncodeError(e.to_string()))?
                .with_compression(compression);

            encoder.write_image::<tiff::encoder::colortype::RGBA8>(
                grid.width() as u32,
                grid.height() as u32,
                grid.as_bytes(),
            ).map_err(|e| DownsampleError::EncodeError(e.to_string()))?;
        }

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(EncodedImage {
            format: OutputFormat::Tiff,
            width: grid.width(),
            height: grid.height(),
            bytes: buffer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::source::types::Rgba;

    #[test]
    fn test_tiff_header_and_pixels() {
        let grid = PixelGrid::filled(4, 4, Rgba::new(1, 2, 3, 4));

        for compression in [TiffCompression::None, TiffCompression::Lzw, TiffCompression::Deflate] {
            let encoded = TiffSurface::new(compression).write_pixels(&grid).unwrap();
            assert_eq!(encoded.format, OutputFormat::Tiff);

            let mut decoder = tiff::decoder::Decoder::new(Cursor::new(&encoded.bytes)).unwrap();
            assert_eq!(decoder.dimensions().unwrap(), (4, 4));
            match decoder.read_image().unwrap() {
                tiff::decoder::DecodingResult::U8(data) => assert_eq!(data, grid.as_bytes()),
                _ => panic!("expected 8-bit samples"),
            }
        }
    }
}
