//! Pixel buffer types shared by every stage of the pipeline

use crate::image_pipeline::common::error::{DownsampleError, Result};

/// Number of interleaved 8-bit channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A single RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Written into output pixels that have no sample behind them.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    pub fn to_array(self) -> [u8; CHANNELS] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Rectangular area of a pixel grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// The whole of a `width` x `height` grid.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x
            .checked_add(self.width)
            .is_some_and(|right| right <= width)
            && self
                .y
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= height)
    }
}

/// Row-major RGBA8 pixel buffer.
///
/// Pixel `(x, y)` lives at byte offset `4 * (x + y * width)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// A fully transparent grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * CHANNELS],
        }
    }

    /// Like [`PixelGrid::new`], but fails instead of overflowing when
    /// `width * height * 4` does not fit in `usize`.
    pub fn try_new(width: usize, height: usize) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(DownsampleError::InvalidDimensions(width, height))?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        Self::from_fn(width, height, |_, _| color)
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgba) -> Self {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y).to_array());
            }
        }
        Self { width, height, data }
    }

    /// Wraps an existing interleaved RGBA8 buffer.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(DownsampleError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        CHANNELS * (x + y * self.width)
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = self.offset(x, y);
        let px = &self.data[at..at + CHANNELS];
        Some(Rgba::new(px[0], px[1], px[2], px[3]))
    }

    /// Returns `false` when `(x, y)` is outside the grid.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let at = self.offset(x, y);
        self.data[at..at + CHANNELS].copy_from_slice(&color.to_array());
        true
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
    }

    /// Copies `region` out into a new grid.
    pub fn crop(&self, region: Region) -> Result<PixelGrid> {
        if !region.fits_within(self.width, self.height) {
            return Err(DownsampleError::RegionOutOfBounds {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                source_width: self.width,
                source_height: self.height,
            });
        }

        if region == Region::full(self.width, self.height) {
            return Ok(self.clone());
        }

        let row_bytes = region.width * CHANNELS;
        let mut data = Vec::with_capacity(row_bytes * region.height);
        for y in region.y..region.y + region.height {
            let start = self.offset(region.x, y);
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }

        Ok(PixelGrid {
            width: region.width,
            height: region.height,
            data,
        })
    }

    /// Blows every pixel up into a `factor` x `factor` block.
    ///
    /// Used for previews of tiny downsampled output; a factor of 0 is treated as 1.
    pub fn upscale_nearest(&self, factor: usize) -> Result<PixelGrid> {
        let factor = factor.max(1);
        let width = self
            .width
            .checked_mul(factor)
            .ok_or(DownsampleError::InvalidDimensions(self.width, self.height))?;
        let height = self
            .height
            .checked_mul(factor)
            .ok_or(DownsampleError::InvalidDimensions(self.width, self.height))?;

        let mut preview = PixelGrid::try_new(width, height)?;
        if preview.is_empty() {
            return Ok(preview);
        }

        let row_bytes = width * CHANNELS;
        for (y, row) in preview.data.chunks_exact_mut(row_bytes).enumerate() {
            for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
                let at = self.offset(x / factor, y / factor);
                px.copy_from_slice(&self.data[at..at + CHANNELS]);
            }
        }
        Ok(preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: usize, height: usize) -> PixelGrid {
        PixelGrid::from_fn(width, height, |x, y| Rgba::opaque(x as u8, y as u8, (x + y * width) as u8))
    }

    #[test]
    fn test_from_raw_rejects_wrong_length() {
        let result = PixelGrid::from_raw(2, 2, vec![0u8; 15]);
        assert!(matches!(
            result.unwrap_err(),
            DownsampleError::BufferSizeMismatch { expected: 16, actual: 15 }
        ));
    }

    #[test]
    fn test_pixel_offsets_are_row_major() {
        let grid = numbered(3, 2);
        assert_eq!(grid.offset(2, 1), 4 * (2 + 3));
        assert_eq!(grid.get_pixel(2, 1), Some(Rgba::opaque(2, 1, 5)));
        assert_eq!(grid.get_pixel(3, 0), None);
        assert_eq!(grid.pixels().nth(4), Some(Rgba::opaque(1, 1, 4)));
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut grid = PixelGrid::new(2, 2);
        assert!(grid.set_pixel(1, 1, Rgba::opaque(9, 9, 9)));
        assert!(!grid.set_pixel(2, 0, Rgba::opaque(9, 9, 9)));
        assert_eq!(grid.get_pixel(1, 1), Some(Rgba::opaque(9, 9, 9)));
    }

    #[test]
    fn test_crop_inner_region() {
        let grid = numbered(4, 4);
        let cropped = grid.crop(Region::new(1, 2, 2, 2)).unwrap();
        assert_eq!(cropped.dimensions(), (2, 2));
        assert_eq!(cropped.get_pixel(0, 0), grid.get_pixel(1, 2));
        assert_eq!(cropped.get_pixel(1, 1), grid.get_pixel(2, 3));
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let grid = numbered(4, 4);
        let result = grid.crop(Region::new(3, 0, 2, 1));
        assert!(matches!(result.unwrap_err(), DownsampleError::RegionOutOfBounds { .. }));

        let overflow = grid.crop(Region::new(usize::MAX, 0, 2, 1));
        assert!(overflow.is_err());
    }

    #[test]
    fn test_upscale_nearest_blocks() {
        let grid = numbered(2, 1);
        let preview = grid.upscale_nearest(3).unwrap();
        assert_eq!(preview.dimensions(), (6, 3));
        assert_eq!(preview.get_pixel(2, 2), grid.get_pixel(0, 0));
        assert_eq!(preview.get_pixel(3, 0), grid.get_pixel(1, 0));
        assert_eq!(grid.upscale_nearest(0).unwrap(), grid);
        assert!(PixelGrid::new(0, 3).upscale_nearest(4).unwrap().is_empty());
    }

    #[test]
    fn test_upscale_nearest_overflow() {
        let grid = numbered(2, 2);
        let result = grid.upscale_nearest(usize::MAX);
        assert!(matches!(result.unwrap_err(), DownsampleError::InvalidDimensions(2, 2)));
    }

    #[test]
    fn test_try_new_overflow() {
        assert!(matches!(
            PixelGrid::try_new(usize::MAX, 2).unwrap_err(),
            DownsampleError::InvalidDimensions(_, 2)
        ));
        assert_eq!(PixelGrid::try_new(3, 2).unwrap(), PixelGrid::new(3, 2));
    }
}
