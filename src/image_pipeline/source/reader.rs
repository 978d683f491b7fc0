use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::source::types::{PixelGrid, Region};

/// Anything the sampler can read decoded RGBA8 pixels from.
pub trait PixelSource {
    fn dimensions(&self) -> (usize, usize);

    fn read_pixels(&self, region: Region) -> Result<PixelGrid>;

    fn read_all(&self) -> Result<PixelGrid> {
        let (width, height) = self.dimensions();
        self.read_pixels(Region::full(width, height))
    }
}

/// An in-memory grid is its own source.
impl PixelSource for PixelGrid {
    fn dimensions(&self) -> (usize, usize) {
        PixelGrid::dimensions(self)
    }

    fn read_pixels(&self, region: Region) -> Result<PixelGrid> {
        self.crop(region)
    }
}
