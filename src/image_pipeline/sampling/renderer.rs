//! Writes a sample sequence back out as a square pixel grid.

use tracing::{debug, instrument};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::sampling::types::SampleSequence;
use crate::image_pipeline::source::types::{PixelGrid, CHANNELS};

/// Renders `samples` into a `target` x `target` grid, row-major.
///
/// Output pixel `i` takes sample `i`. Samples beyond `target * target` are
/// dropped; pixels with no sample behind them stay transparent black.
/// Fails with `InvalidDimensions` when the grid size overflows `usize`.
#[instrument(level = "debug", skip(samples), fields(samples = samples.len()))]
pub fn render(samples: &SampleSequence, target: usize) -> Result<PixelGrid> {
    let mut grid = PixelGrid::try_new(target, target)?;
    let pixel_count = grid.pixel_count();

    let image_data = grid.as_bytes_mut();
    for (px, color) in image_data
        .chunks_exact_mut(CHANNELS)
        .zip(samples.iter().take(pixel_count))
    {
        px.copy_from_slice(&color.to_array());
    }

    let written = samples.len().min(pixel_count);
    if written < pixel_count {
        debug!(written, padded = pixel_count - written, "Sample sequence short of target grid");
    } else if samples.len() > pixel_count {
        debug!(written, dropped = samples.len() - pixel_count, "Sample sequence longer than target grid");
    }

    Ok(grid)
}
