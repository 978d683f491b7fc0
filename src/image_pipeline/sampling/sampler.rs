//! Nearest-point sampler.
//!
//! Walks the source grid with a fixed stride on both axes and keeps exactly
//! one source pixel per stride cell. Rows are the outer loop and columns the
//! inner one, so the resulting sequence is row-major, the same order the
//! renderer writes in.

use std::num::NonZeroUsize;

use tracing::{debug, instrument, trace};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::sampling::types::SampleSequence;
use crate::image_pipeline::source::PixelSource;
use crate::image_pipeline::source::types::{PixelGrid, Rgba};

/// Samples every `stride`-th pixel of `grid` along both axes, starting at (0, 0).
///
/// Loop bounds are the grid bounds, so a stride that does not divide the
/// grid evenly yields a sampled grid of `ceil(width / stride)` columns by
/// `ceil(height / stride)` rows rather than an out-of-range read.
#[instrument(level = "debug", skip(grid), fields(width = grid.width(), height = grid.height()))]
pub fn sample_grid(grid: &PixelGrid, stride: NonZeroUsize) -> SampleSequence {
    let step = stride.get();
    let columns = grid.width().div_ceil(step);
    let rows = grid.height().div_ceil(step);

    let data = grid.as_bytes();
    let mut samples = SampleSequence::with_capacity(columns, rows, step);

    for y in (0..grid.height()).step_by(step) {
        for x in (0..grid.width()).step_by(step) {
            let at = grid.offset(x, y);
            let color = Rgba::new(data[at], data[at + 1], data[at + 2], data[at + 3]);
            trace!(x, y, r = color.r, g = color.g, b = color.b, "sampled");
            samples.push(color);
        }
    }

    debug!(columns, rows, samples = samples.len(), "Sampling complete");
    samples
}

/// Reads the whole source and samples it.
pub fn sample_source<S: PixelSource + ?Sized>(source: &S, stride: NonZeroUsize) -> Result<SampleSequence> {
    let pixels = source.read_all()?;
    Ok(sample_grid(&pixels, stride))
}
