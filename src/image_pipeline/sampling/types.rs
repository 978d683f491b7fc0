//! Sampling configuration and the sample sequence handed from sampler to renderer

use std::num::NonZeroUsize;

use tracing::warn;
use crate::image_pipeline::common::error::{DownsampleError, Result};
use crate::image_pipeline::source::types::{Rgba, CHANNELS};
use crate::image_pipeline::surface::types::{OutputFormat, TiffCompression};

/// Default edge length of the square output grid.
pub const DEFAULT_TARGET_DIMENSION: usize = 32;

/// Default cap on the output edge length (256 MiB of RGBA8).
pub const DEFAULT_MAX_DIMENSION: usize = 8192;

/// Ordered colour samples in row-major order, plus the shape of the grid
/// they were taken from.
///
/// `columns * rows == len()` always holds. Whether that shape matches the
/// renderer's target is a separate question, see [`SampleSequence::is_aligned_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSequence {
    samples: Vec<Rgba>,
    columns: usize,
    rows: usize,
    stride: usize,
}

impl SampleSequence {
    pub(crate) fn with_capacity(columns: usize, rows: usize, stride: usize) -> Self {
        Self {
            samples: Vec::with_capacity(columns * rows),
            columns,
            rows,
            stride,
        }
    }

    pub(crate) fn push(&mut self, color: Rgba) {
        self.samples.push(color);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn samples(&self) -> &[Rgba] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rgba> {
        self.samples.iter()
    }

    /// Sample taken for grid cell `(column, row)`.
    pub fn get(&self, column: usize, row: usize) -> Option<Rgba> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.samples.get(column + row * self.columns).copied()
    }

    /// Channels laid end to end: `[r0, g0, b0, a0, r1, ...]`.
    pub fn flatten(&self) -> Vec<u8> {
        let mut flat = Vec::with_capacity(self.samples.len() * CHANNELS);
        for color in &self.samples {
            flat.extend_from_slice(&color.to_array());
        }
        flat
    }

    /// True when the sampled grid is exactly `target` x `target`.
    pub fn is_aligned_to(&self, target: usize) -> bool {
        self.columns == target && self.rows == target
    }
}

impl<'a> IntoIterator for &'a SampleSequence {
    type Item = &'a Rgba;
    type IntoIter = std::slice::Iter<'a, Rgba>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Configuration for a downsample run
#[derive(Debug, Clone)]
pub struct DownsampleConfig {
    /// Edge length of the square output grid
    pub target_dimension: usize,
    /// Source length the stride is derived from; `None` uses the source width
    pub reference_dimension: Option<usize>,
    /// Encoding of the rendered grid
    pub output_format: OutputFormat,
    /// Compression used when `output_format` is TIFF
    pub tiff_compression: TiffCompression,
    /// Whether to reject zero-sized sources before sampling
    pub validate_dimensions: bool,
    /// Fail instead of truncating/padding when the sampled grid is not target x target
    pub strict_alignment: bool,
    /// Largest accepted target dimension; `None` only guards against overflow
    pub max_dimension: Option<usize>,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        Self {
            target_dimension: DEFAULT_TARGET_DIMENSION,
            reference_dimension: None,
            output_format: OutputFormat::Png,
            tiff_compression: TiffCompression::None,
            validate_dimensions: true,
            strict_alignment: false,
            max_dimension: Some(DEFAULT_MAX_DIMENSION),
        }
    }
}

impl DownsampleConfig {
    pub fn builder() -> DownsampleConfigBuilder {
        DownsampleConfigBuilder::default()
    }

    /// Stride in source pixels: `reference / target`, rounded down.
    ///
    /// A reference shorter than the target (or a zero target) would need a
    /// stride below one pixel and is rejected.
    pub fn stride_for(&self, source_width: usize) -> Result<NonZeroUsize> {
        let reference = self.reference_dimension.unwrap_or(source_width);
        let target = self.target_dimension;

        if target == 0 {
            return Err(DownsampleError::InvalidStride { reference, target });
        }

        NonZeroUsize::new(reference / target)
            .ok_or(DownsampleError::InvalidStride { reference, target })
    }

    /// Byte length of the rendered target x target RGBA8 grid.
    ///
    /// Fails with `InvalidDimensions` when the target exceeds `max_dimension`
    /// or the length does not fit in `usize`.
    pub fn output_len(&self) -> Result<usize> {
        let target = self.target_dimension;

        if let Some(max) = self.max_dimension {
            if target > max {
                warn!("Target dimension {} exceeds maximum {}", target, max);
                return Err(DownsampleError::InvalidDimensions(target, target));
            }
        }

        target
            .checked_mul(target)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(DownsampleError::InvalidDimensions(target, target))
    }
}

/// Builder for DownsampleConfig
#[derive(Default)]
pub struct DownsampleConfigBuilder {
    target_dimension: Option<usize>,
    reference_dimension: Option<Option<usize>>,
    output_format: Option<OutputFormat>,
    tiff_compression: Option<TiffCompression>,
    validate_dimensions: Option<bool>,
    strict_alignment: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl DownsampleConfigBuilder {
    pub fn target_dimension(mut self, target: usize) -> Self {
        self.target_dimension = Some(target);
        self
    }

    pub fn reference_dimension(mut self, reference: Option<usize>) -> Self {
        self.reference_dimension = Some(reference);
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn tiff_compression(mut self, compression: TiffCompression) -> Self {
        self.tiff_compression = Some(compression);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn strict_alignment(mut self, strict: bool) -> Self {
        self.strict_alignment = Some(strict);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> DownsampleConfig {
        let default = DownsampleConfig::default();
        DownsampleConfig {
            target_dimension: self.target_dimension.unwrap_or(default.target_dimension),
            reference_dimension: self.reference_dimension.unwrap_or(default.reference_dimension),
            output_format: self.output_format.unwrap_or(default.output_format),
            tiff_compression: self.tiff_compression.unwrap_or(default.tiff_compression),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            strict_alignment: self.strict_alignment.unwrap_or(default.strict_alignment),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
