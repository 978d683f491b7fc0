use tracing::{info, instrument, trace, warn};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::error::{DownsampleError, Result},
    sampling::{render, sample_grid, DownsampleConfig, SampleSequence},
    source::{DecodedImage, PixelGrid, PixelSource},
    surface::{EncodedImage, PixelSink, StandardSurface},
};

/// Everything a downsample run produces.
#[derive(Debug, Clone)]
pub struct Downsampled {
    /// Colours in the order the sampler collected them
    pub samples: SampleSequence,
    /// The rendered target x target grid
    pub image: PixelGrid,
    /// `image` after passing through the surface's encoder
    pub encoded: EncodedImage,
}

impl Downsampled {
    pub fn data_uri(&self) -> String {
        self.encoded.to_data_uri()
    }
}

/// Writes `encoded` to `output`, reporting failures against `output_path`.
pub(super) fn write_encoded(
    encoded: &EncodedImage,
    output: &mut dyn Write,
    output_path: &Path,
) -> Result<()> {
    output
        .write_all(&encoded.bytes)
        .and_then(|_| output.flush())
        .map_err(|e| DownsampleError::OutputWriteError(format!("{}: {}", output_path.display(), e)))
}

pub struct DownsamplePipeline<W: PixelSink> {
    surface: W,
    config: DownsampleConfig,
}

impl DownsamplePipeline<StandardSurface> {
    pub fn new(config: DownsampleConfig) -> Self {
        Self {
            surface: StandardSurface::new(config.output_format, config.tiff_compression),
            config,
        }
    }
}

impl<W: PixelSink> DownsamplePipeline<W> {
    pub fn with_custom(surface: W, config: DownsampleConfig) -> Self {
        Self {
            surface,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(DownsampleError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    fn check_alignment(&self, samples: &SampleSequence) -> Result<()> {
        let target = self.config.target_dimension;
        if samples.is_aligned_to(target) {
            return Ok(());
        }

        if self.config.strict_alignment {
            return Err(DownsampleError::StrideMisalignment {
                stride: samples.stride(),
                target,
                columns: samples.columns(),
                rows: samples.rows(),
            });
        }

        warn!(
            stride = samples.stride(),
            columns = samples.columns(),
            rows = samples.rows(),
            target,
            "Sampled grid does not match target; output will be truncated or padded"
        );
        Ok(())
    }

    #[instrument(skip(self, source))]
    pub fn convert<S: PixelSource + ?Sized>(&self, source: &S) -> Result<Downsampled> {
        let (width, height) = source.dimensions();
        let target = self.config.target_dimension;
        info!(width, height, target, "Starting downsample");

        {
            let _span = tracing::info_span!("validate_dimensions", width, height).entered();
            self.validate_dimensions(width, height)?;
        }

        let stride = self.config.stride_for(width)?;
        self.config.output_len()?;

        let pixels = {
            let _span = tracing::info_span!("read_pixels").entered();
            source.read_all()?
        };

        let samples = {
            let _span = tracing::info_span!("sample", stride = stride.get()).entered();
            sample_grid(&pixels, stride)
        };

        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(flattened = ?samples.flatten(), "Sample sequence");
        }

        self.check_alignment(&samples)?;

        let image = {
            let _span = tracing::info_span!("render").entered();
            render(&samples, target)?
        };

        let encoded = {
            let _span = tracing::info_span!("encode").entered();
            self.surface.write_pixels(&image)?
        };

        info!(
            samples = samples.len(),
            width = image.width(),
            height = image.height(),
            encoded_bytes = encoded.bytes.len(),
            "Downsample complete"
        );
        Ok(Downsampled {
            samples,
            image,
            encoded,
        })
    }

    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn convert_bytes(&self, input_data: &[u8]) -> Result<Downsampled> {
        let source = {
            let _span = tracing::info_span!("decode_source").entered();
            DecodedImage::from_bytes(input_data)?
        };
        self.convert(&source)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<Downsampled> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                DownsampleError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let result = self.convert_bytes(&input_data)?;

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            File::create(output_path).map_err(|e| {
                DownsampleError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        if let Err(e) = write_encoded(&result.encoded, &mut output_file, output_path) {
            drop(output_file);
            if let Err(remove_err) = std::fs::remove_file(output_path) {
                warn!("Could not remove partial output {}: {}", output_path.display(), remove_err);
            }
            return Err(e);
        }

        Ok(result)
    }

    /// Encodes an arbitrary grid with this pipeline's surface.
    pub fn encode(&self, grid: &PixelGrid) -> Result<EncodedImage> {
        self.surface.write_pixels(grid)
    }

    pub fn config(&self) -> &DownsampleConfig {
        &self.config
    }
}
