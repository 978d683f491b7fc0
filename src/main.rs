//! pixel_downsample - shrink an image to a small pixel grid by nearest-point sampling

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use pixel_downsample::image_pipeline::{
    DownsampleConfig, DownsamplePipeline, OutputFormat, TiffCompression,
};
use pixel_downsample::logger;

use tracing::{error, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Tiff,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Tiff => OutputFormat::Tiff,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    Deflate,
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::Deflate => TiffCompression::Deflate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pixel_downsample")]
#[command(version)]
#[command(about = "Downsample an image to a small pixel grid by nearest-point sampling", long_about = None)]
struct Cli {
    /// Input image file (PNG, JPEG, GIF, BMP, TIFF)
    input: PathBuf,

    /// Output file (default: <input>_<target>x<target>.<ext> next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Edge length of the square output grid
    #[arg(short, long, default_value = "32")]
    target: usize,

    /// Source length the stride is derived from (default: input width)
    #[arg(short, long)]
    reference: Option<usize>,

    /// Output format (default: from the output extension, else PNG)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Compression for TIFF output
    #[arg(long, value_enum, default_value = "none")]
    tiff_compression: CompressionArg,

    /// Fail when the stride does not divide the source into exactly target x target cells
    #[arg(long)]
    strict: bool,

    /// Print the encoded output as a data URI on stdout
    #[arg(long)]
    data_uri: bool,

    /// Also write an upscaled preview of the output
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Block size of each pixel in the preview (1-256)
    #[arg(long, default_value = "16", value_parser = clap::value_parser!(u16).range(1..=256))]
    preview_scale: u16,
}

fn resolve_format(cli: &Cli) -> OutputFormat {
    if let Some(format) = cli.format {
        return format.into();
    }
    cli.output
        .as_deref()
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str())
        .and_then(OutputFormat::from_extension)
        .unwrap_or_default()
}

fn default_output(input: &Path, target: usize, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_{}x{}.{}", stem, target, target, format.extension()))
}

fn run(cli: Cli) -> Result<()> {
    let format = resolve_format(&cli);
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input, cli.target, format));

    let config = DownsampleConfig::builder()
        .target_dimension(cli.target)
        .reference_dimension(cli.reference)
        .output_format(format)
        .tiff_compression(cli.tiff_compression.into())
        .strict_alignment(cli.strict)
        .build();
    let pipeline = DownsamplePipeline::new(config);

    info!("Downsample pipeline initialized");
    info!("Target: {0}x{0}", pipeline.config().target_dimension);
    info!("Format: {:?}", pipeline.config().output_format);

    let result = pipeline
        .convert_file(&cli.input, &output)
        .with_context(|| format!("downsampling '{}'", cli.input.display()))?;

    info!(output = %output.display(), bytes = result.encoded.bytes.len(), "Wrote output");

    if let Some(preview_path) = &cli.preview {
        let scale = usize::from(cli.preview_scale);
        let preview_edge = result.image.width().saturating_mul(scale);
        if let Some(max) = pipeline.config().max_dimension {
            if preview_edge > max {
                bail!(
                    "preview of {0}x{0} exceeds the {1}px limit; lower --preview-scale",
                    preview_edge,
                    max
                );
            }
        }

        let preview = result
            .image
            .upscale_nearest(scale)
            .context("upscaling preview")?;
        let encoded = pipeline
            .encode(&preview)
            .context("encoding preview")?;
        std::fs::write(preview_path, &encoded.bytes)
            .with_context(|| format!("writing preview '{}'", preview_path.display()))?;
        info!(
            preview = %preview_path.display(),
            width = preview.width(),
            height = preview.height(),
            "Wrote preview"
        );
    }

    if cli.data_uri {
        println!("{}", result.data_uri());
    }

    Ok(())
}

fn main() -> Result<()> {
    logger::init();

    let cli = Cli::parse();
    info!("Starting pixel_downsample...");

    if let Err(e) = run(cli) {
        error!("Downsample failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}
