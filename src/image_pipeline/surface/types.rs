//! Encoded output types

use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::image_pipeline::common::error::Result;

/// Container format for the rendered image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Lossless PNG (default, what a browser canvas exports)
    #[default]
    Png,
    /// Baseline TIFF, RGBA 8 bits per channel
    Tiff,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Tiff => "image/tiff",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tiff",
        }
    }

    /// Guesses the format from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            _ => None,
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - balanced level
    Deflate,
}

/// An encoded image, ready to be written out or embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: OutputFormat,
    pub width: usize,
    pub height: usize,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// `data:<mime>;base64,<payload>`, the same shape `canvas.toDataURL()` yields.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }

    pub fn write_to(&self, output: &mut dyn Write) -> Result<()> {
        output.write_all(&self.bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_shape() {
        let encoded = EncodedImage {
            format: OutputFormat::Png,
            width: 1,
            height: 1,
            bytes: b"hello".to_vec(),
        };
        assert_eq!(encoded.to_data_uri(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("PNG"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_extension("tif"), Some(OutputFormat::Tiff));
        assert_eq!(OutputFormat::from_extension("jpg"), None);
    }

    #[test]
    fn test_write_to_copies_bytes() {
        let encoded = EncodedImage {
            format: OutputFormat::Tiff,
            width: 0,
            height: 0,
            bytes: vec![1, 2, 3],
        };
        let mut out = Vec::new();
        encoded.write_to(&mut out).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }
}
