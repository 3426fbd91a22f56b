//! Data types for image export.

use super::data_url;
use std::path::PathBuf;
use thiserror::Error;

/// A lossless PNG snapshot of a raster buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// Width of the encoded image in pixels.
    pub width: u32,
    /// Height of the encoded image in pixels.
    pub height: u32,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

impl ExportedImage {
    /// Returns the PNG as a `data:image/png;base64,...` URL.
    pub fn to_data_url(&self) -> String {
        data_url::encode_png(&self.png)
    }

    /// Decodes the PNG back into a cairo surface for pixel inspection or compositing.
    pub fn to_surface(&self) -> Result<cairo::ImageSurface, ExportError> {
        decode_png(&self.png)
    }
}

/// Decodes PNG bytes into an image surface.
pub fn decode_png(png: &[u8]) -> Result<cairo::ImageSurface, ExportError> {
    let mut reader = std::io::Cursor::new(png);
    cairo::ImageSurface::create_from_png(&mut reader)
        .map_err(|err| ExportError::Decode(err.to_string()))
}

/// Errors that can occur while exporting or decoding images.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("PNG decoding failed: {0}")]
    Decode(String),

    #[error("Not a PNG data URL (expected prefix '{expected}')")]
    NotPngDataUrl { expected: &'static str },

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid filename template '{0}'")]
    InvalidTemplate(String),

    #[error("Failed to save image: {0}")]
    SaveError(#[from] std::io::Error),
}

/// Result of writing an export to disk.
#[derive(Debug, Clone)]
pub struct SavedImage {
    /// Path where the image was saved.
    pub path: PathBuf,
    /// Number of bytes written.
    pub size_bytes: u64,
}
