//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two codec operations the pipeline
//! needs from the outside world: decode source bytes into a bitmap, and encode
//! a painted canvas into the output format. Drawing happens in between on a
//! [`Canvas`], which is backend-independent.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::canvas::Canvas;
use super::params::Quality;
use crate::types::MediaType;
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("no image data")]
    Empty,
    #[error("failed to decode {media_type}: {message}")]
    Malformed {
        media_type: MediaType,
        message: String,
    },
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("cannot encode a {width}x{height} canvas")]
    ZeroArea { width: u32, height: u32 },
    #[error("WebP encode failed: {0}")]
    Backend(String),
}

/// A decoded source image, ready to be drawn.
#[derive(Debug, Clone)]
pub struct DecodedBitmap {
    image: DynamicImage,
}

impl DecodedBitmap {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Trait for codec backends.
///
/// `Send + Sync` because conversions run on tokio's blocking pool and several
/// sized conversions may share one backend.
pub trait ImageBackend: Send + Sync {
    /// Decode source bytes. `declared` is the media type the caller claimed;
    /// backends may sniff the actual format from the bytes.
    fn decode(&self, bytes: &[u8], declared: MediaType) -> Result<DecodedBitmap, DecodeError>;

    /// Encode a canvas into the output format.
    fn encode(&self, canvas: &Canvas, quality: Quality) -> Result<Vec<u8>, EncodeError>;
}
