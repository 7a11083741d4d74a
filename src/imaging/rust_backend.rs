//! Production codec backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG) | `image::ImageReader` with format sniffing |
//! | Encode → WebP (lossy) | `webp::Encoder::encode_simple` (libwebp) |
//!
//! Decoding sniffs the format from the bytes rather than trusting the declared
//! media type, the way a browser does: a JPEG saved as `.png` still decodes.

use super::backend::{DecodeError, DecodedBitmap, EncodeError, ImageBackend};
use super::canvas::Canvas;
use super::params::Quality;
use crate::types::MediaType;
use image::ImageReader;
use std::io::Cursor;

/// Codec backend built on the `image` and `webp` crates.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, bytes: &[u8], declared: MediaType) -> Result<DecodedBitmap, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let malformed = |message: String| DecodeError::Malformed {
            media_type: declared,
            message,
        };

        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| malformed(e.to_string()))?;
        match reader.format() {
            Some(sniffed) if sniffed != declared.image_format() => {
                tracing::debug!(?sniffed, %declared, "content does not match declared type");
            }
            None => return Err(malformed("unrecognized image data".to_string())),
            _ => {}
        }

        let image = reader.decode().map_err(|e| malformed(e.to_string()))?;
        Ok(DecodedBitmap::new(image))
    }

    fn encode(&self, canvas: &Canvas, quality: Quality) -> Result<Vec<u8>, EncodeError> {
        if canvas.is_empty() {
            return Err(EncodeError::ZeroArea {
                width: canvas.width(),
                height: canvas.height(),
            });
        }
        let encoder = webp::Encoder::from_rgba(canvas.as_raw(), canvas.width(), canvas.height());
        let memory = encoder
            .encode_simple(false, quality.percent())
            .map_err(|e| EncodeError::Backend(format!("{e:?}")))?;
        Ok(memory.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{jpeg_bytes, png_bytes};
    use image::GenericImageView;

    #[test]
    fn decode_synthetic_jpeg() {
        let bytes = jpeg_bytes(200, 150);
        let bitmap = RustBackend::new().decode(&bytes, MediaType::Jpeg).unwrap();
        assert_eq!(bitmap.dimensions(), (200, 150));
    }

    #[test]
    fn decode_synthetic_png() {
        let bytes = png_bytes(64, 48);
        let bitmap = RustBackend::new().decode(&bytes, MediaType::Png).unwrap();
        assert_eq!(bitmap.dimensions(), (64, 48));
    }

    #[test]
    fn decode_sniffs_mislabeled_content() {
        let bytes = jpeg_bytes(32, 32);
        let bitmap = RustBackend::new().decode(&bytes, MediaType::Png).unwrap();
        assert_eq!(bitmap.dimensions(), (32, 32));
    }

    #[test]
    fn decode_empty_input_errors() {
        let result = RustBackend::new().decode(&[], MediaType::Jpeg);
        assert!(matches!(result, Err(DecodeError::Empty)));
    }

    #[test]
    fn decode_garbage_errors() {
        let result = RustBackend::new().decode(b"definitely not an image", MediaType::Png);
        assert!(matches!(result, Err(DecodeError::Malformed { .. })));
    }

    #[test]
    fn encode_produces_decodable_webp() {
        let backend = RustBackend::new();
        let bitmap = backend.decode(&png_bytes(120, 80), MediaType::Png).unwrap();
        let canvas = Canvas::from_bitmap(&bitmap);

        let webp = backend.encode(&canvas, Quality::DEFAULT).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");

        let decoded = image::load_from_memory(&webp).unwrap();
        assert_eq!(decoded.dimensions(), (120, 80));
    }

    #[test]
    fn encode_zero_area_errors() {
        let result = RustBackend::new().encode(&Canvas::blank(0, 10), Quality::DEFAULT);
        assert!(matches!(
            result,
            Err(EncodeError::ZeroArea {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn lower_quality_is_not_larger() {
        let backend = RustBackend::new();
        let bitmap = backend.decode(&jpeg_bytes(256, 256), MediaType::Jpeg).unwrap();
        let canvas = Canvas::from_bitmap(&bitmap);

        let high = backend.encode(&canvas, Quality::new(1.0)).unwrap();
        let low = backend.encode(&canvas, Quality::new(0.1)).unwrap();
        assert!(low.len() <= high.len(), "{} > {}", low.len(), high.len());
    }
}
