//! Asynchronous conversion entry points.
//!
//! Each conversion suspends twice: once while the source decodes and once
//! while the canvas is painted and encoded. Both stages are CPU-bound and run
//! on tokio's blocking pool, so callers on the async side stay responsive.
//!
//! ```text
//! SourceImage ──decode──▶ DecodedBitmap ──render + encode──▶ EncodedResult
//!             (blocking)                  (blocking)
//! ```
//!
//! Nothing here holds session state. A [`Converter`] is just a handle to a
//! codec backend; every call is independent, and several sized conversions for
//! the same source may run at once.

use crate::imaging::{
    DecodeError, DecodedBitmap, EncodeError, ImageBackend, Quality, RustBackend, transcode,
};
use crate::target::TargetSpec;
use crate::types::{EncodedResult, SourceImage};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("conversion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Handle for running conversions against a backend.
pub struct Converter<B = RustBackend> {
    backend: Arc<B>,
}

impl Converter<RustBackend> {
    pub fn new() -> Self {
        Self::with_backend(RustBackend::new())
    }
}

impl Default for Converter<RustBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Clone for Converter<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: ImageBackend + 'static> Converter<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Decode the source on the blocking pool.
    pub async fn decode(&self, source: &Arc<SourceImage>) -> Result<DecodedBitmap, ConvertError> {
        let backend = Arc::clone(&self.backend);
        let source = Arc::clone(source);
        let bitmap = tokio::task::spawn_blocking(move || {
            backend.decode(source.bytes(), source.media_type())
        })
        .await??;
        tracing::debug!(
            width = bitmap.width(),
            height = bitmap.height(),
            "decoded"
        );
        Ok(bitmap)
    }

    /// Re-encode at the source's own dimensions.
    pub async fn convert_preview(
        &self,
        source: Arc<SourceImage>,
    ) -> Result<EncodedResult, ConvertError> {
        self.convert_for_size(source, TargetSpec::Original).await
    }

    /// Convert for one entry of the size menu.
    pub async fn convert_for_size(
        &self,
        source: Arc<SourceImage>,
        target: TargetSpec,
    ) -> Result<EncodedResult, ConvertError> {
        let bitmap = self.decode(&source).await?;
        let backend = Arc::clone(&self.backend);
        let result = tokio::task::spawn_blocking(move || {
            transcode(backend.as_ref(), &bitmap, target, Quality::DEFAULT)
        })
        .await??;

        tracing::info!(
            file = source.name(),
            size = %target,
            original_bytes = source.byte_len(),
            converted_bytes = result.byte_len(),
            "converted"
        );
        Ok(result)
    }
}
