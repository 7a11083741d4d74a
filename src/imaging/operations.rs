//! High-level image operations.
//!
//! These functions combine calculations with canvas drawing and backend
//! encoding. They take a decoded bitmap and a target, plan the canvas, paint
//! it, and hand it to the backend.

use super::backend::{DecodedBitmap, EncodeError, ImageBackend};
use super::calculations::{PixelRect, calculate_letterbox, snap_to_pixels};
use super::canvas::Canvas;
use super::params::{CanvasPlan, Quality, WHITE};
use crate::target::TargetSpec;
use crate::types::{EncodedResult, OUTPUT_MEDIA_TYPE};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, EncodeError>;

/// Plan a canvas without painting it.
///
/// `Original` copies the source 1:1 with no fill. Fixed sizes letterbox the
/// source onto a white canvas of exactly the target size.
pub fn plan_canvas(source: (u32, u32), target: TargetSpec) -> CanvasPlan {
    let (width, height) = target.canvas_size(source);
    match target {
        TargetSpec::Original => CanvasPlan {
            width,
            height,
            fill: None,
            draw: PixelRect {
                x: 0,
                y: 0,
                width,
                height,
            },
        },
        TargetSpec::Fixed(_) => {
            let rect = calculate_letterbox(source, (width, height));
            CanvasPlan {
                width,
                height,
                fill: Some(WHITE),
                draw: snap_to_pixels(rect, (width, height)),
            }
        }
    }
}

/// Paint the canvas for `target`.
///
/// Fails with [`EncodeError::ZeroArea`] when the bitmap has no pixels, since
/// there is nothing to fit and nothing the encoder would accept.
pub fn render(bitmap: &DecodedBitmap, target: TargetSpec) -> Result<Canvas> {
    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::ZeroArea { width, height });
    }

    // Full coverage at 1:1, nothing to fill or scale
    if target == TargetSpec::Original {
        return Ok(Canvas::from_bitmap(bitmap));
    }

    let plan = plan_canvas((width, height), target);
    let mut canvas = Canvas::blank(plan.width, plan.height);
    if let Some(color) = plan.fill {
        canvas.fill(color);
    }
    canvas.draw_scaled(bitmap, plan.draw);
    Ok(canvas)
}

/// Render and encode one output.
pub fn transcode(
    backend: &impl ImageBackend,
    bitmap: &DecodedBitmap,
    target: TargetSpec,
    quality: Quality,
) -> Result<EncodedResult> {
    let canvas = render(bitmap, target)?;
    let bytes = backend.encode(&canvas, quality)?;
    tracing::debug!(
        size = %target,
        width = canvas.width(),
        height = canvas.height(),
        bytes = bytes.len(),
        "transcoded"
    );

    Ok(EncodedResult {
        bytes,
        media_type: OUTPUT_MEDIA_TYPE,
        width: canvas.width(),
        height: canvas.height(),
        target,
    })
}
