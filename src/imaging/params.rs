//! Parameter types for image operations.
//!
//! These structs describe *what* to draw, not *how*. [`CanvasPlan`] is the
//! interface between [`operations`](super::operations) (which decides the
//! canvas and where the source goes) and the [`Canvas`](super::canvas::Canvas)
//! that does the pixel work.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality in (0, 1], fixed at 0.8 in practice. Clamped on construction.
//! - [`CanvasPlan`]: Canvas size, optional background fill, and where the source is drawn.

use super::calculations::PixelRect;
use image::Rgba;

/// Opaque white, the letterbox margin color.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Quality setting for lossy encoding, on a 0–1 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(f64);

impl Quality {
    /// The quality every conversion uses.
    pub const DEFAULT: Quality = Quality(0.8);

    /// Smallest quality we hand to the encoder; zero is outside the (0, 1] range.
    const MIN: f64 = 0.01;

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::DEFAULT;
        }
        Self(value.clamp(Self::MIN, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Quality on the 0–100 scale libwebp expects.
    pub fn percent(self) -> f32 {
        (self.0 * 100.0) as f32
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything needed to paint one output canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPlan {
    pub width: u32,
    pub height: u32,
    /// Color painted over the whole canvas before drawing, if any.
    pub fill: Option<Rgba<u8>>,
    /// Where the source bitmap is drawn, scaled to this rectangle.
    pub draw: PixelRect,
}
