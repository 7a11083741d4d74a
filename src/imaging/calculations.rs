//! Pure calculation functions for letterbox geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Where the source lands inside the target canvas, in exact (fractional) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DrawRect {
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// A [`DrawRect`] snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Fit `source` inside `target` preserving aspect ratio, centered.
///
/// The fitted side spans the whole target; the other side is scaled and
/// centered, so exactly one of `x`/`y` is zero (both when aspects match).
///
/// # Arguments
/// * `source` - Source bitmap dimensions (width, height), both non-zero
/// * `target` - Canvas dimensions (width, height)
///
/// # Examples
/// ```
/// # use webpify::imaging::calculate_letterbox;
/// // 800x600 (4:3) into 300x300: full width, 225 high, 37.5 down
/// let rect = calculate_letterbox((800, 600), (300, 300));
/// assert_eq!((rect.width, rect.height), (300.0, 225.0));
/// assert_eq!((rect.x, rect.y), (0.0, 37.5));
/// ```
pub fn calculate_letterbox(source: (u32, u32), target: (u32, u32)) -> DrawRect {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = (target.0 as f64, target.1 as f64);

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w / tgt_h;

    let (width, height) = if src_aspect > tgt_aspect {
        // Source is relatively wider: width fills, bars top and bottom
        (tgt_w, tgt_w / src_aspect)
    } else {
        // Source is taller or equal: height fills, bars left and right
        (tgt_h * src_aspect, tgt_h)
    };

    DrawRect {
        x: (tgt_w - width) / 2.0,
        y: (tgt_h - height) / 2.0,
        width,
        height,
    }
}

/// Snap a draw rectangle to the pixel grid of a `target` canvas.
///
/// Sizes round to the nearest pixel (never below 1, never past the canvas);
/// offsets are the floor of the remaining space halved, so any odd leftover
/// pixel goes to the bottom/right margin.
pub fn snap_to_pixels(rect: DrawRect, target: (u32, u32)) -> PixelRect {
    let (tgt_w, tgt_h) = target;
    let width = (rect.width.round() as u32).clamp(1, tgt_w.max(1));
    let height = (rect.height.round() as u32).clamp(1, tgt_h.max(1));

    PixelRect {
        x: tgt_w.saturating_sub(width) / 2,
        y: tgt_h.saturating_sub(height) / 2,
        width,
        height,
    }
}
