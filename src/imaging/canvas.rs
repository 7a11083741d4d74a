//! Off-screen RGBA drawing surface.

use super::backend::DecodedBitmap;
use super::calculations::PixelRect;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// A fixed-size RGBA surface that can be filled and drawn into.
///
/// Starts fully transparent. Drawing alpha-blends the source over whatever is
/// already on the canvas, so a transparent PNG over a white fill comes out on
/// white.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// A canvas holding the bitmap's pixels as-is, at its own size.
    pub fn from_bitmap(bitmap: &DecodedBitmap) -> Self {
        Self {
            pixels: bitmap.image().to_rgba8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Paint every pixel with `color`.
    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = color;
        }
    }

    /// Draw the bitmap scaled (Lanczos3) into `rect`.
    pub fn draw_scaled(&mut self, bitmap: &DecodedBitmap, rect: PixelRect) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let scaled = if bitmap.dimensions() == (rect.width, rect.height) {
            bitmap.image().to_rgba8()
        } else {
            imageops::resize(
                bitmap.image(),
                rect.width,
                rect.height,
                FilterType::Lanczos3,
            )
        };
        imageops::overlay(&mut self.pixels, &scaled, rect.x as i64, rect.y as i64);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::solid_bitmap;
    use crate::imaging::params::WHITE;
    use image::DynamicImage;

    #[test]
    fn blank_is_transparent() {
        let canvas = Canvas::blank(4, 4);
        assert_eq!(canvas.pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn fill_paints_everything() {
        let mut canvas = Canvas::blank(5, 3);
        canvas.fill(WHITE);
        assert!(canvas.as_raw().iter().all(|&b| b == 255));
    }

    #[test]
    fn draw_scaled_only_touches_the_rect() {
        let mut canvas = Canvas::blank(10, 10);
        canvas.fill(WHITE);
        canvas.draw_scaled(
            &solid_bitmap(4, 2),
            PixelRect {
                x: 0,
                y: 3,
                width: 10,
                height: 5,
            },
        );

        assert_eq!(canvas.pixel(0, 0), WHITE);
        assert_eq!(canvas.pixel(9, 2), WHITE);
        assert_eq!(canvas.pixel(5, 5), Rgba([200, 30, 30, 255]));
        assert_eq!(canvas.pixel(9, 8), WHITE);
    }

    #[test]
    fn draw_blends_transparent_source_over_fill() {
        let clear = DecodedBitmap::new(DynamicImage::ImageRgba8(RgbaImage::new(2, 2)));
        let mut canvas = Canvas::blank(2, 2);
        canvas.fill(WHITE);
        canvas.draw_scaled(
            &clear,
            PixelRect {
                x: 0,
                y: 0,
                width: 2,
                height: 2,
            },
        );
        assert_eq!(canvas.pixel(1, 1), WHITE);
    }

    #[test]
    fn from_bitmap_keeps_size() {
        let canvas = Canvas::from_bitmap(&solid_bitmap(7, 3));
        assert_eq!((canvas.width(), canvas.height()), (7, 3));
        assert_eq!(canvas.as_raw().len(), 7 * 3 * 4);
    }
}
