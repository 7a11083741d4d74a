//! Image processing: decode, letterbox, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (PNG, JPEG, format sniffed) |
//! | **Letterbox** | pure geometry in `calculations` |
//! | **Draw** | `imageops::resize` (Lanczos3) + `imageops::overlay` onto a white [`Canvas`] |
//! | **Encode → WebP** | `webp` crate, lossy, quality 0.8 |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for fit geometry (unit testable)
//! - **Parameters**: Quality and canvas plans
//! - **Canvas**: The off-screen drawing surface
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations, canvas, and backend

pub mod backend;
mod calculations;
pub mod canvas;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{DecodeError, DecodedBitmap, EncodeError, ImageBackend};
pub use calculations::{DrawRect, PixelRect, calculate_letterbox, snap_to_pixels};
pub use canvas::Canvas;
pub use operations::{plan_canvas, render, transcode};
pub use params::{CanvasPlan, Quality, WHITE};
pub use rust_backend::RustBackend;
