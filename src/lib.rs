//! # webpify
//!
//! Converts PNG and JPEG images to lossy WebP, either at their own size or
//! letterboxed onto one of a fixed menu of canvases, and reports how much
//! space the conversion saved.
//!
//! # Architecture: Validate, Convert, Save
//!
//! ```text
//! 1. Validate   declared type + byte length  →  accepted SourceImage
//! 2. Convert    SourceImage + TargetSpec     →  EncodedResult     (async)
//! 3. Save       EncodedResult                →  {base}_{label}.webp
//! ```
//!
//! The conversion core holds no state between calls. Whatever must be
//! remembered across calls (the current selection, whether its preview is
//! done, whether a late result is still wanted) lives in [`session::Session`],
//! owned by the caller.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`validate`] | Media type whitelist and the 10 MiB ceiling |
//! | [`types`] | `MediaType`, `SourceImage`, `EncodedResult` |
//! | [`target`] | The size menu: `TargetSpec` and its labels |
//! | [`imaging`] | Decode, letterbox, paint, encode behind the `ImageBackend` trait |
//! | [`convert`] | Async `convert_preview` / `convert_for_size` on tokio's blocking pool |
//! | [`session`] | Selection ids and discarding of stale results |
//! | [`stats`] | Compression ratio and human-readable sizes |
//! | [`naming`] | `{base}_{label}.webp` output names |
//! | [`save`] | `SaveTarget` trait and the directory-writing sink |
//! | [`config`] | `webpify.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Lossy WebP at One Quality
//!
//! Every output is encoded at quality 0.8 through libwebp (the `webp` crate).
//! The `image` crate's own WebP encoder is lossless only, which would defeat
//! the point of converting. Quality is not a knob: not in the API, not in the
//! config file.
//!
//! ## Letterbox, Never Crop
//!
//! Fixed sizes are exact canvases. The source is scaled to fit inside while
//! keeping its aspect ratio, centered, and the rest of the canvas is white.
//! Transparent sources end up composited over white as well. The geometry is
//! pure math in [`imaging::calculate_letterbox`] so it is tested without
//! touching pixels.
//!
//! ## Discard Instead of Abort
//!
//! A conversion that has started always runs to completion. Removing or
//! replacing the selected image bumps its [`session::SelectionId`]; results
//! tagged with an old id are dropped when they arrive.

pub mod config;
pub mod convert;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod save;
pub mod session;
pub mod stats;
pub mod target;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
