//! Output file naming.
//!
//! Every saved file follows `{base}_{label}.webp`:
//! - `base` is the original file name up to its first dot
//! - `label` is the [`TargetSpec`] label (`300x300`, `original`, ...)
//!
//! Cutting at the *first* dot matches how the files have always been named:
//! `holiday.2024.jpg` becomes `holiday_300x300.webp`.

use crate::target::TargetSpec;
use crate::types::OUTPUT_MEDIA_TYPE;

/// Fallback base for names with nothing before the first dot (`.png`).
const FALLBACK_BASE: &str = "image";

/// The part of a file name used as the output base.
pub fn base_name(file_name: &str) -> &str {
    match file_name.split('.').next() {
        Some(base) if !base.is_empty() => base,
        _ => FALLBACK_BASE,
    }
}

/// Suggested file name for a converted output.
pub fn output_filename(original_name: &str, target: TargetSpec) -> String {
    format!(
        "{}_{}.{}",
        base_name(original_name),
        target.label(),
        OUTPUT_MEDIA_TYPE.extension()
    )
}
