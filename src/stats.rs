//! Size bookkeeping for a finished conversion.

use crate::target::TargetSpec;
use crate::types::{EncodedResult, MediaType, SourceImage};
use serde::Serialize;

/// Percentage saved by the conversion, rounded to the nearest integer.
///
/// Negative when the output is larger than the input; the sign is kept so a
/// bad trade shows up as one. Halves round toward positive infinity, so
/// -20.5 reports -20. An empty original has no meaningful ratio and reports 0.
pub fn compression_ratio(original_size: u64, new_size: u64) -> i64 {
    if original_size == 0 {
        return 0;
    }
    let saved = original_size as f64 - new_size as f64;
    (saved / original_size as f64 * 100.0 + 0.5).floor() as i64
}

/// Human-readable byte count in base-1024 units, at most two decimals.
/// Ties round up (`1152 → "1.13 KB"`).
///
/// `0 → "0 Bytes"`, `1536 → "1.5 KB"`, `10485760 → "10 MB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

/// Summary of one conversion, as printed by the CLI or emitted as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionStats {
    pub file: String,
    pub input_type: MediaType,
    pub output_type: MediaType,
    pub size: TargetSpec,
    pub width: u32,
    pub height: u32,
    pub original_bytes: u64,
    pub converted_bytes: u64,
    pub ratio: i64,
}

impl ConversionStats {
    pub fn new(source: &SourceImage, result: &EncodedResult) -> Self {
        Self {
            file: source.name().to_string(),
            input_type: source.media_type(),
            output_type: result.media_type,
            size: result.target,
            width: result.width,
            height: result.height,
            original_bytes: source.byte_len(),
            converted_bytes: result.byte_len(),
            ratio: compression_ratio(source.byte_len(), result.byte_len()),
        }
    }
}
