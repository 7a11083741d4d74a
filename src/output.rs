//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! photo.jpg
//!     Type: JPEG (image/jpeg)
//!     Size: 2.29 MB
//!     Accepted
//! ```
//!
//! ## Convert
//!
//! ```text
//! photo.jpg → WEBP 800x600
//!     Original: 2.29 MB
//!     Converted: 412.5 KB
//!     Saved: 82%
//! ```
//!
//! ## Download
//!
//! ```text
//! 300x300 → converted/photo_300x300.webp (18.2 KB)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::stats::{ConversionStats, format_file_size};
use crate::target::{SIZE_MENU, TargetSpec};
use crate::types::MediaType;
use crate::validate::ValidationError;
use std::path::Path;

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn type_line(media_type: MediaType) -> String {
    format!("{}Type: {} ({})", indent(1), media_type.label(), media_type)
}

// ============================================================================
// Check
// ============================================================================

/// Format the result of validating one file.
pub fn format_check(
    file: &str,
    declared_type: &str,
    byte_len: u64,
    verdict: &Result<MediaType, ValidationError>,
) -> Vec<String> {
    let mut lines = vec![file.to_string()];
    match MediaType::parse(declared_type) {
        Some(media_type) => lines.push(type_line(media_type)),
        None => lines.push(format!("{}Type: {}", indent(1), declared_type)),
    }
    lines.push(format!("{}Size: {}", indent(1), format_file_size(byte_len)));
    match verdict {
        Ok(_) => lines.push(format!("{}Accepted", indent(1))),
        Err(e) => lines.push(format!("{}Rejected: {}", indent(1), e)),
    }
    lines
}

pub fn print_check(
    file: &str,
    declared_type: &str,
    byte_len: u64,
    verdict: &Result<MediaType, ValidationError>,
) {
    for line in format_check(file, declared_type, byte_len, verdict) {
        println!("{}", line);
    }
}

// ============================================================================
// Convert
// ============================================================================

/// Format the statistics of a preview conversion.
///
/// A negative ratio means the output grew and is shown as `Saved: -20%`.
pub fn format_conversion(stats: &ConversionStats) -> Vec<String> {
    vec![
        format!(
            "{} → {} {}x{}",
            stats.file,
            stats.output_type.label(),
            stats.width,
            stats.height
        ),
        format!(
            "{}Original: {}",
            indent(1),
            format_file_size(stats.original_bytes)
        ),
        format!(
            "{}Converted: {}",
            indent(1),
            format_file_size(stats.converted_bytes)
        ),
        format!("{}Saved: {}%", indent(1), stats.ratio),
    ]
}

pub fn print_conversion(stats: &ConversionStats) {
    for line in format_conversion(stats) {
        println!("{}", line);
    }
}

// ============================================================================
// Download
// ============================================================================

/// One line per saved file.
pub fn format_saved(target: TargetSpec, path: &Path, bytes: u64) -> String {
    format!(
        "{} → {} ({})",
        target,
        path.display(),
        format_file_size(bytes)
    )
}

/// Summary after a download run.
pub fn format_download_summary(saved: usize, failed: usize) -> String {
    let noun = if saved == 1 { "file" } else { "files" };
    if failed == 0 {
        format!("Saved {} {}", saved, noun)
    } else {
        format!("Saved {} {}, {} failed", saved, noun, failed)
    }
}

// ============================================================================
// Sizes
// ============================================================================

/// The download menu, labels padded to a common width.
pub fn format_size_menu() -> Vec<String> {
    let labels: Vec<String> = SIZE_MENU.iter().map(|o| o.target.label()).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0);
    SIZE_MENU
        .iter()
        .zip(labels)
        .map(|(option, label)| format!("{:<width$}  {}", label, option.description))
        .collect()
}

pub fn print_size_menu() {
    for line in format_size_menu() {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
