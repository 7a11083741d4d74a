//! Input gate: format whitelist and size ceiling.
//!
//! The predicate looks only at what the caller declares (media type string and
//! byte length). It never inspects the bytes; malformed content is caught later
//! by the decoder. There is no lower size bound, so an empty file passes here
//! and fails at decode.

use crate::types::MediaType;
use thiserror::Error;

/// Largest accepted input, in bytes (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Declared media types accepted as input.
pub const ALLOWED_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

/// Why a candidate was rejected.
///
/// This is a value, not a failure of the program: the caller decides whether
/// the user hears about it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported media type '{0}' (expected PNG or JPEG)")]
    UnsupportedType(String),
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}

/// Check a candidate, returning the parsed media type on success.
pub fn check(declared_type: &str, byte_len: u64) -> Result<MediaType, ValidationError> {
    let media_type = MediaType::parse(declared_type)
        .filter(|t| t.is_accepted_input())
        .ok_or_else(|| ValidationError::UnsupportedType(declared_type.to_string()))?;
    if byte_len > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge {
            size: byte_len,
            limit: MAX_FILE_SIZE,
        });
    }
    Ok(media_type)
}

/// Pure acceptability predicate.
pub fn validate(declared_type: &str, byte_len: u64) -> bool {
    check(declared_type, byte_len).is_ok()
}
