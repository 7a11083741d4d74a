//! Shared types passed between validation, transcoding, and the caller.
//!
//! A [`SourceImage`] can only be built through validation, so holding one is
//! proof that its media type and size were accepted. [`EncodedResult`]s are
//! produced per transcoding call and never reference the source they came from.

use crate::target::TargetSpec;
use crate::validate::{self, ValidationError};
use image::ImageFormat;
use serde::Serialize;

/// Media types the pipeline knows about.
///
/// `Jpg` exists because some platforms declare `image/jpg` for `.jpg` files;
/// it is accepted as input and decoded exactly like `Jpeg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum MediaType {
    Png,
    Jpeg,
    Jpg,
    WebP,
}

/// The only output format.
pub const OUTPUT_MEDIA_TYPE: MediaType = MediaType::WebP;

impl MediaType {
    /// Parse a declared media type. Matching is exact: no case folding and no
    /// parameters (`image/png; charset=...` is not a media type we accept).
    pub fn parse(declared: &str) -> Option<Self> {
        match declared {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "image/jpg" => Some(Self::Jpg),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Jpg => "image/jpg",
            Self::WebP => "image/webp",
        }
    }

    /// Media type a browser would declare for a file with this extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// File extension used when writing this type.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg | Self::Jpg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// Short uppercase badge: the subtype of the media type (`image/png` → `PNG`).
    pub fn label(self) -> String {
        self.as_str()
            .split('/')
            .nth(1)
            .unwrap_or_default()
            .to_ascii_uppercase()
    }

    /// Whether this type is on the input whitelist.
    pub fn is_accepted_input(self) -> bool {
        matches!(self, Self::Png | Self::Jpeg | Self::Jpg)
    }

    pub(crate) fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg | Self::Jpg => ImageFormat::Jpeg,
            Self::WebP => ImageFormat::WebP,
        }
    }
}

impl From<MediaType> for &'static str {
    fn from(media_type: MediaType) -> Self {
        media_type.as_str()
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accepted input image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    name: String,
    media_type: MediaType,
    bytes: Vec<u8>,
}

impl SourceImage {
    /// Validate a candidate and take ownership of its bytes.
    ///
    /// `name` is the user-facing file name (`holiday.jpg`); it only feeds
    /// output naming.
    pub fn accept(
        name: impl Into<String>,
        declared_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, ValidationError> {
        let media_type = validate::check(declared_type, bytes.len() as u64)?;
        Ok(Self {
            name: name.into(),
            media_type,
            bytes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Output of one transcoding call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResult {
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
    pub width: u32,
    pub height: u32,
    pub target: TargetSpec,
}

impl EncodedResult {
    pub fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact() {
        assert_eq!(MediaType::parse("image/png"), Some(MediaType::Png));
        assert_eq!(MediaType::parse("image/jpg"), Some(MediaType::Jpg));
        assert_eq!(MediaType::parse("IMAGE/PNG"), None);
        assert_eq!(MediaType::parse("image/gif"), None);
        assert_eq!(MediaType::parse(""), None);
    }

    #[test]
    fn extension_maps_like_a_browser() {
        assert_eq!(MediaType::from_extension("JPG"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_extension("jpeg"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_extension("png"), Some(MediaType::Png));
        assert_eq!(MediaType::from_extension("gif"), None);
    }

    #[test]
    fn label_is_uppercase_subtype() {
        assert_eq!(MediaType::Png.label(), "PNG");
        assert_eq!(MediaType::Jpg.label(), "JPG");
        assert_eq!(OUTPUT_MEDIA_TYPE.label(), "WEBP");
    }

    #[test]
    fn webp_is_not_an_accepted_input() {
        assert!(!MediaType::WebP.is_accepted_input());
        assert!(MediaType::Jpg.is_accepted_input());
    }

    #[test]
    fn accept_keeps_name_and_length() {
        let source = SourceImage::accept("a.png", "image/png", vec![1, 2, 3]).unwrap();
        assert_eq!(source.name(), "a.png");
        assert_eq!(source.media_type(), MediaType::Png);
        assert_eq!(source.byte_len(), 3);
    }

    #[test]
    fn accept_rejects_unlisted_type() {
        assert!(SourceImage::accept("a.gif", "image/gif", vec![0; 10]).is_err());
    }
}
