//! The output size menu.
//!
//! Fixed sizes form a closed set, so they are an enum rather than a free
//! `(width, height)` pair: a caller cannot ask for 640×480.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the fixed output canvases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedSize {
    /// 1920×1080
    Hero,
    /// 1200×800
    BlogPost,
    /// 300×300
    Thumbnail,
    /// 100×100
    Icon,
}

impl FixedSize {
    pub const ALL: [FixedSize; 4] = [Self::Hero, Self::BlogPost, Self::Thumbnail, Self::Icon];

    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Hero => (1920, 1080),
            Self::BlogPost => (1200, 800),
            Self::Thumbnail => (300, 300),
            Self::Icon => (100, 100),
        }
    }
}

/// What a caller asks for: the source's own dimensions or a menu size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetSpec {
    Original,
    Fixed(FixedSize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown size '{0}' (expected one of: 1920x1080, 1200x800, 300x300, 100x100, original)")]
pub struct UnknownTarget(pub String);

/// A menu entry as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeOption {
    pub target: TargetSpec,
    pub description: &'static str,
}

/// Download menu, in display order.
pub const SIZE_MENU: [SizeOption; 5] = [
    SizeOption {
        target: TargetSpec::Fixed(FixedSize::Hero),
        description: "Hero/Banner (1920×1080)",
    },
    SizeOption {
        target: TargetSpec::Fixed(FixedSize::BlogPost),
        description: "Blog post (1200×800)",
    },
    SizeOption {
        target: TargetSpec::Fixed(FixedSize::Thumbnail),
        description: "Thumbnail (300×300)",
    },
    SizeOption {
        target: TargetSpec::Fixed(FixedSize::Icon),
        description: "Logo/Icon (100×100)",
    },
    SizeOption {
        target: TargetSpec::Original,
        description: "Original size",
    },
];

impl TargetSpec {
    /// Label used in file names and on the command line.
    pub fn label(self) -> String {
        match self {
            Self::Original => "original".to_string(),
            Self::Fixed(size) => {
                let (w, h) = size.dimensions();
                format!("{w}x{h}")
            }
        }
    }

    /// Canvas size for a source of the given dimensions.
    pub fn canvas_size(self, source: (u32, u32)) -> (u32, u32) {
        match self {
            Self::Original => source,
            Self::Fixed(size) => size.dimensions(),
        }
    }

    pub fn all() -> impl Iterator<Item = TargetSpec> {
        SIZE_MENU.iter().map(|option| option.target)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for TargetSpec {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.eq_ignore_ascii_case("original") {
            return Ok(Self::Original);
        }
        FixedSize::ALL
            .into_iter()
            .map(Self::Fixed)
            .find(|t| t.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| UnknownTarget(s.to_string()))
    }
}

impl Serialize for TargetSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_menu() {
        let labels: Vec<String> = TargetSpec::all().map(TargetSpec::label).collect();
        assert_eq!(
            labels,
            ["1920x1080", "1200x800", "300x300", "100x100", "original"]
        );
    }

    #[test]
    fn parse_round_trips_every_label() {
        for target in TargetSpec::all() {
            assert_eq!(target.label().parse::<TargetSpec>(), Ok(target));
        }
    }

    #[test]
    fn parse_accepts_uppercase_separator() {
        assert_eq!(
            "300X300".parse::<TargetSpec>(),
            Ok(TargetSpec::Fixed(FixedSize::Thumbnail))
        );
        assert_eq!("Original".parse::<TargetSpec>(), Ok(TargetSpec::Original));
    }

    #[test]
    fn parse_rejects_sizes_off_the_menu() {
        assert_eq!(
            "640x480".parse::<TargetSpec>(),
            Err(UnknownTarget("640x480".into()))
        );
    }

    #[test]
    fn canvas_size_for_original_is_source() {
        assert_eq!(TargetSpec::Original.canvas_size((800, 600)), (800, 600));
        assert_eq!(
            TargetSpec::Fixed(FixedSize::BlogPost).canvas_size((800, 600)),
            (1200, 800)
        );
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&TargetSpec::Fixed(FixedSize::Icon)).unwrap();
        assert_eq!(json, "\"100x100\"");
    }
}
