//! Handing finished outputs to the user.
//!
//! The pipeline never decides where bytes end up. A [`SaveTarget`] receives
//! the encoded buffer plus a suggested file name and does whatever "offer
//! this to the user" means for the front end. The CLI uses [`DirectorySink`].

use crate::naming::output_filename;
use crate::types::{EncodedResult, SourceImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("refusing to save to '{0}': not a plain file name")]
    InvalidName(String),
}

/// Destination for converted images.
pub trait SaveTarget {
    /// Offer `bytes` to the user under `filename`. Returns where it went.
    fn offer(&self, bytes: &[u8], filename: &str) -> Result<PathBuf, SaveError>;
}

/// Save an encoded result under its conventional name.
pub fn save_result(
    target: &impl SaveTarget,
    source: &SourceImage,
    result: &EncodedResult,
) -> Result<PathBuf, SaveError> {
    let filename = output_filename(source.name(), result.target);
    target.offer(&result.bytes, &filename)
}

/// Writes each offered file into one directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveTarget for DirectorySink {
    fn offer(&self, bytes: &[u8], filename: &str) -> Result<PathBuf, SaveError> {
        // Names come from user file names; keep them inside the directory
        let is_plain = Path::new(filename)
            .file_name()
            .is_some_and(|name| name == filename);
        if !is_plain {
            return Err(SaveError::InvalidName(filename.to_string()));
        }

        let path = self.dir.join(filename);
        let io_err = |source| SaveError::Io {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        std::fs::write(&path, bytes).map_err(io_err)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{FixedSize, TargetSpec};
    use crate::types::MediaType;
    use tempfile::TempDir;

    #[test]
    fn directory_sink_creates_dir_and_writes() {
        let tmp = TempDir::new().unwrap();
        let sink = DirectorySink::new(tmp.path().join("out/nested"));

        let path = sink.offer(b"RIFF", "a_original.webp").unwrap();
        assert_eq!(path, tmp.path().join("out/nested/a_original.webp"));
        assert_eq!(std::fs::read(&path).unwrap(), b"RIFF");
    }

    #[test]
    fn directory_sink_rejects_paths() {
        let tmp = TempDir::new().unwrap();
        let sink = DirectorySink::new(tmp.path());
        for name in ["../escape.webp", "sub/dir.webp", "", ".."] {
            assert!(
                matches!(sink.offer(b"x", name), Err(SaveError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn save_result_uses_conventional_name() {
        let tmp = TempDir::new().unwrap();
        let sink = DirectorySink::new(tmp.path());
        let source = SourceImage::accept("beach.photo.jpg", "image/jpeg", vec![1; 10]).unwrap();
        let result = EncodedResult {
            bytes: vec![7; 5],
            media_type: MediaType::WebP,
            width: 300,
            height: 300,
            target: TargetSpec::Fixed(FixedSize::Thumbnail),
        };

        let path = save_result(&sink, &source, &result).unwrap();
        assert_eq!(path, tmp.path().join("beach_300x300.webp"));
        assert_eq!(std::fs::read(path).unwrap(), vec![7; 5]);
    }
}
