//! Disk I/O and file lifecycle.
//!
//! Owns the output directory and publishes fetched bodies without ever
//! replacing an existing file: bytes go to a uniquely named temp file in the
//! same directory, are synced, then linked to the final name with a
//! no-clobber persist. Readers never see a partial file.

mod writer;

use std::path::{Path, PathBuf};

use crate::error::FetchError;

pub use writer::persist;

/// Prefix of in-progress temp files inside the output directory.
pub const TEMP_PREFIX: &str = ".imgfetch-";
/// Temporary file suffix used before the final link.
pub const TEMP_SUFFIX: &str = ".part";

/// The managed output directory. Acquiring it creates it if needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Creates `root` (and parents) if absent. Idempotent.
    pub fn acquire(root: impl Into<PathBuf>) -> Result<Self, FetchError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| FetchError::storage(&root, e))?;
        tracing::debug!(dir = %root.display(), "output directory ready");
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Final path for `filename` inside the directory.
    pub fn join(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

/// Result of a persist attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Bytes are now at this path.
    Written(PathBuf),
    /// A file already existed at this path; nothing was written.
    Collision(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_creates_nested_dir_and_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("a").join("Fetched_Images");
        let dir = OutputDir::acquire(&root).unwrap();
        assert!(root.is_dir());
        let again = OutputDir::acquire(&root).unwrap();
        assert_eq!(dir, again);
        assert_eq!(dir.join("x.png"), root.join("x.png"));
    }

    #[test]
    fn acquire_fails_when_path_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();
        let err = OutputDir::acquire(&file).unwrap_err();
        assert!(matches!(err, FetchError::Storage { .. }));
    }
}
