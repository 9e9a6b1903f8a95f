//! On-disk staging directories and frame-index file naming.
//!
//! Both pipeline stages spool their per-frame output to a [`StagingDir`], a
//! temporary directory scoped to one video. Frame files are named so that the
//! frame index is recoverable by parsing the digits out of the file stem,
//! which lets the processing stage reconstruct strict temporal order even
//! when the underlying directory listing order does not.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::StageError;

/// An ordered pair of frame index and staged file path.
///
/// Records are produced by extraction in strictly increasing index order and
/// re-derived by [`sort_by_frame_index`] before processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    /// Frame index within the source video.
    pub index: u64,
    /// Path of the staged frame file.
    pub path: PathBuf,
}

/// A temporary directory holding one video's intermediate frame files.
///
/// The directory is deleted when the value is dropped, unless ownership is
/// handed to the caller via [`retain`](StagingDir::retain). Whether the
/// pipeline drops or retains the extraction staging directory is controlled
/// by [`DisposalPolicy`](crate::DisposalPolicy).
#[derive(Debug)]
pub struct StagingDir {
    inner: TempDir,
}

impl StagingDir {
    /// Create a fresh staging directory under the system temp location.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::Io`] if the directory cannot be created.
    pub fn create() -> Result<Self, StageError> {
        let inner = tempfile::tempdir()?;
        Ok(Self { inner })
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Build the path for the frame file with the given index.
    ///
    /// The index is zero-padded so the file stem carries a single contiguous
    /// digit run and lexicographic listing order matches numeric order.
    pub fn frame_path(&self, index: u64, extension: &str) -> PathBuf {
        self.path().join(format!("frame_{index:06}.{extension}"))
    }

    /// Disarm automatic cleanup and hand the directory to the caller.
    ///
    /// After this call the directory and its contents stay on disk until the
    /// caller removes them.
    #[must_use = "the retained directory is never deleted automatically"]
    pub fn retain(self) -> PathBuf {
        self.inner.keep()
    }
}

/// Parse the frame index embedded in a staged frame filename.
///
/// All ASCII digits in the file stem are concatenated and read as a decimal
/// number, so `frame_000042.jpg`, `42.png`, and `f42_x.npy` all parse to 42.
///
/// # Errors
///
/// Returns [`StageError::PathFormat`] if the stem contains no digits or the
/// digit run overflows a `u64`.
pub fn parse_frame_index(path: &Path) -> Result<u64, StageError> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| StageError::PathFormat {
            path: path.to_path_buf(),
        })?;

    let digits: String = stem.chars().filter(char::is_ascii_digit).collect();
    digits.parse().map_err(|_| StageError::PathFormat {
        path: path.to_path_buf(),
    })
}

/// Re-derive ordered [`FrameRecord`]s from a set of staged frame paths.
///
/// Paths are sorted by their embedded numeric index, reconstructing decode
/// order regardless of the order the filesystem listed them in.
///
/// # Errors
///
/// Fails fast with [`StageError::PathFormat`] on the first path whose stem
/// has no parseable digit run.
pub fn sort_by_frame_index<I>(paths: I) -> Result<Vec<FrameRecord>, StageError>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut records = paths
        .into_iter()
        .map(|path| {
            let index = parse_frame_index(&path)?;
            Ok(FrameRecord { index, path })
        })
        .collect::<Result<Vec<_>, StageError>>()?;
    records.sort_by_key(|record| record.index);
    Ok(records)
}
