//! The per-video output manifest.

use std::path::{Path, PathBuf};

use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::{error::StageError, resolution::Resolution};

/// The structured output record for one processed video.
///
/// A manifest is immutable once returned: the pipeline never revisits a
/// processed unit. `frame_paths` point into `output_dir`, which the caller
/// owns and removes when the downstream consumer is done with it.
///
/// Everything except the resident tensors serializes to JSON via
/// [`write_json`](Manifest::write_json), so a manifest can be handed across
/// process boundaries.
#[derive(Debug, Serialize, Deserialize)]
#[must_use]
pub struct Manifest {
    /// Scene identifier: the source video's filename with directory and
    /// extension stripped.
    pub scene_name: String,
    /// Processed frame files in frame order. Their content depends on the
    /// configured [`SerializationMode`](crate::SerializationMode). Empty
    /// under the resident memory policy.
    pub frame_paths: Vec<PathBuf>,
    /// Frame rate of the source stream, carried over from extraction.
    pub fps: f64,
    /// The working resolution every frame of this video was processed at.
    pub resolution: Resolution,
    /// The output staging directory holding `frame_paths`. Caller-owned.
    pub output_dir: Option<PathBuf>,
    /// The extraction staging directory with the raw decoded frames, kept
    /// only under [`DisposalPolicy::Retain`](crate::DisposalPolicy::Retain).
    /// Caller-owned when present.
    pub extraction_dir: Option<PathBuf>,
    /// Processed tensors in channel-first layout, populated only under
    /// [`MemoryPolicy::Resident`](crate::MemoryPolicy::Resident). Empty when
    /// frames were spooled to disk.
    #[serde(skip)]
    pub tensors: Vec<Array3<f32>>,
}

impl Manifest {
    /// Number of processed frames this manifest describes.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        if self.tensors.is_empty() {
            self.frame_paths.len()
        } else {
            self.tensors.len()
        }
    }

    /// Serialize the manifest to pretty-printed JSON at `path`.
    ///
    /// Resident tensors are not serialized; use the spooling memory policy
    /// when manifests need to be fully reconstructable from disk.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::Io`] if the file cannot be written.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), StageError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|error| StageError::Io(error.into()))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
