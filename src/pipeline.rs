//! The per-video staging pipeline.
//!
//! [`FramePipeline`] is the main entry point for the crate. It enumerates
//! video units from a root path at construction time and processes one unit
//! per call: extract all frames to a staging directory, run them through the
//! preprocessing transform, persist the results, return a [`Manifest`].
//! Units are processed strictly sequentially by the caller iterating the
//! collection; the pipeline holds no cross-unit state.

use std::path::{Path, PathBuf};

use crate::{
    error::StageError,
    extract::extract_frames,
    manifest::Manifest,
    options::PipelineOptions,
    process::process_frames,
    source::enumerate_units,
    transform::{FrameTransform, ImageNetTransform},
};

/// A dataset-style adapter over a collection of video files.
///
/// Construction resolves the root path into an ordered unit list;
/// [`process`](FramePipeline::process) runs the full
/// extract–transform–persist sequence for one unit and returns its
/// manifest. The pipeline is generic over the preprocessing collaborator;
/// [`open`](FramePipeline::open) picks the built-in [`ImageNetTransform`].
///
/// # Example
///
/// ```no_run
/// use framestage::{FramePipeline, PipelineOptions, StageError};
///
/// let pipeline = FramePipeline::open("footage/", PipelineOptions::new(50))?;
/// for index in 0..pipeline.len() {
///     let manifest = pipeline.process(index)?;
///     println!("{}: {} frames", manifest.scene_name, manifest.frame_count());
/// }
/// # Ok::<(), StageError>(())
/// ```
#[derive(Debug)]
pub struct FramePipeline<T = ImageNetTransform> {
    units: Vec<PathBuf>,
    options: PipelineOptions,
    transform: T,
}

impl FramePipeline<ImageNetTransform> {
    /// Build a pipeline over `root` using the built-in ImageNet transform.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::InvalidInput`] if `root` is neither a
    /// recognized video file nor a directory.
    pub fn open<P: AsRef<Path>>(root: P, options: PipelineOptions) -> Result<Self, StageError> {
        Self::with_transform(root, ImageNetTransform::default(), options)
    }
}

impl<T: FrameTransform> FramePipeline<T> {
    /// Build a pipeline over `root` with a caller-supplied transform.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::InvalidInput`] if `root` is neither a
    /// recognized video file nor a directory.
    pub fn with_transform<P: AsRef<Path>>(
        root: P,
        transform: T,
        options: PipelineOptions,
    ) -> Result<Self, StageError> {
        let units = enumerate_units(root, &options.extensions)?;
        log::debug!("Enumerated {} video units", units.len());
        Ok(Self {
            units,
            options,
            transform,
        })
    }

    /// The enumerated video units, in processing order.
    pub fn units(&self) -> &[PathBuf] {
        &self.units
    }

    /// Number of video units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether enumeration found no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Run the full pipeline for the unit at `index` and return its
    /// manifest.
    ///
    /// Extraction and processing run to completion for the unit; any error
    /// aborts the unit with no partial manifest. Whether to continue with
    /// the remaining units after a failure is the caller's decision.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds; [`len`](FramePipeline::len)
    /// gives the valid range.
    ///
    /// # Errors
    ///
    /// See [`extract_frames`](crate::extract_frames) and
    /// [`process_frames`](crate::process_frames).
    pub fn process(&self, index: usize) -> Result<Manifest, StageError> {
        let unit = &self.units[index];
        let extracted = extract_frames(unit, &self.options)?;
        process_frames(unit, extracted, &self.transform, &self.options)
    }
}
