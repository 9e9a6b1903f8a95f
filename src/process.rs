//! Frame processing and caching.
//!
//! Takes one video's staged frames, runs each through the preprocessing
//! transform at a working resolution computed once from the first frame, and
//! persists the results to a second staging area (or holds them in memory,
//! under the resident policy). Returns the video's [`Manifest`].

use std::path::Path;

use crate::{
    error::StageError,
    extract::ExtractedFrames,
    manifest::Manifest,
    options::{DisposalPolicy, MemoryPolicy, PipelineOptions, SerializationMode},
    progress::{PipelineStage, ProgressTracker},
    resolution::Resolution,
    serialize::{to_channel_last, write_image_frame, write_npy_frame},
    staging::{StagingDir, sort_by_frame_index},
    transform::FrameTransform,
};

/// Process one video's extracted frames into a manifest.
///
/// Frames are re-sorted by the numeric index embedded in their filenames,
/// then transformed and persisted in that order. The working resolution is
/// the first frame's native size, scaled down when its longer side exceeds
/// the configured limit. A video that yielded no frames produces an empty
/// manifest.
///
/// # Errors
///
/// - [`StageError::PathFormat`] if a staged filename has no parseable
///   numeric index.
/// - Any error surfaced by the transform, propagated unmodified.
/// - [`StageError::Npy`]/[`StageError::Image`]/[`StageError::Io`] if a
///   processed frame cannot be persisted.
pub fn process_frames<T: FrameTransform>(
    video_path: &Path,
    extracted: ExtractedFrames,
    transform: &T,
    options: &PipelineOptions,
) -> Result<Manifest, StageError> {
    let ExtractedFrames {
        records,
        staging,
        fps,
    } = extracted;

    let records = sort_by_frame_index(records.into_iter().map(|record| record.path))?;
    let scene_name = scene_name(video_path);

    let Some(first) = records.first() else {
        log::debug!("{scene_name}: no frames staged, returning empty manifest");
        return Ok(empty_manifest(scene_name, fps, staging, options));
    };

    let native = Resolution::of_image(&first.path)?;
    let resolution = native.fit_long_side(options.long_side_limit);
    if resolution != native {
        log::info!(
            "{scene_name}: resizing long side to {} (new resolution {}x{})",
            options.long_side_limit,
            resolution.width,
            resolution.height,
        );
    }

    let output = match options.memory {
        MemoryPolicy::Spool => Some(StagingDir::create()?),
        MemoryPolicy::Resident => None,
    };

    let mut frame_paths = Vec::new();
    let mut tensors = Vec::new();
    let mut tracker = ProgressTracker::new(
        options.progress.clone(),
        PipelineStage::FrameProcessing,
        Some(records.len() as u64),
    );

    for (position, record) in records.iter().enumerate() {
        let tensor = transform.process(&record.path, resolution, options.crop)?;

        match &output {
            Some(output) => {
                let channel_last = to_channel_last(tensor);
                let frame_path = match options.serialization {
                    SerializationMode::Npy => {
                        let path = output.frame_path(position as u64, "npy");
                        write_npy_frame(&path, &channel_last)?;
                        path
                    }
                    SerializationMode::Image => {
                        let path = output.frame_path(position as u64, "png");
                        write_image_frame(&path, &channel_last)?;
                        path
                    }
                };
                frame_paths.push(frame_path);
            }
            None => tensors.push(tensor),
        }

        tracker.advance(Some(record.index));
    }

    log::debug!(
        "{scene_name}: processed {} frames at {}x{}",
        records.len(),
        resolution.width,
        resolution.height,
    );

    let extraction_dir = match options.disposal {
        DisposalPolicy::Immediate => {
            drop(staging);
            None
        }
        DisposalPolicy::Retain => Some(staging.retain()),
    };

    Ok(Manifest {
        scene_name,
        frame_paths,
        fps,
        resolution,
        output_dir: output.map(StagingDir::retain),
        extraction_dir,
        tensors,
    })
}

/// Scene identifier for a video path: the filename with its directory and
/// everything from the first `.` stripped.
pub(crate) fn scene_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    name.split('.').next().unwrap_or_default().to_string()
}

/// Manifest for a video whose extraction yielded zero frames.
fn empty_manifest(
    scene_name: String,
    fps: f64,
    staging: StagingDir,
    options: &PipelineOptions,
) -> Manifest {
    let extraction_dir = match options.disposal {
        DisposalPolicy::Immediate => None,
        DisposalPolicy::Retain => Some(staging.retain()),
    };
    Manifest {
        scene_name,
        frame_paths: Vec::new(),
        fps,
        resolution: Resolution::new(0, 0),
        output_dir: None,
        extraction_dir,
        tensors: Vec::new(),
    }
}
