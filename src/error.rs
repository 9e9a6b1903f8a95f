//! Error types for the `framestage` crate.
//!
//! This module defines [`StageError`], the unified error type returned by all
//! fallible operations in the crate. Variants carry the offending path and,
//! where available, the upstream reason, so failures can be diagnosed without
//! extra logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use ndarray_npy::WriteNpyError;
use thiserror::Error;

/// The unified error type for all `framestage` operations.
///
/// Every public method that can fail returns `Result<T, StageError>`. Any of
/// these errors aborts processing of the current video unit entirely; there
/// is no partial-manifest return. A video stream that ends before the
/// configured frame cap is reached is **not** an error — extraction simply
/// returns fewer frames.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StageError {
    /// The root path is neither a recognized video file nor a directory.
    #[error("{path} is neither a video file with a recognized extension nor a directory")]
    InvalidInput {
        /// The root path handed to enumeration.
        path: PathBuf,
    },

    /// The video container could not be opened by the decoding backend.
    #[error("Failed to open video stream at {path}: {reason}")]
    StreamOpen {
        /// Path of the video that failed to open.
        path: PathBuf,
        /// Underlying reason reported by the backend.
        reason: String,
    },

    /// The stream reports a frame rate of zero and cannot be time-aligned
    /// downstream.
    #[error("Video stream at {path} reports a frame rate of zero")]
    InvalidStream {
        /// Path of the offending video.
        path: PathBuf,
    },

    /// A staged frame filename does not contain a parseable numeric index.
    #[error("Staged frame filename {path} does not embed a numeric frame index")]
    PathFormat {
        /// The unparseable staged-frame path.
        path: PathBuf,
    },

    /// A failure surfaced by the external preprocessing transform.
    ///
    /// The pipeline performs no recovery and no retries; whatever the
    /// collaborator reports is carried through as-is.
    #[error("Frame transform failed: {0}")]
    Transform(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// An I/O error while reading or writing staged files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// An error from the `image` crate while decoding or encoding a frame.
    #[error("Image processing error: {0}")]
    Image(#[from] ImageError),

    /// Writing a raw numeric frame dump failed.
    #[error("Array serialization error: {0}")]
    Npy(#[from] WriteNpyError),
}

impl From<FfmpegError> for StageError {
    fn from(error: FfmpegError) -> Self {
        StageError::Ffmpeg(error.to_string())
    }
}
