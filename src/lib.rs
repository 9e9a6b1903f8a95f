//! # framestage
//!
//! Stage video frames to disk for memory-bounded vision pipelines.
//!
//! `framestage` extracts a bounded prefix of frames from each video in a
//! collection, spools them to a temporary staging directory, runs every
//! staged frame through an image-preprocessing transform, and persists the
//! processed tensors to a second staging area. Spooling keeps peak memory
//! flat regardless of video length, at the cost of linear disk usage — the
//! intended tradeoff for feeding long videos through depth-estimation
//! models on memory-constrained hosts.
//!
//! Decoding is powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate; processed
//! frames are persisted either as raw [`ndarray`] dumps (`.npy`) or as
//! viewable images.
//!
//! ## Quick Start
//!
//! ```no_run
//! use framestage::{FramePipeline, PipelineOptions};
//!
//! let pipeline = FramePipeline::open("footage/", PipelineOptions::new(50)).unwrap();
//! for index in 0..pipeline.len() {
//!     let manifest = pipeline.process(index).unwrap();
//!     println!(
//!         "{}: {} frames at {} fps",
//!         manifest.scene_name,
//!         manifest.frame_count(),
//!         manifest.fps,
//!     );
//! }
//! ```
//!
//! ## Custom Preprocessing
//!
//! The numeric preprocessing is a collaborator behind the
//! [`FrameTransform`] trait. The built-in [`ImageNetTransform`] covers
//! MiDaS/DPT-style models; swap in your own for anything else:
//!
//! ```no_run
//! use framestage::{FramePipeline, ImageNetTransform, PipelineOptions};
//!
//! let transform = ImageNetTransform::default();
//! let pipeline = FramePipeline::with_transform(
//!     "input.mp4",
//!     transform,
//!     PipelineOptions::new(2),
//! ).unwrap();
//! ```
//!
//! ## Pipeline Shape
//!
//! Per video unit, strictly in sequence:
//!
//! 1. **Enumeration** — the root path (one video file or a directory of
//!    them) becomes an ordered unit list, once, at construction.
//! 2. **Extraction** — frames are decoded at a fixed stride up to a
//!    configured cap and staged as JPEGs named by frame index.
//! 3. **Processing** — each staged frame is transformed at a working
//!    resolution computed from the first frame, converted to channel-last
//!    layout, and persisted; the returned [`Manifest`] lists the output
//!    files in frame order.
//!
//! There is no concurrency anywhere: no parallel decode, no overlap between
//! stages, no parallelism across units. Staging directories are private per
//! video. The one shared resource is disk space — see
//! [`DisposalPolicy`] for who cleans up what.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on the system; see the
//! `ffmpeg-next` documentation for platform specifics.

pub mod error;
pub mod extract;
pub mod ffmpeg;
pub mod manifest;
pub mod options;
pub mod pipeline;
pub mod process;
pub mod progress;
pub mod resolution;
pub mod serialize;
pub mod source;
pub mod staging;
pub mod transform;

pub use error::StageError;
pub use extract::{ExtractedFrames, extract_frames};
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use manifest::Manifest;
pub use options::{
    CropMode, DEFAULT_LONG_SIDE_LIMIT, DisposalPolicy, MemoryPolicy, PipelineOptions,
    SerializationMode,
};
pub use pipeline::FramePipeline;
pub use process::process_frames;
pub use progress::{PipelineStage, ProgressCallback, ProgressInfo};
pub use resolution::Resolution;
pub use serialize::{to_channel_last, write_image_frame, write_npy_frame};
pub use source::enumerate_units;
pub use staging::{FrameRecord, StagingDir, parse_frame_index, sort_by_frame_index};
pub use transform::{FrameTransform, ImageNetTransform};
