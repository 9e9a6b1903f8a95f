//! Pipeline configuration.
//!
//! [`PipelineOptions`] is a builder that collapses the knobs the pipeline
//! varies on — extension allow-list, frame cap, stride, serialization mode,
//! staging disposal, memory policy — into one explicit configuration value
//! instead of scattering them across call sites.
//!
//! The frame cap has no default: it bounds how much of each video is read
//! and the right ceiling is workload-specific, so [`PipelineOptions::new`]
//! requires it up front.
//!
//! # Example
//!
//! ```
//! use framestage::{DisposalPolicy, PipelineOptions, SerializationMode};
//!
//! let options = PipelineOptions::new(50)
//!     .with_stride(2)
//!     .with_serialization(SerializationMode::Image)
//!     .with_disposal(DisposalPolicy::Retain);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::progress::{NoOpProgress, ProgressCallback};

/// Default long-side limit applied when selecting the working resolution.
pub const DEFAULT_LONG_SIDE_LIMIT: u32 = 2044;

/// How processed frames are persisted to the output staging area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializationMode {
    /// Raw numeric dump: the channel-last `f32` tensor is written as a
    /// `.npy` file. This is the default.
    #[default]
    Npy,
    /// Directly viewable image: each value is rescaled to the byte range
    /// (`value × 255`, clamped to `[0, 255]`) and saved as a PNG.
    Image,
}

/// What happens to the extraction staging directory once processing is done.
///
/// Keeping extracted frames around trades disk space for the ability to
/// re-process without decoding the video again; the choice belongs to the
/// caller, not the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisposalPolicy {
    /// Delete the extracted frames as soon as processing finishes. This is
    /// the default.
    #[default]
    Immediate,
    /// Keep the directory on disk and surface its path through
    /// [`Manifest::extraction_dir`](crate::Manifest::extraction_dir). The
    /// caller owns cleanup.
    Retain,
}

/// Where processed frames live after the pipeline returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryPolicy {
    /// Spool every processed frame to disk so peak memory stays flat
    /// regardless of video length. This is the default.
    #[default]
    Spool,
    /// Hold processed tensors in memory on the manifest and skip the output
    /// staging area entirely. Memory grows linearly with frame count.
    Resident,
}

/// Optional cropping hint passed through to the preprocessing transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CropMode {
    /// Crop the largest centered region matching the target aspect ratio
    /// before resizing.
    Center,
}

/// Configuration for one [`FramePipeline`](crate::FramePipeline).
///
/// All `with_*` methods consume and return the options value. Settings not
/// touched keep their defaults: stride 1, `mp4`/`avi` extensions, `.npy`
/// serialization, immediate staging disposal, disk spooling, long-side
/// limit [`DEFAULT_LONG_SIDE_LIMIT`], no crop, no progress callback.
#[derive(Clone)]
pub struct PipelineOptions {
    pub(crate) frame_cap: u64,
    pub(crate) stride: u64,
    pub(crate) extensions: Vec<String>,
    pub(crate) serialization: SerializationMode,
    pub(crate) disposal: DisposalPolicy,
    pub(crate) memory: MemoryPolicy,
    pub(crate) long_side_limit: u32,
    pub(crate) crop: Option<CropMode>,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for PipelineOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PipelineOptions")
            .field("frame_cap", &self.frame_cap)
            .field("stride", &self.stride)
            .field("extensions", &self.extensions)
            .field("serialization", &self.serialization)
            .field("disposal", &self.disposal)
            .field("memory", &self.memory)
            .field("long_side_limit", &self.long_side_limit)
            .field("crop", &self.crop)
            .finish_non_exhaustive()
    }
}

impl PipelineOptions {
    /// Create options with the given frame cap and defaults everywhere else.
    ///
    /// At most `frame_cap` frames are extracted per video; shorter videos
    /// yield however many frames they actually contain.
    pub fn new(frame_cap: u64) -> Self {
        Self {
            frame_cap,
            stride: 1,
            extensions: vec!["mp4".to_string(), "avi".to_string()],
            serialization: SerializationMode::default(),
            disposal: DisposalPolicy::default(),
            memory: MemoryPolicy::default(),
            long_side_limit: DEFAULT_LONG_SIDE_LIMIT,
            crop: None,
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Set the spacing between consecutive extracted frame indices.
    ///
    /// Clamped to a minimum of 1 (every frame).
    #[must_use]
    pub fn with_stride(mut self, stride: u64) -> Self {
        self.stride = stride.max(1);
        self
    }

    /// Replace the video extension allow-list used by enumeration.
    ///
    /// Entries are matched case-insensitively and given without a leading
    /// dot.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set how processed frames are persisted.
    #[must_use]
    pub fn with_serialization(mut self, mode: SerializationMode) -> Self {
        self.serialization = mode;
        self
    }

    /// Set what happens to the extraction staging directory after
    /// processing.
    #[must_use]
    pub fn with_disposal(mut self, policy: DisposalPolicy) -> Self {
        self.disposal = policy;
        self
    }

    /// Choose between disk spooling and in-memory tensors.
    #[must_use]
    pub fn with_memory_policy(mut self, policy: MemoryPolicy) -> Self {
        self.memory = policy;
        self
    }

    /// Override the long-side limit used when selecting the working
    /// resolution.
    #[must_use]
    pub fn with_long_side_limit(mut self, limit: u32) -> Self {
        self.long_side_limit = limit;
        self
    }

    /// Set the cropping hint forwarded to the preprocessing transform.
    #[must_use]
    pub fn with_crop(mut self, crop: CropMode) -> Self {
        self.crop = Some(crop);
        self
    }

    /// Attach a progress callback, fired once per completed frame in each
    /// stage.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// The configured frame cap.
    pub fn frame_cap(&self) -> u64 {
        self.frame_cap
    }

    /// The configured stride.
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// The configured extension allow-list.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}
