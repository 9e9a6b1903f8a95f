//! Progress reporting.
//!
//! Extraction and processing are long-running, blocking loops. This module
//! provides [`ProgressCallback`], an injectable side channel for observing
//! per-frame progress without coupling the pipeline to any particular
//! reporting mechanism. The default is a no-op; the pipeline behaves
//! identically whether or not a callback is attached.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framestage::{
//!     FramePipeline, PipelineOptions, ProgressCallback, ProgressInfo, StageError,
//! };
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("[{:?}] {pct:.1}% complete", info.stage);
//!         }
//!     }
//! }
//!
//! let options = PipelineOptions::new(50).with_progress(Arc::new(PrintProgress));
//! let pipeline = FramePipeline::open("input.mp4", options)?;
//! let manifest = pipeline.process(0)?;
//! # Ok::<(), StageError>(())
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// The pipeline stage currently reporting progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PipelineStage {
    /// Decoding frames out of the video container into the staging
    /// directory.
    FrameExtraction,
    /// Running staged frames through the preprocessing transform and
    /// persisting the results.
    FrameProcessing,
}

/// A snapshot of pipeline progress, delivered once per completed frame.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Which stage is reporting.
    pub stage: PipelineStage,
    /// Frames completed so far within this stage.
    pub current: u64,
    /// Total frames this stage expects to handle, if known.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time since the stage started.
    pub elapsed: Duration,
    /// Estimated time remaining at the current throughput.
    pub estimated_remaining: Option<Duration>,
    /// The source frame index just handled, when one applies.
    pub frame_index: Option<u64>,
}

/// Trait for receiving progress updates from the pipeline.
///
/// Implementations must be [`Send`] and [`Sync`] so a single callback can be
/// shared across pipelines. Callbacks are infallible observers — they cannot
/// halt the operation.
pub trait ProgressCallback: Send + Sync {
    /// Called after each completed frame.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. The default when no callback is
/// configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Internal helper that tracks stage timing and emits callbacks.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    stage: PipelineStage,
    total: Option<u64>,
    current: u64,
    started: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        stage: PipelineStage,
        total: Option<u64>,
    ) -> Self {
        Self {
            callback,
            stage,
            total,
            current: 0,
            started: Instant::now(),
        }
    }

    /// Record one completed frame and notify the callback.
    pub(crate) fn advance(&mut self, frame_index: Option<u64>) {
        self.current += 1;

        let elapsed = self.started.elapsed();
        let percentage = self
            .total
            .filter(|&total| total > 0)
            .map(|total| (self.current as f32 / total as f32) * 100.0);
        let estimated_remaining = self.total.map(|total| {
            let remaining = total.saturating_sub(self.current);
            (elapsed / self.current as u32) * remaining as u32
        });

        self.callback.on_progress(&ProgressInfo {
            stage: self.stage,
            current: self.current,
            total: self.total,
            percentage,
            elapsed,
            estimated_remaining,
            frame_index,
        });
    }
}
