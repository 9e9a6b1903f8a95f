//! FFmpeg console-output control.
//!
//! FFmpeg logs to stderr through its own system, independent of the Rust
//! [`log`](https://crates.io/crates/log) crate, and its default verbosity is
//! noisy for library use. [`set_ffmpeg_log_level`] tunes that output without
//! requiring callers to depend on `ffmpeg-next` themselves. Rust-side
//! diagnostics from this crate go through `log` as usual.

use ffmpeg_next::util::log::Level;

/// Verbosity of FFmpeg's internal stderr logging, most quiet first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    /// No output at all.
    Quiet,
    /// Unrecoverable errors only.
    Fatal,
    /// Recoverable errors.
    Error,
    /// Warnings (FFmpeg's default).
    Warning,
    /// Informational messages.
    Info,
    /// Debugging output.
    Debug,
}

/// Set the verbosity of FFmpeg's internal stderr logging.
///
/// Messages below the given severity are suppressed process-wide.
///
/// # Example
///
/// ```no_run
/// use framestage::FfmpegLogLevel;
///
/// // Keep decoder chatter out of pipeline logs.
/// framestage::set_ffmpeg_log_level(FfmpegLogLevel::Error);
/// ```
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    let level = match level {
        FfmpegLogLevel::Quiet => Level::Quiet,
        FfmpegLogLevel::Fatal => Level::Fatal,
        FfmpegLogLevel::Error => Level::Error,
        FfmpegLogLevel::Warning => Level::Warning,
        FfmpegLogLevel::Info => Level::Info,
        FfmpegLogLevel::Debug => Level::Debug,
    };
    ffmpeg_next::util::log::set_level(level);
}
