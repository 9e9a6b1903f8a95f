//! Frame extraction.
//!
//! Opens one video with FFmpeg, decodes a bounded prefix of frames at the
//! configured stride, and spools each frame to a fresh staging directory as
//! a JPEG named by frame index. Decoding is strictly sequential; all FFmpeg
//! handles are scoped to the call and released on every exit path.

use std::path::Path;

use ffmpeg_next::{
    Rational,
    codec::context::Context as CodecContext,
    format::Pixel,
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;

use crate::{
    error::StageError,
    options::PipelineOptions,
    progress::{PipelineStage, ProgressTracker},
    staging::{FrameRecord, StagingDir},
};

/// The result of extracting one video's frames.
///
/// `records` are in strictly increasing frame-index order. The staging
/// directory is deleted when this value is dropped unless it is retained;
/// the processing stage decides which, based on the configured
/// [`DisposalPolicy`](crate::DisposalPolicy).
#[derive(Debug)]
pub struct ExtractedFrames {
    /// Staged frame files, ordered by frame index.
    pub records: Vec<FrameRecord>,
    /// The staging directory holding the frame files.
    pub staging: StagingDir,
    /// Frame rate reported by the video stream. Never zero.
    pub fps: f64,
}

/// Extract up to `options.frame_cap()` frames from the video at `path`.
///
/// Frames are taken from index 0 at the configured stride and written to a
/// newly created staging directory as `frame_{index:06}.jpg`. If the stream
/// ends before every requested index is decoded, the frames decoded so far
/// are returned — a truncated result is valid, not a failure.
///
/// # Errors
///
/// - [`StageError::StreamOpen`] if the container cannot be opened or has no
///   video stream.
/// - [`StageError::InvalidStream`] if the stream reports a zero frame rate.
///   Raised before the staging directory is created, so no partial output is
///   left behind.
/// - [`StageError::Image`]/[`StageError::Io`] if a staged frame cannot be
///   written.
pub fn extract_frames(path: &Path, options: &PipelineOptions) -> Result<ExtractedFrames, StageError> {
    ffmpeg_next::init().map_err(|error| StageError::StreamOpen {
        path: path.to_path_buf(),
        reason: format!("FFmpeg initialization failed: {error}"),
    })?;

    log::debug!("Opening video {}", path.display());
    let mut input = ffmpeg_next::format::input(&path).map_err(|error| StageError::StreamOpen {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })?;

    let stream = input
        .streams()
        .best(Type::Video)
        .ok_or_else(|| StageError::StreamOpen {
            path: path.to_path_buf(),
            reason: "no video stream in container".to_string(),
        })?;
    let stream_index = stream.index();
    let time_base = stream.time_base();

    let fps = stream_frame_rate(&stream);
    if fps == 0.0 {
        return Err(StageError::InvalidStream {
            path: path.to_path_buf(),
        });
    }

    let total_frames = stream_frame_count(&stream, input.duration(), fps);
    let frame_limit = total_frames.min(options.frame_cap);
    let targets: Vec<u64> = (0..frame_limit).step_by(options.stride as usize).collect();
    log::debug!(
        "{}: fps {fps}, stride {}, {} frames to read",
        path.display(),
        options.stride,
        targets.len(),
    );

    let decoder_context = CodecContext::from_parameters(stream.parameters())?;
    let mut decoder = decoder_context.decoder().video()?;
    let mut scaler = ScalingContext::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        Pixel::RGB24,
        decoder.width(),
        decoder.height(),
        ScalingFlags::BILINEAR,
    )?;
    let (width, height) = (decoder.width(), decoder.height());

    let staging = StagingDir::create()?;
    let mut records = Vec::with_capacity(targets.len());
    let mut tracker = ProgressTracker::new(
        options.progress.clone(),
        PipelineStage::FrameExtraction,
        Some(targets.len() as u64),
    );

    let mut target_position = 0;
    let mut decoded = VideoFrame::empty();
    let mut rgb = VideoFrame::empty();

    let mut stage_frame = |frame: &VideoFrame,
                           index: u64,
                           scaler: &mut ScalingContext,
                           rgb: &mut VideoFrame|
     -> Result<(), StageError> {
        scaler.run(frame, rgb)?;
        let frame_path = staging.frame_path(index, "jpg");
        save_rgb_frame(rgb, width, height, &frame_path)?;
        records.push(FrameRecord {
            index,
            path: frame_path,
        });
        tracker.advance(Some(index));
        Ok(())
    };

    'decode: for (packet_stream, packet) in input.packets() {
        if target_position >= targets.len() {
            break;
        }
        if packet_stream.index() != stream_index {
            continue;
        }

        // A packet the decoder rejects mid-stream is treated like end of
        // stream: stop with the frames staged so far.
        if decoder.send_packet(&packet).is_err() {
            break;
        }

        while decoder.receive_frame(&mut decoded).is_ok() {
            let frame_number = pts_to_frame_number(decoded.pts().unwrap_or(0), time_base, fps);

            // Skip targets the decoder has already moved past.
            while target_position < targets.len() && targets[target_position] < frame_number {
                target_position += 1;
            }
            if target_position >= targets.len() {
                break 'decode;
            }

            if frame_number == targets[target_position] {
                stage_frame(&decoded, frame_number, &mut scaler, &mut rgb)?;
                target_position += 1;
            }
        }
    }

    // Drain frames still buffered in the decoder.
    if target_position < targets.len() && decoder.send_eof().is_ok() {
        while decoder.receive_frame(&mut decoded).is_ok() {
            let frame_number = pts_to_frame_number(decoded.pts().unwrap_or(0), time_base, fps);

            while target_position < targets.len() && targets[target_position] < frame_number {
                target_position += 1;
            }
            if target_position >= targets.len() {
                break;
            }

            if frame_number == targets[target_position] {
                stage_frame(&decoded, frame_number, &mut scaler, &mut rgb)?;
                target_position += 1;
            }
        }
    }

    log::debug!(
        "{}: staged {} of {} requested frames",
        path.display(),
        records.len(),
        targets.len(),
    );

    Ok(ExtractedFrames {
        records,
        staging,
        fps,
    })
}

/// Frame rate from the stream's average rate, falling back to the real base
/// rate when the average is unavailable.
fn stream_frame_rate(stream: &ffmpeg_next::Stream<'_>) -> f64 {
    let average = stream.avg_frame_rate();
    if average.denominator() != 0 && average.numerator() != 0 {
        return f64::from(average.numerator()) / f64::from(average.denominator());
    }
    let rate = stream.rate();
    if rate.denominator() != 0 {
        f64::from(rate.numerator()) / f64::from(rate.denominator())
    } else {
        0.0
    }
}

/// Total frame count from stream metadata, estimated from the container
/// duration when the stream does not declare one.
fn stream_frame_count(stream: &ffmpeg_next::Stream<'_>, duration_microseconds: i64, fps: f64) -> u64 {
    let declared = stream.frames();
    if declared > 0 {
        return declared as u64;
    }
    if duration_microseconds > 0 {
        let seconds = duration_microseconds as f64 / 1_000_000.0;
        (seconds * fps) as u64
    } else {
        0
    }
}

/// Rescale a PTS value from the stream time base to a frame number.
fn pts_to_frame_number(pts: i64, time_base: Rational, fps: f64) -> u64 {
    let seconds = pts as f64 * f64::from(time_base.numerator()) / f64::from(time_base.denominator());
    (seconds * fps).round().max(0.0) as u64
}

/// Save a scaled RGB24 frame to disk, stripping any per-row stride padding.
fn save_rgb_frame(
    rgb_frame: &VideoFrame,
    width: u32,
    height: u32,
    path: &Path,
) -> Result<(), StageError> {
    let stride = rgb_frame.stride(0);
    let row_bytes = width as usize * 3;
    let data = rgb_frame.data(0);

    let buffer = if stride == row_bytes {
        data[..row_bytes * height as usize].to_vec()
    } else {
        // FFmpeg frames frequently pad rows past width × 3.
        let mut buffer = Vec::with_capacity(row_bytes * height as usize);
        for row in 0..height as usize {
            let start = row * stride;
            buffer.extend_from_slice(&data[start..start + row_bytes]);
        }
        buffer
    };

    let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        StageError::Ffmpeg("decoded frame buffer does not match its declared dimensions".to_string())
    })?;
    image.save(path)?;
    Ok(())
}
