//! Processed-frame serialization.
//!
//! Processed tensors leave the transform in channel-first (`C × H × W`)
//! layout and are persisted channel-last (`H × W × C`), the storage-ready
//! ordering downstream consumers read. Two on-disk representations are
//! supported, selected by [`SerializationMode`](crate::SerializationMode):
//! a raw `.npy` dump of the `f32` values, or a byte-range PNG.

use std::path::Path;

use image::RgbImage;
use ndarray::Array3;

use crate::error::StageError;

/// Permute a channel-first tensor (`C × H × W`) into channel-last
/// (`H × W × C`) layout.
///
/// The result is materialized in standard (row-major) memory order so it can
/// be dumped to disk directly.
#[must_use]
pub fn to_channel_last(tensor: Array3<f32>) -> Array3<f32> {
    tensor.permuted_axes([1, 2, 0]).as_standard_layout().to_owned()
}

/// Write a channel-last tensor as a raw `.npy` file.
///
/// Values are stored as little-endian `f32` with no rescaling, so the dump
/// round-trips exactly.
///
/// # Errors
///
/// Returns [`StageError::Npy`] if the file cannot be written.
pub fn write_npy_frame<P: AsRef<Path>>(
    path: P,
    tensor: &Array3<f32>,
) -> Result<(), StageError> {
    ndarray_npy::write_npy(path, tensor)?;
    Ok(())
}

/// Write a channel-last tensor as a directly viewable image.
///
/// Each value is rescaled to the byte range — multiplied by 255, rounded,
/// and clamped to `[0, 255]` — and the result is saved in the format implied
/// by the path extension (the pipeline uses PNG). The tensor must have three
/// channels.
///
/// # Errors
///
/// Returns [`StageError::Transform`] if the tensor is not three-channel, or
/// [`StageError::Image`] if encoding fails.
pub fn write_image_frame<P: AsRef<Path>>(
    path: P,
    tensor: &Array3<f32>,
) -> Result<(), StageError> {
    let (height, width, channels) = tensor.dim();
    if channels != 3 {
        return Err(StageError::Transform(format!(
            "byte-image serialization expects 3 channels, tensor has {channels}"
        )));
    }

    let image = RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let byte = |channel: usize| {
            let value = tensor[[y as usize, x as usize, channel]];
            (value * 255.0).round().clamp(0.0, 255.0) as u8
        };
        image::Rgb([byte(0), byte(1), byte(2)])
    });

    image.save(path)?;
    Ok(())
}
