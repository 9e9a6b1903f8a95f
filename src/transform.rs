//! The preprocessing transform seam.
//!
//! The pipeline does not own the numeric preprocessing applied to each
//! staged frame; it invokes an external collaborator through the
//! [`FrameTransform`] trait and treats its output as opaque. Any error the
//! collaborator reports is propagated unmodified — the pipeline performs no
//! retries and no partial-result recovery.
//!
//! [`ImageNetTransform`] is a ready-made implementation suitable for
//! depth-estimation backbones: resize, scale to `[0, 1]`, normalize with
//! ImageNet statistics.

use std::path::Path;

use image::{RgbImage, imageops};
use ndarray::Array3;

use crate::{error::StageError, options::CropMode, resolution::Resolution};

/// The external image-preprocessing collaborator.
///
/// Given a staged frame file and the working resolution for the current
/// video, produce a channel-first (`C × H × W`) `f32` tensor. The pipeline
/// calls this once per staged frame, in frame-index order, always with the
/// same resolution for a given video.
pub trait FrameTransform {
    /// Load and preprocess one staged frame.
    ///
    /// # Errors
    ///
    /// Implementations surface failures however they see fit — commonly
    /// [`StageError::Transform`] for model- or numeric-level problems, or
    /// [`StageError::Image`]/[`StageError::Io`] for file-level ones. The
    /// pipeline aborts the current video unit on any error.
    fn process(
        &self,
        path: &Path,
        resolution: Resolution,
        crop: Option<CropMode>,
    ) -> Result<Array3<f32>, StageError>;
}

/// Resize-and-normalize preprocessing with ImageNet statistics.
///
/// The standard input transform for MiDaS/DPT-style depth models: pixels are
/// scaled to `[0, 1]` and normalized per channel with the ImageNet mean and
/// standard deviation. Output is `3 × H × W`.
#[derive(Debug, Clone)]
pub struct ImageNetTransform {
    /// Per-channel mean subtracted after scaling to `[0, 1]`.
    pub mean: [f32; 3],
    /// Per-channel standard deviation divided out after mean subtraction.
    pub std: [f32; 3],
}

impl Default for ImageNetTransform {
    fn default() -> Self {
        Self {
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }
}

impl FrameTransform for ImageNetTransform {
    fn process(
        &self,
        path: &Path,
        resolution: Resolution,
        crop: Option<CropMode>,
    ) -> Result<Array3<f32>, StageError> {
        let image = image::open(path)?.to_rgb8();

        let image = match crop {
            Some(CropMode::Center) => center_crop(&image, resolution),
            None => image,
        };

        let resized = if image.dimensions() == (resolution.width, resolution.height) {
            image
        } else {
            imageops::resize(
                &image,
                resolution.width,
                resolution.height,
                imageops::FilterType::Triangle,
            )
        };

        let (width, height) = resized.dimensions();
        let mut tensor = Array3::zeros((3, height as usize, width as usize));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for channel in 0..3 {
                let value = f32::from(pixel[channel]) / 255.0;
                tensor[[channel, y as usize, x as usize]] =
                    (value - self.mean[channel]) / self.std[channel];
            }
        }

        Ok(tensor)
    }
}

/// Crop the largest centered region matching the target aspect ratio.
fn center_crop(image: &RgbImage, target: Resolution) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || target.width == 0 || target.height == 0 {
        return image.clone();
    }

    // Compare aspect ratios in integer space: source wider than target when
    // w * target_h > h * target_w.
    let (crop_width, crop_height) =
        if u64::from(width) * u64::from(target.height) > u64::from(height) * u64::from(target.width)
        {
            let crop_width =
                (u64::from(height) * u64::from(target.width) / u64::from(target.height)) as u32;
            (crop_width.max(1), height)
        } else {
            let crop_height =
                (u64::from(width) * u64::from(target.height) / u64::from(target.width)) as u32;
            (width, crop_height.max(1))
        };

    let x = (width - crop_width) / 2;
    let y = (height - crop_height) / 2;
    imageops::crop_imm(image, x, y, crop_width, crop_height).to_image()
}
