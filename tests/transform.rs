//! Built-in ImageNet transform tests.

use std::path::PathBuf;

use framestage::{CropMode, FrameTransform, ImageNetTransform, Resolution};

fn write_solid_image(dir: &tempfile::TempDir, name: &str, w: u32, h: u32, rgb: [u8; 3]) -> PathBuf {
    let path = dir.path().join(name);
    image::RgbImage::from_pixel(w, h, image::Rgb(rgb))
        .save(&path)
        .expect("Failed to write test image");
    path
}

#[test]
fn output_is_channel_first_at_target_resolution() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_solid_image(&dir, "frame_000000.png", 8, 6, [128, 64, 32]);

    let transform = ImageNetTransform::default();
    let tensor = transform
        .process(&path, Resolution::new(8, 6), None)
        .expect("Failed to process");

    assert_eq!(tensor.dim(), (3, 6, 8));
}

#[test]
fn values_are_imagenet_normalized() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_solid_image(&dir, "frame_000000.png", 4, 4, [128, 64, 32]);

    let transform = ImageNetTransform::default();
    let tensor = transform
        .process(&path, Resolution::new(4, 4), None)
        .expect("Failed to process");

    for (channel, &byte) in [128u8, 64, 32].iter().enumerate() {
        let expected =
            (f32::from(byte) / 255.0 - transform.mean[channel]) / transform.std[channel];
        let actual = tensor[[channel, 2, 2]];
        assert!(
            (actual - expected).abs() < 1e-5,
            "Channel {channel}: expected {expected}, got {actual}",
        );
    }
}

#[test]
fn resizes_to_requested_resolution() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_solid_image(&dir, "frame_000000.png", 16, 12, [200, 200, 200]);

    let transform = ImageNetTransform::default();
    let tensor = transform
        .process(&path, Resolution::new(4, 3), None)
        .expect("Failed to process");

    assert_eq!(tensor.dim(), (3, 3, 4));
}

#[test]
fn center_crop_keeps_the_middle() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    // Three vertical bands: red | green | blue. A square center crop of the
    // 12x4 image must land entirely in the green band.
    let mut image = image::RgbImage::new(12, 4);
    for (x, _, pixel) in image.enumerate_pixels_mut() {
        *pixel = match x {
            0..=3 => image::Rgb([255, 0, 0]),
            4..=7 => image::Rgb([0, 255, 0]),
            _ => image::Rgb([0, 0, 255]),
        };
    }
    let path = dir.path().join("frame_000000.png");
    image.save(&path).expect("Failed to write test image");

    let transform = ImageNetTransform::default();
    let tensor = transform
        .process(&path, Resolution::new(4, 4), Some(CropMode::Center))
        .expect("Failed to process");

    assert_eq!(tensor.dim(), (3, 4, 4));

    // Green channel maximal, red and blue at their zero-point everywhere.
    let zero_red = (0.0 - transform.mean[0]) / transform.std[0];
    let full_green = (1.0 - transform.mean[1]) / transform.std[1];
    for y in 0..4 {
        for x in 0..4 {
            assert!((tensor[[0, y, x]] - zero_red).abs() < 1e-4);
            assert!((tensor[[1, y, x]] - full_green).abs() < 1e-4);
        }
    }
}

#[test]
fn missing_file_propagates_as_error() {
    let transform = ImageNetTransform::default();
    let result = transform.process(
        std::path::Path::new("no_such_frame_000000.png"),
        Resolution::new(4, 4),
        None,
    );
    assert!(result.is_err());
}
