//! Processed-frame serialization tests.

use framestage::{StageError, to_channel_last, write_image_frame, write_npy_frame};
use ndarray::{Array3, Axis};

/// A small synthetic channel-last tensor with values spread across [0, 1].
fn sample_tensor(height: usize, width: usize) -> Array3<f32> {
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        ((y * width + x) * 3 + c) as f32 / ((height * width * 3) as f32)
    })
}

// ── Layout conversion ───────────────────────────────────────────

#[test]
fn channel_last_permutes_axes() {
    let chw = Array3::from_shape_fn((3, 4, 5), |(c, y, x)| (c * 100 + y * 10 + x) as f32);
    let hwc = to_channel_last(chw.clone());

    assert_eq!(hwc.dim(), (4, 5, 3));
    for c in 0..3 {
        for y in 0..4 {
            for x in 0..5 {
                assert_eq!(hwc[[y, x, c]], chw[[c, y, x]]);
            }
        }
    }
}

#[test]
fn channel_last_is_standard_layout() {
    let hwc = to_channel_last(Array3::zeros((3, 4, 5)));
    assert!(hwc.is_standard_layout());
}

// ── Raw numeric dump ────────────────────────────────────────────

#[test]
fn npy_round_trips_exactly() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("frame_000000.npy");
    let tensor = sample_tensor(6, 8);

    write_npy_frame(&path, &tensor).expect("Failed to write npy");
    let restored: Array3<f32> = ndarray_npy::read_npy(&path).expect("Failed to read npy");

    assert_eq!(restored, tensor);
}

// ── Byte-image dump ─────────────────────────────────────────────

#[test]
fn image_mode_round_trips_within_byte_precision() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("frame_000000.png");
    let tensor = sample_tensor(6, 8);

    write_image_frame(&path, &tensor).expect("Failed to write image");
    let restored = image::open(&path).expect("Failed to read image").to_rgb8();

    assert_eq!(restored.dimensions(), (8, 6));
    for (x, y, pixel) in restored.enumerate_pixels() {
        for c in 0..3 {
            let original = tensor[[y as usize, x as usize, c]];
            let recovered = f32::from(pixel[c]) / 255.0;
            assert!(
                (original - recovered).abs() <= 1.0 / 255.0,
                "Value at ({x}, {y}, {c}) drifted: {original} vs {recovered}",
            );
        }
    }
}

#[test]
fn both_modes_agree_on_pixel_content() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let npy_path = dir.path().join("frame_000000.npy");
    let png_path = dir.path().join("frame_000000.png");
    let tensor = sample_tensor(5, 7);

    write_npy_frame(&npy_path, &tensor).expect("Failed to write npy");
    write_image_frame(&png_path, &tensor).expect("Failed to write image");

    let from_npy: Array3<f32> = ndarray_npy::read_npy(&npy_path).expect("Failed to read npy");
    let from_png = image::open(&png_path).expect("Failed to read image").to_rgb8();

    for (x, y, pixel) in from_png.enumerate_pixels() {
        for c in 0..3 {
            let npy_value = from_npy[[y as usize, x as usize, c]];
            let png_value = f32::from(pixel[c]) / 255.0;
            assert!(
                (npy_value - png_value).abs() <= 1.0 / 255.0,
                "Modes disagree at ({x}, {y}, {c}): {npy_value} vs {png_value}",
            );
        }
    }
}

#[test]
fn image_mode_clamps_out_of_range_values() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("frame_000000.png");

    let mut tensor = Array3::zeros((2, 2, 3));
    tensor[[0, 0, 0]] = -4.5;
    tensor[[1, 1, 2]] = 17.0;

    write_image_frame(&path, &tensor).expect("Failed to write image");
    let restored = image::open(&path).expect("Failed to read image").to_rgb8();

    assert_eq!(restored.get_pixel(0, 0)[0], 0);
    assert_eq!(restored.get_pixel(1, 1)[2], 255);
}

#[test]
fn image_mode_requires_three_channels() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("frame_000000.png");
    let tensor: Array3<f32> = Array3::zeros((4, 4, 1));

    let result = write_image_frame(&path, &tensor);
    assert!(matches!(result, Err(StageError::Transform(_))));
}

#[test]
fn npy_preserves_channel_count() {
    // Single-channel dumps (e.g. depth maps) are legal in npy mode.
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("frame_000000.npy");
    let tensor: Array3<f32> = Array3::ones((4, 4, 1));

    write_npy_frame(&path, &tensor).expect("Failed to write npy");
    let restored: Array3<f32> = ndarray_npy::read_npy(&path).expect("Failed to read npy");
    assert_eq!(restored.len_of(Axis(2)), 1);
}
