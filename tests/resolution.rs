//! Working-resolution selection tests.

use framestage::Resolution;

#[test]
fn within_limit_is_unchanged() {
    let res = Resolution::new(640, 480).fit_long_side(2044);
    assert_eq!(res, Resolution::new(640, 480));
}

#[test]
fn exactly_at_limit_is_unchanged() {
    let res = Resolution::new(2044, 1080).fit_long_side(2044);
    assert_eq!(res, Resolution::new(2044, 1080));
}

#[test]
fn landscape_long_side_is_capped() {
    // 3000x1500 scales by 2044/3000; the short side is 1500 * 2044 / 3000.
    let res = Resolution::new(3000, 1500).fit_long_side(2044);
    assert_eq!(res, Resolution::new(2044, 1022));
}

#[test]
fn portrait_long_side_is_capped() {
    let res = Resolution::new(1500, 3000).fit_long_side(2044);
    assert_eq!(res, Resolution::new(1022, 2044));
}

#[test]
fn short_side_truncates() {
    // 1000 * 2044 / 2045 = 999.51..., truncated toward zero.
    let res = Resolution::new(2045, 1000).fit_long_side(2044);
    assert_eq!(res, Resolution::new(2044, 999));
}

#[test]
fn square_input_stays_square() {
    let res = Resolution::new(4096, 4096).fit_long_side(2044);
    assert_eq!(res, Resolution::new(2044, 2044));
}

#[test]
fn long_side_helper() {
    assert_eq!(Resolution::new(3000, 1500).long_side(), 3000);
    assert_eq!(Resolution::new(1500, 3000).long_side(), 3000);
}

#[test]
fn of_image_reads_native_dimensions() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("frame_000000.png");
    image::RgbImage::from_pixel(320, 240, image::Rgb([10, 20, 30]))
        .save(&path)
        .expect("Failed to write test image");

    let res = Resolution::of_image(&path).expect("Failed to read dimensions");
    assert_eq!(res, Resolution::new(320, 240));
}

#[test]
fn of_image_rejects_non_images() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("frame_000000.png");
    std::fs::write(&path, b"not an image").expect("Failed to write file");

    assert!(Resolution::of_image(&path).is_err());
}
