//! Staging directory and frame-index naming tests.

use std::path::{Path, PathBuf};

use framestage::{StageError, StagingDir, parse_frame_index, sort_by_frame_index};

// ── Index parsing ───────────────────────────────────────────────

#[test]
fn parse_zero_padded_index() {
    assert_eq!(parse_frame_index(Path::new("frame_000042.jpg")).unwrap(), 42);
    assert_eq!(parse_frame_index(Path::new("frame_000000.jpg")).unwrap(), 0);
}

#[test]
fn parse_bare_numeric_stem() {
    assert_eq!(parse_frame_index(Path::new("/tmp/stage/17.png")).unwrap(), 17);
}

#[test]
fn parse_ignores_extension_digits() {
    // The digit run comes from the stem only; `.mp4`-style extensions with
    // digits must not leak into the index.
    assert_eq!(parse_frame_index(Path::new("frame_3.mp4")).unwrap(), 3);
}

#[test]
fn parse_without_digits_is_path_format_error() {
    let result = parse_frame_index(Path::new("no_index_here.jpg"));
    assert!(matches!(result, Err(StageError::PathFormat { .. })));

    let message = result.unwrap_err().to_string();
    assert!(
        message.contains("numeric frame index"),
        "Error should mention the missing index: {message}",
    );
}

// ── Ordering round-trip ─────────────────────────────────────────

#[test]
fn sort_recovers_decode_order() {
    // Listing order is scrambled relative to decode order; sorting by the
    // parsed numeric key must reconstruct 0..k exactly.
    let scrambled: Vec<PathBuf> = [7u64, 0, 3, 10, 1, 2, 9, 8, 4, 6, 5]
        .iter()
        .map(|index| PathBuf::from(format!("frame_{index:06}.jpg")))
        .collect();

    let records = sort_by_frame_index(scrambled).expect("Failed to sort");

    let indices: Vec<u64> = records.iter().map(|record| record.index).collect();
    assert_eq!(indices, (0..=10).collect::<Vec<u64>>());
}

#[test]
fn sort_handles_mixed_padding_widths() {
    // Lexicographic order would put "frame_10" before "frame_2"; the numeric
    // key must not.
    let paths = vec![
        PathBuf::from("frame_10.jpg"),
        PathBuf::from("frame_2.jpg"),
        PathBuf::from("frame_1.jpg"),
    ];

    let records = sort_by_frame_index(paths).expect("Failed to sort");
    let indices: Vec<u64> = records.iter().map(|record| record.index).collect();
    assert_eq!(indices, vec![1, 2, 10]);
}

#[test]
fn sort_fails_fast_on_unparseable_path() {
    let paths = vec![
        PathBuf::from("frame_1.jpg"),
        PathBuf::from("broken.jpg"),
        PathBuf::from("frame_2.jpg"),
    ];

    let result = sort_by_frame_index(paths);
    assert!(matches!(result, Err(StageError::PathFormat { .. })));
}

// ── Directory lifecycle ─────────────────────────────────────────

#[test]
fn staging_dir_is_deleted_on_drop() {
    let staging = StagingDir::create().expect("Failed to create staging dir");
    let path = staging.path().to_path_buf();
    std::fs::write(staging.path().join("frame_000000.jpg"), b"stub")
        .expect("Failed to write frame");
    assert!(path.exists());

    drop(staging);
    assert!(!path.exists(), "Staging dir should be removed on drop");
}

#[test]
fn retained_staging_dir_survives() {
    let staging = StagingDir::create().expect("Failed to create staging dir");
    std::fs::write(staging.path().join("frame_000000.jpg"), b"stub")
        .expect("Failed to write frame");

    let path = staging.retain();
    assert!(path.exists(), "Retained dir should stay on disk");
    assert!(path.join("frame_000000.jpg").exists());

    std::fs::remove_dir_all(&path).expect("Failed to clean up retained dir");
}

#[test]
fn frame_path_embeds_padded_index() {
    let staging = StagingDir::create().expect("Failed to create staging dir");
    let path = staging.frame_path(7, "jpg");

    assert_eq!(path.file_name().unwrap(), "frame_000007.jpg");
    assert_eq!(parse_frame_index(&path).unwrap(), 7);
    assert!(path.starts_with(staging.path()));
}
