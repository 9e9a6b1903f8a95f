//! Source enumeration.
//!
//! Resolves a root location into the ordered list of video units the
//! pipeline will process. Pure path resolution — nothing is opened or
//! decoded here.

use std::path::{Path, PathBuf};

use crate::error::StageError;

/// Resolve a root path into an ordered list of video-unit paths.
///
/// - A file whose extension matches the allow-list yields a single-element
///   list containing that file.
/// - A directory yields every contained file matching the allow-list,
///   sorted lexicographically by path. Subdirectories are not descended
///   into.
///
/// Extension matching is case-insensitive; entries in `extensions` are given
/// without a leading dot (`"mp4"`, not `".mp4"`).
///
/// # Errors
///
/// Returns [`StageError::InvalidInput`] if the root is neither a recognized
/// video file nor a directory.
///
/// # Example
///
/// ```no_run
/// use framestage::enumerate_units;
///
/// let units = enumerate_units("footage/", &["mp4".into(), "avi".into()])?;
/// for unit in &units {
///     println!("{}", unit.display());
/// }
/// # Ok::<(), framestage::StageError>(())
/// ```
pub fn enumerate_units<P: AsRef<Path>>(
    root: P,
    extensions: &[String],
) -> Result<Vec<PathBuf>, StageError> {
    let root = root.as_ref();

    if root.is_file() && has_recognized_extension(root, extensions) {
        return Ok(vec![root.to_path_buf()]);
    }

    if root.is_dir() {
        let mut units: Vec<PathBuf> = std::fs::read_dir(root)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_recognized_extension(path, extensions))
            .collect();
        units.sort();
        return Ok(units);
    }

    Err(StageError::InvalidInput {
        path: root.to_path_buf(),
    })
}

/// Whether the path carries one of the allowed video extensions.
fn has_recognized_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(extension))
        })
}
