//! Working-resolution selection.
//!
//! The pipeline computes one [`Resolution`] per video from the first staged
//! frame and reuses it for every subsequent frame of that video. Oversized
//! inputs are scaled down so their longer side matches a configured limit,
//! preserving aspect ratio.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StageError;

/// A frame resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a resolution from explicit dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Read the native resolution of an image file.
    ///
    /// Only the image header is decoded, so this is cheap even for large
    /// frames.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::Image`] if the file cannot be recognized as an
    /// image.
    pub fn of_image<P: AsRef<Path>>(path: P) -> Result<Self, StageError> {
        let (width, height) = image::image_dimensions(path)?;
        Ok(Self { width, height })
    }

    /// The longer of the two dimensions.
    #[must_use]
    pub fn long_side(self) -> u32 {
        self.width.max(self.height)
    }

    /// Scale down so the longer side equals `limit`, preserving aspect ratio.
    ///
    /// Resolutions whose longer side is already within `limit` are returned
    /// unchanged. Otherwise the longer side becomes exactly `limit` and the
    /// shorter side is scaled by the same factor using integer arithmetic,
    /// truncating toward zero.
    ///
    /// # Example
    ///
    /// ```
    /// use framestage::Resolution;
    ///
    /// let res = Resolution::new(3000, 1500).fit_long_side(2044);
    /// assert_eq!(res, Resolution::new(2044, 1022));
    ///
    /// let small = Resolution::new(640, 480).fit_long_side(2044);
    /// assert_eq!(small, Resolution::new(640, 480));
    /// ```
    pub fn fit_long_side(self, limit: u32) -> Self {
        let long = self.long_side();
        if long <= limit || long == 0 {
            return self;
        }
        let scale = |side: u32| (u64::from(side) * u64::from(limit) / u64::from(long)) as u32;
        Self {
            width: scale(self.width),
            height: scale(self.height),
        }
    }
}

impl From<(u32, u32)> for Resolution {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}
