//! Constraints and interaction flags supplied by the crop's owner.

use crate::contain::Limits;
use crate::error::CropError;

/// Everything the owner configures about a crop besides the crop itself.
///
/// Sizes are pixels in container space. Zero minimums and absent maximums
/// are unconstrained.
///
/// ```
/// use cropkit::CropOptions;
///
/// let options = CropOptions::new().aspect(16.0 / 9.0).min_size(64.0, 0.0).keep_selection(true);
/// assert!(!options.can_draw(true));
/// assert!(options.can_draw(false));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CropOptions {
    /// Locked width / height ratio.
    pub aspect: Option<f64>,
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
    /// Ignore all input.
    pub disabled: bool,
    /// Allow moving but not drawing or resizing.
    pub locked: bool,
    /// Don't let a press on the container replace an existing crop.
    pub keep_selection: bool,
}

impl CropOptions {
    pub const fn new() -> Self {
        Self {
            aspect: None,
            min_width: 0.0,
            min_height: 0.0,
            max_width: None,
            max_height: None,
            disabled: false,
            locked: false,
            keep_selection: false,
        }
    }

    /// Lock the width / height ratio. Invalid ratios are ignored by the
    /// engine; use [`try_aspect`](Self::try_aspect) to reject them.
    pub fn aspect(mut self, aspect: f64) -> Self {
        self.aspect = Some(aspect);
        self
    }

    /// Lock the width / height ratio, rejecting non-finite or non-positive
    /// values.
    pub fn try_aspect(self, aspect: f64) -> Result<Self, CropError> {
        if aspect.is_finite() && aspect > 0.0 {
            Ok(self.aspect(aspect))
        } else {
            Err(CropError::InvalidAspect(aspect))
        }
    }

    /// Remove the aspect lock.
    pub fn free_aspect(mut self) -> Self {
        self.aspect = None;
        self
    }

    pub fn min_size(mut self, width: f64, height: f64) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    pub fn max_size(mut self, width: f64, height: f64) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn keep_selection(mut self, keep_selection: bool) -> Self {
        self.keep_selection = keep_selection;
        self
    }

    /// The geometric part of the options.
    pub fn limits(&self) -> Limits {
        Limits {
            aspect: self.aspect,
            min_width: self.min_width,
            min_height: self.min_height,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }

    /// Whether a press on the container may start drawing a new crop.
    /// `has_crop` means any crop is present, including a zero-size one.
    pub fn can_draw(&self, has_crop: bool) -> bool {
        !self.disabled && !self.locked && !(self.keep_selection && has_crop)
    }
}

impl From<CropOptions> for Limits {
    fn from(options: CropOptions) -> Self {
        options.limits()
    }
}
