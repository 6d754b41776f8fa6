//! Forcing a candidate crop into its container.
//!
//! Every crop the engine proposes passes through [`Containment::apply`]:
//! sizes are clamped to the (aspect-reconciled) min/max limits, the edges
//! opposite the active handle stay put, and the result is shrunk and
//! shifted until it lies inside the container.
//!
//! # Example
//!
//! ```
//! use cropkit::{Containment, Crop, Limits, Ordinate};
//!
//! let containment = Containment::new(&Limits::new().min_size(50.0, 50.0), 800.0, 600.0);
//!
//! // Shrinking from the north-west handle below the minimum keeps the
//! // bottom-right corner where it was.
//! let crop = containment.apply(Crop::px(290.0, 290.0, 10.0, 10.0), Some(Ordinate::Nw));
//! assert_eq!(crop, Crop::px(250.0, 250.0, 50.0, 50.0));
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float as _;

use crate::crop::{Crop, clamp};
use crate::ordinate::Ordinate;

/// Relative tolerance under which a width/height pair already counts as
/// matching the aspect ratio.
const ASPECT_EPSILON: f64 = 1e-9;

/// Size limits for a crop, in pixels.
///
/// Zero minimums and absent maximums mean "unconstrained". Limits larger
/// than the container are clamped to it when resolved.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Limits {
    /// Locked width / height ratio.
    pub aspect: Option<f64>,
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

impl Limits {
    /// No constraints.
    pub const fn new() -> Self {
        Self {
            aspect: None,
            min_width: 0.0,
            min_height: 0.0,
            max_width: None,
            max_height: None,
        }
    }

    /// Lock the width / height ratio.
    pub fn aspect(mut self, aspect: f64) -> Self {
        self.aspect = Some(aspect);
        self
    }

    /// Set minimum width and height (0 = none).
    pub fn min_size(mut self, width: f64, height: f64) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    /// Set maximum width and height.
    pub fn max_size(mut self, width: f64, height: f64) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }
}

/// [`Limits`] resolved against a container of known size.
///
/// All fields are in pixels and mutually consistent: `min ≤ max ≤ box` on
/// each axis, and with an aspect ratio `min_width == min_height * aspect`
/// (likewise for the maximums) unless the container is too small to allow
/// it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Containment {
    pub box_width: f64,
    pub box_height: f64,
    pub aspect: Option<f64>,
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: f64,
    pub max_height: f64,
}

impl Containment {
    /// Resolve `limits` for a `box_w`×`box_h` container.
    pub fn new(limits: &Limits, box_w: f64, box_h: f64) -> Self {
        let box_w = non_negative(box_w);
        let box_h = non_negative(box_h);
        let aspect = limits.aspect.filter(|a| a.is_finite() && *a > 0.0);

        let mut min_w = non_negative(limits.min_width).min(box_w);
        let mut min_h = non_negative(limits.min_height).min(box_h);
        let mut max_w = limits.max_width.map_or(box_w, |m| non_negative(m).min(box_w));
        let mut max_h = limits.max_height.map_or(box_h, |m| non_negative(m).min(box_h));

        if let Some(aspect) = aspect {
            (min_w, min_h) = aspect_minimums(aspect, min_w, min_h);
            max_w = max_w.min(max_h * aspect);
            max_h = max_w / aspect;
        }

        // A minimum the container (or the maximum) can't hold is given up.
        min_w = min_w.min(max_w);
        min_h = min_h.min(max_h);

        Self {
            box_width: box_w,
            box_height: box_h,
            aspect,
            min_width: min_w,
            min_height: min_h,
            max_width: max_w,
            max_height: max_h,
        }
    }

    /// Whether the container has no area; everything contains to zero.
    pub fn is_degenerate(&self) -> bool {
        self.box_width <= 0.0 || self.box_height <= 0.0
    }

    /// Force `crop` inside the container and limits.
    ///
    /// The edges opposite `ordinate` stay fixed (with no ordinate, the
    /// top-left corner does); the other edges move to satisfy the limits.
    /// Percent crops are converted first. Always returns a pixel crop.
    pub fn apply(&self, crop: Crop, ordinate: Option<Ordinate>) -> Crop {
        if self.is_degenerate() {
            return Crop::EMPTY;
        }

        let crop = crop.to_pixel(self.box_width, self.box_height).sanitized();
        let west = ordinate.is_some_and(Ordinate::is_west);
        let north = ordinate.is_some_and(Ordinate::is_north);

        let anchor_x = clamp(if west { crop.right() } else { crop.x }, 0.0, self.box_width);
        let anchor_y = clamp(if north { crop.bottom() } else { crop.y }, 0.0, self.box_height);

        let mut width = clamp(crop.width, self.min_width, self.max_width);
        let mut height = clamp(crop.height, self.min_height, self.max_height);
        if let Some(aspect) = self.aspect {
            (width, height) = couple(width, height, aspect);
        }

        let avail_w = if west { anchor_x } else { self.box_width - anchor_x };
        let avail_h = if north { anchor_y } else { self.box_height - anchor_y };
        if width > avail_w {
            width = avail_w.max(self.min_width);
            if let Some(aspect) = self.aspect {
                height = width / aspect;
            }
        }
        if height > avail_h {
            height = avail_h.max(self.min_height);
            if let Some(aspect) = self.aspect {
                width = height * aspect;
            }
        }

        let x = if west { anchor_x - width } else { anchor_x };
        let y = if north { anchor_y - height } else { anchor_y };
        Crop::px(
            clamp(x, 0.0, self.box_width - width),
            clamp(y, 0.0, self.box_height - height),
            width,
            height,
        )
    }
}

/// Contain `crop` in a `box_w`×`box_h` container. See [`Containment::apply`].
pub fn contain(
    crop: Crop,
    limits: &Limits,
    ordinate: Option<Ordinate>,
    box_w: f64,
    box_h: f64,
) -> Crop {
    Containment::new(limits, box_w, box_h).apply(crop, ordinate)
}

/// Derive the missing minimum from the aspect ratio.
///
/// Landscape ratios prefer a given minimum width, portrait ratios a given
/// minimum height.
fn aspect_minimums(aspect: f64, min_w: f64, min_h: f64) -> (f64, f64) {
    if min_w <= 0.0 && min_h <= 0.0 {
        return (0.0, 0.0);
    }
    let from_width = (min_w, min_w / aspect);
    let from_height = (min_h * aspect, min_h);
    let prefer_width = if aspect > 1.0 { min_w > 0.0 } else { min_h <= 0.0 };
    if prefer_width { from_width } else { from_height }
}

/// Shrink whichever side is too long for `aspect`.
fn couple(width: f64, height: f64, aspect: f64) -> (f64, f64) {
    let target = height * aspect;
    if (width - target).abs() <= ASPECT_EPSILON * width.max(1.0) {
        (width, height)
    } else if width < target {
        (width, width / aspect)
    } else {
        (target, height)
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
