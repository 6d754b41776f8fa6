//! Crop rectangles and conversion between pixel and percent space.
//!
//! A [`Crop`] is either absolute pixels or percentages (`0.0..=100.0`) of
//! the container. The owner of the crop may hold either; every algorithm in
//! this crate converts to pixels first and reports both representations.
//!
//! # Example
//!
//! ```
//! use cropkit::Crop;
//!
//! let percent = Crop::percent(10.0, 10.0, 20.0, 20.0);
//! let pixel = percent.to_pixel(800.0, 400.0);
//!
//! assert_eq!(pixel, Crop::px(80.0, 40.0, 160.0, 80.0));
//! assert_eq!(pixel.to_percent(800.0, 400.0), percent);
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float as _;

/// Unit a [`Crop`] is expressed in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// Absolute pixels in container space.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "px"))]
    Px,
    /// Percent of the container's width (x, width) or height (y, height).
    #[cfg_attr(feature = "serde", serde(rename = "%"))]
    Percent,
}

/// A crop rectangle relative to the container's top-left corner.
///
/// Equality is component-wise, unit included.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crop {
    pub unit: Unit,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Crop {
    /// Zero-size pixel crop at the origin.
    pub const EMPTY: Self = Self::px(0.0, 0.0, 0.0, 0.0);

    /// Create a pixel crop.
    pub const fn px(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: Unit::Px,
            x,
            y,
            width,
            height,
        }
    }

    /// Create a percent crop. Values are percentages, not fractions.
    pub const fn percent(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: Unit::Percent,
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Convert to pixels for a container of the given size.
    ///
    /// Pixel crops are returned unchanged.
    pub fn to_pixel(self, box_w: f64, box_h: f64) -> Self {
        match self.unit {
            Unit::Px => self,
            Unit::Percent => Self::px(
                self.x * box_w / 100.0,
                self.y * box_h / 100.0,
                self.width * box_w / 100.0,
                self.height * box_h / 100.0,
            ),
        }
    }

    /// Convert to percent of a container of the given size.
    ///
    /// A zero-size container axis yields `0.0` on that axis.
    pub fn to_percent(self, box_w: f64, box_h: f64) -> Self {
        match self.unit {
            Unit::Percent => self,
            Unit::Px => Self::percent(
                percent_of(self.x, box_w),
                percent_of(self.y, box_h),
                percent_of(self.width, box_w),
                percent_of(self.height, box_h),
            ),
        }
    }

    /// Replace non-finite numbers with zero and negative sizes with zero.
    pub fn sanitized(self) -> Self {
        Self {
            unit: self.unit,
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
            width: finite_or_zero(self.width).max(0.0),
            height: finite_or_zero(self.height).max(0.0),
        }
    }

    /// Component-wise comparison within `epsilon`. Units must match.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.unit == other.unit
            && (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }

    /// Resolve to whole source pixels, e.g. for cutting the crop out of an
    /// image whose natural size is `source_w`×`source_h`.
    ///
    /// `box_w`/`box_h` is the size of the container the crop was made in;
    /// pixel crops are scaled from it to the source. Rounds to the nearest
    /// pixel and clamps to the source.
    pub fn resolve(&self, box_w: f64, box_h: f64, source_w: u32, source_h: u32) -> Rect {
        let percent = self.to_percent(box_w, box_h).sanitized();
        let scale = |v: f64, dim: u32| (dim as f64 * v.clamp(0.0, 100.0) / 100.0).round() as u32;
        let x = scale(percent.x, source_w).min(source_w);
        let y = scale(percent.y, source_h).min(source_h);
        Rect {
            x,
            y,
            width: scale(percent.width, source_w).min(source_w - x),
            height: scale(percent.height, source_h).min(source_h - y),
        }
    }
}

/// Axis-aligned rectangle in whole source pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A crop with any subset of fields set, as received from an owner that
/// only specifies some of them.
///
/// Missing fields fall back to the empty pixel crop.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PartialCrop {
    pub unit: Option<Unit>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl PartialCrop {
    /// Set only the width, in the given unit.
    pub fn width(unit: Unit, width: f64) -> Self {
        Self {
            unit: Some(unit),
            width: Some(width),
            ..Self::default()
        }
    }

    /// Set only the height, in the given unit.
    pub fn height(unit: Unit, height: f64) -> Self {
        Self {
            unit: Some(unit),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Merge with the empty crop. Non-finite values count as missing.
    pub fn resolve(&self) -> Crop {
        Crop {
            unit: self.unit.unwrap_or_default(),
            x: self.x.unwrap_or(0.0),
            y: self.y.unwrap_or(0.0),
            width: self.width.unwrap_or(0.0),
            height: self.height.unwrap_or(0.0),
        }
        .sanitized()
    }

    fn has_width(&self) -> bool {
        self.width.is_some_and(|w| w.is_finite() && w > 0.0)
    }

    fn has_height(&self) -> bool {
        self.height.is_some_and(|h| h.is_finite() && h > 0.0)
    }
}

impl From<Crop> for PartialCrop {
    fn from(crop: Crop) -> Self {
        Self {
            unit: Some(crop.unit),
            x: Some(crop.x),
            y: Some(crop.y),
            width: Some(crop.width),
            height: Some(crop.height),
        }
    }
}

impl From<PartialCrop> for Crop {
    fn from(partial: PartialCrop) -> Self {
        partial.resolve()
    }
}

/// The container's rectangle in viewport (client) coordinates.
///
/// Hosts report this fresh for every event, since scrolling or layout can
/// move the container in the middle of a gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// All-zero box, used when the host cannot measure the container.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new bounding box.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether both dimensions are positive.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Build a crop with the given aspect ratio from a width or a height.
///
/// Whichever of `width`/`height` is set (and positive) determines the other.
/// The result is shrunk, keeping the ratio, until it fits right of and
/// below its origin. The result has the same unit as the input.
///
/// ```
/// use cropkit::{PartialCrop, Unit, make_aspect_crop};
///
/// let crop = make_aspect_crop(PartialCrop::width(Unit::Percent, 50.0), 16.0 / 9.0, 1280.0, 720.0);
/// assert_eq!(crop.width, 50.0);
/// assert!((crop.height - 50.0).abs() < 1e-9);
/// ```
pub fn make_aspect_crop(
    crop: impl Into<PartialCrop>,
    aspect: f64,
    box_w: f64,
    box_h: f64,
) -> Crop {
    let partial = crop.into();
    let unit = partial.unit.unwrap_or_default();
    let mut pixel = partial.resolve().to_pixel(box_w, box_h);

    if aspect.is_finite() && aspect > 0.0 {
        if partial.has_width() {
            pixel.height = pixel.width / aspect;
        }
        if partial.has_height() {
            pixel.width = pixel.height * aspect;
        }
        if pixel.bottom() > box_h {
            pixel.height = (box_h - pixel.y).max(0.0);
            pixel.width = pixel.height * aspect;
        }
        if pixel.right() > box_w {
            pixel.width = (box_w - pixel.x).max(0.0);
            pixel.height = pixel.width / aspect;
        }
    }

    with_unit(pixel, unit, box_w, box_h)
}

/// Center a crop in the container, keeping its size and unit.
pub fn center_crop(crop: impl Into<PartialCrop>, box_w: f64, box_h: f64) -> Crop {
    let partial = crop.into();
    let unit = partial.unit.unwrap_or_default();
    let mut pixel = partial.resolve().to_pixel(box_w, box_h);
    pixel.x = (box_w - pixel.width) / 2.0;
    pixel.y = (box_h - pixel.height) / 2.0;
    with_unit(pixel, unit, box_w, box_h)
}

fn with_unit(pixel: Crop, unit: Unit, box_w: f64, box_h: f64) -> Crop {
    match unit {
        Unit::Px => pixel,
        Unit::Percent => pixel.to_percent(box_w, box_h),
    }
}

fn percent_of(value: f64, dim: f64) -> f64 {
    if dim > 0.0 { value / dim * 100.0 } else { 0.0 }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// `v` limited to `[lo, hi]`. Never panics; `hi` wins when `lo > hi`.
pub(crate) fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}
