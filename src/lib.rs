//! Crop selection geometry: drawing, eight-handle resizing, moving and
//! keyboard nudging of a rectangular crop over a media surface.
//!
//! Pure geometry plus a small per-gesture state machine. The crate never
//! owns the crop: every entry point takes the current value from the caller
//! and proposes a replacement through a [`CropHandler`].
//!
//! # Modules
//!
//! - [`crop`]: Crop rectangles, pixel/percent conversion, aspect and center helpers
//! - [`ordinate`]: The eight resize handles and the quadrant a gesture points into
//! - [`contain`]: Forcing a crop into the container under aspect and min/max limits
//! - [`gesture`]: Resize and move algorithms for pointer gestures
//! - [`nudge`]: Arrow-key steps for the crop body and individual handles
//! - [`session`]: The gesture state machine and host traits
//! - [`options`]: Constraints and interaction flags supplied by the owner
//! - [`error`]: Errors from parsing handle names and validating options
//! - `query`: `aspect=16:9&minw=50` option strings (feature `query`)
//!
//! # Features
//!
//! - `std` (default): use std float math; without it, `libm` via `num-traits`
//! - `alloc`: implied by `std` and `query`
//! - `query`: option string parsing
//! - `serde`: `Serialize`/`Deserialize` for crops, ordinates and options
//! - `tracing`: debug/trace events for gestures, tagged with the instance id
//!
//! # Example
//!
//! ```
//! use cropkit::{Crop, Limits, Ordinate, contain};
//!
//! // A 16:9 crop dragged past the right edge of an 800×600 container.
//! let limits = Limits::new().aspect(16.0 / 9.0);
//! let crop = contain(Crop::px(600.0, 100.0, 320.0, 180.0), &limits, Some(Ordinate::Se), 800.0, 600.0);
//!
//! assert_eq!(crop.x + crop.width, 800.0);
//! assert!((crop.width / crop.height - 16.0 / 9.0).abs() < 1e-9);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub(crate) mod log;

pub mod contain;
pub mod crop;
pub mod error;
pub mod gesture;
pub mod nudge;
pub mod options;
pub mod ordinate;
#[cfg(feature = "query")]
pub mod query;
pub mod session;

pub use contain::{Containment, Limits, contain};
pub use crop::{BoundingBox, Crop, PartialCrop, Rect, Unit, center_crop, make_aspect_crop};
pub use error::CropError;
pub use gesture::{GestureOrigin, drag_crop, resize_crop};
pub use nudge::{Key, KeyEvent, Modifiers, Platform, nudge};
pub use options::CropOptions;
pub use ordinate::Ordinate;
pub use session::{
    CropHandler, Cropper, InstanceId, Phase, PointerEvent, PointerTarget, Session, Surface,
    hit_test,
};
