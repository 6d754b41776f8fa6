//! Resize and move algorithms for pointer gestures.
//!
//! A gesture is described by its [`GestureOrigin`]: where the pointer went
//! down, and which crop coordinates that press corresponds to. For a resize
//! the origin is re-based onto the corner opposite the grabbed handle, so
//! the pointer delta from the origin is directly the (signed) new size.
//!
//! Both algorithms take the *current* crop from the caller on every call
//! and return a fresh pixel crop; nothing here holds state.

#[cfg(not(feature = "std"))]
use num_traits::Float as _;

use crate::contain::{Containment, Limits};
use crate::crop::{BoundingBox, Crop, clamp};
use crate::ordinate::Ordinate;

/// Where a pointer gesture started.
///
/// Client coordinates are viewport coordinates as reported by the host;
/// crop coordinates are relative to the container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureOrigin {
    pub start_client_x: f64,
    pub start_client_y: f64,
    pub start_crop_x: f64,
    pub start_crop_y: f64,
    /// Handle the gesture started on. `None` when drawing a new crop or
    /// moving the whole crop.
    pub ordinate: Option<Ordinate>,
}

impl GestureOrigin {
    /// Origin for drawing a new crop from the press point.
    pub fn new_crop(client_x: f64, client_y: f64, bbox: &BoundingBox) -> Self {
        Self {
            start_client_x: client_x,
            start_client_y: client_y,
            start_crop_x: client_x - bbox.x,
            start_crop_y: client_y - bbox.y,
            ordinate: None,
        }
    }

    /// Origin for moving `crop` (pixels) as a whole.
    pub fn move_crop(client_x: f64, client_y: f64, crop: &Crop) -> Self {
        Self {
            start_client_x: client_x,
            start_client_y: client_y,
            start_crop_x: crop.x,
            start_crop_y: crop.y,
            ordinate: None,
        }
    }

    /// Origin for resizing `crop` (pixels) from `ordinate`.
    ///
    /// The crop start is the corner that stays fixed; the client start is
    /// shifted by how far the press landed from the grabbed corner, so a
    /// press slightly off the handle doesn't make the crop jump.
    pub fn resize(
        ordinate: Ordinate,
        client_x: f64,
        client_y: f64,
        crop: &Crop,
        bbox: &BoundingBox,
    ) -> Self {
        let rel_x = client_x - bbox.x;
        let rel_y = client_y - bbox.y;

        let corner = ordinate.anchor_corner();
        // Grabbed corner on each axis; the fixed one is the other side.
        let (grab_x, fixed_x) = if corner.is_west() {
            (crop.x, crop.right())
        } else {
            (crop.right(), crop.x)
        };
        let (grab_y, fixed_y) = if corner.is_north() {
            (crop.y, crop.bottom())
        } else {
            (crop.bottom(), crop.y)
        };

        Self {
            start_client_x: fixed_x + bbox.x + (rel_x - grab_x),
            start_client_y: fixed_y + bbox.y + (rel_y - grab_y),
            start_crop_x: fixed_x,
            start_crop_y: fixed_y,
            ordinate: Some(ordinate),
        }
    }

    /// Quadrant around the start point that the pointer is in.
    ///
    /// With `freeze_x` (`freeze_y`) set and a handle grabbed, that axis
    /// keeps the handle's side no matter where the pointer goes, so a crop
    /// pinned at its minimum size can't flip over.
    pub fn region(
        &self,
        client_x: f64,
        client_y: f64,
        bbox: &BoundingBox,
        freeze_x: bool,
        freeze_y: bool,
    ) -> Ordinate {
        let corner = self.ordinate.map(Ordinate::anchor_corner);
        let left = match corner {
            Some(c) if freeze_x => c.is_west(),
            _ => client_x - bbox.x < self.start_crop_x,
        };
        let top = match corner {
            Some(c) if freeze_y => c.is_north(),
            _ => client_y - bbox.y < self.start_crop_y,
        };
        Ordinate::from_halves(left, top)
    }
}

/// Resize `crop` for a pointer now at (`client_x`, `client_y`).
///
/// The new rectangle grows from the gesture's fixed corner toward the
/// pointer, limited by `limits` and the container. An edge handle without
/// an aspect ratio only changes its own axis.
pub fn resize_crop(
    crop: &Crop,
    origin: &GestureOrigin,
    client_x: f64,
    client_y: f64,
    limits: &Limits,
    bbox: &BoundingBox,
) -> Crop {
    if !bbox.has_area() {
        return Crop::EMPTY;
    }

    let containment = Containment::new(limits, bbox.width, bbox.height);
    let current = crop.to_pixel(bbox.width, bbox.height).sanitized();
    let min_w = containment.min_width;
    let min_h = containment.min_height;

    let region = origin.region(client_x, client_y, bbox, min_w > 0.0, min_h > 0.0);
    let ord = origin.ordinate.unwrap_or(region);

    let mut dx = client_x - origin.start_client_x;
    let mut dy = client_y - origin.start_client_y;

    // Dragging a west/north side past the fixed side would turn the crop
    // inside out; pin it at the minimum instead.
    if min_w > 0.0 && ord.is_west() {
        dx = dx.min(-min_w);
    }
    if min_h > 0.0 && ord.is_north() {
        dy = dy.min(-min_h);
    }

    let (x, width) = if region.is_west() {
        (origin.start_crop_x + dx, dx.abs())
    } else {
        (origin.start_crop_x, dx)
    };
    let height = match containment.aspect {
        Some(aspect) => width / aspect,
        None if region.is_north() => dy.abs(),
        None => dy,
    };
    let y = if region.is_north() {
        origin.start_crop_y - height
    } else {
        origin.start_crop_y
    };

    let contained = containment.apply(Crop::px(x, y, width, height), Some(region));

    let mut next = current;
    if containment.aspect.is_some() || ord.is_corner() {
        next = contained;
    } else if ord.affects_x() {
        next.x = contained.x;
        next.width = contained.width;
    } else {
        next.y = contained.y;
        next.height = contained.height;
    }

    crate::log::trace!(region = %region, ord = %ord, ?next, "resize");

    clamp_position(next, bbox)
}

/// Move `crop` by the pointer's travel since the gesture started, without
/// leaving the container. The size is unchanged.
pub fn drag_crop(
    crop: &Crop,
    origin: &GestureOrigin,
    client_x: f64,
    client_y: f64,
    bbox: &BoundingBox,
) -> Crop {
    if !bbox.has_area() {
        return Crop::EMPTY;
    }

    let mut next = crop.to_pixel(bbox.width, bbox.height).sanitized();
    next.x = origin.start_crop_x + (client_x - origin.start_client_x);
    next.y = origin.start_crop_y + (client_y - origin.start_client_y);
    clamp_position(next, bbox)
}

/// Clamp the position so the crop's far edges stay inside `bbox`.
pub(crate) fn clamp_position(mut crop: Crop, bbox: &BoundingBox) -> Crop {
    crop.x = clamp(crop.x, 0.0, (bbox.width - crop.width).max(0.0));
    crop.y = clamp(crop.y, 0.0, (bbox.height - crop.height).max(0.0));
    crop
}
