//! Pointer and keyboard interaction: the per-gesture state machine.
//!
//! A [`Cropper`] turns host input events into proposed crops. It never
//! stores the crop; the owner passes the current value into every call and
//! receives replacements through a [`CropHandler`]. The only state kept
//! between events is the active gesture ([`Session`]), which also holds the
//! host's global pointer subscription so that dropping the session (on
//! release, cancel, teardown, or when the cropper is dropped) always
//! unsubscribes.
//!
//! ```text
//!            pointer_down(Container)        pointer_up / pointer_cancel
//!   Idle ──────────────────────────▶ Drawing ───────────────────────▶ Idle
//!     │  pointer_down(Handle)                                          ▲
//!     ├────────────────────────────▶ Resizing ─────────────────────────┤
//!     │  pointer_down(Crop)                                            │
//!     └────────────────────────────▶ Dragging ─────────────────────────┘
//! ```

use core::fmt;

#[cfg(not(feature = "std"))]
use num_traits::Float as _;

use crate::crop::{BoundingBox, Crop};
use crate::gesture::{GestureOrigin, clamp_position, drag_crop, resize_crop};
use crate::log::{debug, trace, warn};
use crate::nudge::{KeyEvent, Platform, nudge};
use crate::options::CropOptions;
use crate::ordinate::Ordinate;

/// Pointer position in viewport (client) coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// What a pointer press landed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// The container outside the crop; starts drawing a new crop.
    Container,
    /// The crop body; starts a move.
    Crop,
    /// A resize handle.
    Handle(Ordinate),
}

/// Current gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Idle,
    /// Drawing a new crop from the press point.
    Drawing,
    /// Resizing from a handle.
    Resizing,
    /// Moving the whole crop.
    Dragging,
}

/// Host-side container: measurement and global pointer tracking.
pub trait Surface {
    /// Guard for the global pointer-move/up/cancel subscription. Dropping
    /// it must unsubscribe.
    type Subscription;

    /// The container's rectangle in viewport coordinates, measured now.
    /// `None` when it can't be measured; the engine then works with a
    /// zero-size box and produces zero-size crops.
    fn bounding_box(&self) -> Option<BoundingBox>;

    /// Start delivering pointer events from anywhere in the viewport, so a
    /// gesture keeps tracking after the pointer leaves the container.
    fn subscribe_pointer(&mut self) -> Self::Subscription;
}

/// Receives proposed crops and gesture notifications.
///
/// Every crop is reported twice: in pixels and in percent of the container.
/// All methods except [`on_change`](Self::on_change) default to no-ops.
pub trait CropHandler {
    /// The crop should become `pixel` (or, equivalently, `percent`).
    fn on_change(&mut self, pixel: Crop, percent: Crop);

    /// A gesture or nudge finished with this crop.
    fn on_complete(&mut self, pixel: Crop, percent: Crop) {
        let _ = (pixel, percent);
    }

    /// First pointer movement of a gesture.
    fn on_drag_start(&mut self, event: &PointerEvent) {
        let _ = event;
    }

    /// Pointer released or cancelled.
    fn on_drag_end(&mut self, event: &PointerEvent) {
        let _ = event;
    }
}

/// Identifies one cropper in logs and in host-generated element ids.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "crop-{}", self.0)
    }
}

impl From<u64> for InstanceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// An active gesture, from press to release.
#[derive(Debug)]
pub struct Session<G> {
    origin: GestureOrigin,
    phase: Phase,
    client_x: f64,
    client_y: f64,
    drag_started: bool,
    _subscription: G,
}

impl<G> Session<G> {
    /// Where the gesture started.
    pub fn origin(&self) -> &GestureOrigin {
        &self.origin
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last pointer position seen, in client coordinates.
    pub fn pointer(&self) -> (f64, f64) {
        (self.client_x, self.client_y)
    }

    /// Whether the pointer has moved since the press.
    pub fn drag_started(&self) -> bool {
        self.drag_started
    }
}

/// Crop interaction engine for one container.
pub struct Cropper<S: Surface> {
    id: InstanceId,
    surface: S,
    session: Option<Session<S::Subscription>>,
    saw_crop: bool,
    platform: Platform,
}

impl<S: Surface> fmt::Debug for Cropper<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cropper")
            .field("id", &self.id)
            .field("phase", &self.phase())
            .field("saw_crop", &self.saw_crop)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> Cropper<S> {
    pub fn new(id: impl Into<InstanceId>, surface: S) -> Self {
        Self {
            id: id.into(),
            surface,
            session: None,
            saw_crop: false,
            platform: Platform::current(),
        }
    }

    /// Override the platform used to pick the primary nudge modifier.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The active gesture, if any.
    pub fn session(&self) -> Option<&Session<S::Subscription>> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Idle, |s| s.phase)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Note the owner's current crop.
    ///
    /// When a non-empty crop appears after the cropper last saw none (and
    /// the container has a size), completion fires once so the owner can
    /// act on an initial or programmatically set crop. A zero-size crop
    /// neither fires nor counts as seen. Every other entry point
    /// calls this first; call it directly when the crop changes outside a
    /// gesture.
    pub fn observe(&mut self, crop: Option<&Crop>, handler: &mut impl CropHandler) {
        match crop {
            Some(crop) if !self.saw_crop && !crop.is_empty() => {
                self.saw_crop = true;
                let bbox = self.bounding_box();
                if bbox.has_area() {
                    let pixel = crop.to_pixel(bbox.width, bbox.height);
                    debug!(id = %self.id, ?pixel, "crop appeared");
                    emit_complete(handler, pixel, &bbox);
                }
            }
            Some(_) => {}
            None => self.saw_crop = false,
        }
    }

    /// A press on `target`. Returns the phase of the gesture it started.
    ///
    /// Nothing starts while disabled or while another gesture is active.
    /// A container press draws a new crop (unless locked, or unless
    /// `keep_selection` is set and a crop exists) and immediately proposes
    /// a zero-size crop at the press point. Crop and handle presses need a
    /// crop; a handle press while locked moves the crop instead.
    pub fn pointer_down(
        &mut self,
        target: PointerTarget,
        event: &PointerEvent,
        crop: Option<&Crop>,
        options: &CropOptions,
        handler: &mut impl CropHandler,
    ) -> Option<Phase> {
        self.observe(crop, handler);
        if options.disabled {
            return None;
        }
        if self.session.is_some() {
            trace!(id = %self.id, "press ignored, gesture already active");
            return None;
        }

        let bbox = self.bounding_box();
        let current = crop.map(|c| c.to_pixel(bbox.width, bbox.height).sanitized());
        let (x, y) = (event.client_x, event.client_y);
        let (phase, origin) = match (target, current) {
            (PointerTarget::Container, _) => {
                if !options.can_draw(current.is_some()) {
                    return None;
                }
                (Phase::Drawing, GestureOrigin::new_crop(x, y, &bbox))
            }
            (PointerTarget::Handle(ord), Some(c)) if !options.locked => {
                (Phase::Resizing, GestureOrigin::resize(ord, x, y, &c, &bbox))
            }
            (PointerTarget::Crop | PointerTarget::Handle(_), Some(c)) => {
                (Phase::Dragging, GestureOrigin::move_crop(x, y, &c))
            }
            (_, None) => return None,
        };

        debug!(id = %self.id, ?phase, ?target, x, y, "gesture start");
        self.session = Some(Session {
            origin,
            phase,
            client_x: x,
            client_y: y,
            drag_started: false,
            _subscription: self.surface.subscribe_pointer(),
        });

        if phase == Phase::Drawing {
            let start = Crop::px(origin.start_crop_x, origin.start_crop_y, 0.0, 0.0);
            emit_change(handler, clamp_position(start, &bbox), &bbox);
        }
        Some(phase)
    }

    /// Pointer moved during a gesture. Returns the proposed crop when it
    /// differs from `crop`.
    pub fn pointer_move(
        &mut self,
        event: &PointerEvent,
        crop: Option<&Crop>,
        options: &CropOptions,
        handler: &mut impl CropHandler,
    ) -> Option<Crop> {
        self.observe(crop, handler);
        if options.disabled || self.session.is_none() {
            return None;
        }
        let crop = crop?;
        let bbox = self.bounding_box();
        let session = self.session.as_mut()?;

        if !session.drag_started {
            session.drag_started = true;
            handler.on_drag_start(event);
        }
        session.client_x = event.client_x;
        session.client_y = event.client_y;

        let current = crop.to_pixel(bbox.width, bbox.height);
        let (x, y) = (event.client_x, event.client_y);
        let next = match session.phase {
            Phase::Dragging => drag_crop(&current, &session.origin, x, y, &bbox),
            Phase::Drawing | Phase::Resizing => {
                resize_crop(&current, &session.origin, x, y, &options.limits(), &bbox)
            }
            Phase::Idle => return None,
        };

        if next == current {
            return None;
        }
        trace!(id = %self.id, ?next, "proposed");
        emit_change(handler, next, &bbox);
        Some(next)
    }

    /// Pointer released. Ends the gesture, releasing the pointer
    /// subscription, then reports drag end and completion.
    ///
    /// Returns whether a gesture ended. While disabled, or with no crop,
    /// the gesture ends silently.
    pub fn pointer_up(
        &mut self,
        event: &PointerEvent,
        crop: Option<&Crop>,
        options: &CropOptions,
        handler: &mut impl CropHandler,
    ) -> bool {
        self.observe(crop, handler);
        let Some(session) = self.session.take() else {
            return false;
        };
        debug!(id = %self.id, phase = ?session.phase, "gesture end");
        drop(session);

        if let (false, Some(crop)) = (options.disabled, crop) {
            let bbox = self.bounding_box();
            handler.on_drag_end(event);
            emit_complete(handler, crop.to_pixel(bbox.width, bbox.height), &bbox);
        }
        true
    }

    /// Pointer cancelled by the platform. Same as [`pointer_up`](Self::pointer_up).
    pub fn pointer_cancel(
        &mut self,
        event: &PointerEvent,
        crop: Option<&Crop>,
        options: &CropOptions,
        handler: &mut impl CropHandler,
    ) -> bool {
        self.pointer_up(event, crop, options, handler)
    }

    /// Arrow key while the cropper (or one of its handles) has focus.
    ///
    /// `focus` is the focused handle, or `None` for the crop body. Returns
    /// the accepted crop, which has been reported as both a change and a
    /// completion. Body nudges are reported even when clamping leaves the
    /// crop in place; handle nudges only when the crop changed.
    pub fn key_down(
        &mut self,
        event: &KeyEvent,
        focus: Option<Ordinate>,
        crop: Option<&Crop>,
        options: &CropOptions,
        handler: &mut impl CropHandler,
    ) -> Option<Crop> {
        self.observe(crop, handler);
        if options.disabled || !event.key.is_arrow() {
            return None;
        }
        let crop = crop?;
        let bbox = self.bounding_box();
        if !bbox.has_area() {
            return None;
        }

        let ordinate = if options.locked { None } else { focus };
        let step = self.platform.step_size(event.modifiers);
        let current = crop.to_pixel(bbox.width, bbox.height);
        let next = nudge(&current, event.key, step, ordinate, &options.limits(), bbox.width, bbox.height)?;
        if ordinate.is_some() && next == current {
            return None;
        }

        trace!(id = %self.id, key = ?event.key, step, ?ordinate, ?next, "nudge");
        emit_change(handler, next, &bbox);
        emit_complete(handler, next, &bbox);
        Some(next)
    }

    /// Abandon any active gesture without notifying the owner.
    pub fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(id = %self.id, phase = ?session.phase, "teardown");
            drop(session);
        }
    }

    fn bounding_box(&self) -> BoundingBox {
        match self.surface.bounding_box() {
            Some(bbox) => bbox,
            None => {
                warn!(id = %self.id, "container can't be measured, using a zero box");
                BoundingBox::ZERO
            }
        }
    }
}

/// Route a press at container-relative (`x`, `y`) on a pixel `crop`.
///
/// Points within `tolerance` of a corner hit that corner handle; points
/// within `tolerance` of an edge (and between its corners) hit the edge
/// handle. Other points inside the crop hit the body, everything else the
/// container. For hosts that don't render their own handle elements.
pub fn hit_test(x: f64, y: f64, crop: &Crop, tolerance: f64) -> PointerTarget {
    let t = if tolerance.is_finite() { tolerance.max(0.0) } else { 0.0 };
    let (left, top, right, bottom) = (crop.x, crop.y, crop.right(), crop.bottom());

    let near = |px: f64, py: f64| {
        let (dx, dy) = (x - px, y - py);
        dx * dx + dy * dy <= t * t
    };
    let corners = [
        (Ordinate::Nw, left, top),
        (Ordinate::Ne, right, top),
        (Ordinate::Sw, left, bottom),
        (Ordinate::Se, right, bottom),
    ];
    if let Some((ord, _, _)) = corners.into_iter().find(|&(_, px, py)| near(px, py)) {
        return PointerTarget::Handle(ord);
    }

    let between_x = x > left && x < right;
    let between_y = y > top && y < bottom;
    if between_y && (x - left).abs() <= t {
        PointerTarget::Handle(Ordinate::W)
    } else if between_y && (x - right).abs() <= t {
        PointerTarget::Handle(Ordinate::E)
    } else if between_x && (y - top).abs() <= t {
        PointerTarget::Handle(Ordinate::N)
    } else if between_x && (y - bottom).abs() <= t {
        PointerTarget::Handle(Ordinate::S)
    } else if between_x && between_y {
        PointerTarget::Crop
    } else {
        PointerTarget::Container
    }
}

fn emit_change(handler: &mut impl CropHandler, pixel: Crop, bbox: &BoundingBox) {
    handler.on_change(pixel, pixel.to_percent(bbox.width, bbox.height));
}

fn emit_complete(handler: &mut impl CropHandler, pixel: Crop, bbox: &BoundingBox) {
    handler.on_complete(pixel, pixel.to_percent(bbox.width, bbox.height));
}
