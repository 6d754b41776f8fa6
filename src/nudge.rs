//! Arrow-key nudging of the crop body or of a single handle.
//!
//! One key press moves by [`NUDGE_STEP`] pixels, [`NUDGE_STEP_MEDIUM`] with
//! shift, and [`NUDGE_STEP_LARGE`] with the platform's primary modifier
//! (command on Apple platforms, control elsewhere).
//!
//! ```
//! use cropkit::{Crop, Key, Limits, nudge};
//!
//! let crop = Crop::px(100.0, 100.0, 200.0, 150.0);
//! let moved = nudge(&crop, Key::ArrowRight, 10.0, None, &Limits::new(), 800.0, 600.0);
//! assert_eq!(moved, Some(Crop::px(110.0, 100.0, 200.0, 150.0)));
//! ```

use crate::contain::{Containment, Limits};
use crate::crop::{BoundingBox, Crop};
use crate::gesture::clamp_position;
use crate::ordinate::Ordinate;

/// Step without modifiers.
pub const NUDGE_STEP: f64 = 1.0;
/// Step with shift held.
pub const NUDGE_STEP_MEDIUM: f64 = 10.0;
/// Step with the primary modifier held.
pub const NUDGE_STEP_LARGE: f64 = 100.0;

/// Keys the engine reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// Any other key; ignored.
    Other,
}

impl Key {
    /// Map a DOM-style key name (`"ArrowLeft"`, ...) to a [`Key`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            _ => Self::Other,
        }
    }

    /// Whether this is one of the four arrows.
    pub fn is_arrow(self) -> bool {
        self != Self::Other
    }
}

/// Modifier keys held during a key press.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Command on Apple keyboards, the Windows/super key elsewhere.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };
}

/// Platform family, which decides the primary modifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    /// macOS / iOS: command (meta) is primary.
    Apple,
    /// Everything else: control is primary.
    Other,
}

impl Platform {
    /// The platform this crate was compiled for.
    pub const fn current() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Self::Apple
        } else {
            Self::Other
        }
    }

    /// Whether the primary modifier for this platform is held.
    pub fn primary_held(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Apple => modifiers.meta,
            Self::Other => modifiers.ctrl,
        }
    }

    /// Nudge step for the held modifiers. Primary wins over shift.
    pub fn step_size(self, modifiers: Modifiers) -> f64 {
        if self.primary_held(modifiers) {
            NUDGE_STEP_LARGE
        } else if modifiers.shift {
            NUDGE_STEP_MEDIUM
        } else {
            NUDGE_STEP
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// A key press as delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Key press without modifiers.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Set the held modifiers.
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Apply one raw step to `crop` (pixels) for `key`, without any clamping.
///
/// Without a handle, arrows move the crop. With a handle, the step moves
/// that handle: corner handles move diagonally (so `se` + right grows both
/// width and height), edge handles ignore the arrows across their axis.
/// Returns `None` for non-arrow keys.
pub fn nudge_crop(crop: &Crop, key: Key, step: f64, ordinate: Option<Ordinate>) -> Option<Crop> {
    let (sx, sy, sw, sh) = match ordinate {
        None => match key {
            Key::ArrowLeft => (-1.0, 0.0, 0.0, 0.0),
            Key::ArrowRight => (1.0, 0.0, 0.0, 0.0),
            Key::ArrowUp => (0.0, -1.0, 0.0, 0.0),
            Key::ArrowDown => (0.0, 1.0, 0.0, 0.0),
            Key::Other => return None,
        },
        Some(ord) => match key {
            Key::ArrowLeft => horizontal_handle_step(ord),
            Key::ArrowRight => negate(horizontal_handle_step(ord)),
            Key::ArrowUp => vertical_handle_step(ord),
            Key::ArrowDown => negate(vertical_handle_step(ord)),
            Key::Other => return None,
        },
    };
    let mut next = *crop;
    next.x += sx * step;
    next.y += sy * step;
    next.width += sw * step;
    next.height += sh * step;
    Some(next)
}

/// Nudge `crop` and force the result back inside the container.
///
/// Whole-crop moves are clamped to the box; handle nudges go through
/// containment anchored at that handle. Returns `None` for non-arrow keys.
pub fn nudge(
    crop: &Crop,
    key: Key,
    step: f64,
    ordinate: Option<Ordinate>,
    limits: &Limits,
    box_w: f64,
    box_h: f64,
) -> Option<Crop> {
    let pixel = crop.to_pixel(box_w, box_h).sanitized();
    let mut moved = nudge_crop(&pixel, key, step, ordinate)?;
    let Some(ord) = ordinate else {
        return Some(clamp_position(moved, &BoundingBox::new(0.0, 0.0, box_w, box_h)));
    };
    let containment = Containment::new(limits, box_w, box_h);
    // An edge handle only steps its own axis; the other follows the ratio.
    if let Some(aspect) = containment.aspect {
        if !ord.affects_y() {
            moved.height = moved.width / aspect;
        } else if !ord.affects_x() {
            moved.width = moved.height * aspect;
        }
    }
    Some(containment.apply(moved, ordinate))
}

/// (x, y, width, height) multipliers for a left-arrow press on a handle.
fn horizontal_handle_step(ord: Ordinate) -> (f64, f64, f64, f64) {
    match ord {
        Ordinate::Nw => (-1.0, -1.0, 1.0, 1.0),
        Ordinate::W => (-1.0, 0.0, 1.0, 0.0),
        Ordinate::Sw => (-1.0, 0.0, 1.0, 1.0),
        Ordinate::Ne => (0.0, 1.0, -1.0, -1.0),
        Ordinate::E => (0.0, 0.0, -1.0, 0.0),
        Ordinate::Se => (0.0, 0.0, -1.0, -1.0),
        Ordinate::N | Ordinate::S => (0.0, 0.0, 0.0, 0.0),
    }
}

/// (x, y, width, height) multipliers for an up-arrow press on a handle.
fn vertical_handle_step(ord: Ordinate) -> (f64, f64, f64, f64) {
    match ord {
        Ordinate::Nw => (-1.0, -1.0, 1.0, 1.0),
        Ordinate::N => (0.0, -1.0, 0.0, 1.0),
        Ordinate::Ne => (0.0, -1.0, 1.0, 1.0),
        Ordinate::Sw => (1.0, 0.0, -1.0, -1.0),
        Ordinate::S => (0.0, 0.0, 0.0, -1.0),
        Ordinate::Se => (0.0, 0.0, -1.0, -1.0),
        Ordinate::E | Ordinate::W => (0.0, 0.0, 0.0, 0.0),
    }
}

fn negate((x, y, w, h): (f64, f64, f64, f64)) -> (f64, f64, f64, f64) {
    (-x, -y, -w, -h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CROP: Crop = Crop::px(100.0, 100.0, 200.0, 150.0);

    fn handle(ord: Ordinate, key: Key) -> Crop {
        nudge(&CROP, key, 10.0, Some(ord), &Limits::new(), 800.0, 600.0).unwrap()
    }

    // ── step sizes ──────────────────────────────────────────────────────

    #[test]
    fn step_sizes() {
        let other = Platform::Other;
        assert_eq!(other.step_size(Modifiers::NONE), 1.0);
        assert_eq!(other.step_size(Modifiers::SHIFT), 10.0);
        assert_eq!(other.step_size(Modifiers::CTRL), 100.0);
        // Command is not primary off Apple platforms.
        assert_eq!(other.step_size(Modifiers::META), 1.0);

        let apple = Platform::Apple;
        assert_eq!(apple.step_size(Modifiers::META), 100.0);
        assert_eq!(apple.step_size(Modifiers::CTRL), 1.0);
    }

    #[test]
    fn primary_wins_over_shift() {
        let m = Modifiers {
            shift: true,
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(Platform::Other.step_size(m), 100.0);
    }

    #[test]
    fn key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_name("Down"), Key::ArrowDown);
        assert_eq!(Key::from_name("Enter"), Key::Other);
        assert!(!Key::Other.is_arrow());
    }

    // ── whole-crop moves ────────────────────────────────────────────────

    #[test]
    fn arrows_move_body() {
        let n = |key| nudge(&CROP, key, 1.0, None, &Limits::new(), 800.0, 600.0).unwrap();
        assert_eq!(n(Key::ArrowLeft), Crop::px(99.0, 100.0, 200.0, 150.0));
        assert_eq!(n(Key::ArrowRight), Crop::px(101.0, 100.0, 200.0, 150.0));
        assert_eq!(n(Key::ArrowUp), Crop::px(100.0, 99.0, 200.0, 150.0));
        assert_eq!(n(Key::ArrowDown), Crop::px(100.0, 101.0, 200.0, 150.0));
    }

    #[test]
    fn body_move_clamped() {
        let crop = Crop::px(595.0, 0.0, 200.0, 150.0);
        let right = nudge(&crop, Key::ArrowRight, 100.0, None, &Limits::new(), 800.0, 600.0);
        assert_eq!(right, Some(Crop::px(600.0, 0.0, 200.0, 150.0)));
        let up = nudge(&crop, Key::ArrowUp, 10.0, None, &Limits::new(), 800.0, 600.0);
        assert_eq!(up, Some(crop));
    }

    #[test]
    fn other_key_is_ignored() {
        assert_eq!(nudge(&CROP, Key::Other, 10.0, None, &Limits::new(), 800.0, 600.0), None);
        assert_eq!(nudge_crop(&CROP, Key::Other, 10.0, Some(Ordinate::Se)), None);
    }

    #[test]
    fn percent_body_move_returns_pixels() {
        let crop = Crop::percent(10.0, 10.0, 20.0, 20.0);
        let c = nudge(&crop, Key::ArrowDown, 1.0, None, &Limits::new(), 800.0, 400.0).unwrap();
        assert_eq!(c, Crop::px(80.0, 41.0, 160.0, 80.0));
    }

    // ── handle nudges ───────────────────────────────────────────────────

    #[test]
    fn se_right_grows() {
        assert_eq!(handle(Ordinate::Se, Key::ArrowRight), Crop::px(100.0, 100.0, 210.0, 160.0));
        assert_eq!(handle(Ordinate::Se, Key::ArrowLeft), Crop::px(100.0, 100.0, 190.0, 140.0));
    }

    #[test]
    fn nw_up_grows_toward_top_left() {
        assert_eq!(handle(Ordinate::Nw, Key::ArrowUp), Crop::px(90.0, 90.0, 210.0, 160.0));
        assert_eq!(handle(Ordinate::Nw, Key::ArrowDown), Crop::px(110.0, 110.0, 190.0, 140.0));
    }

    #[test]
    fn edge_handles() {
        assert_eq!(handle(Ordinate::E, Key::ArrowRight), Crop::px(100.0, 100.0, 210.0, 150.0));
        assert_eq!(handle(Ordinate::W, Key::ArrowLeft), Crop::px(90.0, 100.0, 210.0, 150.0));
        assert_eq!(handle(Ordinate::N, Key::ArrowUp), Crop::px(100.0, 90.0, 200.0, 160.0));
        assert_eq!(handle(Ordinate::S, Key::ArrowDown), Crop::px(100.0, 100.0, 200.0, 160.0));
        // Arrows across an edge handle's axis do nothing.
        assert_eq!(handle(Ordinate::E, Key::ArrowUp), CROP);
        assert_eq!(handle(Ordinate::N, Key::ArrowLeft), CROP);
    }

    #[test]
    fn ne_and_sw_keep_opposite_corner() {
        let ne = handle(Ordinate::Ne, Key::ArrowUp);
        assert_eq!((ne.x, ne.bottom()), (CROP.x, CROP.bottom()));
        assert_eq!(ne.width, 210.0);
        let sw = handle(Ordinate::Sw, Key::ArrowDown);
        assert_eq!((sw.right(), sw.y), (CROP.right(), CROP.y));
        assert_eq!(sw.height, 160.0);
    }

    #[test]
    fn handle_nudge_respects_minimum() {
        let limits = Limits::new().min_size(195.0, 0.0);
        let c = nudge(&CROP, Key::ArrowRight, 10.0, Some(Ordinate::W), &limits, 800.0, 600.0).unwrap();
        // Shrinking from the west stops at the minimum, right edge fixed.
        assert_eq!(c, Crop::px(105.0, 100.0, 195.0, 150.0));
    }

    #[test]
    fn handle_nudge_respects_box() {
        let crop = Crop::px(700.0, 500.0, 95.0, 95.0);
        let c = nudge(&crop, Key::ArrowRight, 100.0, Some(Ordinate::Se), &Limits::new(), 800.0, 600.0)
            .unwrap();
        assert_eq!(c, Crop::px(700.0, 500.0, 100.0, 100.0));
    }

    #[test]
    fn handle_nudge_keeps_aspect() {
        let crop = Crop::px(100.0, 100.0, 200.0, 100.0);
        let limits = Limits::new().aspect(2.0);
        let e = nudge(&crop, Key::ArrowRight, 10.0, Some(Ordinate::E), &limits, 800.0, 600.0).unwrap();
        assert_eq!(e, Crop::px(100.0, 100.0, 210.0, 105.0));
        let s = nudge(&crop, Key::ArrowDown, 10.0, Some(Ordinate::S), &limits, 800.0, 600.0).unwrap();
        assert_eq!(s, Crop::px(100.0, 100.0, 220.0, 110.0));
    }

    #[test]
    fn north_handle_nudge_with_aspect_grows_width() {
        // Unlike a pointer drag, an arrow on the top edge steps the height
        // and derives the width from it.
        let crop = Crop::px(100.0, 200.0, 200.0, 200.0);
        let limits = Limits::new().aspect(1.0);
        let n = nudge(&crop, Key::ArrowUp, 10.0, Some(Ordinate::N), &limits, 800.0, 600.0).unwrap();
        assert_eq!((n.width, n.height), (210.0, 210.0));
        assert_eq!(n.bottom(), 400.0);
    }
}
