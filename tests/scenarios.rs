//! End-to-end gestures through the public session API.
//!
//! An `Owner` plays the controlled-value role: it holds the crop, hands it
//! to every call, and adopts whatever `on_change` proposes, the way a UI
//! component owning the crop state would.

use std::cell::Cell;
use std::rc::Rc;

use cropkit::*;

const BOX: BoundingBox = BoundingBox::new(40.0, 60.0, 800.0, 600.0);

// ---- Host doubles ----

struct Host {
    bbox: Option<BoundingBox>,
    live: Rc<Cell<usize>>,
}

struct Listening(Rc<Cell<usize>>);

impl Drop for Listening {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

impl Surface for Host {
    type Subscription = Listening;

    fn bounding_box(&self) -> Option<BoundingBox> {
        self.bbox
    }

    fn subscribe_pointer(&mut self) -> Listening {
        self.live.set(self.live.get() + 1);
        Listening(self.live.clone())
    }
}

#[derive(Default)]
struct Owner {
    crop: Option<Crop>,
    last_percent: Option<Crop>,
    changes: usize,
    completed: Vec<Crop>,
}

impl CropHandler for Owner {
    fn on_change(&mut self, pixel: Crop, percent: Crop) {
        self.crop = Some(pixel);
        self.last_percent = Some(percent);
        self.changes += 1;
    }

    fn on_complete(&mut self, pixel: Crop, _percent: Crop) {
        self.completed.push(pixel);
    }
}

struct Harness {
    cropper: Cropper<Host>,
    owner: Owner,
    options: CropOptions,
    live: Rc<Cell<usize>>,
}

impl Harness {
    fn new(crop: Option<Crop>, options: CropOptions) -> Self {
        let live = Rc::new(Cell::new(0));
        let host = Host {
            bbox: Some(BOX),
            live: live.clone(),
        };
        let mut harness = Self {
            cropper: Cropper::new(InstanceId(1), host).with_platform(Platform::Other),
            owner: Owner {
                crop,
                ..Owner::default()
            },
            options,
            live,
        };
        harness.sync();
        harness
    }

    fn sync(&mut self) {
        let crop = self.owner.crop;
        self.cropper.observe(crop.as_ref(), &mut self.owner);
    }

    /// Press at a container-relative point.
    fn down(&mut self, target: PointerTarget, x: f64, y: f64) -> Option<Phase> {
        let crop = self.owner.crop;
        let event = PointerEvent::new(BOX.x + x, BOX.y + y);
        self.cropper
            .pointer_down(target, &event, crop.as_ref(), &self.options, &mut self.owner)
    }

    fn move_to(&mut self, x: f64, y: f64) -> Option<Crop> {
        let crop = self.owner.crop;
        let event = PointerEvent::new(BOX.x + x, BOX.y + y);
        self.cropper
            .pointer_move(&event, crop.as_ref(), &self.options, &mut self.owner)
    }

    fn up(&mut self, x: f64, y: f64) -> bool {
        let crop = self.owner.crop;
        let event = PointerEvent::new(BOX.x + x, BOX.y + y);
        self.cropper
            .pointer_up(&event, crop.as_ref(), &self.options, &mut self.owner)
    }

    fn key(&mut self, key: Key, modifiers: Modifiers, focus: Option<Ordinate>) -> Option<Crop> {
        let crop = self.owner.crop;
        let event = KeyEvent::new(key).with_modifiers(modifiers);
        self.cropper
            .key_down(&event, focus, crop.as_ref(), &self.options, &mut self.owner)
    }

    fn crop(&self) -> Crop {
        self.owner.crop.unwrap_or(Crop::EMPTY)
    }
}

// ---- Scenarios ----

#[test]
fn resize_from_south_east_handle() {
    let start = Crop::px(100.0, 100.0, 200.0, 150.0);
    let mut h = Harness::new(Some(start), CropOptions::new());

    assert_eq!(h.down(PointerTarget::Handle(Ordinate::Se), 300.0, 250.0), Some(Phase::Resizing));
    h.move_to(350.0, 300.0);
    assert_eq!(h.crop(), Crop::px(100.0, 100.0, 250.0, 200.0));
    // Same spot again proposes nothing.
    assert_eq!(h.move_to(350.0, 300.0), None);
    assert_eq!(h.owner.changes, 1);
    assert!(h.up(350.0, 300.0));
    assert_eq!(h.owner.completed.last(), Some(&Crop::px(100.0, 100.0, 250.0, 200.0)));
    assert_eq!(h.live.get(), 0);
}

#[test]
fn drawing_with_aspect_and_minimum() {
    let options = CropOptions::new().aspect(1.0).min_size(50.0, 0.0);
    let mut h = Harness::new(None, options);

    assert_eq!(h.down(PointerTarget::Container, 0.0, 0.0), Some(Phase::Drawing));
    assert_eq!(h.crop(), Crop::px(0.0, 0.0, 0.0, 0.0));
    h.move_to(30.0, 10.0);
    assert_eq!(h.crop(), Crop::px(0.0, 0.0, 50.0, 50.0));
    h.up(30.0, 10.0);
}

#[test]
fn drawing_grows_past_the_minimum() {
    let options = CropOptions::new().aspect(1.0).min_size(50.0, 0.0);
    let mut h = Harness::new(None, options);

    h.down(PointerTarget::Container, 100.0, 100.0);
    h.move_to(180.0, 300.0);
    assert_eq!(h.crop(), Crop::px(100.0, 100.0, 80.0, 80.0));
    // Back across the start point: the new crop grows up-left instead.
    h.move_to(20.0, 20.0);
    assert_eq!(h.crop(), Crop::px(20.0, 20.0, 80.0, 80.0));
    // Just past the start point it can't be smaller than the minimum.
    h.move_to(90.0, 95.0);
    assert_eq!(h.crop(), Crop::px(50.0, 50.0, 50.0, 50.0));
}

#[test]
fn drawing_without_minimum_flips_quadrant() {
    let mut h = Harness::new(None, CropOptions::new());
    h.down(PointerTarget::Container, 400.0, 300.0);
    h.move_to(300.0, 250.0);
    assert_eq!(h.crop(), Crop::px(300.0, 250.0, 100.0, 50.0));
}

#[test]
fn move_clamps_to_container() {
    let mut h = Harness::new(Some(Crop::px(700.0, 500.0, 150.0, 150.0)), CropOptions::new());

    assert_eq!(h.down(PointerTarget::Crop, 750.0, 550.0), Some(Phase::Dragging));
    h.move_to(850.0, 650.0);
    assert_eq!(h.crop(), Crop::px(650.0, 450.0, 150.0, 150.0));
}

#[test]
fn keyboard_steps() {
    let start = Crop::px(100.0, 100.0, 200.0, 150.0);
    let steps = [
        (Modifiers::NONE, 101.0),
        (Modifiers::SHIFT, 110.0),
        (Modifiers::CTRL, 200.0),
    ];
    for (modifiers, x) in steps {
        let mut h = Harness::new(Some(start), CropOptions::new());
        let next = h.key(Key::ArrowRight, modifiers, None);
        assert_eq!(next, Some(Crop::px(x, 100.0, 200.0, 150.0)), "{modifiers:?}");
        assert_eq!(h.crop(), Crop::px(x, 100.0, 200.0, 150.0));
        // Initial completion plus the nudge's own.
        assert_eq!(h.owner.completed.len(), 2);
    }
}

#[test]
fn keyboard_steps_clamp_to_container() {
    let mut h = Harness::new(Some(Crop::px(590.0, 440.0, 200.0, 150.0)), CropOptions::new());
    h.key(Key::ArrowRight, Modifiers::CTRL, None);
    h.key(Key::ArrowDown, Modifiers::CTRL, None);
    assert_eq!(h.crop(), Crop::px(600.0, 450.0, 200.0, 150.0));
}

#[test]
fn primary_modifier_follows_platform() {
    let live = Rc::new(Cell::new(0));
    let host = Host {
        bbox: Some(BOX),
        live,
    };
    let mut cropper = Cropper::new(InstanceId(2), host).with_platform(Platform::Apple);
    let mut owner = Owner::default();
    let crop = Crop::px(100.0, 100.0, 200.0, 150.0);
    let event = KeyEvent::new(Key::ArrowLeft).with_modifiers(Modifiers::META);
    let next = cropper.key_down(&event, None, Some(&crop), &CropOptions::new(), &mut owner);
    assert_eq!(next, Some(Crop::px(0.0, 100.0, 200.0, 150.0)));
}

#[test]
fn percent_crop_round_trip() {
    let percent = Crop::percent(10.0, 10.0, 20.0, 20.0);
    let pixel = percent.to_pixel(800.0, 400.0);
    assert_eq!(pixel, Crop::px(80.0, 40.0, 160.0, 80.0));
    assert!(pixel.to_percent(800.0, 400.0).approx_eq(&percent, 1e-9));
}

#[test]
fn percent_owner_gets_both_representations() {
    let mut h = Harness::new(Some(Crop::percent(10.0, 10.0, 25.0, 25.0)), CropOptions::new());
    h.key(Key::ArrowDown, Modifiers::SHIFT, None);
    assert_eq!(h.crop(), Crop::px(80.0, 70.0, 200.0, 150.0));
    let percent = h.owner.last_percent.unwrap();
    assert_eq!(percent.unit, Unit::Percent);
    assert!(percent.approx_eq(&Crop::percent(10.0, 70.0 / 6.0, 25.0, 25.0), 1e-9), "{percent:?}");
}

#[test]
fn handle_nudges_resize_from_opposite_corner() {
    let start = Crop::px(100.0, 100.0, 200.0, 150.0);
    let mut h = Harness::new(Some(start), CropOptions::new());
    h.key(Key::ArrowRight, Modifiers::SHIFT, Some(Ordinate::Se));
    assert_eq!(h.crop(), Crop::px(100.0, 100.0, 210.0, 160.0));
    h.key(Key::ArrowUp, Modifiers::SHIFT, Some(Ordinate::Nw));
    assert_eq!(h.crop(), Crop::px(90.0, 90.0, 220.0, 170.0));
}

#[test]
fn dragging_a_side_with_aspect_keeps_ratio() {
    let options = CropOptions::new().aspect(2.0);
    let mut h = Harness::new(Some(Crop::px(100.0, 100.0, 200.0, 100.0)), options);
    h.down(PointerTarget::Handle(Ordinate::E), 300.0, 150.0);
    h.move_to(400.0, 150.0);
    // The east handle keeps the bottom-left corner fixed.
    assert_eq!(h.crop(), Crop::px(100.0, 50.0, 300.0, 150.0));
}

#[test]
fn gesture_outlives_pointer_leaving_container() {
    let mut h = Harness::new(Some(Crop::px(100.0, 100.0, 200.0, 150.0)), CropOptions::new());
    h.down(PointerTarget::Handle(Ordinate::Se), 300.0, 250.0);
    assert_eq!(h.live.get(), 1);
    h.move_to(5000.0, 5000.0);
    assert_eq!(h.crop(), Crop::px(100.0, 100.0, 700.0, 500.0));
    h.up(5000.0, 5000.0);
    assert_eq!(h.live.get(), 0);
}

#[test]
fn hit_test_drives_a_gesture() {
    let start = Crop::px(100.0, 100.0, 200.0, 150.0);
    let mut h = Harness::new(Some(start), CropOptions::new());
    let target = hit_test(299.0, 251.0, &start, 6.0);
    assert_eq!(target, PointerTarget::Handle(Ordinate::Se));
    h.down(target, 299.0, 251.0);
    h.move_to(309.0, 261.0);
    assert_eq!(h.crop(), Crop::px(100.0, 100.0, 210.0, 160.0));
}
