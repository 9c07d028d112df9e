//! Integration tests for tocar-core.
//!
//! These drive the recognizer the way a binding does: raw interleaved
//! down/move/up streams in, gesture notifications out.

use std::cell::RefCell;
use std::rc::Rc;
use tocar_core::{
    GestureConfig, GestureRecognizer, InputEvent, Point, PointerSample, SwipeDirection,
};

fn mouse_down(rec: &mut GestureRecognizer, x: f32, y: f32, t: f64) {
    rec.process(&InputEvent::Down(PointerSample::mouse(Point::new(x, y), t)));
}

fn mouse_move(rec: &mut GestureRecognizer, x: f32, y: f32, t: f64) {
    rec.process(&InputEvent::Move(PointerSample::mouse(Point::new(x, y), t)));
}

fn mouse_up(rec: &mut GestureRecognizer, x: f32, y: f32, t: f64) {
    rec.process(&InputEvent::Up(PointerSample::mouse(Point::new(x, y), t)));
}

// =============================================================================
// The documented end-to-end scenario
// =============================================================================

#[test]
fn test_fast_upward_flick_navigates() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut rec = GestureRecognizer::new();
    let a = Rc::clone(&log);
    rec.on_swipe(move |dir, dist| a.borrow_mut().push(format!("swipe {dir:?} {dist:.1}")));
    let b = Rc::clone(&log);
    rec.on_swipe_up(move || b.borrow_mut().push("up".to_string()));

    mouse_down(&mut rec, 100.0, 100.0, 0.0);
    mouse_move(&mut rec, 100.0, 40.0, 120.0);
    // 120 ms in: 60 px travelled, velocity -0.5 px/ms on y.
    assert_eq!(rec.state().delta_y, -60.0);
    assert!((rec.state().velocity_y + 0.5).abs() < 1e-6);
    mouse_up(&mut rec, 110.0, 30.0, 150.0);

    // distance ≈ 70.7 > 50 within 150 ms < 300: the vertical axis
    // dominates, so the flick lands as an upward swipe.
    assert_eq!(
        *log.borrow(),
        vec!["swipe Up 70.7".to_string(), "up".to_string()]
    );
}

// =============================================================================
// Consumer wiring: carousel + modal, independent instances
// =============================================================================

#[test]
fn test_carousel_navigation_wiring() {
    let page = Rc::new(RefCell::new(0i32));

    let mut rec = GestureRecognizer::new();
    let next = Rc::clone(&page);
    rec.on_swipe_left(move || *next.borrow_mut() += 1);
    let prev = Rc::clone(&page);
    rec.on_swipe_right(move || *prev.borrow_mut() -= 1);

    // Flick left twice, right once.
    for (start, end, t0) in [(300.0, 100.0, 0.0), (300.0, 100.0, 1000.0), (100.0, 300.0, 2000.0)] {
        mouse_down(&mut rec, start, 200.0, t0);
        mouse_move(&mut rec, (start + end) / 2.0, 200.0, t0 + 80.0);
        mouse_up(&mut rec, end, 200.0, t0 + 160.0);
    }

    assert_eq!(*page.borrow(), 1);
}

#[test]
fn test_independent_bindings_do_not_share_state() {
    let modal_dismissed = Rc::new(RefCell::new(false));
    let page_swipes = Rc::new(RefCell::new(0));

    let mut modal = GestureRecognizer::new();
    let m = Rc::clone(&modal_dismissed);
    modal.on_swipe_down(move || *m.borrow_mut() = true);

    let mut page = GestureRecognizer::new();
    let p = Rc::clone(&page_swipes);
    page.on_swipe(move |_, _| *p.borrow_mut() += 1);

    // A gesture delivered to the modal engine only.
    mouse_down(&mut modal, 100.0, 100.0, 0.0);
    mouse_up(&mut modal, 100.0, 250.0, 120.0);

    assert!(*modal_dismissed.borrow());
    assert_eq!(*page_swipes.borrow(), 0);
    assert!(!page.state().is_dragging);
}

// =============================================================================
// Interleaved sequences
// =============================================================================

#[test]
fn test_tap_then_swipe_then_tap() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut rec = GestureRecognizer::new();
    let a = Rc::clone(&log);
    rec.on_tap(move |_| a.borrow_mut().push("tap"));
    let b = Rc::clone(&log);
    rec.on_swipe(move |_, _| b.borrow_mut().push("swipe"));

    mouse_down(&mut rec, 50.0, 50.0, 0.0);
    mouse_up(&mut rec, 50.0, 50.0, 60.0);

    mouse_down(&mut rec, 50.0, 50.0, 1000.0);
    mouse_move(&mut rec, 120.0, 50.0, 1080.0);
    mouse_up(&mut rec, 150.0, 50.0, 1150.0);

    mouse_down(&mut rec, 50.0, 50.0, 2000.0);
    mouse_up(&mut rec, 52.0, 50.0, 2070.0);

    assert_eq!(*log.borrow(), vec!["tap", "swipe", "tap"]);
}

#[test]
fn test_swipe_does_not_feed_double_tap_memory() {
    let doubles = Rc::new(RefCell::new(0));

    let mut rec = GestureRecognizer::new();
    let d = Rc::clone(&doubles);
    rec.on_double_tap(move || *d.borrow_mut() += 1);

    // A swipe, then a quick tap 100 ms later: not a double-tap, the
    // swipe never recorded a tap timestamp.
    mouse_down(&mut rec, 0.0, 0.0, 0.0);
    mouse_up(&mut rec, 100.0, 0.0, 100.0);
    mouse_down(&mut rec, 0.0, 0.0, 200.0);
    mouse_up(&mut rec, 0.0, 0.0, 250.0);

    assert_eq!(*doubles.borrow(), 0);
}

#[test]
fn test_long_press_then_release_is_not_a_tap() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut rec = GestureRecognizer::new();
    let a = Rc::clone(&log);
    rec.on_long_press(move || a.borrow_mut().push("long-press"));
    let b = Rc::clone(&log);
    rec.on_tap(move |_| b.borrow_mut().push("tap"));

    mouse_down(&mut rec, 80.0, 80.0, 0.0);
    rec.check_long_press(500.0);
    mouse_up(&mut rec, 80.0, 80.0, 650.0);

    // Held 650 ms: long-press fired at its deadline, and the release is
    // far too slow to double as a tap.
    assert_eq!(*log.borrow(), vec!["long-press"]);
}

#[test]
fn test_drag_stream_brackets_every_session() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut rec = GestureRecognizer::new();
    let a = Rc::clone(&log);
    rec.on_drag_start(move || a.borrow_mut().push("start".to_string()));
    let b = Rc::clone(&log);
    rec.on_drag(move |dx, _| b.borrow_mut().push(format!("drag {dx}")));
    let c = Rc::clone(&log);
    rec.on_drag_end(move || c.borrow_mut().push("end".to_string()));

    mouse_down(&mut rec, 0.0, 0.0, 0.0);
    mouse_move(&mut rec, 20.0, 0.0, 100.0);
    mouse_move(&mut rec, 45.0, 0.0, 200.0);
    mouse_up(&mut rec, 45.0, 0.0, 400.0);

    assert_eq!(
        *log.borrow(),
        vec!["start", "drag 20", "drag 45", "end"]
    );
}

// =============================================================================
// Two-finger pinch alongside single-pointer drag state
// =============================================================================

#[test]
fn test_pinch_zoom_session() {
    let scales = Rc::new(RefCell::new(Vec::new()));
    let drags = Rc::new(RefCell::new(0));

    let mut rec = GestureRecognizer::new();
    let s = Rc::clone(&scales);
    rec.on_pinch(move |scale| s.borrow_mut().push(scale));
    let d = Rc::clone(&drags);
    rec.on_drag(move |_, _| *d.borrow_mut() += 1);

    rec.process(&InputEvent::Down(PointerSample::touch(
        Point::new(150.0, 300.0),
        Some(Point::new(250.0, 300.0)),
        2,
        0.0,
    )));
    for (i, spread) in [110.0f32, 130.0, 150.0].into_iter().enumerate() {
        let half = spread / 2.0;
        rec.process(&InputEvent::Move(PointerSample::touch(
            Point::new(200.0 - half, 300.0),
            Some(Point::new(200.0 + half, 300.0)),
            2,
            (i as f64 + 1.0) * 30.0,
        )));
    }
    rec.process(&InputEvent::Up(PointerSample::touch(
        Point::new(125.0, 300.0),
        None,
        0,
        200.0,
    )));

    let scales = scales.borrow();
    assert_eq!(scales.len(), 3);
    assert!((scales[0] - 1.1).abs() < 1e-3);
    assert!((scales[2] - 1.5).abs() < 1e-3);
    // Pinch state is tracked independently of drag: the continuous drag
    // stream still observed every move.
    assert_eq!(*drags.borrow(), 3);
}

// =============================================================================
// Rebinding semantics at the engine boundary
// =============================================================================

#[test]
fn test_reset_mid_session_drops_classification() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut rec = GestureRecognizer::new();
    let a = Rc::clone(&log);
    rec.on_swipe(move |_, _| a.borrow_mut().push("swipe"));
    let b = Rc::clone(&log);
    rec.on_drag_end(move || b.borrow_mut().push("end"));

    // Would have been a clean swipe, but the binding moved to another
    // element mid-flight.
    mouse_down(&mut rec, 0.0, 0.0, 0.0);
    mouse_move(&mut rec, 60.0, 0.0, 50.0);
    rec.reset();
    mouse_up(&mut rec, 90.0, 0.0, 100.0);

    assert!(log.borrow().is_empty());

    // The recognizer is reusable immediately after.
    mouse_down(&mut rec, 0.0, 0.0, 1000.0);
    mouse_up(&mut rec, 80.0, 0.0, 1100.0);
    assert_eq!(*log.borrow(), vec!["swipe", "end"]);
}

// =============================================================================
// Configuration snapshot
// =============================================================================

#[test]
fn test_config_roundtrips_through_json() {
    let config = GestureConfig {
        threshold: 75.0,
        long_press_delay_ms: 350.0,
        enabled: true,
    };
    let json = serde_json::to_string(&config).expect("config serializes");
    let parsed: GestureConfig = serde_json::from_str(&json).expect("config parses");
    assert_eq!(parsed, config);
}

#[test]
fn test_direction_reports_in_state_snapshot() {
    let mut rec = GestureRecognizer::new();
    mouse_down(&mut rec, 100.0, 100.0, 0.0);
    mouse_move(&mut rec, 150.0, 150.0, 50.0);
    // Diagonal tie resolves through the vertical branch.
    assert_eq!(rec.state().direction, SwipeDirection::Down);
    mouse_move(&mut rec, 190.0, 150.0, 80.0);
    assert_eq!(rec.state().direction, SwipeDirection::Right);
}
