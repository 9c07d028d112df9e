//! Browser event conversion - extracts [`PointerSample`]s from web events.
//!
//! This is the single coordinate-extraction step applied to both event
//! shapes before classification: mouse and touch events collapse into the
//! same normalized sample, so the engine never branches on event source.

use tocar_core::{Point, PointerSample};
use web_sys::{MouseEvent, TouchEvent, TouchList};

/// Extract a sample from a mouse event.
pub fn sample_from_mouse(event: &MouseEvent) -> PointerSample {
    PointerSample::mouse(
        Point::new(event.client_x() as f32, event.client_y() as f32),
        event.time_stamp(),
    )
}

/// Extract a sample from a touchstart/touchmove event.
///
/// `touches[0]` is the primary point, `touches[1]` the pinch partner when
/// present; touches past the second are never incorporated. Returns `None`
/// for an event with an empty touch list.
pub fn sample_from_touch_active(event: &TouchEvent) -> Option<PointerSample> {
    let touches = event.touches();
    let primary = point_at(&touches, 0)?;
    let secondary = point_at(&touches, 1);
    Some(PointerSample::touch(
        primary,
        secondary,
        touch_count(&touches),
        event.time_stamp(),
    ))
}

/// Extract a sample from a touchend/touchcancel event.
///
/// `touches` no longer contains the lifted finger, so the final position
/// comes from `changedTouches`; `touch_count` reports the fingers still
/// down (zero when the gesture fully ended).
pub fn sample_from_touch_ended(event: &TouchEvent) -> Option<PointerSample> {
    let primary = point_at(&event.changed_touches(), 0)?;
    Some(PointerSample::touch(
        primary,
        None,
        touch_count(&event.touches()),
        event.time_stamp(),
    ))
}

fn point_at(touches: &TouchList, index: u32) -> Option<Point> {
    touches
        .get(index)
        .map(|touch| Point::new(touch.client_x() as f32, touch.client_y() as f32))
}

fn touch_count(touches: &TouchList) -> u8 {
    touches.length().min(u32::from(u8::MAX)) as u8
}
