//! Gesture recognition from normalized pointer events.
//!
//! [`GestureRecognizer`] consumes the [`InputEvent`] stream produced by a
//! host adapter and dispatches disambiguated gesture notifications — tap,
//! double-tap, long-press, 4-directional swipe, continuous drag, and
//! two-finger pinch — to registered callbacks. Classification runs
//! synchronously inside `process`; the only deferred piece is the
//! long-press deadline, which the driver polls via [`check_long_press`]
//! from a single host timer per session.
//!
//! [`check_long_press`]: GestureRecognizer::check_long_press

use crate::event::{InputEvent, PointerSample, PointerSource, SwipeDirection};
use crate::geometry::Point;
use crate::state::GestureState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum session duration for a swipe (milliseconds).
pub const SWIPE_MAX_DURATION_MS: f64 = 300.0;
/// Maximum total displacement for a tap (pixels).
pub const TAP_MAX_DISTANCE: f32 = 10.0;
/// Maximum session duration for a tap (milliseconds).
pub const TAP_MAX_DURATION_MS: f64 = 200.0;
/// Window after a qualifying tap in which a second tap becomes a double-tap.
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

/// Configuration for gesture recognition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Minimum pixel distance for a displacement to qualify as a swipe.
    pub threshold: f32,
    /// Milliseconds a stationary pointer must be held before long-press fires.
    pub long_press_delay_ms: f64,
    /// Master kill-switch; when false every input is ignored.
    pub enabled: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            long_press_delay_ms: 500.0,
            enabled: true,
        }
    }
}

type DirectionFn = Box<dyn FnMut(SwipeDirection, f32)>;
type PositionFn = Box<dyn FnMut(Point)>;
type ScaleFn = Box<dyn FnMut(f32)>;
type DeltaFn = Box<dyn FnMut(f32, f32)>;
type NotifyFn = Box<dyn FnMut()>;

/// Registered consumer callbacks. All slots optional; callbacks run
/// synchronously and outside any catch boundary, so a panicking consumer
/// propagates to the caller of `process`.
#[derive(Default)]
struct Callbacks {
    swipe: Option<DirectionFn>,
    swipe_left: Option<NotifyFn>,
    swipe_right: Option<NotifyFn>,
    swipe_up: Option<NotifyFn>,
    swipe_down: Option<NotifyFn>,
    tap: Option<PositionFn>,
    double_tap: Option<NotifyFn>,
    long_press: Option<NotifyFn>,
    pinch: Option<ScaleFn>,
    drag: Option<DeltaFn>,
    drag_start: Option<NotifyFn>,
    drag_end: Option<NotifyFn>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("swipe", &self.swipe.is_some())
            .field("swipe_left", &self.swipe_left.is_some())
            .field("swipe_right", &self.swipe_right.is_some())
            .field("swipe_up", &self.swipe_up.is_some())
            .field("swipe_down", &self.swipe_down.is_some())
            .field("tap", &self.tap.is_some())
            .field("double_tap", &self.double_tap.is_some())
            .field("long_press", &self.long_press.is_some())
            .field("pinch", &self.pinch.is_some())
            .field("drag", &self.drag.is_some())
            .field("drag_start", &self.drag_start.is_some())
            .field("drag_end", &self.drag_end.is_some())
            .finish()
    }
}

/// Unified gesture recognizer.
///
/// One instance per bound element; the same [`GestureState`] mutates across
/// the binding's entire lifetime and is reset to idle when a session ends.
#[derive(Debug)]
pub struct GestureRecognizer {
    /// Configuration.
    config: GestureConfig,
    /// Registered callbacks.
    callbacks: Callbacks,
    /// Public state snapshot.
    state: GestureState,
    /// Timestamp of the down event, bounds swipe/tap duration.
    sequence_start_ms: f64,
    /// Previous sample, for instantaneous velocity. Never the session start:
    /// velocity reflects current motion, not a session average.
    last_sample: Point,
    /// Timestamp of the previous sample.
    last_sample_ms: f64,
    /// Timestamp of the most recent qualifying tap.
    last_tap_ms: Option<f64>,
    /// Distance between the two touch points when the second touch landed.
    /// Cleared when the session ends, not when touches drop below two.
    initial_pinch_distance: Option<f32>,
    /// Pending long-press deadline; `None` means disarmed.
    long_press_deadline_ms: Option<f64>,
}

impl GestureRecognizer {
    /// Create a recognizer with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    /// Create a recognizer with a custom config.
    #[must_use]
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            callbacks: Callbacks::default(),
            state: GestureState::default(),
            sequence_start_ms: 0.0,
            last_sample: Point::ORIGIN,
            last_sample_ms: 0.0,
            last_tap_ms: None,
            initial_pinch_distance: None,
            long_press_deadline_ms: None,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Toggle the master kill-switch at runtime.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    /// Read-only snapshot of the current gesture state.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Pending long-press deadline on the host event clock, if armed.
    /// Drivers schedule their single per-session timer from this.
    pub fn long_press_deadline_ms(&self) -> Option<f64> {
        self.long_press_deadline_ms
    }

    /// Register the 4-directional swipe callback (`direction`, `distance`).
    pub fn on_swipe<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(SwipeDirection, f32) + 'static,
    {
        self.callbacks.swipe = Some(Box::new(f));
        self
    }

    /// Register the leftward swipe callback.
    pub fn on_swipe_left<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.callbacks.swipe_left = Some(Box::new(f));
        self
    }

    /// Register the rightward swipe callback.
    pub fn on_swipe_right<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.callbacks.swipe_right = Some(Box::new(f));
        self
    }

    /// Register the upward swipe callback.
    pub fn on_swipe_up<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.callbacks.swipe_up = Some(Box::new(f));
        self
    }

    /// Register the downward swipe callback.
    pub fn on_swipe_down<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.callbacks.swipe_down = Some(Box::new(f));
        self
    }

    /// Register the tap callback; receives the tap position.
    pub fn on_tap<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(Point) + 'static,
    {
        self.callbacks.tap = Some(Box::new(f));
        self
    }

    /// Register the double-tap callback.
    pub fn on_double_tap<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.callbacks.double_tap = Some(Box::new(f));
        self
    }

    /// Register the long-press callback. The long-press deadline is armed
    /// on down only when this is set.
    pub fn on_long_press<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.callbacks.long_press = Some(Box::new(f));
        self
    }

    /// Register the pinch callback; receives the scale ratio.
    pub fn on_pinch<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(f32) + 'static,
    {
        self.callbacks.pinch = Some(Box::new(f));
        self
    }

    /// Register the continuous drag callback (`delta_x`, `delta_y`).
    pub fn on_drag<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(f32, f32) + 'static,
    {
        self.callbacks.drag = Some(Box::new(f));
        self
    }

    /// Register the drag-start callback, invoked on every down.
    pub fn on_drag_start<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.callbacks.drag_start = Some(Box::new(f));
        self
    }

    /// Register the drag-end callback, invoked unconditionally on up.
    pub fn on_drag_end<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.callbacks.drag_end = Some(Box::new(f));
        self
    }

    /// Process one normalized input event.
    pub fn process(&mut self, event: &InputEvent) {
        if !self.config.enabled {
            return;
        }
        match event {
            InputEvent::Down(sample) => self.on_down(sample),
            InputEvent::Move(sample) => self.on_move(sample),
            InputEvent::Up(sample) => self.on_up(sample),
        }
    }

    /// Fire the long-press callback if the armed deadline has elapsed.
    ///
    /// Drivers call this from their timer; firing disarms the deadline so a
    /// session produces at most one long-press. A call after movement or
    /// session end is a no-op, which makes stale host timers harmless.
    pub fn check_long_press(&mut self, now_ms: f64) {
        if !self.config.enabled || !self.state.is_dragging {
            return;
        }
        let Some(deadline) = self.long_press_deadline_ms else {
            return;
        };
        if now_ms < deadline {
            return;
        }
        self.long_press_deadline_ms = None;
        if let Some(cb) = self.callbacks.long_press.as_mut() {
            cb();
        }
    }

    /// Abandon any in-flight session without emitting a terminal
    /// classification. Used by bindings when the target element changes.
    pub fn reset(&mut self) {
        self.end_session();
    }

    fn on_down(&mut self, sample: &PointerSample) {
        // A new start implicitly resets the previous session; sessions
        // never stack. The pinch baseline is the exception: it changes
        // only on the down that brings the touch count to exactly two,
        // and otherwise survives until the session ends.
        let pinch_baseline = self.initial_pinch_distance;
        self.state.clear();
        self.state.is_dragging = true;
        self.state.is_touching = sample.source == PointerSource::Touch;
        self.state.start_x = sample.position.x;
        self.state.start_y = sample.position.y;
        self.state.current_x = sample.position.x;
        self.state.current_y = sample.position.y;
        self.sequence_start_ms = sample.timestamp_ms;
        self.last_sample = sample.position;
        self.last_sample_ms = sample.timestamp_ms;
        self.initial_pinch_distance = if sample.touch_count == 2 {
            sample
                .secondary
                .map(|second| sample.position.distance(&second))
        } else {
            pinch_baseline
        };
        self.long_press_deadline_ms = self
            .callbacks
            .long_press
            .is_some()
            .then(|| sample.timestamp_ms + self.config.long_press_delay_ms);
        if let Some(cb) = self.callbacks.drag_start.as_mut() {
            cb();
        }
    }

    fn on_move(&mut self, sample: &PointerSample) {
        if !self.state.is_dragging {
            // Move with no prior start: no baseline to reconstruct.
            return;
        }

        // Any movement invalidates long-press intent. Hard rule, no slop.
        self.long_press_deadline_ms = None;

        let dt = sample.timestamp_ms - self.last_sample_ms;
        if dt > 0.0 {
            self.state.velocity_x = (f64::from(sample.position.x - self.last_sample.x) / dt) as f32;
            self.state.velocity_y = (f64::from(sample.position.y - self.last_sample.y) / dt) as f32;
        }
        self.last_sample = sample.position;
        self.last_sample_ms = sample.timestamp_ms;

        self.state.current_x = sample.position.x;
        self.state.current_y = sample.position.y;
        self.state.delta_x = self.state.current_x - self.state.start_x;
        self.state.delta_y = self.state.current_y - self.state.start_y;
        self.state.direction = dominant_direction(self.state.delta_x, self.state.delta_y);

        if let (Some(second), Some(initial)) = (sample.secondary, self.initial_pinch_distance) {
            if initial > 0.0 {
                let scale = sample.position.distance(&second) / initial;
                if let Some(cb) = self.callbacks.pinch.as_mut() {
                    cb(scale);
                }
            }
        }

        if let Some(cb) = self.callbacks.drag.as_mut() {
            cb(self.state.delta_x, self.state.delta_y);
        }
    }

    fn on_up(&mut self, sample: &PointerSample) {
        if !self.state.is_dragging {
            return;
        }

        self.long_press_deadline_ms = None;

        // The end event's coordinates count toward the final deltas.
        self.state.current_x = sample.position.x;
        self.state.current_y = sample.position.y;
        self.state.delta_x = self.state.current_x - self.state.start_x;
        self.state.delta_y = self.state.current_y - self.state.start_y;

        let distance = Point::new(self.state.start_x, self.state.start_y).distance(&sample.position);
        let duration = sample.timestamp_ms - self.sequence_start_ms;

        if distance > self.config.threshold && duration < SWIPE_MAX_DURATION_MS {
            // Swipe direction comes from the final deltas, not the
            // last move-time direction.
            let direction = dominant_direction(self.state.delta_x, self.state.delta_y);
            self.state.direction = direction;
            if let Some(cb) = self.callbacks.swipe.as_mut() {
                cb(direction, distance);
            }
            let directional = match direction {
                SwipeDirection::Left => self.callbacks.swipe_left.as_mut(),
                SwipeDirection::Right => self.callbacks.swipe_right.as_mut(),
                SwipeDirection::Up => self.callbacks.swipe_up.as_mut(),
                SwipeDirection::Down => self.callbacks.swipe_down.as_mut(),
                SwipeDirection::None => None,
            };
            if let Some(cb) = directional {
                cb();
            }
        } else if distance < TAP_MAX_DISTANCE && duration < TAP_MAX_DURATION_MS {
            let is_double = self
                .last_tap_ms
                .is_some_and(|last| sample.timestamp_ms - last < DOUBLE_TAP_WINDOW_MS);
            if is_double {
                // Consume the tap memory so a third rapid tap starts a
                // fresh sequence instead of re-triggering.
                self.last_tap_ms = None;
                if let Some(cb) = self.callbacks.double_tap.as_mut() {
                    cb();
                }
            } else {
                self.last_tap_ms = Some(sample.timestamp_ms);
                if let Some(cb) = self.callbacks.tap.as_mut() {
                    cb(sample.position);
                }
            }
        }
        // A moved-but-short, slow drag emits no discrete gesture; it was
        // already observable through the continuous drag callbacks.

        if let Some(cb) = self.callbacks.drag_end.as_mut() {
            cb();
        }
        self.end_session();
    }

    fn end_session(&mut self) {
        self.state.clear();
        self.sequence_start_ms = 0.0;
        self.last_sample = Point::ORIGIN;
        self.last_sample_ms = 0.0;
        self.initial_pinch_distance = None;
        self.long_press_deadline_ms = None;
        // last_tap_ms survives: the double-tap window spans sessions.
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-dominance direction: the axis with the larger absolute delta wins,
/// ties resolve through the vertical branch, zero motion has no direction.
fn dominant_direction(delta_x: f32, delta_y: f32) -> SwipeDirection {
    if delta_x == 0.0 && delta_y == 0.0 {
        SwipeDirection::None
    } else if delta_x.abs() > delta_y.abs() {
        if delta_x > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }
    } else if delta_y > 0.0 {
        SwipeDirection::Down
    } else {
        SwipeDirection::Up
    }
}
