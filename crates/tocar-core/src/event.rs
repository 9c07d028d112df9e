//! Normalized input events for the gesture engine.
//!
//! Host adapters (browser bindings, test drivers) extract coordinates from
//! their native mouse/touch event shapes into [`PointerSample`] before any
//! classification runs, so the state machine itself is source-agnostic.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Where a pointer sample originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PointerSource {
    /// Mouse pointer
    #[default]
    Mouse,
    /// Touch contact
    Touch,
}

/// Cardinal direction of a swipe, or `None` while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SwipeDirection {
    /// No dominant direction yet
    #[default]
    None,
    /// Leftward motion (negative x)
    Left,
    /// Rightward motion (positive x)
    Right,
    /// Upward motion (negative y)
    Up,
    /// Downward motion (positive y)
    Down,
}

/// One normalized pointer sample.
///
/// `timestamp_ms` is the host's monotonic event timestamp in milliseconds
/// (DOM `event.timeStamp` / `performance.now()` base). The engine never
/// reads a clock of its own; all timing decisions come from these stamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Primary pointer position.
    pub position: Point,
    /// Second active touch point, when two or more touches are down.
    /// Touches past the second are never incorporated.
    pub secondary: Option<Point>,
    /// Total active touch count reported by the host event (1 for mouse).
    pub touch_count: u8,
    /// Input source.
    pub source: PointerSource,
    /// Host event timestamp in milliseconds.
    pub timestamp_ms: f64,
}

impl PointerSample {
    /// Sample from a mouse event.
    #[must_use]
    pub const fn mouse(position: Point, timestamp_ms: f64) -> Self {
        Self {
            position,
            secondary: None,
            touch_count: 1,
            source: PointerSource::Mouse,
            timestamp_ms,
        }
    }

    /// Sample from a touch event.
    #[must_use]
    pub const fn touch(
        position: Point,
        secondary: Option<Point>,
        touch_count: u8,
        timestamp_ms: f64,
    ) -> Self {
        Self {
            position,
            secondary,
            touch_count,
            source: PointerSource::Touch,
            timestamp_ms,
        }
    }
}

/// Input phases driven by the host adapter.
///
/// mousedown/touchstart map to `Down`, mousemove/touchmove to `Move`,
/// mouseup/touchend/touchcancel to `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer or first/additional touch went down.
    Down(PointerSample),
    /// Pointer or touch moved.
    Move(PointerSample),
    /// Pointer or last touch lifted.
    Up(PointerSample),
}

impl InputEvent {
    /// The sample carried by this event.
    #[must_use]
    pub const fn sample(&self) -> &PointerSample {
        match self {
            Self::Down(s) | Self::Move(s) | Self::Up(s) => s,
        }
    }
}
