//! Core types and classification logic for the tocar gesture engine.
//!
//! This crate is platform-agnostic: it consumes normalized
//! [`InputEvent`]s stamped with the host's monotonic event clock and
//! dispatches gesture notifications to registered callbacks. Pair it with
//! `tocar-web` to drive it from DOM mouse/touch events, or drive it
//! directly from any event source (including tests).
//!
//! ```
//! use tocar_core::{GestureRecognizer, InputEvent, Point, PointerSample};
//!
//! let mut gestures = GestureRecognizer::new();
//! gestures.on_swipe_left(|| println!("next page"));
//!
//! gestures.process(&InputEvent::Down(PointerSample::mouse(Point::new(200.0, 100.0), 0.0)));
//! gestures.process(&InputEvent::Up(PointerSample::mouse(Point::new(80.0, 100.0), 150.0)));
//! ```

mod event;
mod geometry;
pub mod gesture;
mod state;

pub use event::{InputEvent, PointerSample, PointerSource, SwipeDirection};
pub use geometry::Point;
pub use gesture::{
    GestureConfig, GestureRecognizer, DOUBLE_TAP_WINDOW_MS, SWIPE_MAX_DURATION_MS,
    TAP_MAX_DISTANCE, TAP_MAX_DURATION_MS,
};
pub use state::GestureState;
