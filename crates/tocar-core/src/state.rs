//! Public gesture state snapshot.

use crate::event::SwipeDirection;
use serde::{Deserialize, Serialize};

/// Read-only snapshot of the current gesture session.
///
/// One instance lives per bound element for the lifetime of the binding.
/// It is reset to its idle defaults when a session ends, not destroyed;
/// consumers read it through [`crate::GestureRecognizer::state`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GestureState {
    /// Whether a pointer/touch sequence is currently active.
    pub is_dragging: bool,
    /// Whether the active sequence originated from a touch source.
    pub is_touching: bool,
    /// X coordinate at gesture start, fixed for the session.
    pub start_x: f32,
    /// Y coordinate at gesture start, fixed for the session.
    pub start_y: f32,
    /// Latest observed x coordinate.
    pub current_x: f32,
    /// Latest observed y coordinate.
    pub current_y: f32,
    /// `current_x - start_x`, recomputed on every move.
    pub delta_x: f32,
    /// `current_y - start_y`, recomputed on every move.
    pub delta_y: f32,
    /// Instantaneous x velocity between the last two samples, px/ms.
    pub velocity_x: f32,
    /// Instantaneous y velocity between the last two samples, px/ms.
    pub velocity_y: f32,
    /// Dominant axis of the deltas at the last sample. Not authoritative
    /// until gesture end; swipe direction is recomputed from final deltas.
    pub direction: SwipeDirection,
}

impl GestureState {
    /// Return the snapshot to its idle defaults.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
