//! Browser binding for the tocar gesture engine.
//!
//! This crate attaches a [`GestureRecognizer`] to a DOM `EventTarget` and
//! drives it from native mouse/touch events. Everything browser-facing is
//! WASM-only; on other targets the crate re-exports the core types and
//! nothing else.
//!
//! ```ignore
//! use tocar_web::{GestureBinding, GestureRecognizer};
//!
//! let mut engine = GestureRecognizer::new();
//! engine.on_swipe_left(|| /* next product page */ ());
//! engine.on_swipe_right(|| /* previous product page */ ());
//!
//! let mut gestures = GestureBinding::new(engine);
//! gestures.bind(Some(carousel_element.as_ref()));
//! // ...later, before the element is discarded:
//! gestures.bind(None);
//! ```

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod binding;
#[cfg(target_arch = "wasm32")]
pub mod convert;

#[cfg(target_arch = "wasm32")]
pub use binding::GestureBinding;

pub use tocar_core::{
    GestureConfig, GestureRecognizer, GestureState, InputEvent, Point, PointerSample,
    PointerSource, SwipeDirection,
};
