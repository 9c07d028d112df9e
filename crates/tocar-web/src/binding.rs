//! DOM binding for the gesture engine.
//!
//! [`GestureBinding`] owns a [`GestureRecognizer`] plus one persistent
//! closure per subscribed event type, and moves the whole listener set
//! between targets through [`bind`]. Attach and detach are synchronous:
//! after `bind(None)` returns, no callback can fire again.
//!
//! [`bind`]: GestureBinding::bind

use crate::convert::{sample_from_mouse, sample_from_touch_active, sample_from_touch_ended};
use std::cell::RefCell;
use std::rc::Rc;
use tocar_core::{GestureRecognizer, InputEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, MouseEvent, TouchEvent};

type SharedRecognizer = Rc<RefCell<GestureRecognizer>>;
type SharedTimer = Rc<RefCell<Option<i32>>>;
type EventClosure = Closure<dyn FnMut(web_sys::Event)>;

/// Binds a gesture engine to one DOM event target at a time.
///
/// The six mouse/touch listeners (down/move/up, mirrored for both
/// sources) attach as a unit and detach as a unit. Dropping the binding
/// detaches too, so a leaked listener set is impossible once the handle
/// goes away; `bind(None)` remains the explicit teardown path.
pub struct GestureBinding {
    engine: SharedRecognizer,
    target: Option<EventTarget>,
    mousedown: EventClosure,
    mousemove: EventClosure,
    mouseup: EventClosure,
    touchstart: EventClosure,
    touchmove: EventClosure,
    touchend: EventClosure,
    // Kept alive for the lifetime of the binding; the down closures hold
    // their own clones for scheduling.
    _on_timeout: Rc<Closure<dyn FnMut()>>,
    timer: SharedTimer,
}

impl GestureBinding {
    /// Wrap a configured recognizer in a DOM binding.
    ///
    /// The binding starts unbound; call [`bind`](Self::bind) to attach.
    #[must_use]
    pub fn new(engine: GestureRecognizer) -> Self {
        console_error_panic_hook::set_once();

        let engine: SharedRecognizer = Rc::new(RefCell::new(engine));
        let timer: SharedTimer = Rc::new(RefCell::new(None));

        // One deferred callback per session: scheduled on down, cleared
        // on move/up/unbind. The engine disarms its own deadline on those
        // paths too, so a stale timeout firing anyway is a no-op.
        let on_timeout = {
            let engine = Rc::clone(&engine);
            let timer = Rc::clone(&timer);
            Rc::new(Closure::<dyn FnMut()>::new(move || {
                *timer.borrow_mut() = None;
                if let Some(now) = performance_now() {
                    engine.borrow_mut().check_long_press(now);
                }
            }))
        };

        let mousedown = {
            let engine = Rc::clone(&engine);
            let timer = Rc::clone(&timer);
            let on_timeout = Rc::clone(&on_timeout);
            Closure::new(move |e: web_sys::Event| {
                if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
                    engine
                        .borrow_mut()
                        .process(&InputEvent::Down(sample_from_mouse(mouse)));
                    schedule_long_press(&engine, &timer, &on_timeout);
                }
            })
        };

        let mousemove = {
            let engine = Rc::clone(&engine);
            let timer = Rc::clone(&timer);
            Closure::new(move |e: web_sys::Event| {
                if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
                    let was_active = engine.borrow().state().is_dragging;
                    engine
                        .borrow_mut()
                        .process(&InputEvent::Move(sample_from_mouse(mouse)));
                    if was_active {
                        clear_pending(&timer);
                    }
                }
            })
        };

        let mouseup = {
            let engine = Rc::clone(&engine);
            let timer = Rc::clone(&timer);
            Closure::new(move |e: web_sys::Event| {
                if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
                    engine
                        .borrow_mut()
                        .process(&InputEvent::Up(sample_from_mouse(mouse)));
                    clear_pending(&timer);
                }
            })
        };

        let touchstart = {
            let engine = Rc::clone(&engine);
            let timer = Rc::clone(&timer);
            let on_timeout = Rc::clone(&on_timeout);
            Closure::new(move |e: web_sys::Event| {
                if let Some(sample) = e.dyn_ref::<TouchEvent>().and_then(sample_from_touch_active) {
                    engine.borrow_mut().process(&InputEvent::Down(sample));
                    schedule_long_press(&engine, &timer, &on_timeout);
                }
            })
        };

        let touchmove = {
            let engine = Rc::clone(&engine);
            let timer = Rc::clone(&timer);
            Closure::new(move |e: web_sys::Event| {
                if let Some(sample) = e.dyn_ref::<TouchEvent>().and_then(sample_from_touch_active) {
                    engine.borrow_mut().process(&InputEvent::Move(sample));
                    clear_pending(&timer);
                }
            })
        };

        let touchend = {
            let engine = Rc::clone(&engine);
            let timer = Rc::clone(&timer);
            Closure::new(move |e: web_sys::Event| {
                let Some(sample) = e.dyn_ref::<TouchEvent>().and_then(sample_from_touch_ended)
                else {
                    return;
                };
                // A lifted finger only ends the session once no touches
                // remain; dropping from two to one keeps the gesture (and
                // its pinch baseline) in flight.
                if sample.touch_count == 0 {
                    engine.borrow_mut().process(&InputEvent::Up(sample));
                }
                clear_pending(&timer);
            })
        };

        Self {
            engine,
            target: None,
            mousedown,
            mousemove,
            mouseup,
            touchstart,
            touchmove,
            touchend,
            _on_timeout: on_timeout,
            timer,
        }
    }

    /// Shared handle to the underlying recognizer, for registering
    /// callbacks and reading the state snapshot.
    ///
    /// The engine is mutably borrowed while it dispatches callbacks, so a
    /// callback must not call back into this handle.
    #[must_use]
    pub fn recognizer(&self) -> SharedRecognizer {
        Rc::clone(&self.engine)
    }

    /// Currently bound target, if any.
    pub fn target(&self) -> Option<&EventTarget> {
        self.target.as_ref()
    }

    /// Rebind the listener set to a new target, or pass `None` to unbind.
    ///
    /// Detach happens first and synchronously; an in-flight session on the
    /// old target is abandoned without a terminal classification. Binding
    /// the same element again leaves exactly one listener set attached.
    pub fn bind(&mut self, target: Option<&EventTarget>) {
        self.detach();
        if let Some(target) = target {
            for (name, closure) in self.listeners() {
                target
                    .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                    .ok();
            }
            self.target = Some(target.clone());
        }
    }

    /// JSON snapshot of the public gesture state, for JS-side consumers.
    #[must_use]
    pub fn state_json(&self) -> String {
        serde_json::to_string(self.engine.borrow().state()).unwrap_or_default()
    }

    fn listeners(&self) -> [(&'static str, &EventClosure); 6] {
        [
            ("mousedown", &self.mousedown),
            ("mousemove", &self.mousemove),
            ("mouseup", &self.mouseup),
            ("touchstart", &self.touchstart),
            ("touchmove", &self.touchmove),
            ("touchend", &self.touchend),
        ]
    }

    fn detach(&mut self) {
        if let Some(target) = self.target.take() {
            for (name, closure) in self.listeners() {
                target
                    .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                    .ok();
            }
        }
        clear_pending(&self.timer);
        self.engine.borrow_mut().reset();
    }
}

impl Drop for GestureBinding {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Schedule the single per-session long-press timeout, if the engine
/// armed a deadline for this down. A missing `window` (or a down with no
/// long-press handler registered) degrades to "no timer" rather than
/// an error.
fn schedule_long_press(
    engine: &SharedRecognizer,
    timer: &SharedTimer,
    on_timeout: &Rc<Closure<dyn FnMut()>>,
) {
    clear_pending(timer);
    if engine.borrow().long_press_deadline_ms().is_none() {
        return;
    }
    let delay = engine.borrow().config().long_press_delay_ms;
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback: &js_sys::Function = (**on_timeout).as_ref().unchecked_ref();
    if let Ok(id) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(callback, delay as i32)
    {
        *timer.borrow_mut() = Some(id);
    }
}

fn clear_pending(timer: &SharedTimer) {
    if let Some(id) = timer.borrow_mut().take() {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(id);
        }
    }
}

fn performance_now() -> Option<f64> {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
}
