//! Typed per-window signals.
//!
//! Every [`Window`](crate::window::Window) owns one [`WindowSignals`]. The
//! app loop feeds translated [`WindowEvent`]s into [`WindowSignals::dispatch`],
//! which emits the matching [`Event`]. Objects subscribe with their own
//! [`EventContext`](zeta_event::EventContext):
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use zeta_event::EventContext;
//! use zeta_winit::event::WindowEvent;
//! use zeta_winit::WindowSignals;
//!
//! let signals = WindowSignals::new();
//! let running = Rc::new(Cell::new(true));
//!
//! let ctx = EventContext::new();
//! let flag = Rc::clone(&running);
//! ctx.register_event(&signals.on_quit, move |_| flag.set(false));
//!
//! signals.dispatch(&WindowEvent::CloseRequested);
//! assert!(!running.get());
//! ```

use std::cell::Cell;

use zeta_core::geometry::{LogicalPosition, LogicalSize, PhysicalPosition};
use zeta_core::profiling::profile_function;
use zeta_event::Event;

use crate::event::{ElementState, HandleStatus, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};

#[derive(Debug, Default)]
pub struct WindowSignals {
    /// Close requested. Subscribing takes over the decision to exit.
    pub on_quit: Event<()>,
    pub on_resize: Event<LogicalSize<u32>>,
    pub on_moved: Event<PhysicalPosition<i32>>,
    pub on_scale_factor: Event<f64>,
    pub on_focus: Event<bool>,
    pub on_mouse_button: Event<(MouseButton, ElementState)>,
    pub on_mouse_wheel: Event<MouseScrollDelta>,
    pub on_mouse_move: Event<LogicalPosition<f64>>,
    pub on_mouse_enter: Event<()>,
    pub on_mouse_leave: Event<()>,
    pub on_key: Event<KeyEvent>,

    size: Cell<LogicalSize<u32>>,
    scale_factor: Cell<Option<f64>>,
}

impl WindowSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_state(size: LogicalSize<u32>, scale_factor: f64) -> Self {
        let signals = Self::new();
        signals.size.set(size);
        signals.scale_factor.set(Some(scale_factor));
        signals
    }

    /// Last logical size seen by a resize.
    pub fn size(&self) -> LogicalSize<u32> {
        self.size.get()
    }

    /// Last scale factor seen, `1.0` until one is known.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor.get().unwrap_or(1.0)
    }

    /// Emit the signal matching `event`.
    ///
    /// Returns [`HandleStatus::ignored`] when the signal has no subscribers.
    /// A handled close request is reported as consumed, so the app loop
    /// leaves the exit decision to the subscribers.
    pub fn dispatch(&self, event: &WindowEvent) -> HandleStatus {
        profile_function!();
        match event {
            WindowEvent::CloseRequested => {
                let status = fire(&self.on_quit, ());
                if status.is_handled() {
                    HandleStatus::consumed()
                } else {
                    status
                }
            }
            WindowEvent::WindowResized(size) => {
                self.size.set(*size);
                fire(&self.on_resize, *size)
            }
            WindowEvent::WindowMoved(pos) => fire(&self.on_moved, *pos),
            WindowEvent::ScaleFactorChanged(scale) => {
                self.scale_factor.set(Some(*scale));
                fire(&self.on_scale_factor, *scale)
            }
            WindowEvent::Focused(focused) => fire(&self.on_focus, *focused),
            WindowEvent::MouseButtonDown(button) => {
                fire(&self.on_mouse_button, (*button, ElementState::Pressed))
            }
            WindowEvent::MouseButtonUp(button) => {
                fire(&self.on_mouse_button, (*button, ElementState::Released))
            }
            WindowEvent::MouseScrolled(delta) => fire(&self.on_mouse_wheel, *delta),
            WindowEvent::MouseMoved(pos) => fire(&self.on_mouse_move, *pos),
            WindowEvent::MouseEntered => fire(&self.on_mouse_enter, ()),
            WindowEvent::MouseLeft => fire(&self.on_mouse_leave, ()),
            WindowEvent::KeyInput(key) => fire(&self.on_key, key.clone()),
        }
    }
}

fn fire<A: 'static>(signal: &Event<A>, payload: A) -> HandleStatus {
    if signal.is_empty() {
        return HandleStatus::ignored();
    }
    signal.emit(payload);
    HandleStatus::handled()
}
