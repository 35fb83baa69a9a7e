use std::cell::Cell;
use std::rc::Rc;

use zeta::prelude::*;
use zeta::winit::event::{ElementState, Key, NamedKey};

pub const BACKGROUND: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// State the editor's handlers write to.
#[derive(Debug)]
pub struct EditorState {
    running: Cell<bool>,
    size: Cell<LogicalSize<u32>>,
}

impl EditorState {
    pub fn new(size: LogicalSize<u32>) -> Rc<Self> {
        Rc::new(Self {
            running: Cell::new(true),
            size: Cell::new(size),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn size(&self) -> LogicalSize<u32> {
        self.size.get()
    }

    /// Subscribe `events` to the window signals the editor reacts to.
    pub fn attach(self: &Rc<Self>, events: &EventContext, signals: &WindowSignals) {
        let state = Rc::clone(self);
        events.register_event(&signals.on_quit, move |_| {
            tracing::info!("quit requested");
            state.running.set(false);
        });

        let state = Rc::clone(self);
        events.register_event(&signals.on_resize, move |size| {
            tracing::debug!("editor resized to {}x{}", size.width, size.height);
            state.size.set(*size);
        });

        let state = Rc::clone(self);
        events.register_event(&signals.on_key, move |key| {
            if key.state == ElementState::Pressed && key.logical_key == Key::Named(NamedKey::Escape) {
                state.running.set(false);
            }
        });
    }
}

pub struct Editor {
    window: Window,
    state: Rc<EditorState>,
    events: EventContext,
}

impl Editor {
    pub fn new(window: Window) -> Self {
        let state = EditorState::new(window.logical_size());
        let events = EventContext::new();
        state.attach(&events, window.signals());

        Self {
            window,
            state,
            events,
        }
    }
}

impl App for Editor {
    fn on_start(&mut self, _ctx: &mut AppCtx) {
        let size = self.state.size();
        tracing::info!(
            "editor started ({}x{}, background {:?}, {} signals joined)",
            size.width,
            size.height,
            self.window.background(),
            self.events.joined_count()
        );
    }

    fn update(&mut self, ctx: &mut AppCtx) {
        if !self.state.is_running() && !ctx.exiting() {
            ctx.exit();
        }
    }

    fn window(&self, id: WindowId) -> Option<&Window> {
        (self.window.id() == id).then_some(&self.window)
    }

    fn on_exit(&mut self, _ctx: &mut AppCtx) {
        tracing::info!("editor shutting down");
    }
}
