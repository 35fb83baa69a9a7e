use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::{
    error::{WindowError, WindowResult},
    event::WindowEvent,
    window::{Window, WindowDescriptor},
};

pub struct AppCtx<'a> {
    event_loop: &'a ActiveEventLoop,
}

impl AppCtx<'_> {
    pub fn create_window(&mut self, descriptor: WindowDescriptor) -> WindowResult<Window> {
        Ok(Window::new(self.event_loop, descriptor)?)
    }

    pub fn exit(&self) {
        self.event_loop.exit();
    }

    pub fn exiting(&self) -> bool {
        self.event_loop.exiting()
    }
}

pub trait App {
    /// Called once when the app starts, before the first update.
    #[allow(unused_variables)]
    fn on_start(&mut self, ctx: &mut AppCtx) {}

    /// Called once per loop iteration, after pending window events have been
    /// dispatched to their signals.
    #[allow(unused_variables)]
    fn update(&mut self, ctx: &mut AppCtx) {}

    /// Look up a window owned by the app so its input can be dispatched.
    fn window(&self, id: WindowId) -> Option<&Window>;

    /// Called when the app is about to exit.
    #[allow(unused_variables)]
    fn on_exit(&mut self, ctx: &mut AppCtx) {}
}

pub type AppFactory = fn(ctx: &mut AppCtx) -> WindowResult<Box<dyn App>>;

struct AppProxy {
    factory: AppFactory,
    app: Option<Box<dyn App>>,
    error: Option<WindowError>,
}

impl winit::application::ApplicationHandler for AppProxy {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }

        let mut ctx = AppCtx { event_loop };
        match (self.factory)(&mut ctx) {
            Ok(mut app) => {
                app.on_start(&mut ctx);
                self.app = Some(app);
            }
            Err(err) => {
                tracing::error!("failed to start app: {}", err);
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_mut() {
            let mut ctx = AppCtx { event_loop };
            app.update(&mut ctx);
            zeta_core::profiling::new_frame();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(app) = self.app.as_ref() else {
            return;
        };
        let Some(window) = app.window(window_id) else {
            tracing::trace!("event for unknown window {:?}", window_id);
            return;
        };

        let signals = window.signals();
        let Some(event) = WindowEvent::from_winit(event, signals.scale_factor()) else {
            return;
        };

        let status = signals.dispatch(&event);

        // Default handling when nobody took over the close request.
        if matches!(event, WindowEvent::CloseRequested) && !status.is_consumed() {
            tracing::info!("Close requested for window {:?}", window_id);
            event_loop.exit();
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_mut() {
            let mut ctx = AppCtx { event_loop };
            app.on_exit(&mut ctx);
        }
    }
}

/// Run the application with the given factory function.
///
/// Blocks until the event loop exits.
pub fn run_app(factory: AppFactory) -> WindowResult<()> {
    use winit::event_loop::{ControlFlow, EventLoop};
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app_proxy = AppProxy {
        factory,
        app: None,
        error: None,
    };
    event_loop.run_app(&mut app_proxy)?;

    match app_proxy.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
