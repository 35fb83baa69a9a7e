//! Zeta - a small editor sample built around typed events
//!
//! Zeta provides:
//!
//! - **Events**: typed broadcast signals with automatic subscriber cleanup
//! - **Windowing**: winit windows that publish their input as typed events
//! - **Core utilities**: logging, configuration and profiling hooks
//!
//! # Quick Start
//!
//! ```ignore
//! use zeta::prelude::*;
//!
//! struct MyApp {
//!     window: Window,
//!     events: EventContext,
//! }
//!
//! impl App for MyApp {
//!     fn window(&self, id: WindowId) -> Option<&Window> {
//!         (self.window.id() == id).then_some(&self.window)
//!     }
//! }
//!
//! fn main() -> Result<(), WindowError> {
//!     run_app(|ctx| {
//!         let window = ctx.create_window(WindowDescriptor::new("My App", 1280, 720))?;
//!         let events = EventContext::new();
//!         events.register_event(&window.signals().on_resize, |size| {
//!             tracing::info!("resized to {}x{}", size.width, size.height);
//!         });
//!         Ok(Box::new(MyApp { window, events }))
//!     })
//! }
//! ```

// Re-export core types
pub use zeta_core as core;
pub use zeta_event as event;

pub use zeta_core::config::{BenchmarkMode, Config};
pub use zeta_event::{ContextId, Event, EventContext, EventId};

// Re-export sub-crates based on features
#[cfg(feature = "winit")]
pub use zeta_winit as winit;
#[cfg(feature = "winit")]
pub use zeta_winit::{
    WindowError, WindowId, WindowResult, WindowSignals,
    app::{App, AppCtx, AppFactory, run_app},
    event::{HandleStatus, KeyEvent, WindowEvent},
    window::{Window, WindowDescriptor},
};

/// Initialize logging and profiling from `config`.
pub fn init(config: &Config) {
    zeta_core::logging::init_from_config(config);

    if let Some(backend) = zeta_core::profiling::ProfilingBackend::from_mode(config.benchmark) {
        zeta_core::profiling::init_profiling(backend);
    }
    tracing::debug!("zeta initialized with {:?}", config);
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use zeta_core::config::{BenchmarkMode, Config};
    pub use zeta_core::geometry::{LogicalPosition, LogicalSize, PhysicalPosition, PhysicalSize};
    pub use zeta_event::{Event, EventContext};

    // Winit types
    #[cfg(feature = "winit")]
    pub use zeta_winit::{
        WindowError, WindowId, WindowSignals,
        app::{App, AppCtx, run_app},
        event::{HandleStatus, KeyEvent, WindowEvent},
        window::{Window, WindowDescriptor},
    };
}
