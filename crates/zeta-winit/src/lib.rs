pub mod app;
pub mod error;
pub mod event;
pub mod signals;
pub mod window;

// Re-export WindowId for convenience
pub use winit::window::WindowId;

pub use error::{WindowError, WindowResult};
pub use signals::WindowSignals;
