//! Error types for window and event loop setup.

use std::fmt;

pub use winit::error::{EventLoopError, OsError};

/// Errors that can occur while creating windows or running the event loop.
#[derive(Debug)]
pub enum WindowError {
    /// The platform refused to create a window.
    Os(OsError),

    /// The event loop could not be created or exited abnormally.
    EventLoop(EventLoopError),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::Os(err) => write!(f, "Failed to create window: {}", err),
            WindowError::EventLoop(err) => write!(f, "Event loop error: {}", err),
        }
    }
}

impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WindowError::Os(err) => Some(err),
            WindowError::EventLoop(err) => Some(err),
        }
    }
}

impl From<OsError> for WindowError {
    fn from(err: OsError) -> Self {
        WindowError::Os(err)
    }
}

impl From<EventLoopError> for WindowError {
    fn from(err: EventLoopError) -> Self {
        WindowError::EventLoop(err)
    }
}

/// Result type alias for window operations.
pub type WindowResult<T> = Result<T, WindowError>;
