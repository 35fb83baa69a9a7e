use std::sync::Arc;

use zeta_core::geometry::{LogicalSize, PhysicalSize, ScaleFactor};
pub use winit::window::Window as WinitWindow;
use winit::{error::OsError, event_loop::ActiveEventLoop};

use crate::signals::WindowSignals;

pub struct WindowDescriptor {
    pub title: String,
    pub resizeable: bool,
    pub size: Option<LogicalSize<u32>>,
    pub visible: bool,
    /// Initial clear colour, see [`Window::background`].
    pub background: [f32; 4],
}

impl Default for WindowDescriptor {
    fn default() -> Self {
        Self {
            title: "Zeta Window".to_string(),
            resizeable: true,
            size: None,
            visible: true,
            background: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl WindowDescriptor {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            size: Some(LogicalSize::new(width, height)),
            ..Default::default()
        }
    }

    pub fn with_background(mut self, rgba: [f32; 4]) -> Self {
        self.background = rgba;
        self
    }
}

/// An OS window together with the signals its input is published on.
pub struct Window {
    window: Arc<WinitWindow>,
    signals: WindowSignals,
    background: [f32; 4],
}

impl Window {
    pub fn id(&self) -> winit::window::WindowId {
        self.window.id()
    }

    /// Signals fed by this window's input.
    pub fn signals(&self) -> &WindowSignals {
        &self.signals
    }

    /// Get the logical size of the window (DPI-independent).
    pub fn logical_size(&self) -> LogicalSize<u32> {
        self.physical_size().to_logical(self.scale_factor())
    }

    /// Get the physical size of the window in pixels.
    pub fn physical_size(&self) -> PhysicalSize<u32> {
        self.window.inner_size().into()
    }

    /// Get the scale factor for this window.
    pub fn scale_factor(&self) -> ScaleFactor {
        ScaleFactor(self.window.scale_factor())
    }

    /// RGBA clear colour for whatever renders into this window.
    ///
    /// The window never draws by itself; this is where a renderer picks up
    /// the colour the app asked for.
    pub fn background(&self) -> [f32; 4] {
        self.background
    }

    pub fn set_background(&mut self, rgba: [f32; 4]) {
        self.background = rgba;
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub(crate) fn new(
        event_loop: &ActiveEventLoop,
        descriptor: WindowDescriptor,
    ) -> Result<Self, OsError> {
        let mut attributes = WinitWindow::default_attributes()
            .with_title(descriptor.title)
            .with_resizable(descriptor.resizeable)
            .with_visible(descriptor.visible);

        if let Some(size) = descriptor.size {
            attributes = attributes.with_inner_size(winit::dpi::LogicalSize::from(size));
        }

        let background = descriptor.background;
        let window = Arc::new(event_loop.create_window(attributes)?);
        let scale_factor = ScaleFactor(window.scale_factor());
        let size = PhysicalSize::from(window.inner_size()).to_logical(scale_factor);
        tracing::debug!("created window {:?} ({}x{})", window.id(), size.width, size.height);

        Ok(Window {
            window,
            signals: WindowSignals::with_state(size, scale_factor.0),
            background,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults() {
        let descriptor = WindowDescriptor::default();
        assert_eq!(descriptor.size, None);
        assert!(descriptor.resizeable);
        assert_eq!(descriptor.background, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_descriptor_with_background() {
        let descriptor =
            WindowDescriptor::new("Editor", 1280, 720).with_background([0.8, 0.8, 0.8, 1.0]);
        assert_eq!(descriptor.title, "Editor");
        assert_eq!(descriptor.size, Some(LogicalSize::new(1280, 720)));
        assert_eq!(descriptor.background, [0.8, 0.8, 0.8, 1.0]);
    }
}
