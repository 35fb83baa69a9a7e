use zeta_core::geometry::{LogicalPosition, LogicalSize, PhysicalPosition, PhysicalSize, ScaleFactor};
pub use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent as WinitEvent};
pub use winit::keyboard::*;

/// Window input translated from winit, in logical coordinates.
#[derive(Debug, Clone)]
pub enum WindowEvent {
    /// Window moved to a new physical position.
    WindowMoved(PhysicalPosition<i32>),
    /// Window resized to a new logical size.
    WindowResized(LogicalSize<u32>),
    /// Scale factor changed.
    ScaleFactorChanged(f64),
    /// Window focus changed.
    Focused(bool),
    /// Window close requested.
    CloseRequested,
    /// Mouse button pressed.
    MouseButtonDown(MouseButton),
    /// Mouse button released.
    MouseButtonUp(MouseButton),
    /// Mouse wheel scrolled.
    MouseScrolled(MouseScrollDelta),
    /// Mouse cursor moved (logical coordinates).
    MouseMoved(LogicalPosition<f64>),
    /// Mouse cursor entered the window.
    MouseEntered,
    /// Mouse cursor left the window.
    MouseLeft,
    /// Keyboard input event.
    KeyInput(KeyEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub physical_key: PhysicalKey,
    pub logical_key: Key,
    pub text: Option<SmolStr>,
    pub location: KeyLocation,
    pub state: ElementState,
    pub repeat: bool,
    pub is_synthetic: bool,
}

impl KeyEvent {
    pub fn is_pressed(&self) -> bool {
        self.state == ElementState::Pressed
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HandleStatus: u8 {
        const HANDLED = 0b00000001;
        const CONSUMED = 0b00000010;
    }
}

impl HandleStatus {
    pub const fn is_consumed(&self) -> bool {
        self.contains(Self::CONSUMED)
    }

    pub const fn is_handled(&self) -> bool {
        self.contains(Self::HANDLED)
    }

    pub const fn consumed() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits() | Self::CONSUMED.bits())
    }

    pub const fn handled() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits())
    }

    pub const fn ignored() -> Self {
        Self::empty()
    }
}

impl WindowEvent {
    pub(crate) fn from_winit(event: WinitEvent, scale_factor: f64) -> Option<Self> {
        let scale = ScaleFactor(scale_factor);
        match event {
            WinitEvent::Moved(pos) => Some(WindowEvent::WindowMoved(pos.into())),
            WinitEvent::Resized(size) => Some(WindowEvent::WindowResized(
                PhysicalSize::from(size).to_logical(scale),
            )),
            WinitEvent::ScaleFactorChanged {
                scale_factor,
                inner_size_writer: _,
            } => Some(WindowEvent::ScaleFactorChanged(scale_factor)),
            WinitEvent::Focused(focus) => Some(WindowEvent::Focused(focus)),
            WinitEvent::CloseRequested => Some(WindowEvent::CloseRequested),
            WinitEvent::MouseInput {
                device_id: _,
                state,
                button,
            } => match state {
                ElementState::Pressed => Some(WindowEvent::MouseButtonDown(button)),
                ElementState::Released => Some(WindowEvent::MouseButtonUp(button)),
            },
            WinitEvent::MouseWheel {
                device_id: _,
                delta,
                phase: _,
            } => Some(WindowEvent::MouseScrolled(delta)),
            WinitEvent::CursorMoved {
                device_id: _,
                position,
            } => Some(WindowEvent::MouseMoved(
                PhysicalPosition::from(position).to_logical(scale),
            )),
            WinitEvent::CursorEntered { device_id: _ } => Some(WindowEvent::MouseEntered),
            WinitEvent::CursorLeft { device_id: _ } => Some(WindowEvent::MouseLeft),
            WinitEvent::KeyboardInput {
                device_id: _,
                event,
                is_synthetic,
            } => Some(WindowEvent::KeyInput(KeyEvent {
                physical_key: event.physical_key,
                logical_key: event.logical_key,
                location: event.location,
                repeat: event.repeat,
                text: event.text,
                state: event.state,

                is_synthetic,
            })),
            // driven by the app loop, not by signals
            WinitEvent::RedrawRequested | WinitEvent::Destroyed | WinitEvent::Occluded(_) => None,
            // we explicity ignore touchpad pressure
            WinitEvent::TouchpadPressure { .. } => None,
            unknown => {
                tracing::warn!("unhandled window event: {:?}", unknown);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_status_flags() {
        assert!(!HandleStatus::ignored().is_handled());
        assert!(HandleStatus::handled().is_handled());
        assert!(!HandleStatus::handled().is_consumed());
        assert!(HandleStatus::consumed().is_handled());
        assert!(HandleStatus::consumed().is_consumed());
    }

    #[test]
    fn test_from_winit_scales_to_logical() {
        let resized = WindowEvent::from_winit(
            WinitEvent::Resized(winit::dpi::PhysicalSize::new(2560, 1440)),
            2.0,
        );
        assert!(matches!(
            resized,
            Some(WindowEvent::WindowResized(size)) if size == LogicalSize::new(1280, 720)
        ));

        assert!(matches!(
            WindowEvent::from_winit(WinitEvent::CloseRequested, 1.0),
            Some(WindowEvent::CloseRequested)
        ));
        assert!(WindowEvent::from_winit(WinitEvent::RedrawRequested, 1.0).is_none());
    }
}
