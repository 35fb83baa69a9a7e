//! Size and position types used as window event payloads.
//!
//! Physical values are in device pixels, logical values are physical values
//! divided by the window's [`ScaleFactor`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LogicalSize<T> {
    pub width: T,
    pub height: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PhysicalSize<T> {
    pub width: T,
    pub height: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LogicalPosition<T> {
    pub x: T,
    pub y: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PhysicalPosition<T> {
    pub x: T,
    pub y: T,
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(pub f64);

impl Default for ScaleFactor {
    fn default() -> Self {
        ScaleFactor(1.0)
    }
}

impl<T> LogicalSize<T> {
    pub const fn new(width: T, height: T) -> Self {
        LogicalSize { width, height }
    }
}

impl<T> PhysicalSize<T> {
    pub const fn new(width: T, height: T) -> Self {
        PhysicalSize { width, height }
    }
}

impl<T> LogicalPosition<T> {
    pub const fn new(x: T, y: T) -> Self {
        LogicalPosition { x, y }
    }
}

impl<T> PhysicalPosition<T> {
    pub const fn new(x: T, y: T) -> Self {
        PhysicalPosition { x, y }
    }
}

impl PhysicalSize<u32> {
    pub fn to_logical(self, scale: ScaleFactor) -> LogicalSize<u32> {
        LogicalSize::new(
            (self.width as f64 / scale.0) as u32,
            (self.height as f64 / scale.0) as u32,
        )
    }
}

impl PhysicalPosition<f64> {
    pub fn to_logical(self, scale: ScaleFactor) -> LogicalPosition<f64> {
        LogicalPosition::new(self.x / scale.0, self.y / scale.0)
    }
}

#[cfg(feature = "winit")]
mod winit_conv {
    use super::*;

    impl<T> From<winit::dpi::PhysicalSize<T>> for PhysicalSize<T> {
        fn from(size: winit::dpi::PhysicalSize<T>) -> Self {
            PhysicalSize::new(size.width, size.height)
        }
    }

    impl<T> From<winit::dpi::PhysicalPosition<T>> for PhysicalPosition<T> {
        fn from(pos: winit::dpi::PhysicalPosition<T>) -> Self {
            PhysicalPosition::new(pos.x, pos.y)
        }
    }

    impl<T> From<LogicalSize<T>> for winit::dpi::LogicalSize<T> {
        fn from(size: LogicalSize<T>) -> Self {
            winit::dpi::LogicalSize::new(size.width, size.height)
        }
    }
}
