/// Platform-agnostic input events.
///
/// These are fed into a [`RenderLoop`](crate::RenderLoop) (or directly into
/// [`CameraControls::handle_event`](crate::CameraControls::handle_event)),
/// which turns them into camera state changes.
///
/// # Example
///
/// ```
/// use molesp::{InputEvent, MouseButton};
///
/// let events = [
///     InputEvent::CursorMoved { x: 400.0, y: 300.0 },
///     InputEvent::MouseButton { button: MouseButton::Left, pressed: true },
///     InputEvent::CursorMoved { x: 420.0, y: 300.0 },
///     InputEvent::MouseButton { button: MouseButton::Left, pressed: false },
/// ];
/// assert_eq!(events.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute viewport position.
    CursorMoved {
        /// Horizontal position in pixels from the left edge.
        x: f32,
        /// Vertical position in pixels from the top edge.
        y: f32,
    },
    /// Mouse button pressed or released at the last cursor position.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount (positive = zoom in, negative = zoom out).
        delta: f32,
    },
    /// Viewport resized.
    Resized {
        /// New width in pixels.
        width: f32,
        /// New height in pixels.
        height: f32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            // Back/forward/extra buttons never start a gesture.
            _ => Self::Middle,
        }
    }
}

/// Viewport extent used to normalize cursor positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width / height, or 1 for a degenerate viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Map a pixel position onto the orbit plane: origin at the viewport
    /// center, y up, both axes scaled by half the width.
    ///
    /// Returns `None` for a zero-width viewport.
    #[must_use]
    pub fn orbit_cursor(&self, x: f32, y: f32) -> Option<glam::Vec2> {
        if self.width <= 0.0 {
            return None;
        }
        let radius = self.width * 0.5;
        Some(glam::Vec2::new(
            (x - self.width * 0.5) / radius,
            (self.height * 0.5 - y) / radius,
        ))
    }

    /// Map a pixel column onto `[0, 1]` across the viewport width.
    ///
    /// Returns `None` for a zero-width viewport.
    #[must_use]
    pub fn twist_cursor(&self, x: f32) -> Option<f32> {
        if self.width <= 0.0 {
            return None;
        }
        Some(x / self.width)
    }
}
