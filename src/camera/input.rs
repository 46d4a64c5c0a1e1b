use glam::Vec2;

use crate::camera::controls::CameraControls;
use crate::input::InputEvent;

/// Routes [`InputEvent`]s into [`CameraControls`], remembering the last
/// cursor position so button events can be located.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    last_cursor: Vec2,
}

impl InputHandler {
    /// Create a handler with the cursor at the viewport origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position seen, in pixels.
    #[must_use]
    pub fn last_cursor(&self) -> Vec2 {
        self.last_cursor
    }

    /// Returns true if the event was consumed by the camera.
    pub fn handle_event(
        &mut self,
        controls: &mut CameraControls,
        event: &InputEvent,
    ) -> bool {
        match *event {
            InputEvent::CursorMoved { x, y } => {
                self.last_cursor = Vec2::new(x, y);
                controls.pointer_move(x, y);
                true
            }
            InputEvent::MouseButton { button, pressed } => {
                if pressed {
                    controls.pointer_down(
                        button,
                        self.last_cursor.x,
                        self.last_cursor.y,
                    );
                } else {
                    controls.pointer_up();
                }
                true
            }
            InputEvent::Scroll { delta } => {
                controls.wheel(delta);
                true
            }
            InputEvent::Resized { width, height } => {
                controls.set_viewport(width, height);
                true
            }
        }
    }
}

impl CameraControls {
    /// Apply a single event without cursor tracking across calls.
    ///
    /// Button events are located at the viewport center; hosts that
    /// interleave cursor and button events should route them through an
    /// [`InputHandler`] instead.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        let viewport = self.viewport();
        let mut handler = InputHandler {
            last_cursor: Vec2::new(viewport.width * 0.5, viewport.height * 0.5),
        };
        handler.handle_event(self, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::controls::ControlState;
    use crate::input::MouseButton;
    use glam::Vec3;

    #[test]
    fn drag_sequence_orbits() {
        let mut controls = CameraControls::default();
        let mut handler = InputHandler::new();
        let events = [
            InputEvent::Resized {
                width: 800.0,
                height: 600.0,
            },
            InputEvent::CursorMoved { x: 400.0, y: 300.0 },
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            },
            InputEvent::CursorMoved { x: 430.0, y: 280.0 },
        ];
        for event in &events {
            assert!(handler.handle_event(&mut controls, event));
        }
        assert_eq!(controls.state(), ControlState::Orbit);
        assert_eq!(handler.last_cursor(), Vec2::new(430.0, 280.0));

        let before = controls.eye();
        assert!(controls.update(1.0 / 60.0));
        assert_ne!(controls.eye(), before);

        let _ = handler.handle_event(
            &mut controls,
            &InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            },
        );
        assert_eq!(controls.state(), ControlState::None);
    }

    #[test]
    fn scroll_routes_to_zoom() {
        let mut controls = CameraControls::default();
        controls.set_look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        assert!(controls.handle_event(&InputEvent::Scroll { delta: 1.0 }));
        assert!(controls.update(0.0));
        assert!((controls.eye().length() - 9.7).abs() < 1e-4);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut controls = CameraControls::default();
        let _ = controls.handle_event(&InputEvent::Resized {
            width: 1000.0,
            height: 500.0,
        });
        assert_eq!(controls.camera().aspect, 2.0);
    }
}
