//! Camera system for the ESP viewer.
//!
//! Provides the camera pose handed to the renderer, the orbit / twist /
//! zoom controller that mutates it, and the event router feeding the
//! controller.

/// Orbit / twist / zoom controller with inertia.
pub mod controls;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Event-based camera input handler.
pub mod input;

pub use self::core::{Camera, CameraUniform};
pub use controls::{CameraControls, ControlState};
pub use input::InputHandler;
