//! Input handling: platform-agnostic pointer, wheel and resize events plus
//! the viewport used to normalize cursor positions.

/// Platform-agnostic input events.
pub mod event;

pub use event::{InputEvent, MouseButton, Viewport};
