//! Render-on-demand frame driver.
//!
//! The host calls [`RenderLoop::tick`] once per display frame. The loop
//! measures the elapsed time, lets the camera controls integrate pending
//! input and inertia, and only hands the frame to the [`Renderer`] when
//! the camera actually moved. Idle frames cost one clock read and a few
//! comparisons.
//!
//! Ordering within a tick is fixed: input already delivered through
//! [`RenderLoop::handle_input`] is applied as zoom, then orbit, then twist,
//! and only then is the renderer invoked.

use web_time::Instant;

use crate::camera::{Camera, CameraControls, InputHandler};
use crate::input::InputEvent;
use crate::options::{CameraOptions, DisplayOptions};

/// Something that can draw a frame for a camera pose.
pub trait Renderer {
    /// Apply display settings such as the clear color. Called once before
    /// the first frame and again whenever the settings change.
    fn configure(&mut self, _display: &DisplayOptions) {}

    /// The backbuffer is now `width` x `height` pixels.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Called before [`draw`](Self::draw) on frames where the camera
    /// changed (e.g. to move a head light with the camera).
    fn update(&mut self, _camera: &Camera) {}

    /// Draw one frame.
    fn draw(&mut self, camera: &Camera);
}

/// Frame step cap used by the windowed viewer, so the first drag after an
/// idle wait for input does not jump.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Monotonic frame clock.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    last: Option<Instant>,
    max_delta: Option<f32>,
}

impl Clock {
    /// A clock that has not started yet. Deltas are not capped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock whose deltas never exceed `max_delta` seconds.
    #[must_use]
    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            last: None,
            max_delta: Some(max_delta),
        }
    }

    /// Cap (or with `None`, stop capping) the deltas.
    pub fn set_max_delta(&mut self, max_delta: Option<f32>) {
        self.max_delta = max_delta;
    }

    /// Start (or restart) measuring from now.
    pub fn start(&mut self) {
        self.last = Some(Instant::now());
    }

    /// Stop measuring; the next [`delta`](Self::delta) returns 0.
    pub fn stop(&mut self) {
        self.last = None;
    }

    /// Seconds since the previous call (or since [`start`](Self::start)),
    /// capped if a maximum is set. The first call on a stopped clock
    /// starts it and returns 0.
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let delta = self
            .last
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last = Some(now);
        self.max_delta.map_or(delta, |max| delta.min(max))
    }
}

/// Per-frame driver owning the camera controls.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    controls: CameraControls,
    input: InputHandler,
    clock: Clock,
    running: bool,
}

impl RenderLoop {
    /// A stopped loop driving `controls`.
    #[must_use]
    pub fn new(controls: CameraControls) -> Self {
        Self {
            controls,
            input: InputHandler::new(),
            clock: Clock::new(),
            running: false,
        }
    }

    /// A stopped loop with controls built from `options`.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self::new(CameraControls::from_options(options))
    }

    /// The controls being driven.
    #[must_use]
    pub fn controls(&self) -> &CameraControls {
        &self.controls
    }

    /// Mutable access, e.g. for `set_look_at` or tuning.
    pub fn controls_mut(&mut self) -> &mut CameraControls {
        &mut self.controls
    }

    /// Current camera pose.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.controls.camera()
    }

    /// Begin scheduling frames. Idempotent.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.clock.start();
        log::debug!("render loop started");
    }

    /// Stop scheduling frames. Idempotent; subsequent ticks are no-ops.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.clock.stop();
        log::debug!("render loop stopped");
    }

    /// Whether [`start`](Self::start) has been called without a matching
    /// [`stop`](Self::stop).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Forward an input event to the camera controls.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.input.handle_event(&mut self.controls, event)
    }

    /// Cap the measured frame time used by [`tick`](Self::tick) and
    /// [`advance_frame`](Self::advance_frame). Uncapped by default.
    pub fn set_max_frame_delta(&mut self, max_delta: Option<f32>) {
        self.clock.set_max_delta(max_delta);
    }

    /// Resize the viewport used for cursor normalization and aspect ratio.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.controls.set_viewport(width, height);
    }

    /// Advance the camera by `delta_time` seconds. Returns whether it moved.
    pub fn advance(&mut self, delta_time: f32) -> bool {
        if !self.running {
            return false;
        }
        self.controls.update(delta_time)
    }

    /// Advance the camera by the time elapsed since the last frame.
    pub fn advance_frame(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let delta_time = self.clock.delta();
        self.advance(delta_time)
    }

    /// Update and draw unconditionally (after a resize or a settings
    /// change that does not move the camera).
    pub fn redraw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let camera = self.controls.camera();
        renderer.update(camera);
        renderer.draw(camera);
    }

    /// One frame: advance by the clock and draw only if the camera moved.
    /// Returns whether a frame was drawn.
    ///
    /// The measured time is passed through unchanged unless a cap was set
    /// with [`set_max_frame_delta`](Self::set_max_frame_delta).
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        let changed = self.advance_frame();
        if changed {
            self.redraw(renderer);
        }
        changed
    }

    /// One frame with an explicit time step, never capped.
    pub fn tick_with_delta<R: Renderer + ?Sized>(
        &mut self,
        delta_time: f32,
        renderer: &mut R,
    ) -> bool {
        let changed = self.advance(delta_time);
        if changed {
            self.redraw(renderer);
        }
        changed
    }
}
