//! Standalone window backed by winit.
//!
//! The viewer owns the event loop and a [`RenderLoop`]; drawing is
//! delegated to a [`Renderer`] the host builds once the window exists.
//! Frames are requested only when the camera moved or the window needs
//! repainting.
//!
//! ```no_run
//! # use molesp::{Viewer, render_loop::Renderer, camera::Camera};
//! struct Noop;
//! impl Renderer for Noop {
//!     fn draw(&mut self, _camera: &Camera) {}
//! }
//! Viewer::builder()
//!     .with_title("ESP")
//!     .build()
//!     .run(|_window| Noop)
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    camera::CameraControls,
    error::MolEspError,
    options::{DisplayOptions, Options},
    render_loop::{RenderLoop, Renderer, MAX_FRAME_DELTA},
    InputEvent, MouseButton,
};

/// Wake-up interval while the loop is running.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Scale applied to pixel-precise scroll deltas (touchpads).
const PIXEL_SCROLL_SCALE: f32 = 0.01;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    controls: Option<CameraControls>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            controls: None,
            title: "Molesp".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Start from pre-positioned controls instead of the configured
    /// initial pose (e.g. after [`CameraControls::frame_points`]).
    #[must_use]
    pub fn with_controls(mut self, controls: CameraControls) -> Self {
        self.controls = Some(controls);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let options = self.options.unwrap_or_default();
        let controls = self
            .controls
            .unwrap_or_else(|| CameraControls::from_options(&options.camera));
        let mut render_loop = RenderLoop::new(controls);
        render_loop.set_max_frame_delta(Some(MAX_FRAME_DELTA));
        Viewer {
            render_loop,
            display: options.display,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window driving camera controls and a host renderer.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    render_loop: RenderLoop,
    display: DisplayOptions,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// `make_renderer` is called once, after the window is created; the
    /// renderer is then configured with the display options and sized to
    /// the backbuffer (window size with the pixel ratio capped at
    /// `max_pixel_ratio`).
    pub fn run<R, F>(self, make_renderer: F) -> Result<(), MolEspError>
    where
        R: Renderer,
        F: FnOnce(Arc<Window>) -> R,
    {
        let event_loop = EventLoop::new()
            .map_err(|e| MolEspError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            renderer: None,
            make_renderer: Some(make_renderer),
            render_loop: self.render_loop,
            display: self.display,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| MolEspError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp<R, F> {
    window: Option<Arc<Window>>,
    renderer: Option<R>,
    make_renderer: Option<F>,
    render_loop: RenderLoop,
    display: DisplayOptions,
    title: String,
}

impl<R: Renderer, F> ViewerApp<R, F> {
    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>, scale_factor: f64) {
        #[allow(clippy::cast_precision_loss)]
        self.render_loop
            .resize(size.width.max(1) as f32, size.height.max(1) as f32);
        let (width, height) =
            self.display
                .backbuffer_size(size.width, size.height, scale_factor);
        log::debug!(
            "backbuffer {width}x{height} (pixel ratio {:.2})",
            self.display.pixel_ratio(scale_factor)
        );
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
    }
}

/// Translate the window events the camera cares about.
fn to_input_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::MouseInput { button, state, .. } => {
            Some(InputEvent::MouseButton {
                button: MouseButton::from(*button),
                pressed: *state == ElementState::Pressed,
            })
        }
        #[allow(clippy::cast_possible_truncation)]
        WindowEvent::CursorMoved { position, .. } => {
            Some(InputEvent::CursorMoved {
                x: position.x as f32,
                y: position.y as f32,
            })
        }
        WindowEvent::MouseWheel { delta, .. } => {
            #[allow(clippy::cast_possible_truncation)]
            let delta = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(pos) => {
                    pos.y as f32 * PIXEL_SCROLL_SCALE
                }
            };
            Some(InputEvent::Scroll { delta })
        }
        _ => None,
    }
}

impl<R, F> ApplicationHandler for ViewerApp<R, F>
where
    R: Renderer,
    F: FnOnce(Arc<Window>) -> R,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(make_renderer) = self.make_renderer.take() else {
            return;
        };

        let attrs = Window::default_attributes().with_title(&self.title);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let mut renderer = make_renderer(Arc::clone(&window));
        renderer.configure(&self.display);
        self.renderer = Some(renderer);
        self.resize(window.inner_size(), window.scale_factor());
        self.render_loop.start();
        log::info!("viewer window created ({:?})", window.inner_size());

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.render_loop.stop();
            event_loop.exit();
            return;
        }
        if self.window.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                let scale_factor =
                    self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.resize(size, scale_factor);
                self.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(size) = self.window.as_ref().map(|w| w.inner_size()) {
                    self.resize(size, scale_factor);
                }
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    self.render_loop.redraw(renderer);
                }
            }
            other => {
                if let Some(input) = to_input_event(&other) {
                    let _ = self.render_loop.handle_input(&input);
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.render_loop.is_running() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }
        if self.render_loop.advance_frame() {
            self.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(
            Instant::now() + FRAME_INTERVAL,
        ));
    }
}
