//! Camera controls driven through the render loop, the way a host window
//! would drive them.

use glam::Vec3;
use molesp::{
    camera::Camera, options::CameraOptions, CameraControls, ControlState,
    InputEvent, MouseButton, RenderLoop, Renderer,
};

const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct Recorder {
    positions: Vec<Vec3>,
}

impl Renderer for Recorder {
    fn draw(&mut self, camera: &Camera) {
        self.positions.push(camera.position);
    }
}

fn render_loop() -> RenderLoop {
    let mut render_loop = RenderLoop::from_options(&CameraOptions::default());
    render_loop
        .controls_mut()
        .set_look_at(Vec3::new(20.0, 0.0, 0.0), Vec3::ZERO);
    render_loop.resize(800.0, 600.0);
    render_loop.start();
    render_loop
}

fn send(render_loop: &mut RenderLoop, events: &[InputEvent]) {
    for event in events {
        let _ = render_loop.handle_input(event);
    }
}

#[test]
fn set_look_at_places_camera() {
    let mut controls = CameraControls::default();
    controls.set_look_at(Vec3::new(20.0, 0.0, 0.0), Vec3::ZERO);
    let _ = controls.update(0.0);
    assert_eq!(controls.position(), Vec3::new(20.0, 0.0, 0.0));
    assert_eq!(controls.eye(), Vec3::new(20.0, 0.0, 0.0));
    assert_eq!(controls.eye().length(), 20.0);
    assert_eq!(controls.camera().target, Vec3::ZERO);
}

#[test]
fn zoom_in_stops_at_min_distance() {
    let mut render_loop = render_loop();
    let mut recorder = Recorder::default();
    let min = CameraOptions::default().min_distance;

    send(&mut render_loop, &[InputEvent::Scroll { delta: 1.0 }]);
    assert!(render_loop.tick_with_delta(DT, &mut recorder));
    assert!((render_loop.controls().eye().length() - 20.0 * 0.97).abs() < 1e-4);

    for _ in 0..200 {
        send(&mut render_loop, &[InputEvent::Scroll { delta: 1.0 }]);
        let _ = render_loop.tick_with_delta(DT, &mut recorder);
    }
    assert!((render_loop.controls().eye().length() - min).abs() < 1e-4);
}

#[test]
fn drag_release_coasts_then_settles() {
    let mut render_loop = render_loop();
    let mut recorder = Recorder::default();

    send(
        &mut render_loop,
        &[
            InputEvent::CursorMoved { x: 400.0, y: 300.0 },
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            },
            InputEvent::CursorMoved { x: 420.0, y: 310.0 },
        ],
    );
    assert_eq!(render_loop.controls().state(), ControlState::Orbit);
    assert!(render_loop.tick_with_delta(DT, &mut recorder));
    send(
        &mut render_loop,
        &[InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        }],
    );

    let mut steps = Vec::new();
    let mut previous = render_loop.camera().position;
    while render_loop.tick_with_delta(DT, &mut recorder) {
        let position = render_loop.camera().position;
        steps.push((position - previous).length());
        previous = position;
        assert!(steps.len() < 1000);
    }
    assert!(steps.len() > 3);
    assert!(steps.windows(2).all(|w| w[1] < w[0]));

    let settled = render_loop.camera().position;
    assert!(!render_loop.tick_with_delta(DT, &mut recorder));
    assert_eq!(render_loop.camera().position, settled);
    assert_eq!(recorder.positions.len(), steps.len() + 1);
    assert!((settled.length() - 20.0).abs() < 1e-2);
}

#[test]
fn twist_leaves_position_alone() {
    let mut render_loop = render_loop();
    let mut recorder = Recorder::default();
    send(
        &mut render_loop,
        &[
            InputEvent::CursorMoved { x: 400.0, y: 300.0 },
            InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: true,
            },
            InputEvent::CursorMoved { x: 500.0, y: 300.0 },
            InputEvent::Scroll { delta: 1.0 },
        ],
    );
    assert!(render_loop.tick_with_delta(DT, &mut recorder));
    assert_eq!(render_loop.camera().position, Vec3::new(20.0, 0.0, 0.0));
    assert!(render_loop.camera().up.dot(Vec3::Y) < 1.0);
}

#[test]
fn stopped_loop_never_draws() {
    let mut render_loop = render_loop();
    let mut recorder = Recorder::default();
    render_loop.stop();
    send(&mut render_loop, &[InputEvent::Scroll { delta: -1.0 }]);
    for _ in 0..3 {
        assert!(!render_loop.tick(&mut recorder));
    }
    assert!(recorder.positions.is_empty());
}
