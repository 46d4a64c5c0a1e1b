//! Orbit / twist / zoom camera controls with inertia.
//!
//! The pose is kept as a look-at `target` plus an `eye` vector from the
//! target to the camera. Every rotation is applied to `eye` and the camera
//! up vector in that target-local frame, so precision does not depend on
//! how far the scene sits from the world origin.
//!
//! Pointer handlers only record cursor positions and the input state; all
//! geometry happens in [`CameraControls::update`], once per frame, in the
//! fixed order zoom → orbit → twist.

use glam::{Quat, Vec2, Vec3};

use super::core::Camera;
use crate::input::{MouseButton, Viewport};
use crate::options::CameraOptions;

const EPSILON: f32 = 0.0001;

/// Which drag gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    /// No button held; wheel zoom and coasting are active.
    #[default]
    None,
    /// Primary button held; cursor motion orbits the camera.
    Orbit,
    /// Secondary button held; horizontal motion rolls the camera.
    Twist,
}

/// Mouse-driven camera controller.
///
/// Single-threaded: the pointer handlers and [`update`](Self::update) must
/// be called from the thread that owns the controller.
#[derive(Debug, Clone)]
pub struct CameraControls {
    camera: Camera,
    state: ControlState,
    viewport: Viewport,

    target: Vec3,
    eye: Vec3,

    orbit_cursor_old: Vec2,
    orbit_cursor_new: Vec2,
    twist_cursor_old: f32,
    twist_cursor_new: f32,

    inertia_axis: Vec3,
    inertia_angle: f32,

    radius_scale: f32,

    /// Orbit sensitivity.
    pub rotate_speed: f32,
    /// Per-notch distance factor; values below 1 zoom in on positive wheel
    /// deltas.
    pub zoom_speed: f32,
    /// Twist (roll) sensitivity.
    pub twist_speed: f32,
    /// Closest allowed distance from the target.
    pub min_distance: f32,
    /// Farthest allowed distance from the target.
    pub max_distance: f32,
    /// Fraction of orbit inertia lost per tick, in `[0, 1]`.
    pub damping_factor: f32,
}

impl CameraControls {
    /// Wrap `camera` with default tunables and settle the initial pose.
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        let target = camera.target;
        let mut controls = Self {
            eye: camera.position - target,
            camera,
            state: ControlState::None,
            viewport: Viewport::default(),
            target,
            orbit_cursor_old: Vec2::ZERO,
            orbit_cursor_new: Vec2::ZERO,
            twist_cursor_old: 0.0,
            twist_cursor_new: 0.0,
            inertia_axis: Vec3::ZERO,
            inertia_angle: 0.0,
            radius_scale: 1.0,
            rotate_speed: 7.0,
            zoom_speed: 0.97,
            twist_speed: 10.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            damping_factor: 0.25,
        };
        let _ = controls.update(0.0);
        controls
    }

    /// Controls built from configured tunables and initial pose.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let mut controls = Self::new(Camera::from_options(options));
        controls.apply_options(options);
        controls
    }

    /// Copy tunables and projection parameters from `options`, leaving the
    /// current pose alone.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.rotate_speed = options.rotate_speed;
        self.zoom_speed = options.zoom_speed;
        self.twist_speed = options.twist_speed;
        self.min_distance = options.min_distance;
        self.max_distance = options.max_distance;
        self.damping_factor = options.damping_factor;
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
    }

    // ── Accessors ──

    /// The camera pose handed to the renderer.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current gesture.
    #[must_use]
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Look-at target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Vector from the target to the camera as of the last tick.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Camera up vector.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.camera.up
    }

    /// Camera position (always `target + eye` after a tick).
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.camera.position
    }

    /// Angle the camera will coast by on the next idle tick, before decay.
    #[must_use]
    pub fn inertia_angle(&self) -> f32 {
        self.inertia_angle
    }

    /// Viewport used for cursor normalization.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Set the viewport size; also updates the camera aspect ratio.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.camera.aspect = self.viewport.aspect();
    }

    // ── Pointer events ──

    /// Begin a gesture: primary button orbits, secondary twists.
    ///
    /// Both cursor baselines are captured and any inertia or pending zoom
    /// is cancelled whatever the button.
    pub fn pointer_down(&mut self, button: MouseButton, x: f32, y: f32) {
        self.radius_scale = 1.0;
        self.inertia_angle = 0.0;

        match button {
            MouseButton::Left => self.state = ControlState::Orbit,
            MouseButton::Right => self.state = ControlState::Twist,
            MouseButton::Middle => {}
        }
        log::trace!("pointer down {button:?} -> {:?}", self.state);

        if let Some(cursor) = self.viewport.orbit_cursor(x, y) {
            self.orbit_cursor_new = cursor;
            self.orbit_cursor_old = cursor;
        }
        if let Some(cursor) = self.viewport.twist_cursor(x) {
            self.twist_cursor_new = cursor;
            self.twist_cursor_old = cursor;
        }
    }

    /// Track the cursor for the active gesture.
    ///
    /// The baseline only moves on tick, so every move between two ticks
    /// contributes to that tick's delta.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        match self.state {
            ControlState::Orbit => {
                if let Some(cursor) = self.viewport.orbit_cursor(x, y) {
                    self.orbit_cursor_new = cursor;
                }
            }
            ControlState::Twist => {
                if let Some(cursor) = self.viewport.twist_cursor(x) {
                    self.twist_cursor_new = cursor;
                }
            }
            ControlState::None => {}
        }
    }

    /// End the gesture. Pending cursor deltas are dropped; orbit inertia
    /// keeps coasting.
    pub fn pointer_up(&mut self) {
        self.state = ControlState::None;
        self.orbit_cursor_old = self.orbit_cursor_new;
        self.twist_cursor_old = self.twist_cursor_new;
    }

    /// Accumulate a wheel step (positive = zoom in). Ignored mid-drag.
    pub fn wheel(&mut self, delta: f32) {
        if self.state != ControlState::None {
            return;
        }
        if delta > 0.0 {
            self.radius_scale *= self.zoom_speed;
        } else if delta < 0.0 {
            self.radius_scale /= self.zoom_speed;
        }
    }

    // ── Per-frame update ──

    /// Apply pending zoom, orbit and twist, then re-aim the camera.
    ///
    /// Returns `true` if the pose changed this tick.
    pub fn update(&mut self, delta_time: f32) -> bool {
        self.eye = self.camera.position - self.target;

        let zoomed = self.zoom_camera();
        let orbited = self.orbit_camera(delta_time);
        let twisted = self.twist_camera(delta_time);
        let changed = zoomed || orbited || twisted;

        if changed {
            self.camera.position = self.target + self.eye;
        }
        self.camera.look_at(self.target);

        self.orbit_cursor_old = self.orbit_cursor_new;
        self.twist_cursor_old = self.twist_cursor_new;
        self.radius_scale = 1.0;

        changed
    }

    fn zoom_camera(&mut self) -> bool {
        if (1.0 - self.radius_scale).abs() < EPSILON {
            return false;
        }
        let Some(direction) = self.eye.try_normalize() else {
            return false;
        };
        let radius = (self.eye.length() * self.radius_scale)
            .min(self.max_distance)
            .max(self.min_distance);
        self.eye = direction * radius;
        true
    }

    fn orbit_camera(&mut self, delta_time: f32) -> bool {
        let cursor_delta = self.orbit_cursor_new - self.orbit_cursor_old;
        let rotation_delta = cursor_delta.length();

        self.inertia_angle *= (1.0 - self.damping_factor).max(0.0).sqrt();

        let Some(eye_direction) = self.eye.try_normalize() else {
            return false;
        };

        if self.state == ControlState::Orbit && rotation_delta >= EPSILON {
            let up = self.camera.up.normalize_or_zero();
            let right = up.cross(eye_direction);
            let camera_delta = up * cursor_delta.y + right * cursor_delta.x;
            let Some(axis) = camera_delta.cross(eye_direction).try_normalize()
            else {
                return false;
            };
            let angle = rotation_delta * self.rotate_speed * delta_time * 100.0;

            self.inertia_axis = axis;
            self.inertia_angle = angle;
            if angle == 0.0 {
                return false;
            }
            self.rotate(axis, angle);
            true
        } else if self.state == ControlState::None
            && self.inertia_angle >= EPSILON
        {
            self.rotate(self.inertia_axis, self.inertia_angle);
            true
        } else {
            false
        }
    }

    fn twist_camera(&mut self, delta_time: f32) -> bool {
        if self.state != ControlState::Twist {
            return false;
        }
        let cursor_delta = self.twist_cursor_new - self.twist_cursor_old;
        let angle = cursor_delta * self.twist_speed * delta_time * 100.0;
        if angle.abs() < EPSILON {
            return false;
        }
        let Some(eye_direction) = self.eye.try_normalize() else {
            return false;
        };
        self.camera.up = Quat::from_axis_angle(eye_direction, angle) * self.camera.up;
        true
    }

    fn rotate(&mut self, axis: Vec3, angle: f32) {
        let rotation = Quat::from_axis_angle(axis, angle);
        self.eye = rotation * self.eye;
        self.camera.up = rotation * self.camera.up;
    }

    // ── Explicit placement ──

    /// Place the camera at `position` looking at `target`.
    ///
    /// The eye vector is re-derived from the new pose on the next tick;
    /// gesture and inertia state are left untouched.
    pub fn set_look_at(&mut self, position: Vec3, target: Vec3) {
        self.camera.position = position;
        self.target = target;
        self.eye = position - target;
        self.camera.look_at(target);
    }

    /// Re-target onto the centroid of `points`, backing off along the
    /// current viewing direction far enough to fit their bounding sphere.
    pub fn frame_points(&mut self, points: &[Vec3]) {
        if points.is_empty() {
            return;
        }
        let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        let radius = points
            .iter()
            .map(|p| (*p - centroid).length())
            .fold(0.0f32, f32::max);

        let half_fov = (self.camera.fovy.to_radians() * 0.5).max(EPSILON);
        let distance = (radius / half_fov.tan() * 1.5)
            .min(self.max_distance)
            .max(self.min_distance);
        let direction = self.eye.try_normalize().unwrap_or(Vec3::X);

        log::debug!("framing {} points at distance {distance:.3}", points.len());
        self.set_look_at(centroid + direction * distance, centroid);
    }
}

impl Default for CameraControls {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn controls_at_20() -> CameraControls {
        let mut controls = CameraControls::default();
        controls.set_viewport(800.0, 600.0);
        controls.min_distance = 4.0;
        controls.max_distance = 200.0;
        controls.set_look_at(Vec3::new(20.0, 0.0, 0.0), Vec3::ZERO);
        let _ = controls.update(0.0);
        controls
    }

    #[test]
    fn set_look_at_then_update_places_camera() {
        let controls = controls_at_20();
        assert_eq!(controls.position(), Vec3::new(20.0, 0.0, 0.0));
        assert_eq!(controls.eye(), Vec3::new(20.0, 0.0, 0.0));
        assert_eq!(controls.eye().length(), 20.0);
        assert_eq!(controls.camera().target, Vec3::ZERO);
        assert!(controls.camera().forward().abs_diff_eq(Vec3::NEG_X, 1e-6));
    }

    #[test]
    fn idle_update_is_a_no_op() {
        let mut controls = controls_at_20();
        let (eye, up, position) =
            (controls.eye(), controls.up(), controls.position());
        for _ in 0..10 {
            assert!(!controls.update(0.0));
            assert!(!controls.update(DT));
        }
        assert_eq!(controls.eye(), eye);
        assert_eq!(controls.up(), up);
        assert_eq!(controls.position(), position);
    }

    #[test]
    fn wheel_zoom_in_scales_distance() {
        let mut controls = controls_at_20();
        controls.wheel(1.0);
        assert!(controls.update(DT));
        assert!((controls.eye().length() - 20.0 * 0.97).abs() < 1e-4);
        // Direction preserved.
        assert!(controls.eye().normalize().abs_diff_eq(Vec3::X, 1e-6));
        // The accumulator resets after the tick.
        assert!(!controls.update(DT));
    }

    #[test]
    fn wheel_zoom_out_divides_distance() {
        let mut controls = controls_at_20();
        controls.wheel(-1.0);
        controls.wheel(-1.0);
        assert!(controls.update(DT));
        let expected = 20.0 / 0.97 / 0.97;
        assert!((controls.eye().length() - expected).abs() < 1e-3);
    }

    #[test]
    fn zoom_clamps_to_min_distance() {
        let mut controls = controls_at_20();
        for _ in 0..200 {
            controls.wheel(1.0);
            let _ = controls.update(DT);
        }
        assert!((controls.eye().length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn zoom_clamps_to_max_distance() {
        let mut controls = controls_at_20();
        for _ in 0..20 {
            controls.wheel(-1.0);
        }
        let _ = controls.update(DT);
        assert!(controls.eye().length() <= 200.0 + 1e-3);
        for _ in 0..200 {
            controls.wheel(-1.0);
            let _ = controls.update(DT);
        }
        assert!((controls.eye().length() - 200.0).abs() < 1e-2);
    }

    #[test]
    fn wheel_ignored_while_dragging() {
        let mut controls = controls_at_20();
        controls.pointer_down(MouseButton::Left, 400.0, 300.0);
        controls.wheel(1.0);
        assert!(!controls.update(DT));
        assert_eq!(controls.eye().length(), 20.0);
    }

    #[test]
    fn state_machine_transitions() {
        let mut controls = controls_at_20();
        assert_eq!(controls.state(), ControlState::None);
        controls.pointer_down(MouseButton::Left, 10.0, 10.0);
        assert_eq!(controls.state(), ControlState::Orbit);
        controls.pointer_up();
        assert_eq!(controls.state(), ControlState::None);
        controls.pointer_down(MouseButton::Right, 10.0, 10.0);
        assert_eq!(controls.state(), ControlState::Twist);
        controls.pointer_up();
        controls.pointer_down(MouseButton::Middle, 10.0, 10.0);
        assert_eq!(controls.state(), ControlState::None);
    }

    #[test]
    fn orbit_rotates_eye_and_up_together() {
        let mut controls = controls_at_20();
        controls.pointer_down(MouseButton::Left, 400.0, 300.0);
        controls.pointer_move(440.0, 300.0);
        assert!(controls.update(DT));

        let eye = controls.eye();
        assert!((eye.length() - 20.0).abs() < 1e-3);
        assert!(!eye.abs_diff_eq(Vec3::new(20.0, 0.0, 0.0), 1e-3));
        // Up stays perpendicular to the eye vector.
        assert!(eye.normalize().dot(controls.up()).abs() < 1e-4);
        // Horizontal drag orbits around the up axis.
        assert!(eye.y.abs() < 1e-4);
        assert!((controls.position() - (controls.target() + eye)).length() < 1e-4);
    }

    #[test]
    fn orbit_angle_scales_with_delta_time() {
        let mut slow = controls_at_20();
        slow.pointer_down(MouseButton::Left, 400.0, 300.0);
        slow.pointer_move(404.0, 300.0);
        let _ = slow.update(0.01);

        let mut fast = controls_at_20();
        fast.pointer_down(MouseButton::Left, 400.0, 300.0);
        fast.pointer_move(404.0, 300.0);
        let _ = fast.update(0.02);

        // delta 0.01, rotate_speed 7 => 0.07 rad vs 0.14 rad.
        assert!((slow.inertia_angle() - 0.07).abs() < 1e-4);
        assert!((fast.inertia_angle() - 0.14).abs() < 1e-4);
    }

    #[test]
    fn orbit_coasts_and_decays_after_release() {
        let mut controls = controls_at_20();
        controls.pointer_down(MouseButton::Left, 400.0, 300.0);
        controls.pointer_move(410.0, 300.0);
        assert!(controls.update(DT));
        controls.pointer_up();

        let mut previous_angle = controls.inertia_angle();
        let mut previous_eye = controls.eye();
        let mut coasting_ticks = 0;
        for _ in 0..500 {
            if !controls.update(DT) {
                break;
            }
            coasting_ticks += 1;
            assert!(controls.inertia_angle() < previous_angle);
            assert_ne!(controls.eye(), previous_eye);
            previous_angle = controls.inertia_angle();
            previous_eye = controls.eye();
        }
        assert!(coasting_ticks > 5);
        assert!(controls.inertia_angle() < EPSILON);
        // Fully settled: further ticks change nothing.
        let settled = controls.eye();
        assert!(!controls.update(DT));
        assert_eq!(controls.eye(), settled);
        assert!((settled.length() - 20.0).abs() < 1e-2);
    }

    #[test]
    fn holding_still_does_not_coast() {
        let mut controls = controls_at_20();
        controls.pointer_down(MouseButton::Left, 400.0, 300.0);
        controls.pointer_move(420.0, 300.0);
        assert!(controls.update(DT));
        let eye = controls.eye();
        assert!(!controls.update(DT));
        assert_eq!(controls.eye(), eye);
    }

    #[test]
    fn pointer_down_cancels_inertia() {
        let mut controls = controls_at_20();
        controls.pointer_down(MouseButton::Left, 400.0, 300.0);
        controls.pointer_move(420.0, 300.0);
        let _ = controls.update(DT);
        controls.pointer_up();
        controls.pointer_down(MouseButton::Right, 420.0, 300.0);
        assert_eq!(controls.inertia_angle(), 0.0);
        assert!(!controls.update(DT));
    }

    #[test]
    fn twist_rolls_up_around_eye() {
        let mut controls = controls_at_20();
        controls.pointer_down(MouseButton::Right, 400.0, 300.0);
        controls.pointer_move(480.0, 300.0);
        assert!(controls.update(DT));

        // Eye untouched, up rotated in the plane perpendicular to it.
        assert_eq!(controls.eye(), Vec3::new(20.0, 0.0, 0.0));
        let up = controls.up();
        assert!(up.x.abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        // 0.1 * 10 * (1/60) * 100 rad
        let expected = 0.1 * 10.0 * DT * 100.0;
        assert!((up.angle_between(Vec3::Y) - expected).abs() < 1e-3);

        // No further motion, no further twist.
        assert!(!controls.update(DT));
    }

    #[test]
    fn moves_between_ticks_accumulate() {
        let mut one_step = controls_at_20();
        one_step.pointer_down(MouseButton::Left, 400.0, 300.0);
        one_step.pointer_move(420.0, 300.0);
        let _ = one_step.update(DT);

        let mut two_steps = controls_at_20();
        two_steps.pointer_down(MouseButton::Left, 400.0, 300.0);
        two_steps.pointer_move(410.0, 300.0);
        two_steps.pointer_move(420.0, 300.0);
        let _ = two_steps.update(DT);

        assert!(one_step.eye().abs_diff_eq(two_steps.eye(), 1e-5));
    }

    #[test]
    fn release_drops_pending_delta() {
        let mut controls = controls_at_20();
        controls.pointer_down(MouseButton::Left, 400.0, 300.0);
        controls.pointer_move(450.0, 300.0);
        controls.pointer_up();
        assert!(!controls.update(DT));
        assert_eq!(controls.eye(), Vec3::new(20.0, 0.0, 0.0));
    }

    #[test]
    fn zero_width_viewport_ignores_cursor() {
        let mut controls = controls_at_20();
        controls.set_viewport(0.0, 0.0);
        controls.pointer_down(MouseButton::Left, 10.0, 10.0);
        controls.pointer_move(100.0, 10.0);
        assert!(!controls.update(DT));
    }

    #[test]
    fn frame_points_targets_centroid() {
        let mut controls = controls_at_20();
        let points = [
            Vec3::new(9.0, 10.0, 10.0),
            Vec3::new(11.0, 10.0, 10.0),
        ];
        controls.frame_points(&points);
        assert_eq!(controls.target(), Vec3::new(10.0, 10.0, 10.0));
        let eye = controls.position() - controls.target();
        assert!(eye.normalize().abs_diff_eq(Vec3::X, 1e-5));
        assert!(eye.length() >= controls.min_distance);
        let _ = controls.update(0.0);
        assert_eq!(controls.camera().target, Vec3::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn from_options_uses_configured_pose() {
        let options = CameraOptions::default();
        let controls = CameraControls::from_options(&options);
        assert_eq!(controls.position(), Vec3::from_array(options.initial_position));
        assert_eq!(controls.min_distance, options.min_distance);
        assert_eq!(controls.zoom_speed, options.zoom_speed);
    }
}
