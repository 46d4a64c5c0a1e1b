use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Perspective camera defined by position, look-at target, up vector and
/// projection parameters.
///
/// This is the pose handed to the renderer. [`CameraControls`] owns one
/// and rewrites `position` and `up` every tick.
///
/// [`CameraControls`]: super::controls::CameraControls
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::Z,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 45.0,
            znear: 0.01,
            zfar: 1000.0,
        }
    }
}

impl Camera {
    /// Camera with the configured projection, placed at the configured
    /// initial position and target.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self {
            position: Vec3::from_array(options.initial_position),
            target: Vec3::from_array(options.initial_target),
            up: Vec3::Y,
            aspect: 1.0,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Aim the camera at `target`, keeping position and up.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Unit vector from the camera toward its target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Projection matrix with a `[0, 1]` depth range.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform block holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            fovy: 45.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.position.to_array();
        self.aspect = camera.aspect;
        self.forward = camera.forward().to_array();
        self.fovy = camera.fovy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_matrix_maps_target_onto_negative_z() {
        let camera = Camera {
            position: Vec3::new(20.0, 0.0, 0.0),
            ..Camera::default()
        };
        let target_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(target_in_view.x.abs() < 1e-5);
        assert!(target_in_view.y.abs() < 1e-5);
        assert!((target_in_view.z + 20.0).abs() < 1e-4);
    }

    #[test]
    fn uniform_tracks_camera() {
        let camera = Camera {
            position: Vec3::new(0.0, 0.0, 5.0),
            aspect: 2.0,
            ..Camera::default()
        };
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);
        assert_eq!(uniform.position, [0.0, 0.0, 5.0]);
        assert_eq!(uniform.aspect, 2.0);
        assert_eq!(uniform.forward, [0.0, 0.0, -1.0]);
        assert_eq!(size_of::<CameraUniform>(), 96);
    }
}
