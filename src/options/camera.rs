use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, initial pose and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Orbit sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub rotate_speed: f32,
    /// Distance factor per wheel step (below 1 zooms in on scroll up).
    #[schemars(title = "Zoom Speed", range(min = 0.8, max = 0.99), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Twist (roll) sensitivity multiplier.
    #[schemars(title = "Twist Speed", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub twist_speed: f32,
    /// Closest allowed distance from the look-at target.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest allowed distance from the look-at target.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Fraction of orbit inertia lost per frame.
    #[schemars(title = "Damping", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub damping_factor: f32,
    /// Camera position at startup.
    #[schemars(skip)]
    pub initial_position: [f32; 3],
    /// Look-at target at startup.
    #[schemars(skip)]
    pub initial_target: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.01,
            zfar: 1000.0,
            rotate_speed: 7.0,
            zoom_speed: 0.97,
            twist_speed: 10.0,
            min_distance: 4.0,
            max_distance: 200.0,
            damping_factor: 0.25,
            initial_position: [20.0, 0.0, 0.0],
            initial_target: [0.0, 0.0, 0.0],
        }
    }
}
