//! Camera controller system
//!
//! Provides the arcball controller used by the showcase: a pan gesture rotates the
//! eye around a fixed target at a fixed distance.

use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use super::Camera;

/// Input state for camera controllers
#[derive(Debug, Clone, Default)]
pub struct CameraInput {
    /// Pan gesture translation since last frame, already scaled to radians
    pub pan_delta: Vec2,
}

/// Abstract camera controller trait
pub trait CameraController {
    /// Update the camera based on input and delta time
    fn update(&mut self, camera: &mut Camera, input: &CameraInput, dt: f32);

    /// Get the controller name for debugging
    fn name(&self) -> &'static str;

    /// Reset the controller to default state
    fn reset(&mut self);
}

/// Arcball camera controller
///
/// The eye sits on a sphere of radius `distance` around `target`. `x_rotation`
/// turns around the up axis, `y_rotation` is the polar angle measured from +Y.
#[derive(Debug, Clone)]
pub struct ArcballController {
    pub distance: f32,
    pub target: Vec3,
    pub up: Vec3,
    pub x_rotation: f32,
    pub y_rotation: f32,
}

impl Default for ArcballController {
    fn default() -> Self {
        Self {
            distance: 0.4,
            target: Vec3::ZERO,
            up: Vec3::Y,
            x_rotation: FRAC_PI_2,
            y_rotation: FRAC_PI_3,
        }
    }
}

impl ArcballController {
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            ..Default::default()
        }
    }

    /// Rotate by a pan gesture: horizontal motion turns around the up axis,
    /// vertical motion changes the polar angle.
    pub fn pan(&mut self, delta: Vec2) {
        self.x_rotation -= delta.x;
        self.y_rotation += delta.y;
    }

    /// Eye position for the current angles.
    pub fn eye(&self) -> Vec3 {
        let up = self.distance * self.y_rotation.cos();
        let sin_theta = -self.distance * self.y_rotation.sin();
        let right = self.x_rotation.cos() * sin_theta;
        let forward = self.x_rotation.sin() * sin_theta;
        self.target + Vec3::new(right, up, forward)
    }

    /// Place `camera` at the arcball eye, looking at the target.
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.eye();
        camera.target = self.target;
        camera.up = self.up;
    }
}

impl CameraController for ArcballController {
    fn update(&mut self, camera: &mut Camera, input: &CameraInput, _dt: f32) {
        if input.pan_delta != Vec2::ZERO {
            self.pan(input.pan_delta);
        }
        self.apply(camera);
    }

    fn name(&self) -> &'static str {
        "Arcball"
    }

    fn reset(&mut self) {
        *self = Self::new(self.target, self.distance);
    }
}
