//! Instance transforms

use glam::{Mat4, Quat, Vec3};
use rand::Rng;

/// Placement of one mesh instance in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Model matrix (scale, then rotation, then translation).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Rotate around an axis. The axis does not need to be normalized.
    pub fn rotate_axis(&mut self, axis: Vec3, angle: f32) {
        let delta = Quat::from_axis_angle(axis.normalize(), angle);
        self.rotation = delta * self.rotation;
    }
}

/// Maximum depth of a scattered instance.
pub const SCATTER_DEPTH: f32 = 10.0;

/// Scatter `count` instances in front of the origin.
///
/// The first instance sits at the origin. Every other one gets a depth
/// `z` in `[0, SCATTER_DEPTH]` and a lateral `x` in `[-z, z]`, placed at
/// `(x / 2, 0, z)`, so instances fan out with distance.
pub fn scatter_instances<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Transform> {
    (0..count)
        .map(|idx| {
            if idx == 0 {
                return Transform::default();
            }
            let z = rng.gen_range(0.0..=SCATTER_DEPTH);
            let x = rng.gen_range(-z..=z);
            Transform::from_position(Vec3::new(x * 0.5, 0.0, z))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_translation_only_matrix() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.matrix();
        assert_eq!(matrix.w_axis, glam::Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(matrix.x_axis, glam::Vec4::X);
        assert_eq!(matrix.y_axis, glam::Vec4::Y);
        assert_eq!(matrix.z_axis, glam::Vec4::Z);
    }

    #[test]
    fn test_rotate_axis_unnormalized() {
        let mut transform = Transform::new();
        transform.rotate_axis(Vec3::new(0.0, 2.0, 0.0), std::f32::consts::FRAC_PI_2);
        let rotated = transform.matrix().transform_vector3(Vec3::X);
        assert!(rotated.abs_diff_eq(-Vec3::Z, 1e-6));
    }

    #[test]
    fn test_scatter_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let instances = scatter_instances(64, &mut rng);
        assert_eq!(instances.len(), 64);
        assert_eq!(instances[0], Transform::default());

        for instance in &instances[1..] {
            let p = instance.position;
            assert_eq!(p.y, 0.0);
            assert!((0.0..=SCATTER_DEPTH).contains(&p.z));
            assert!(p.x.abs() <= p.z * 0.5 + f32::EPSILON);
        }
    }

    #[test]
    fn test_scatter_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(scatter_instances(0, &mut rng).is_empty());
    }
}
