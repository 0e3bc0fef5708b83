//! Uniform and material structs shared with the shader.
//!
//! Every struct is `#[repr(C)]` + `Pod` and is copied into a buffer verbatim.
//! Three-component vectors are stored as [`PaddedVec3`] (16 bytes, 16-aligned), so
//! a scalar following a vector starts on the next 16-byte boundary.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use static_assertions::const_assert_eq;
use std::mem::{offset_of, size_of};

use super::rules::{FieldDesc, FieldKind, SharedLayout};

/// Three floats padded to 16 bytes.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct PaddedVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    _pad: f32,
}

impl PaddedVec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, _pad: 0.0 }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

// Padding never takes part in equality.
impl PartialEq for PaddedVec3 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl From<Vec3> for PaddedVec3 {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<PaddedVec3> for Vec3 {
    fn from(v: PaddedVec3) -> Self {
        v.to_vec3()
    }
}

impl From<[f32; 3]> for PaddedVec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Per-draw transforms read by the vertex stage.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexUniforms {
    pub model_transform: Mat4,
    pub view_transform: Mat4,
    pub projection_transform: Mat4,
}

impl Default for VertexUniforms {
    fn default() -> Self {
        Self {
            model_transform: Mat4::IDENTITY,
            view_transform: Mat4::IDENTITY,
            projection_transform: Mat4::IDENTITY,
        }
    }
}

impl VertexUniforms {
    pub fn new(model_transform: Mat4, view_transform: Mat4, projection_transform: Mat4) -> Self {
        Self {
            model_transform,
            view_transform,
            projection_transform,
        }
    }

    /// Same view and projection, different model transform.
    pub fn with_model(self, model_transform: Mat4) -> Self {
        Self {
            model_transform,
            ..self
        }
    }

    /// Combined clip-from-model matrix, as the vertex stage computes it.
    pub fn clip_from_model(&self) -> Mat4 {
        self.projection_transform * self.view_transform * self.model_transform
    }
}

impl SharedLayout for VertexUniforms {
    const NAME: &'static str = "VertexUniforms";
    const FIELDS: &'static [FieldDesc] = &[
        FieldDesc::new("model_transform", FieldKind::Float4x4),
        FieldDesc::new("view_transform", FieldKind::Float4x4),
        FieldDesc::new("projection_transform", FieldKind::Float4x4),
    ];
}

/// Per-draw lighting state read by the fragment stage. Directions are in world space.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FragmentUniforms {
    pub light_direction_ws: PaddedVec3,
    pub light_color: PaddedVec3,
    pub eye_direction_ws: PaddedVec3,
}

impl Default for FragmentUniforms {
    fn default() -> Self {
        Self::new(Vec3::new(-1.0, 0.5, -1.0).normalize(), Vec3::ONE, Vec3::ZERO)
    }
}

impl FragmentUniforms {
    pub fn new(light_direction_ws: Vec3, light_color: Vec3, eye_direction_ws: Vec3) -> Self {
        Self {
            light_direction_ws: light_direction_ws.into(),
            light_color: light_color.into(),
            eye_direction_ws: eye_direction_ws.into(),
        }
    }

    pub fn set_eye_direction(&mut self, eye_direction_ws: Vec3) {
        self.eye_direction_ws = eye_direction_ws.into();
    }
}

impl SharedLayout for FragmentUniforms {
    const NAME: &'static str = "FragmentUniforms";
    const FIELDS: &'static [FieldDesc] = &[
        FieldDesc::new("light_direction_ws", FieldKind::Float3),
        FieldDesc::new("light_color", FieldKind::Float3),
        FieldDesc::new("eye_direction_ws", FieldKind::Float3),
    ];
}

/// Phong reflectance parameters.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PhongMaterial {
    pub ambient_color: PaddedVec3,
    pub diffuse_color: PaddedVec3,
    pub specular_color: PaddedVec3,
    /// Specular exponent.
    pub material_shine: f32,
    /// Trailing padding up to the 16-byte struct alignment.
    pub _padding: [f32; 3],
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self::new(Vec3::splat(0.1), Vec3::new(0.8, 0.0, 0.0), Vec3::ONE, 32.0)
    }
}

impl PhongMaterial {
    pub fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3, shine: f32) -> Self {
        Self {
            ambient_color: ambient.into(),
            diffuse_color: diffuse.into(),
            specular_color: specular.into(),
            material_shine: shine,
            _padding: [0.0; 3],
        }
    }

    pub fn with_ambient(mut self, color: Vec3) -> Self {
        self.ambient_color = color.into();
        self
    }

    pub fn with_diffuse(mut self, color: Vec3) -> Self {
        self.diffuse_color = color.into();
        self
    }

    pub fn with_specular(mut self, color: Vec3) -> Self {
        self.specular_color = color.into();
        self
    }

    pub fn with_shine(mut self, shine: f32) -> Self {
        self.material_shine = shine;
        self
    }
}

impl SharedLayout for PhongMaterial {
    const NAME: &'static str = "PhongMaterial";
    const FIELDS: &'static [FieldDesc] = &[
        FieldDesc::new("ambient_color", FieldKind::Float3),
        FieldDesc::new("diffuse_color", FieldKind::Float3),
        FieldDesc::new("specular_color", FieldKind::Float3),
        FieldDesc::new("material_shine", FieldKind::Float),
    ];
}

const_assert_eq!(size_of::<PaddedVec3>(), 16);
const_assert_eq!(size_of::<VertexUniforms>(), 192);
const_assert_eq!(offset_of!(VertexUniforms, view_transform), 64);
const_assert_eq!(offset_of!(VertexUniforms, projection_transform), 128);
const_assert_eq!(size_of::<FragmentUniforms>(), 48);
const_assert_eq!(offset_of!(FragmentUniforms, light_color), 16);
const_assert_eq!(offset_of!(FragmentUniforms, eye_direction_ws), 32);
const_assert_eq!(size_of::<PhongMaterial>(), 64);
const_assert_eq!(offset_of!(PhongMaterial, material_shine), 48);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRule;

    fn host_offsets<T: SharedLayout>() -> Vec<u32> {
        T::host_layout().fields.iter().map(|f| f.offset).collect()
    }

    #[test]
    fn test_host_layout_matches_rust_layout() {
        assert_eq!(
            host_offsets::<VertexUniforms>(),
            vec![
                offset_of!(VertexUniforms, model_transform) as u32,
                offset_of!(VertexUniforms, view_transform) as u32,
                offset_of!(VertexUniforms, projection_transform) as u32,
            ]
        );
        assert_eq!(
            host_offsets::<FragmentUniforms>(),
            vec![
                offset_of!(FragmentUniforms, light_direction_ws) as u32,
                offset_of!(FragmentUniforms, light_color) as u32,
                offset_of!(FragmentUniforms, eye_direction_ws) as u32,
            ]
        );
        assert_eq!(
            host_offsets::<PhongMaterial>(),
            vec![
                offset_of!(PhongMaterial, ambient_color) as u32,
                offset_of!(PhongMaterial, diffuse_color) as u32,
                offset_of!(PhongMaterial, specular_color) as u32,
                offset_of!(PhongMaterial, material_shine) as u32,
            ]
        );
    }

    #[test]
    fn test_host_layout_sizes() {
        assert_eq!(VertexUniforms::host_layout().size as usize, size_of::<VertexUniforms>());
        assert_eq!(FragmentUniforms::host_layout().size as usize, size_of::<FragmentUniforms>());
        assert_eq!(PhongMaterial::host_layout().size as usize, size_of::<PhongMaterial>());
    }

    #[test]
    fn test_wgsl_rule_would_move_material_shine() {
        // Without an explicit alignment a WGSL f32 lands in the tail of the
        // preceding vec3.
        let wgsl = PhongMaterial::layout(LayoutRule::Wgsl);
        assert_eq!(wgsl.offset_of("material_shine"), Some(44));
        assert_eq!(wgsl.size, 48);
    }

    #[test]
    fn test_padded_vec3_conversions() {
        let v = PaddedVec3::from(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v.to_vec3(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(PaddedVec3::from([1.0, 2.0, 3.0]), v);
        assert_eq!(bytemuck::cast::<PaddedVec3, [f32; 4]>(v), [1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_default_fragment_uniforms() {
        let uniforms = FragmentUniforms::default();
        let direction = uniforms.light_direction_ws.to_vec3();
        assert!((direction.length() - 1.0).abs() < 1e-6);
        assert!(direction.x < 0.0 && direction.y > 0.0 && direction.z < 0.0);
        assert_eq!(uniforms.light_color, PaddedVec3::ONE);
        assert_eq!(uniforms.eye_direction_ws, PaddedVec3::ZERO);
    }

    #[test]
    fn test_material_builder() {
        let material = PhongMaterial::default()
            .with_diffuse(Vec3::new(0.0, 0.8, 0.0))
            .with_shine(8.0);
        assert_eq!(material.diffuse_color, PaddedVec3::new(0.0, 0.8, 0.0));
        assert_eq!(material.material_shine, 8.0);
        assert_eq!(material.ambient_color, PaddedVec3::new(0.1, 0.1, 0.1));
        assert_eq!(material._padding, [0.0; 3]);
    }

    #[test]
    fn test_clip_from_model() {
        let uniforms = VertexUniforms::default()
            .with_model(Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        let p = uniforms.clip_from_model().transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.0, 0.0, 0.0));
    }
}
