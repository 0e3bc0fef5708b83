//! Phong Showcase - shared host/shader buffer layouts
//!
//! The layout table ([`layout`]) is the contract between host code that fills
//! uniform buffers and WGSL shader code that reads them:
//! - **Binding slots**: [`VertexBufferIndex`] and [`FragmentBufferIndex`]
//! - **Buffer structs**: [`VertexUniforms`], [`FragmentUniforms`], [`PhongMaterial`]
//!
//! Around the table:
//! - [`shader`]: the WGSL mirror of the structs and the Phong program
//! - [`verify`]: naga-based checks that a shader still matches the table
//! - [`bindings`]: wgpu layout descriptors derived from the slot enums
//! - [`scene`] and [`frame`]: host code that populates the uniforms each frame

pub mod bindings;
pub mod error;
pub mod frame;
pub mod layout;
pub mod scene;
pub mod shader;
pub mod verify;

use glam::Vec3;

pub use error::{LayoutError, LayoutResult};
pub use frame::{BufferWrite, FramePacket, FrameState, ShaderStage};
pub use layout::{
    FragmentBufferIndex, FragmentUniforms, LayoutRule, PaddedVec3, PhongMaterial, SharedLayout,
    StructLayout, VertexBufferIndex, VertexUniforms,
};
pub use verify::{verify_shader, VerifyReport};

/// Configuration for the showcase's host-side uniform state
#[derive(Debug, Clone)]
pub struct ShowcaseConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
    /// Radians of arcball rotation per surface point of pan
    pub pan_sensitivity: f32,
    /// Number of mesh instances to scatter
    pub instance_count: usize,
    /// World-space light direction (normalized on use)
    pub light_direction: Vec3,
    /// Light color
    pub light_color: Vec3,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: scene::DEFAULT_FOV_Y_DEGREES,
            near: scene::DEFAULT_NEAR,
            far: scene::DEFAULT_FAR,
            pan_sensitivity: 0.005,
            instance_count: 10,
            light_direction: Vec3::new(-1.0, 0.5, -1.0),
            light_color: Vec3::ONE,
        }
    }
}
