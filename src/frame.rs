//! Per-frame uniform population
//!
//! Owns the host copies of the uniform blocks and refreshes them each frame from
//! the camera and instance list. The output is a [`FramePacket`] whose buffer
//! writes are keyed by the binding slot enums; submitting them is up to the
//! caller's renderer.

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::layout::{
    FragmentBufferIndex, FragmentUniforms, SharedLayout, VertexBufferIndex, VertexUniforms,
};
use crate::scene::{scatter_instances, ArcballController, Camera, Projection, Transform};
use crate::ShowcaseConfig;

/// Shader stage a buffer write targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// One buffer upload: `bytes` go to binding `slot` of `stage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferWrite<'a> {
    pub stage: ShaderStage,
    pub slot: u32,
    pub bytes: &'a [u8],
}

/// Uniform contents for one frame.
#[derive(Debug, Clone)]
pub struct FramePacket {
    /// One entry per instance, in instance order. Each draw binds its own entry.
    pub draws: Vec<VertexUniforms>,
    pub fragment: FragmentUniforms,
}

impl FramePacket {
    /// Writes for draw `draw`: its vertex uniforms followed by the fragment uniforms.
    pub fn buffer_writes(&self, draw: usize) -> Option<[BufferWrite<'_>; 2]> {
        let vertex = self.draws.get(draw)?;
        Some([
            BufferWrite {
                stage: ShaderStage::Vertex,
                slot: VertexBufferIndex::Uniforms.index(),
                bytes: vertex.as_bytes(),
            },
            BufferWrite {
                stage: ShaderStage::Fragment,
                slot: FragmentBufferIndex::Uniforms.index(),
                bytes: self.fragment.as_bytes(),
            },
        ])
    }

    /// All vertex uniform blocks packed back to back, for a single upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.draws)
    }
}

/// Host-side state behind the showcase's uniform buffers.
pub struct FrameState {
    config: ShowcaseConfig,
    camera: Camera,
    controller: ArcballController,
    instances: Vec<Transform>,
    vertex_uniforms: VertexUniforms,
    fragment_uniforms: FragmentUniforms,
}

impl FrameState {
    pub fn new<R: Rng + ?Sized>(config: ShowcaseConfig, rng: &mut R) -> Self {
        let instances = scatter_instances(config.instance_count, rng);
        Self::with_instances(config, instances)
    }

    pub fn with_instances(config: ShowcaseConfig, instances: Vec<Transform>) -> Self {
        let controller = ArcballController::default();
        let mut camera = Camera {
            projection: Projection::perspective(config.fov_y_degrees, 1.0, config.near, config.far),
            ..Default::default()
        };
        controller.apply(&mut camera);

        let vertex_uniforms = VertexUniforms {
            projection_transform: camera.projection_matrix(),
            ..Default::default()
        };

        let fragment_uniforms = FragmentUniforms::new(
            config.light_direction.normalize(),
            config.light_color,
            Vec3::ZERO,
        );

        log::debug!("Frame state created with {} instances", instances.len());

        Self {
            config,
            camera,
            controller,
            instances,
            vertex_uniforms,
            fragment_uniforms,
        }
    }

    /// Rebuild the projection for a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }

        self.camera.set_aspect(width as f32, height as f32);
        self.vertex_uniforms.projection_transform = self.camera.projection_matrix();
        log::debug!(
            "Projection rebuilt for {}x{} (aspect {:.3})",
            width,
            height,
            self.camera.projection.aspect
        );
    }

    /// Feed a pan gesture (in surface points) to the arcball.
    pub fn handle_pan(&mut self, translation: Vec2) {
        self.controller.pan(translation * self.config.pan_sensitivity);
    }

    /// Refresh view-dependent uniforms and produce this frame's packet.
    pub fn prepare(&mut self) -> FramePacket {
        self.controller.apply(&mut self.camera);

        let view = self.camera.view_matrix();
        self.vertex_uniforms.view_transform = view;

        let eye = view.inverse().w_axis.truncate();
        self.fragment_uniforms
            .set_eye_direction(eye.try_normalize().unwrap_or(Vec3::ZERO));

        FramePacket {
            draws: self
                .instances
                .iter()
                .map(|instance| self.vertex_uniforms.with_model(instance.matrix()))
                .collect(),
            fragment: self.fragment_uniforms,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controller(&self) -> &ArcballController {
        &self.controller
    }

    pub fn instances(&self) -> &[Transform] {
        &self.instances
    }

    pub fn vertex_uniforms(&self) -> &VertexUniforms {
        &self.vertex_uniforms
    }

    pub fn fragment_uniforms(&self) -> &FragmentUniforms {
        &self.fragment_uniforms
    }
}
