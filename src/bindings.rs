//! wgpu descriptors derived from the binding slot enums
//!
//! wgpu splits what the slot enums name as one index space: per-vertex streams
//! become vertex buffer slots with a matching `@location`, and uniform blocks
//! become bind group entries. Each stage uses its own bind group so that
//! vertex slot 2 and fragment slot 0 can coexist.

use std::mem::size_of;
use std::num::NonZeroU64;

use crate::layout::{FragmentBufferIndex, FragmentUniforms, VertexBufferIndex, VertexUniforms};

/// Bind group holding vertex-stage uniform blocks.
pub const VERTEX_STAGE_GROUP: u32 = 0;
/// Bind group holding fragment-stage uniform blocks.
pub const FRAGMENT_STAGE_GROUP: u32 = 1;

/// Stride of a tightly packed float3 vertex stream.
pub const FLOAT3_STREAM_STRIDE: wgpu::BufferAddress = 12;

static POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: VertexBufferIndex::Positions.index(),
}];

static NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: VertexBufferIndex::Normal.index(),
}];

impl VertexBufferIndex {
    /// Vertex buffer layout for a stream slot; `None` for uniform slots.
    pub fn vertex_buffer_layout(self) -> Option<wgpu::VertexBufferLayout<'static>> {
        let attributes: &'static [wgpu::VertexAttribute] = match self {
            VertexBufferIndex::Positions => &POSITION_ATTRIBUTES,
            VertexBufferIndex::Normal => &NORMAL_ATTRIBUTES,
            VertexBufferIndex::Uniforms => return None,
        };
        Some(wgpu::VertexBufferLayout {
            array_stride: FLOAT3_STREAM_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        })
    }
}

/// Vertex buffer layouts ordered by slot, ready for `wgpu::VertexState::buffers`.
pub fn vertex_buffer_layouts() -> Vec<wgpu::VertexBufferLayout<'static>> {
    VertexBufferIndex::ALL
        .into_iter()
        .filter_map(VertexBufferIndex::vertex_buffer_layout)
        .collect()
}

fn uniform_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    size: usize,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(size as u64),
        },
        count: None,
    }
}

/// Entries of the [`VERTEX_STAGE_GROUP`] bind group layout.
pub fn vertex_stage_layout_entries() -> Vec<wgpu::BindGroupLayoutEntry> {
    vec![uniform_entry(
        VertexBufferIndex::Uniforms.index(),
        wgpu::ShaderStages::VERTEX,
        size_of::<VertexUniforms>(),
    )]
}

/// Entries of the [`FRAGMENT_STAGE_GROUP`] bind group layout.
pub fn fragment_stage_layout_entries() -> Vec<wgpu::BindGroupLayoutEntry> {
    vec![uniform_entry(
        FragmentBufferIndex::Uniforms.index(),
        wgpu::ShaderStages::FRAGMENT,
        size_of::<FragmentUniforms>(),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_layouts() {
        let layouts = vertex_buffer_layouts();
        assert_eq!(layouts.len(), 2);

        for (slot, layout) in [VertexBufferIndex::Positions, VertexBufferIndex::Normal]
            .into_iter()
            .zip(&layouts)
        {
            assert_eq!(layout.array_stride, 12);
            assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
            assert_eq!(layout.attributes.len(), 1);
            assert_eq!(layout.attributes[0].shader_location, slot.index());
            assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
        }
    }

    #[test]
    fn test_uniform_slot_has_no_vertex_layout() {
        assert!(VertexBufferIndex::Uniforms.vertex_buffer_layout().is_none());
    }

    #[test]
    fn test_vertex_stage_entries() {
        let entries = vertex_stage_layout_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].binding, 2);
        assert_eq!(entries[0].visibility, wgpu::ShaderStages::VERTEX);
        match entries[0].ty {
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                min_binding_size,
                ..
            } => assert_eq!(min_binding_size.map(NonZeroU64::get), Some(192)),
            other => panic!("unexpected binding type {other:?}"),
        }
    }

    #[test]
    fn test_fragment_stage_entries() {
        let entries = fragment_stage_layout_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].binding, 0);
        assert_eq!(entries[0].visibility, wgpu::ShaderStages::FRAGMENT);
        match entries[0].ty {
            wgpu::BindingType::Buffer {
                min_binding_size, ..
            } => assert_eq!(min_binding_size.map(NonZeroU64::get), Some(48)),
            other => panic!("unexpected binding type {other:?}"),
        }
    }
}
