//! Shader layout verification
//!
//! Checks a WGSL program against the host layout table: struct layouts, uniform
//! bindings and vertex input locations. A struct that drifts on either side
//! renders wrong without any runtime error, so this is meant to run in tests or
//! at startup.

use crate::bindings::{FRAGMENT_STAGE_GROUP, VERTEX_STAGE_GROUP};
use crate::error::{LayoutError, LayoutResult};
use crate::layout::{
    FragmentBufferIndex, FragmentUniforms, PhongMaterial, SharedLayout, StructLayout,
    VertexBufferIndex, VertexUniforms,
};
use crate::shader::{self, PHONG_VERTEX_ENTRY};

/// Summary of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Structs whose layout matched the host.
    pub structs: Vec<&'static str>,
    /// Uniforms whose group/binding matched the slot enums.
    pub uniforms: Vec<&'static str>,
    /// Vertex inputs whose location matched the slot enums.
    pub vertex_inputs: Vec<&'static str>,
}

/// Compare a reflected shader struct against the host layout of `T`.
pub fn compare_struct<T: SharedLayout>(shader: &StructLayout) -> LayoutResult<()> {
    let host = T::host_layout();

    if host.fields.len() != shader.fields.len() {
        return Err(LayoutError::FieldCount {
            structure: T::NAME,
            host: host.fields.len(),
            shader: shader.fields.len(),
        });
    }

    for (position, (desc, (host_field, shader_field))) in T::FIELDS
        .iter()
        .zip(host.fields.iter().zip(&shader.fields))
        .enumerate()
    {
        if host_field.name != shader_field.name || host_field.kind != shader_field.kind {
            return Err(LayoutError::FieldMismatch {
                structure: T::NAME,
                position,
                host: format!("{}: {}", host_field.name, host_field.kind.wgsl_name()),
                shader: format!("{}: {}", shader_field.name, shader_field.kind.wgsl_name()),
            });
        }
        if host_field.offset != shader_field.offset {
            return Err(LayoutError::OffsetMismatch {
                structure: T::NAME,
                field: desc.name,
                host: host_field.offset,
                shader: shader_field.offset,
            });
        }
    }

    if host.size != shader.size {
        return Err(LayoutError::SizeMismatch {
            structure: T::NAME,
            host: host.size,
            shader: shader.size,
        });
    }

    Ok(())
}

fn verify_struct<T: SharedLayout>(module: &naga::Module) -> LayoutResult<()> {
    let shader =
        shader::reflect_struct(module, T::NAME)?.ok_or(LayoutError::MissingStruct(T::NAME))?;
    compare_struct::<T>(&shader)?;
    log::debug!("{} layout matches ({} bytes)", T::NAME, shader.size);
    Ok(())
}

fn verify_uniform_binding(
    module: &naga::Module,
    structure: &'static str,
    expected_group: u32,
    expected_binding: u32,
) -> LayoutResult<()> {
    let binding = module
        .global_variables
        .iter()
        .find(|(_, var)| {
            var.space == naga::AddressSpace::Uniform
                && module.types[var.ty].name.as_deref() == Some(structure)
        })
        .and_then(|(_, var)| var.binding.as_ref())
        .ok_or(LayoutError::MissingUniform(structure))?;

    if binding.group != expected_group || binding.binding != expected_binding {
        return Err(LayoutError::BindingMismatch {
            structure,
            expected_group,
            expected_binding,
            group: binding.group,
            binding: binding.binding,
        });
    }

    log::debug!(
        "{} bound at group {} binding {}",
        structure,
        binding.group,
        binding.binding
    );
    Ok(())
}

fn verify_vertex_inputs(
    module: &naga::Module,
    entry_point: &'static str,
    inputs: &[(&'static str, VertexBufferIndex)],
) -> LayoutResult<()> {
    let entry = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == naga::ShaderStage::Vertex && ep.name == entry_point)
        .ok_or(LayoutError::MissingEntryPoint(entry_point))?;

    for &(input, slot) in inputs {
        let found = entry
            .function
            .arguments
            .iter()
            .find(|arg| arg.name.as_deref() == Some(input))
            .and_then(|arg| match arg.binding {
                Some(naga::Binding::Location { location, .. }) => Some(location),
                _ => None,
            });

        if found != Some(slot.index()) {
            return Err(LayoutError::LocationMismatch {
                input,
                expected: slot.index(),
                found,
            });
        }
    }
    Ok(())
}

/// Verify the shared struct declarations only.
pub fn verify_structs(module: &naga::Module) -> LayoutResult<Vec<&'static str>> {
    verify_struct::<VertexUniforms>(module)?;
    verify_struct::<FragmentUniforms>(module)?;
    verify_struct::<PhongMaterial>(module)?;
    Ok(vec![
        VertexUniforms::NAME,
        FragmentUniforms::NAME,
        PhongMaterial::NAME,
    ])
}

/// Parse, validate and check a complete showcase shader.
pub fn verify_shader(source: &str) -> LayoutResult<VerifyReport> {
    let module = shader::parse_wgsl(source)?;
    shader::validate(&module)?;

    let structs = verify_structs(&module)?;

    verify_uniform_binding(
        &module,
        VertexUniforms::NAME,
        VERTEX_STAGE_GROUP,
        VertexBufferIndex::Uniforms.index(),
    )?;
    verify_uniform_binding(
        &module,
        FragmentUniforms::NAME,
        FRAGMENT_STAGE_GROUP,
        FragmentBufferIndex::Uniforms.index(),
    )?;

    let vertex_inputs = [
        ("position", VertexBufferIndex::Positions),
        ("normal", VertexBufferIndex::Normal),
    ];
    verify_vertex_inputs(&module, PHONG_VERTEX_ENTRY, &vertex_inputs)?;

    log::info!(
        "Shader matches layout table: {} structs, 2 uniforms, {} vertex inputs",
        structs.len(),
        vertex_inputs.len()
    );

    Ok(VerifyReport {
        structs,
        uniforms: vec![VertexUniforms::NAME, FragmentUniforms::NAME],
        vertex_inputs: vertex_inputs.iter().map(|(name, _)| *name).collect(),
    })
}
