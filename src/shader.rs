//! Shader-side mirror of the layout table
//!
//! The WGSL struct declarations below are the shader half of the contract. naga's
//! WGSL layouter places a scalar that follows a `vec3<f32>` in the vector's tail,
//! so `material_shine` carries `@align(16)` to land where the host puts it.

use crate::error::{LayoutError, LayoutResult};
use crate::layout::{FieldKind, FieldLayout, StructLayout};

macro_rules! shared_structs_wgsl {
    () => {
        r#"
struct VertexUniforms {
    model_transform: mat4x4<f32>,
    view_transform: mat4x4<f32>,
    projection_transform: mat4x4<f32>,
}

struct FragmentUniforms {
    light_direction_ws: vec3<f32>,
    light_color: vec3<f32>,
    eye_direction_ws: vec3<f32>,
}

struct PhongMaterial {
    ambient_color: vec3<f32>,
    diffuse_color: vec3<f32>,
    specular_color: vec3<f32>,
    @align(16) material_shine: f32,
}
"#
    };
}

/// WGSL declarations of every shared struct. Prepend to any shader that reads them.
pub const SHARED_STRUCTS_WGSL: &str = shared_structs_wgsl!();

/// Name of the vertex entry point in [`PHONG_SHADER`].
pub const PHONG_VERTEX_ENTRY: &str = "phong_vertex";
/// Name of the fragment entry point in [`PHONG_SHADER`].
pub const PHONG_FRAGMENT_ENTRY: &str = "phong_fragment";

/// Phong shading program.
///
/// Bindings follow the slot enums: positions and normals at `@location(0)` and
/// `@location(1)`, vertex uniforms at group 0 binding 2, fragment uniforms at
/// group 1 binding 0.
///
/// No slot carries a material, so the surface material is built in the shader by
/// `showcase_material()` and equals [`PhongMaterial::default`](crate::PhongMaterial).
pub const PHONG_SHADER: &str = concat!(
    shared_structs_wgsl!(),
    r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal_ws: vec3<f32>,
}

@group(0) @binding(2) var<uniform> vertex_uniforms: VertexUniforms;
@group(1) @binding(0) var<uniform> fragment_uniforms: FragmentUniforms;

fn showcase_material() -> PhongMaterial {
    return PhongMaterial(
        vec3<f32>(0.1, 0.1, 0.1),
        vec3<f32>(0.8, 0.0, 0.0),
        vec3<f32>(1.0, 1.0, 1.0),
        32.0,
    );
}

@vertex
fn phong_vertex(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
) -> VertexOutput {
    let world_position = vertex_uniforms.model_transform * vec4<f32>(position, 1.0);

    var output: VertexOutput;
    output.clip_position = vertex_uniforms.projection_transform
        * vertex_uniforms.view_transform
        * world_position;
    output.normal_ws = (vertex_uniforms.model_transform * vec4<f32>(normal, 0.0)).xyz;
    return output;
}

@fragment
fn phong_fragment(input: VertexOutput) -> @location(0) vec4<f32> {
    let material = showcase_material();

    let n = normalize(input.normal_ws);
    let l = normalize(fragment_uniforms.light_direction_ws);
    let v = normalize(fragment_uniforms.eye_direction_ws);

    let ambient = material.ambient_color;
    let diffuse = material.diffuse_color * max(dot(n, l), 0.0);
    let r = reflect(-l, n);
    let specular = material.specular_color * pow(max(dot(r, v), 0.0), material.material_shine);

    return vec4<f32>((ambient + diffuse + specular) * fragment_uniforms.light_color, 1.0);
}
"#
);

/// Parse WGSL source into a naga module.
pub fn parse_wgsl(source: &str) -> LayoutResult<naga::Module> {
    naga::front::wgsl::parse_str(source)
        .map_err(|e| LayoutError::ShaderParse(e.emit_to_string(source)))
}

/// Run naga's validator over a parsed module.
pub fn validate(module: &naga::Module) -> LayoutResult<naga::valid::ModuleInfo> {
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(module)
    .map_err(|e| LayoutError::ShaderValidation(e.to_string()))
}

/// Map a naga type onto a shared field kind.
fn field_kind(inner: &naga::TypeInner) -> Option<FieldKind> {
    match *inner {
        naga::TypeInner::Scalar(naga::Scalar::F32) => Some(FieldKind::Float),
        naga::TypeInner::Vector {
            size: naga::VectorSize::Tri,
            scalar: naga::Scalar::F32,
        } => Some(FieldKind::Float3),
        naga::TypeInner::Matrix {
            columns: naga::VectorSize::Quad,
            rows: naga::VectorSize::Quad,
            scalar: naga::Scalar::F32,
        } => Some(FieldKind::Float4x4),
        _ => None,
    }
}

/// Read the layout naga computed for struct `name`.
///
/// Returns `Ok(None)` when the module declares no such struct. Field sizes are
/// the distance to the next member (or to the struct span for the last one).
pub fn reflect_struct(module: &naga::Module, name: &str) -> LayoutResult<Option<StructLayout>> {
    let Some((members, span)) = module.types.iter().find_map(|(_, ty)| match &ty.inner {
        naga::TypeInner::Struct { members, span } if ty.name.as_deref() == Some(name) => {
            Some((members, *span))
        }
        _ => None,
    }) else {
        return Ok(None);
    };

    let mut fields = Vec::with_capacity(members.len());
    let mut align = 1;
    for (i, member) in members.iter().enumerate() {
        let member_name = member.name.clone().unwrap_or_default();
        let kind = field_kind(&module.types[member.ty].inner).ok_or_else(|| {
            LayoutError::UnsupportedMember {
                structure: name.to_string(),
                member: member_name.clone(),
            }
        })?;
        let end = members.get(i + 1).map_or(span, |next| next.offset);
        align = align.max(kind.align(crate::layout::LayoutRule::Wgsl));
        fields.push(FieldLayout {
            name: member_name,
            kind,
            offset: member.offset,
            size: end - member.offset,
        });
    }

    Ok(Some(StructLayout {
        name: name.to_string(),
        fields,
        size: span,
        align,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutRule, PhongMaterial, SharedLayout};

    #[test]
    fn test_builtin_material_matches_host_default() {
        let m = PhongMaterial::default();
        let vec3 = |v: crate::PaddedVec3| format!("vec3<f32>({:?}, {:?}, {:?})", v.x, v.y, v.z);
        let expected = format!(
            "return PhongMaterial(\n        {},\n        {},\n        {},\n        {:?},\n    );",
            vec3(m.ambient_color),
            vec3(m.diffuse_color),
            vec3(m.specular_color),
            m.material_shine,
        );
        assert!(PHONG_SHADER.contains(&expected), "expected `{}`", expected);
    }

    #[test]
    fn test_phong_shader_parses_and_validates() {
        let module = parse_wgsl(PHONG_SHADER).unwrap();
        validate(&module).unwrap();
        let entries: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(entries.contains(&PHONG_VERTEX_ENTRY));
        assert!(entries.contains(&PHONG_FRAGMENT_ENTRY));
    }

    #[test]
    fn test_reflect_material() {
        let module = parse_wgsl(SHARED_STRUCTS_WGSL).unwrap();
        let layout = reflect_struct(&module, "PhongMaterial").unwrap().unwrap();
        assert_eq!(layout.offset_of("ambient_color"), Some(0));
        assert_eq!(layout.offset_of("diffuse_color"), Some(16));
        assert_eq!(layout.offset_of("specular_color"), Some(32));
        assert_eq!(layout.offset_of("material_shine"), Some(48));
        assert_eq!(layout.size, 64);
    }

    #[test]
    fn test_reflect_unaligned_material_matches_wgsl_rule() {
        let source = r#"
struct PhongMaterial {
    ambient_color: vec3<f32>,
    diffuse_color: vec3<f32>,
    specular_color: vec3<f32>,
    material_shine: f32,
}
"#;
        let module = parse_wgsl(source).unwrap();
        let reflected = reflect_struct(&module, "PhongMaterial").unwrap().unwrap();
        let expected = PhongMaterial::layout(LayoutRule::Wgsl);
        let offsets = |l: &StructLayout| l.fields.iter().map(|f| f.offset).collect::<Vec<_>>();
        assert_eq!(offsets(&reflected), offsets(&expected));
        assert_eq!(reflected.size, expected.size);
    }

    #[test]
    fn test_reflect_missing_struct() {
        let module = parse_wgsl(SHARED_STRUCTS_WGSL).unwrap();
        assert!(reflect_struct(&module, "Light").unwrap().is_none());
    }

    #[test]
    fn test_reflect_unsupported_member() {
        let source = "struct Instance { model: mat4x4<f32>, id: u32, }";
        let module = parse_wgsl(source).unwrap();
        let err = reflect_struct(&module, "Instance").unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedMember { ref member, .. } if member == "id"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_wgsl("struct Broken { x: vec3<f32> ").unwrap_err();
        assert!(matches!(err, LayoutError::ShaderParse(_)));
    }
}
