//! Layout rules for shared structs.
//!
//! A struct's byte layout depends on how the consuming API sizes and aligns a
//! three-component vector. [`StructLayout::compute`] applies one [`LayoutRule`]
//! to a field list so that host and shader layouts can be compared field by field.

use bytemuck::Pod;

/// How a graphics API sizes and aligns shared field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutRule {
    /// float3 occupies 16 bytes, aligned to 16 (Metal `simd_float3`).
    /// The host structs in this crate are built to this rule.
    #[default]
    Padded16,
    /// WGSL host-shareable rules: vec3 is 12 bytes aligned to 16, so a
    /// following scalar packs into its tail.
    Wgsl,
    /// Tightly packed C floats (`[f32; 3]`), no vector alignment.
    Packed,
}

impl LayoutRule {
    pub const ALL: [Self; 3] = [Self::Padded16, Self::Wgsl, Self::Packed];

    pub fn name(&self) -> &'static str {
        match self {
            LayoutRule::Padded16 => "padded16",
            LayoutRule::Wgsl => "wgsl",
            LayoutRule::Packed => "packed",
        }
    }
}

/// Type of a shared struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// 32-bit float.
    Float,
    /// Three 32-bit floats.
    Float3,
    /// Column-major 4x4 matrix of 32-bit floats.
    Float4x4,
}

impl FieldKind {
    pub fn size(&self, rule: LayoutRule) -> u32 {
        match (self, rule) {
            (FieldKind::Float, _) => 4,
            (FieldKind::Float3, LayoutRule::Padded16) => 16,
            (FieldKind::Float3, LayoutRule::Wgsl | LayoutRule::Packed) => 12,
            (FieldKind::Float4x4, _) => 64,
        }
    }

    pub fn align(&self, rule: LayoutRule) -> u32 {
        match (self, rule) {
            (FieldKind::Float, _) => 4,
            (FieldKind::Float3 | FieldKind::Float4x4, LayoutRule::Packed) => 4,
            (FieldKind::Float3 | FieldKind::Float4x4, _) => 16,
        }
    }

    /// Type name as written in WGSL.
    pub fn wgsl_name(&self) -> &'static str {
        match self {
            FieldKind::Float => "f32",
            FieldKind::Float3 => "vec3<f32>",
            FieldKind::Float4x4 => "mat4x4<f32>",
        }
    }
}

/// Declared field: its name on both sides of the boundary and its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDesc {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDesc {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Field placed at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: String,
    pub kind: FieldKind,
    pub offset: u32,
    pub size: u32,
}

/// Computed layout of a struct under one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLayout {
    pub name: String,
    pub fields: Vec<FieldLayout>,
    /// Total size including trailing padding (the array stride).
    pub size: u32,
    pub align: u32,
}

impl StructLayout {
    /// Lay out `fields` in declaration order under `rule`.
    pub fn compute(name: &str, rule: LayoutRule, fields: &[FieldDesc]) -> Self {
        let mut cursor = 0;
        let mut align = 1;
        let fields = fields
            .iter()
            .map(|desc| {
                let field_align = desc.kind.align(rule);
                let size = desc.kind.size(rule);
                let offset = round_up(cursor, field_align);
                cursor = offset + size;
                align = align.max(field_align);
                FieldLayout {
                    name: desc.name.to_string(),
                    kind: desc.kind,
                    offset,
                    size,
                }
            })
            .collect();

        Self {
            name: name.to_string(),
            fields,
            size: round_up(cursor, align),
            align,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn offset_of(&self, name: &str) -> Option<u32> {
        self.field(name).map(|f| f.offset)
    }
}

/// A `#[repr(C)]` struct whose bytes are read by shader code.
pub trait SharedLayout: Pod {
    /// Struct name on both sides of the boundary.
    const NAME: &'static str;
    /// Fields in declaration order.
    const FIELDS: &'static [FieldDesc];
    /// Rule the Rust definition is built to.
    const HOST_RULE: LayoutRule = LayoutRule::Padded16;

    fn layout(rule: LayoutRule) -> StructLayout {
        StructLayout::compute(Self::NAME, rule, Self::FIELDS)
    }

    fn host_layout() -> StructLayout {
        Self::layout(Self::HOST_RULE)
    }

    fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

fn round_up(value: u32, align: u32) -> u32 {
    value.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    const VEC3_THEN_FLOAT: &[FieldDesc] = &[
        FieldDesc::new("color", FieldKind::Float3),
        FieldDesc::new("intensity", FieldKind::Float),
    ];

    #[test]
    fn test_field_kind_sizes() {
        assert_eq!(FieldKind::Float3.size(LayoutRule::Padded16), 16);
        assert_eq!(FieldKind::Float3.size(LayoutRule::Wgsl), 12);
        assert_eq!(FieldKind::Float3.align(LayoutRule::Wgsl), 16);
        assert_eq!(FieldKind::Float3.align(LayoutRule::Packed), 4);
        assert_eq!(FieldKind::Float4x4.size(LayoutRule::Packed), 64);
    }

    #[test]
    fn test_padded_rule_keeps_scalar_out_of_vector_tail() {
        let layout = StructLayout::compute("Light", LayoutRule::Padded16, VEC3_THEN_FLOAT);
        assert_eq!(layout.offset_of("intensity"), Some(16));
        assert_eq!(layout.size, 32);
        assert_eq!(layout.align, 16);
    }

    #[test]
    fn test_wgsl_rule_packs_scalar_into_vector_tail() {
        let layout = StructLayout::compute("Light", LayoutRule::Wgsl, VEC3_THEN_FLOAT);
        assert_eq!(layout.offset_of("intensity"), Some(12));
        assert_eq!(layout.size, 16);
    }

    #[test]
    fn test_packed_rule() {
        let layout = StructLayout::compute("Light", LayoutRule::Packed, VEC3_THEN_FLOAT);
        assert_eq!(layout.offset_of("intensity"), Some(12));
        assert_eq!(layout.size, 16);
        assert_eq!(layout.align, 4);
    }

    #[test]
    fn test_unknown_field() {
        let layout = StructLayout::compute("Light", LayoutRule::Wgsl, VEC3_THEN_FLOAT);
        assert!(layout.field("radius").is_none());
    }

    #[test]
    fn test_round_up() {
        assert_eq!(round_up(0, 16), 0);
        assert_eq!(round_up(44, 16), 48);
        assert_eq!(round_up(48, 16), 48);
        assert_eq!(round_up(13, 4), 16);
    }
}
