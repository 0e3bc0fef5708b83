//! Layout error type

use thiserror::Error;

/// Errors raised when a binding slot or a shader declaration disagrees with the
/// host-side layout table.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Unknown {stage} binding slot: {index}")]
    UnknownBindingSlot { stage: &'static str, index: u32 },
    #[error("Failed to parse shader: {0}")]
    ShaderParse(String),
    #[error("Shader validation failed: {0}")]
    ShaderValidation(String),
    #[error("Struct `{0}` is not declared in the shader")]
    MissingStruct(&'static str),
    #[error("Struct `{structure}` member `{member}` has a type with no shared layout")]
    UnsupportedMember { structure: String, member: String },
    #[error("Struct `{structure}` has {shader} members in the shader, expected {host}")]
    FieldCount {
        structure: &'static str,
        host: usize,
        shader: usize,
    },
    #[error("Struct `{structure}` field {position}: host declares `{host}`, shader declares `{shader}`")]
    FieldMismatch {
        structure: &'static str,
        position: usize,
        host: String,
        shader: String,
    },
    #[error("`{structure}.{field}` offset mismatch: host {host}, shader {shader}")]
    OffsetMismatch {
        structure: &'static str,
        field: &'static str,
        host: u32,
        shader: u32,
    },
    #[error("`{structure}` size mismatch: host {host} bytes, shader {shader} bytes")]
    SizeMismatch {
        structure: &'static str,
        host: u32,
        shader: u32,
    },
    #[error("No uniform of type `{0}` is bound in the shader")]
    MissingUniform(&'static str),
    #[error("Uniform `{structure}` expected at group {expected_group} binding {expected_binding}, found group {group} binding {binding}")]
    BindingMismatch {
        structure: &'static str,
        expected_group: u32,
        expected_binding: u32,
        group: u32,
        binding: u32,
    },
    #[error("Entry point `{0}` not found")]
    MissingEntryPoint(&'static str),
    #[error("Vertex input `{input}` expected at location {expected}, found {found:?}")]
    LocationMismatch {
        input: &'static str,
        expected: u32,
        found: Option<u32>,
    },
    #[error("Failed to read shader source: {0}")]
    Io(#[from] std::io::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
