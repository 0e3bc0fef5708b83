//! Binding slot enumerations.
//!
//! Slot values are array/table indices on both sides of the boundary: the host
//! binds a buffer at `index()` and the shader reads it from the same number.
//! Values are zero-based and contiguous. Never reorder the variants.

use crate::error::{LayoutError, LayoutResult};

/// Binding slot of a vertex-stage buffer.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexBufferIndex {
    /// Per-vertex positions (float3 stream).
    Positions = 0,
    /// Per-vertex normals (float3 stream).
    Normal = 1,
    /// [`VertexUniforms`](super::VertexUniforms) block.
    Uniforms = 2,
}

impl VertexBufferIndex {
    /// Every slot, in index order.
    pub const ALL: [Self; 3] = [Self::Positions, Self::Normal, Self::Uniforms];

    pub const fn index(self) -> u32 {
        self as u32
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Positions => "positions",
            Self::Normal => "normal",
            Self::Uniforms => "vertex uniforms",
        }
    }

    /// Whether the slot carries a per-vertex stream rather than a uniform block.
    pub const fn is_vertex_stream(self) -> bool {
        matches!(self, Self::Positions | Self::Normal)
    }
}

impl TryFrom<u32> for VertexBufferIndex {
    type Error = LayoutError;

    fn try_from(index: u32) -> LayoutResult<Self> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.index() == index)
            .ok_or(LayoutError::UnknownBindingSlot {
                stage: "vertex",
                index,
            })
    }
}

/// Binding slot of a fragment-stage buffer.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FragmentBufferIndex {
    /// [`FragmentUniforms`](super::FragmentUniforms) block.
    Uniforms = 0,
}

impl FragmentBufferIndex {
    pub const ALL: [Self; 1] = [Self::Uniforms];

    pub const fn index(self) -> u32 {
        self as u32
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Uniforms => "fragment uniforms",
        }
    }
}

impl TryFrom<u32> for FragmentBufferIndex {
    type Error = LayoutError;

    fn try_from(index: u32) -> LayoutResult<Self> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.index() == index)
            .ok_or(LayoutError::UnknownBindingSlot {
                stage: "fragment",
                index,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_slots_are_contiguous() {
        let indices: Vec<u32> = VertexBufferIndex::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_fragment_slots_are_contiguous() {
        let indices: Vec<u32> = FragmentBufferIndex::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0]);
    }

    #[test]
    fn test_slot_from_index() {
        assert_eq!(
            VertexBufferIndex::try_from(1).unwrap(),
            VertexBufferIndex::Normal
        );
        assert_eq!(
            FragmentBufferIndex::try_from(0).unwrap(),
            FragmentBufferIndex::Uniforms
        );
    }

    #[test]
    fn test_unknown_slot() {
        let err = VertexBufferIndex::try_from(3).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::UnknownBindingSlot {
                stage: "vertex",
                index: 3
            }
        ));
        assert!(FragmentBufferIndex::try_from(1).is_err());
    }

    #[test]
    fn test_vertex_streams() {
        assert!(VertexBufferIndex::Positions.is_vertex_stream());
        assert!(VertexBufferIndex::Normal.is_vertex_stream());
        assert!(!VertexBufferIndex::Uniforms.is_vertex_stream());
    }
}
