//! Attribute layout table
//!
//! Maps each supported vertex semantic to where it lands inside the two
//! fixed vertex records and how its components are written there.

use std::fmt;
use std::mem::offset_of;

use scene_common::{SkinnedVertex, UnskinnedVertex};

use super::codec::ComponentType;

/// Vertex semantics understood by the assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Position,
    Normal,
    TextureCoords,
    Color,
    Joints,
    Weights,
}

impl AttributeType {
    pub const ALL: [AttributeType; 6] = [
        AttributeType::Position,
        AttributeType::Normal,
        AttributeType::TextureCoords,
        AttributeType::Color,
        AttributeType::Joints,
        AttributeType::Weights,
    ];

    /// Parse a glTF attribute semantic. Only the first UV, color, joint and
    /// weight sets are supported.
    pub fn from_semantic(semantic: &str) -> Option<Self> {
        match semantic {
            "POSITION" => Some(AttributeType::Position),
            "NORMAL" => Some(AttributeType::Normal),
            "TEXCOORD_0" => Some(AttributeType::TextureCoords),
            "COLOR_0" => Some(AttributeType::Color),
            "JOINTS_0" => Some(AttributeType::Joints),
            "WEIGHTS_0" => Some(AttributeType::Weights),
            _ => None,
        }
    }

    pub fn semantic(self) -> &'static str {
        match self {
            AttributeType::Position => "POSITION",
            AttributeType::Normal => "NORMAL",
            AttributeType::TextureCoords => "TEXCOORD_0",
            AttributeType::Color => "COLOR_0",
            AttributeType::Joints => "JOINTS_0",
            AttributeType::Weights => "WEIGHTS_0",
        }
    }

    /// Joint indices and weights only exist on skinned records
    pub fn is_skinning(self) -> bool {
        matches!(self, AttributeType::Joints | AttributeType::Weights)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.semantic())
    }
}

/// Vertex record shape, chosen once per primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexVariant {
    Unskinned,
    Skinned,
}

impl VertexVariant {
    /// Skinned only when both joint indices and joint weights are present
    pub fn select<'a>(semantics: impl IntoIterator<Item = &'a str>) -> Self {
        let (mut joints, mut weights) = (false, false);
        for semantic in semantics {
            match AttributeType::from_semantic(semantic) {
                Some(AttributeType::Joints) => joints = true,
                Some(AttributeType::Weights) => weights = true,
                _ => {}
            }
        }
        if joints && weights {
            VertexVariant::Skinned
        } else {
            VertexVariant::Unskinned
        }
    }

    /// Size of one record in bytes
    pub fn record_size(self) -> usize {
        match self {
            VertexVariant::Unskinned => UnskinnedVertex::SIZE,
            VertexVariant::Skinned => SkinnedVertex::SIZE,
        }
    }
}

/// Writes one source element into its destination components
///
/// `dest` is exactly the attribute's destination slice. `element` holds the
/// source element's bytes, with `source_components` components of
/// `component_type`. Components the source does not supply are set to `fill`.
pub type AttributeWriter = fn(
    dest: &mut [f32],
    element: &[u8],
    component_type: ComponentType,
    source_components: usize,
    normalized: bool,
    fill: f32,
);

/// Reads components through the codec with the accessor's normalized flag
fn write_float_components(
    dest: &mut [f32],
    element: &[u8],
    component_type: ComponentType,
    source_components: usize,
    normalized: bool,
    fill: f32,
) {
    let size = component_type.size_bytes();
    for (i, slot) in dest.iter_mut().enumerate() {
        *slot = if i < source_components {
            component_type.read(element, i * size, normalized)
        } else {
            fill
        };
    }
}

/// Joint indices are never normalized
fn write_joint_components(
    dest: &mut [f32],
    element: &[u8],
    component_type: ComponentType,
    source_components: usize,
    _normalized: bool,
    fill: f32,
) {
    write_float_components(dest, element, component_type, source_components, false, fill);
}

/// Destination of one attribute within a vertex record
#[derive(Clone, Copy)]
pub struct AttributeLayout {
    /// Byte offset within the record
    pub offset_bytes: usize,
    /// Number of f32 components written
    pub component_count: usize,
    /// Value for components the source does not supply
    pub fill: f32,
    pub write: AttributeWriter,
}

impl fmt::Debug for AttributeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeLayout")
            .field("offset_bytes", &self.offset_bytes)
            .field("component_count", &self.component_count)
            .field("fill", &self.fill)
            .finish_non_exhaustive()
    }
}

impl AttributeLayout {
    /// Float index range of this attribute within a record viewed as `[f32]`
    pub fn float_range(&self) -> std::ops::Range<usize> {
        let start = self.offset_bytes / 4;
        start..start + self.component_count
    }
}

/// Semantic to layout lookup for both vertex variants
///
/// Built once per import and passed to the assembler.
#[derive(Debug, Clone)]
pub struct AttributeTable {
    unskinned: [Option<AttributeLayout>; 6],
    skinned: [Option<AttributeLayout>; 6],
}

impl AttributeTable {
    pub fn new() -> Self {
        let base = offset_of!(SkinnedVertex, vertex);
        let mut unskinned = [None; 6];
        let mut skinned = [None; 6];
        let float: AttributeWriter = write_float_components;
        let joint: AttributeWriter = write_joint_components;

        for attribute in AttributeType::ALL {
            let (offset, component_count, fill, write): (usize, usize, f32, AttributeWriter) =
                match attribute {
                    AttributeType::Position => (
                        offset_of!(UnskinnedVertex, position),
                        3,
                        0.0,
                        float,
                    ),
                    AttributeType::Normal => (
                        offset_of!(UnskinnedVertex, normal),
                        3,
                        0.0,
                        float,
                    ),
                    AttributeType::TextureCoords => (
                        offset_of!(UnskinnedVertex, texture_coords),
                        2,
                        0.0,
                        float,
                    ),
                    AttributeType::Color => (
                        offset_of!(UnskinnedVertex, color),
                        4,
                        1.0,
                        float,
                    ),
                    AttributeType::Joints => (
                        offset_of!(SkinnedVertex, joints),
                        4,
                        0.0,
                        joint,
                    ),
                    AttributeType::Weights => (
                        offset_of!(SkinnedVertex, weights),
                        4,
                        0.0,
                        float,
                    ),
                };

            let slot = attribute as usize;
            if attribute.is_skinning() {
                skinned[slot] = Some(AttributeLayout {
                    offset_bytes: offset,
                    component_count,
                    fill,
                    write,
                });
            } else {
                unskinned[slot] = Some(AttributeLayout {
                    offset_bytes: offset,
                    component_count,
                    fill,
                    write,
                });
                skinned[slot] = Some(AttributeLayout {
                    offset_bytes: base + offset,
                    component_count,
                    fill,
                    write,
                });
            }
        }

        Self {
            unskinned,
            skinned,
        }
    }

    /// Layout of `attribute` in `variant`; `None` for skinning attributes on
    /// unskinned records
    pub fn lookup(&self, attribute: AttributeType, variant: VertexVariant) -> Option<&AttributeLayout> {
        let layouts = match variant {
            VertexVariant::Unskinned => &self.unskinned,
            VertexVariant::Skinned => &self.skinned,
        };
        layouts[attribute as usize].as_ref()
    }
}

impl Default for AttributeTable {
    fn default() -> Self {
        Self::new()
    }
}
