//! Scene document value tree
//!
//! Everything an importer produces for one converted asset. Records are plain
//! data: indices into sibling lists instead of pointers, `None` for absent
//! references. Vertex records are `#[repr(C)]` POD structs so that importers
//! can fill them component by component at fixed byte offsets.

use bitcode::{Decode, Encode};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::math::Matrix;

/// Root of a converted scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct SceneDocument {
    /// Root transform applied above every top-level node
    pub transform: Matrix,
    /// Top-level node indices (into `nodes`)
    pub children: Vec<u32>,
    pub nodes: Vec<Node>,
    pub textures: Vec<Texture>,
    pub animations: Vec<Animation>,
}

/// Scene graph node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Node {
    pub name: String,
    /// Local transform relative to the parent
    pub transform: Matrix,
    /// Child node indices (into `SceneDocument::nodes`)
    pub children: Vec<u32>,
    pub mesh_primitives: Vec<MeshPrimitive>,
    pub skin: Option<Skin>,
}

/// One drawable piece of a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct MeshPrimitive {
    pub vertices: Vertices,
    pub indices: Indices,
    pub material: Material,
}

/// Vertex array in one of the two fixed record shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub enum Vertices {
    Unskinned(Vec<UnskinnedVertex>),
    Skinned(Vec<SkinnedVertex>),
}

impl Vertices {
    /// Number of vertex records
    pub fn len(&self) -> usize {
        match self {
            Vertices::Unskinned(v) => v.len(),
            Vertices::Skinned(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_skinned(&self) -> bool {
        matches!(self, Vertices::Skinned(_))
    }

    /// Raw vertex bytes, tightly packed in record order
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Vertices::Unskinned(v) => bytemuck::cast_slice(v),
            Vertices::Skinned(v) => bytemuck::cast_slice(v),
        }
    }
}

/// Vertex without skinning data (48 bytes)
///
/// ```text
/// 0x00: position       f32 x 3
/// 0x0C: normal         f32 x 3
/// 0x18: texture_coords f32 x 2
/// 0x20: color          f32 x 4
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize, Encode, Decode,
)]
#[repr(C)]
pub struct UnskinnedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texture_coords: [f32; 2],
    pub color: [f32; 4],
}

impl UnskinnedVertex {
    pub const SIZE: usize = 48;
}

impl Default for UnskinnedVertex {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0; 3],
            texture_coords: [0.0; 2],
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Vertex with joint indices and weights (80 bytes)
///
/// ```text
/// 0x00: vertex  UnskinnedVertex
/// 0x30: joints  f32 x 4
/// 0x40: weights f32 x 4
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize, Encode, Decode,
)]
#[repr(C)]
pub struct SkinnedVertex {
    pub vertex: UnskinnedVertex,
    pub joints: [f32; 4],
    pub weights: [f32; 4],
}

impl SkinnedVertex {
    pub const SIZE: usize = 80;
}

/// Index element width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum IndexType {
    U16,
    U32,
}

impl IndexType {
    /// Size of one index in bytes
    pub fn size_bytes(self) -> usize {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

/// Index buffer, copied byte-for-byte from the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Indices {
    pub index_type: IndexType,
    pub count: u32,
    /// Little-endian index data (`count * index_type.size_bytes()` bytes)
    pub data: Vec<u8>,
}

impl Indices {
    /// Decode the index data to u32 values
    pub fn to_u32(&self) -> Vec<u32> {
        match self.index_type {
            IndexType::U16 => self
                .data
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]) as u32)
                .collect(),
            IndexType::U32 => self
                .data
                .chunks_exact(4)
                .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        }
    }
}

/// Shading model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub enum MaterialType {
    Unlit,
    #[default]
    PhysicallyBased,
}

/// Surface material
///
/// Texture slots index into `SceneDocument::textures`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Material {
    pub material_type: MaterialType,
    pub base_color_factor: [f32; 4],
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub normal_scale: f32,
    pub emissive_factor: [f32; 3],
    pub base_color_texture: Option<u32>,
    pub metallic_roughness_texture: Option<u32>,
    pub normal_texture: Option<u32>,
    pub emissive_texture: Option<u32>,
    pub occlusion_texture: Option<u32>,
}

impl Material {
    /// Fallback material for primitives without a usable source material
    pub fn unlit() -> Self {
        Self {
            material_type: MaterialType::Unlit,
            ..Self::default()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            material_type: MaterialType::PhysicallyBased,
            base_color_factor: [1.0, 1.0, 1.0, 1.0],
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            normal_scale: 1.0,
            emissive_factor: [0.0, 0.0, 0.0],
            base_color_texture: None,
            metallic_roughness_texture: None,
            normal_texture: None,
            emissive_texture: None,
            occlusion_texture: None,
        }
    }
}

/// Skeleton binding for a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Skin {
    /// Joint node indices
    pub joints: Vec<u32>,
    /// One inverse bind matrix per joint, same order as `joints`
    pub inverse_bind_matrices: Vec<Matrix>,
    /// Skeleton root node
    pub skeleton: Option<u32>,
}

/// Texture record; both fields stay empty when the source image is unusable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Texture {
    pub embedded_image: Option<EmbeddedImage>,
    pub uri: Option<String>,
}

/// Image channel width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum ImageComponentType {
    U8,
    U16,
}

impl ImageComponentType {
    pub fn size_bytes(self) -> usize {
        match self {
            ImageComponentType::U8 => 1,
            ImageComponentType::U16 => 2,
        }
    }
}

/// Decoded pixel data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct EmbeddedImage {
    pub bytes: Vec<u8>,
    pub component_type: ImageComponentType,
    /// Channels per pixel
    pub component_count: u32,
    pub width: u32,
    pub height: u32,
}

/// Named set of keyframed channels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Animation {
    pub name: String,
    /// Translation channels first, then rotation, then scale
    pub channels: Vec<Channel>,
}

/// One animated property of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Channel {
    /// Target node index
    pub node: u32,
    /// Keyframe times in seconds
    pub timeline: Vec<f32>,
    pub keyframes: Keyframes,
}

/// Keyframe values, one per timeline entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub enum Keyframes {
    Translation(Vec<[f32; 3]>),
    /// Quaternions `[x, y, z, w]`
    Rotation(Vec<[f32; 4]>),
    Scale(Vec<[f32; 3]>),
}

impl Keyframes {
    pub fn len(&self) -> usize {
        match self {
            Keyframes::Translation(v) | Keyframes::Scale(v) => v.len(),
            Keyframes::Rotation(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Record counts for a scene (used for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneSummary {
    pub nodes: usize,
    pub mesh_primitives: usize,
    pub vertices: usize,
    pub skins: usize,
    pub textures: usize,
    pub embedded_images: usize,
    pub animations: usize,
    pub channels: usize,
    /// Keyframes across all channels
    pub keyframes: usize,
}

impl SceneDocument {
    /// Count the records in this scene
    pub fn summary(&self) -> SceneSummary {
        let mut summary = SceneSummary {
            nodes: self.nodes.len(),
            textures: self.textures.len(),
            animations: self.animations.len(),
            ..Default::default()
        };
        for node in &self.nodes {
            summary.mesh_primitives += node.mesh_primitives.len();
            summary.vertices += node
                .mesh_primitives
                .iter()
                .map(|p| p.vertices.len())
                .sum::<usize>();
            if node.skin.is_some() {
                summary.skins += 1;
            }
        }
        summary.embedded_images = self
            .textures
            .iter()
            .filter(|t| t.embedded_image.is_some())
            .count();
        for channel in self.animations.iter().flat_map(|a| &a.channels) {
            summary.channels += 1;
            summary.keyframes += channel.keyframes.len();
        }
        summary
    }
}
