//! Source document model
//!
//! Owned, fully parsed view of an interchange asset (the glTF 2.0 object
//! graph). Nothing here is validated: index fields stay raw so that
//! out-of-range references survive until the importer decides how to degrade
//! them, component types are raw glTF tags, and node TRS fields are
//! variable-length so malformed lengths can be represented.

pub mod builder;
pub mod gltf;

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::mesh::codec::ComponentType;

/// Structural type of an accessor element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl AccessorType {
    /// Components per element
    pub fn component_count(self) -> usize {
        match self {
            AccessorType::Scalar => 1,
            AccessorType::Vec2 => 2,
            AccessorType::Vec3 => 3,
            AccessorType::Vec4 => 4,
            AccessorType::Mat2 => 4,
            AccessorType::Mat3 => 9,
            AccessorType::Mat4 => 16,
        }
    }
}

impl fmt::Display for AccessorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessorType::Scalar => "SCALAR",
            AccessorType::Vec2 => "VEC2",
            AccessorType::Vec3 => "VEC3",
            AccessorType::Vec4 => "VEC4",
            AccessorType::Mat2 => "MAT2",
            AccessorType::Mat3 => "MAT3",
            AccessorType::Mat4 => "MAT4",
        };
        f.write_str(name)
    }
}

/// Typed, strided view description into a buffer view
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAccessor {
    pub buffer_view: Option<usize>,
    /// Offset relative to the start of the buffer view
    pub byte_offset: usize,
    /// Raw glTF component type tag (5120..=5126 are defined)
    pub component_type: u32,
    pub accessor_type: AccessorType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceBufferView {
    pub buffer: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
    /// Distance between elements; `None` means tightly packed
    pub byte_stride: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceNode {
    pub name: String,
    pub children: Vec<usize>,
    /// Expected length 3 when present
    pub scale: Vec<f32>,
    /// Quaternion `[x, y, z, w]`, expected length 4 when present
    pub rotation: Vec<f32>,
    /// Expected length 3 when present
    pub translation: Vec<f32>,
    /// Column-major 4x4, expected length 16 when present
    pub matrix: Vec<f32>,
    pub mesh: Option<usize>,
    pub skin: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMesh {
    pub name: String,
    pub primitives: Vec<SourcePrimitive>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcePrimitive {
    /// Semantic name (e.g. `"POSITION"`) to accessor index
    pub attributes: BTreeMap<String, usize>,
    pub indices: Option<usize>,
    pub material: Option<usize>,
}

/// Reference from a material slot to a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub index: usize,
    /// UV set selector (`TEXCOORD_n`)
    pub tex_coord: u32,
}

impl TextureInfo {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            tex_coord: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceMaterial {
    pub name: String,
    pub base_color_factor: [f32; 4],
    pub base_color_texture: Option<TextureInfo>,
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub metallic_roughness_texture: Option<TextureInfo>,
    pub normal_scale: f32,
    pub normal_texture: Option<TextureInfo>,
    pub emissive_factor: [f32; 3],
    pub emissive_texture: Option<TextureInfo>,
    pub occlusion_texture: Option<TextureInfo>,
}

impl Default for SourceMaterial {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_color_factor: [1.0, 1.0, 1.0, 1.0],
            base_color_texture: None,
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            metallic_roughness_texture: None,
            normal_scale: 1.0,
            normal_texture: None,
            emissive_factor: [0.0, 0.0, 0.0],
            emissive_texture: None,
            occlusion_texture: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTexture {
    /// Image index
    pub source: Option<usize>,
}

/// Decoded image
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceImage {
    pub pixels: Vec<u8>,
    /// Raw glTF component type tag of each channel
    pub pixel_type: u32,
    /// Channels per pixel
    pub components: u32,
    pub width: u32,
    pub height: u32,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceSkin {
    pub joints: Vec<usize>,
    pub inverse_bind_matrices: Option<usize>,
    pub skeleton: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceAnimation {
    pub name: String,
    pub channels: Vec<SourceChannel>,
    pub samplers: Vec<SourceSampler>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceChannel {
    pub sampler: usize,
    pub target_node: Option<usize>,
    /// `"translation"`, `"rotation"`, `"scale"`, `"weights"`, ...
    pub target_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSampler {
    /// Keyframe time accessor
    pub input: usize,
    /// Keyframe value accessor
    pub output: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceScene {
    pub name: String,
    pub nodes: Vec<usize>,
}

/// A parsed interchange document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    pub nodes: Vec<SourceNode>,
    pub meshes: Vec<SourceMesh>,
    pub accessors: Vec<SourceAccessor>,
    pub buffer_views: Vec<SourceBufferView>,
    pub buffers: Vec<Vec<u8>>,
    pub materials: Vec<SourceMaterial>,
    pub textures: Vec<SourceTexture>,
    pub images: Vec<SourceImage>,
    pub skins: Vec<SourceSkin>,
    pub animations: Vec<SourceAnimation>,
    pub scenes: Vec<SourceScene>,
    pub default_scene: Option<usize>,
}

/// Failure resolving an accessor to bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessorError {
    #[error("accessor {index} out of range ({count} accessors)")]
    AccessorOutOfRange { index: usize, count: usize },

    #[error("accessor {0} has no buffer view")]
    MissingBufferView(usize),

    #[error("buffer view {index} out of range ({count} views)")]
    BufferViewOutOfRange { index: usize, count: usize },

    #[error("buffer {index} out of range ({count} buffers)")]
    BufferOutOfRange { index: usize, count: usize },

    #[error("unknown component type {0}")]
    UnknownComponentType(u32),

    #[error("accessor needs {needed} bytes but only {available} are available")]
    OutOfBounds { needed: usize, available: usize },
}

/// Resolved accessor: a bounds-checked window into a buffer
#[derive(Debug, Clone, Copy)]
pub struct AccessorView<'a> {
    bytes: &'a [u8],
    stride: usize,
    element_size: usize,
    count: usize,
    component_type: ComponentType,
    accessor_type: AccessorType,
}

impl<'a> AccessorView<'a> {
    /// Number of elements
    pub fn count(&self) -> usize {
        self.count
    }

    /// Distance in bytes between consecutive elements
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn accessor_type(&self) -> AccessorType {
        self.accessor_type
    }

    /// Bytes of element `index` (`element_size` long, starting at `stride * index`)
    ///
    /// Panics if `index >= count`.
    pub fn element(&self, index: usize) -> &'a [u8] {
        assert!(index < self.count, "element {} out of {}", index, self.count);
        let start = self.stride * index;
        &self.bytes[start..start + self.element_size]
    }

    /// Read the first `N` little-endian f32 components of every element
    ///
    /// Callers must have checked that the accessor is float-typed with at
    /// least `N` components.
    pub fn read_floats<const N: usize>(&self) -> Vec<[f32; N]> {
        (0..self.count)
            .map(|i| {
                let element = self.element(i);
                std::array::from_fn(|c| {
                    let o = c * 4;
                    f32::from_le_bytes([
                        element[o],
                        element[o + 1],
                        element[o + 2],
                        element[o + 3],
                    ])
                })
            })
            .collect()
    }
}

impl SourceDocument {
    /// Resolve accessor → buffer view → buffer and bounds-check the strided range
    pub fn accessor_view(&self, index: usize) -> Result<AccessorView<'_>, AccessorError> {
        let accessor = self
            .accessors
            .get(index)
            .ok_or(AccessorError::AccessorOutOfRange {
                index,
                count: self.accessors.len(),
            })?;
        let component_type = ComponentType::from_tag(accessor.component_type)
            .ok_or(AccessorError::UnknownComponentType(accessor.component_type))?;

        let view_index = accessor
            .buffer_view
            .ok_or(AccessorError::MissingBufferView(index))?;
        let view = self
            .buffer_views
            .get(view_index)
            .ok_or(AccessorError::BufferViewOutOfRange {
                index: view_index,
                count: self.buffer_views.len(),
            })?;
        let buffer = self
            .buffers
            .get(view.buffer)
            .ok_or(AccessorError::BufferOutOfRange {
                index: view.buffer,
                count: self.buffers.len(),
            })?;

        let element_size = component_type.size_bytes() * accessor.accessor_type.component_count();
        let stride = view
            .byte_stride
            .filter(|&s| s > 0)
            .unwrap_or(element_size);

        // The accessor may only see bytes inside its view
        let view_end = view.byte_offset.saturating_add(view.byte_length);
        let start = view.byte_offset.saturating_add(accessor.byte_offset);
        let available = view_end.min(buffer.len()).saturating_sub(start);
        let needed = match accessor.count {
            0 => 0,
            n => stride
                .saturating_mul(n - 1)
                .saturating_add(element_size),
        };
        if needed > available {
            return Err(AccessorError::OutOfBounds { needed, available });
        }

        let bytes = if needed == 0 {
            &[][..]
        } else {
            &buffer[start..start + needed]
        };

        Ok(AccessorView {
            bytes,
            stride,
            element_size,
            count: accessor.count,
            component_type,
            accessor_type: accessor.accessor_type,
        })
    }
}
