//! Programmatic construction of source documents
//!
//! Packs every accessor into a single buffer (4-byte aligned, one buffer view
//! per accessor). Used by tests and by callers that synthesize geometry
//! without going through a glTF file.

use bytemuck::Pod;

use super::*;
use crate::mesh::codec::ComponentType;

#[derive(Debug, Default)]
pub struct SourceDocumentBuilder {
    doc: SourceDocument,
    buffer: Vec<u8>,
}

impl SourceDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append tightly packed elements and return the new accessor index
    ///
    /// The element count is derived from the data length and `accessor_type`.
    pub fn accessor<T: Pod>(
        &mut self,
        data: &[T],
        component_type: ComponentType,
        accessor_type: AccessorType,
    ) -> usize {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let element_size = component_type.size_bytes() * accessor_type.component_count();
        let count = bytes.len() / element_size;
        self.raw_accessor(bytes, component_type.tag(), accessor_type, count, None)
    }

    /// Append raw bytes with an arbitrary component tag, count and stride
    pub fn raw_accessor(
        &mut self,
        bytes: &[u8],
        component_type: u32,
        accessor_type: AccessorType,
        count: usize,
        byte_stride: Option<usize>,
    ) -> usize {
        while self.buffer.len() % 4 != 0 {
            self.buffer.push(0);
        }
        let byte_offset = self.buffer.len();
        self.buffer.extend_from_slice(bytes);

        let view = self.doc.buffer_views.len();
        self.doc.buffer_views.push(SourceBufferView {
            buffer: 0,
            byte_offset,
            byte_length: bytes.len(),
            byte_stride,
        });

        self.doc.accessors.push(SourceAccessor {
            buffer_view: Some(view),
            byte_offset: 0,
            component_type,
            accessor_type,
            count,
        });
        self.doc.accessors.len() - 1
    }

    pub fn node(&mut self, node: SourceNode) -> usize {
        self.doc.nodes.push(node);
        self.doc.nodes.len() - 1
    }

    pub fn mesh(&mut self, primitives: Vec<SourcePrimitive>) -> usize {
        self.doc.meshes.push(SourceMesh {
            name: String::new(),
            primitives,
        });
        self.doc.meshes.len() - 1
    }

    pub fn material(&mut self, material: SourceMaterial) -> usize {
        self.doc.materials.push(material);
        self.doc.materials.len() - 1
    }

    pub fn image(&mut self, image: SourceImage) -> usize {
        self.doc.images.push(image);
        self.doc.images.len() - 1
    }

    pub fn texture(&mut self, source: Option<usize>) -> usize {
        self.doc.textures.push(SourceTexture { source });
        self.doc.textures.len() - 1
    }

    pub fn skin(&mut self, skin: SourceSkin) -> usize {
        self.doc.skins.push(skin);
        self.doc.skins.len() - 1
    }

    pub fn animation(&mut self, animation: SourceAnimation) -> usize {
        self.doc.animations.push(animation);
        self.doc.animations.len() - 1
    }

    /// Add a scene and make it the default
    pub fn scene(&mut self, nodes: Vec<usize>) -> usize {
        self.doc.scenes.push(SourceScene {
            name: String::new(),
            nodes,
        });
        let index = self.doc.scenes.len() - 1;
        self.doc.default_scene = Some(index);
        index
    }

    /// Direct access for fields the builder has no helper for
    pub fn document_mut(&mut self) -> &mut SourceDocument {
        &mut self.doc
    }

    pub fn build(mut self) -> SourceDocument {
        self.doc.buffers = vec![self.buffer];
        self.doc
    }
}
