//! Mesh primitive assembly

use scene_common::{IndexType, Indices, Material, MeshPrimitive};

use super::codec::ComponentType;
use super::layout::AttributeTable;
use super::vertices::assemble_vertices;
use crate::diagnostics::{DiagnosticKind, Diagnostics, Scope};
use crate::material::resolve_material;
use crate::source::{AccessorError, AccessorType, SourceDocument, SourcePrimitive};

/// Build one primitive record
///
/// Returns `None` when the index buffer is missing or unusable; the failure
/// is diagnosed and the caller continues with the next primitive.
pub fn assemble_primitive(
    document: &SourceDocument,
    primitive: &SourcePrimitive,
    mesh_index: usize,
    primitive_index: usize,
    table: &AttributeTable,
    diagnostics: &mut Diagnostics,
) -> Option<MeshPrimitive> {
    let vertices = assemble_vertices(
        document,
        primitive,
        mesh_index,
        primitive_index,
        table,
        diagnostics,
    );

    let scope = Scope::Primitive {
        mesh: mesh_index,
        primitive: primitive_index,
    };
    let indices = match extract_indices(document, primitive) {
        Ok(indices) => indices,
        Err(kind) => {
            diagnostics.report(scope, kind);
            return None;
        }
    };

    let material = match primitive.material.and_then(|i| document.materials.get(i)) {
        Some(material) => resolve_material(material, document.textures.len()),
        None => Material::unlit(),
    };

    Some(MeshPrimitive {
        vertices,
        indices,
        material,
    })
}

/// Copy the index accessor's bytes verbatim
fn extract_indices(
    document: &SourceDocument,
    primitive: &SourcePrimitive,
) -> Result<Indices, DiagnosticKind> {
    let accessor = primitive.indices.ok_or(DiagnosticKind::MissingIndices)?;

    let view = document.accessor_view(accessor).map_err(|e| match e {
        AccessorError::UnknownComponentType(tag) => DiagnosticKind::UnsupportedIndexFormat {
            component_type: tag,
            accessor_type: document.accessors[accessor].accessor_type,
        },
        e => DiagnosticKind::Accessor(e),
    })?;

    let index_type = match (view.component_type(), view.accessor_type()) {
        (ComponentType::UnsignedShort, AccessorType::Scalar) => IndexType::U16,
        (ComponentType::UnsignedInt, AccessorType::Scalar) => IndexType::U32,
        (component_type, accessor_type) => {
            return Err(DiagnosticKind::UnsupportedIndexFormat {
                component_type: component_type.tag(),
                accessor_type,
            });
        }
    };

    let mut data = Vec::with_capacity(view.count() * index_type.size_bytes());
    for i in 0..view.count() {
        data.extend_from_slice(view.element(i));
    }

    Ok(Indices {
        index_type,
        count: view.count() as u32,
        data,
    })
}
