//! Node conversion and transform composition

use scene_common::{Matrix, Node};

use crate::diagnostics::{DiagnosticKind, Diagnostics, Scope};
use crate::mesh::{assemble_primitive, AttributeTable};
use crate::skeleton::convert_skin;
use crate::source::{SourceDocument, SourceNode};

/// Read a fixed-length transform field; empty means "not supplied"
fn transform_field<const N: usize>(
    values: &[f32],
    field: &'static str,
    scope: &Scope,
    diagnostics: &mut Diagnostics,
) -> Option<[f32; N]> {
    if values.is_empty() {
        return None;
    }
    match <[f32; N]>::try_from(values) {
        Ok(array) => Some(array),
        Err(_) => {
            diagnostics.report(
                scope.clone(),
                DiagnosticKind::InvalidTransformLength {
                    field,
                    len: values.len(),
                },
            );
            None
        }
    }
}

/// Compose the local transform of a node
///
/// Scale, then rotation, then translation are each left-multiplied onto the
/// identity. A raw matrix replaces the composed result; if the composed
/// result was not the identity the override is diagnosed. Fields with the
/// wrong length are diagnosed and ignored.
pub fn compose_transform(
    node: &SourceNode,
    node_index: usize,
    diagnostics: &mut Diagnostics,
) -> Matrix {
    let scope = Scope::Node(node_index);
    let mut transform = Matrix::IDENTITY;

    if let Some(scale) = transform_field::<3>(&node.scale, "scale", &scope, diagnostics) {
        transform = Matrix::from_scale(scale) * transform;
    }
    if let Some(rotation) = transform_field::<4>(&node.rotation, "rotation", &scope, diagnostics) {
        transform = Matrix::from_quaternion(rotation) * transform;
    }
    if let Some(translation) =
        transform_field::<3>(&node.translation, "translation", &scope, diagnostics)
    {
        transform = Matrix::from_translation(translation) * transform;
    }

    match transform_field::<16>(&node.matrix, "matrix", &scope, diagnostics) {
        Some(matrix) => {
            if !transform.is_identity() {
                diagnostics.report(scope, DiagnosticKind::MatrixOverridesTrs);
            }
            Matrix::from_array(matrix)
        }
        None => transform,
    }
}

/// Convert the source node at `node_index`
///
/// Out-of-range children are dropped with a diagnostic. Out-of-range mesh
/// and skin references are treated as absent.
pub fn convert_node(
    document: &SourceDocument,
    node_index: usize,
    table: &AttributeTable,
    diagnostics: &mut Diagnostics,
) -> Node {
    let source = &document.nodes[node_index];
    let transform = compose_transform(source, node_index, diagnostics);

    let mut children = Vec::with_capacity(source.children.len());
    for &child in &source.children {
        if child < document.nodes.len() {
            children.push(child as u32);
        } else {
            diagnostics.report(Scope::Node(node_index), DiagnosticKind::ChildOutOfRange(child));
        }
    }

    let mesh_primitives = match source.mesh.and_then(|m| document.meshes.get(m).map(|mesh| (m, mesh))) {
        Some((mesh_index, mesh)) => mesh
            .primitives
            .iter()
            .enumerate()
            .filter_map(|(primitive_index, primitive)| {
                assemble_primitive(
                    document,
                    primitive,
                    mesh_index,
                    primitive_index,
                    table,
                    diagnostics,
                )
            })
            .collect(),
        None => Vec::new(),
    };

    let skin = source
        .skin
        .filter(|&s| s < document.skins.len())
        .and_then(|skin_index| convert_skin(document, skin_index, node_index, diagnostics));

    Node {
        name: source.name.clone(),
        transform,
        children,
        mesh_primitives,
        skin,
    }
}
