//! Vertex assembly
//!
//! Decodes every attribute of a primitive into a dense array of fixed-layout
//! vertex records. Records are written component by component through an
//! `f32` view of the array, at the offsets given by the attribute table.

use scene_common::{SkinnedVertex, UnskinnedVertex, Vertices};

use super::layout::{AttributeLayout, AttributeTable, AttributeType, VertexVariant};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Scope};
use crate::source::{AccessorError, AccessorView, SourceDocument, SourcePrimitive};

/// Accumulates attributes into one vertex array
#[derive(Debug)]
pub struct VerticesBuilder {
    variant: VertexVariant,
    vertices: Vertices,
    /// Fixed by the first attribute written
    count: Option<usize>,
}

impl VerticesBuilder {
    pub fn new(variant: VertexVariant) -> Self {
        let vertices = match variant {
            VertexVariant::Unskinned => Vertices::Unskinned(Vec::new()),
            VertexVariant::Skinned => Vertices::Skinned(Vec::new()),
        };
        Self {
            variant,
            vertices,
            count: None,
        }
    }

    fn resize(&mut self, count: usize) {
        match &mut self.vertices {
            Vertices::Unskinned(v) => v.resize(count, UnskinnedVertex::default()),
            Vertices::Skinned(v) => v.resize(count, SkinnedVertex::default()),
        }
    }

    fn floats_mut(&mut self) -> &mut [f32] {
        match &mut self.vertices {
            Vertices::Unskinned(v) => bytemuck::cast_slice_mut(v.as_mut_slice()),
            Vertices::Skinned(v) => bytemuck::cast_slice_mut(v.as_mut_slice()),
        }
    }

    /// Write every element of `view` into the attribute's slot of each record
    ///
    /// The first call sizes the array. A later attribute with a different
    /// element count is rejected and leaves the records untouched.
    pub fn write_attribute(
        &mut self,
        layout: &AttributeLayout,
        view: &AccessorView<'_>,
    ) -> Result<(), DiagnosticKind> {
        let count = view.count();
        match self.count {
            None => {
                self.resize(count);
                self.count = Some(count);
            }
            Some(expected) if expected != count => {
                return Err(DiagnosticKind::AttributeCountMismatch {
                    expected,
                    found: count,
                });
            }
            Some(_) => {}
        }

        let floats_per_record = self.variant.record_size() / 4;
        let range = layout.float_range();
        let component_type = view.component_type();
        let source_components = view.accessor_type().component_count();

        for (i, record) in self
            .floats_mut()
            .chunks_exact_mut(floats_per_record)
            .enumerate()
        {
            // Integer data on non-joint attributes is always read as normalized
            (layout.write)(
                &mut record[range.clone()],
                view.element(i),
                component_type,
                source_components,
                true,
                layout.fill,
            );
        }
        Ok(())
    }

    pub fn build(self) -> Vertices {
        self.vertices
    }
}

/// Decode all attributes of one primitive
///
/// Attributes are visited in semantic-name order. Unsupported semantics,
/// unresolvable accessors and unknown component types are diagnosed and
/// skipped. Joint and weight data on an unskinned primitive is ignored.
pub fn assemble_vertices(
    document: &SourceDocument,
    primitive: &SourcePrimitive,
    mesh_index: usize,
    primitive_index: usize,
    table: &AttributeTable,
    diagnostics: &mut Diagnostics,
) -> Vertices {
    let variant = VertexVariant::select(primitive.attributes.keys().map(String::as_str));
    let mut builder = VerticesBuilder::new(variant);

    for (semantic, &accessor) in &primitive.attributes {
        let scope = || Scope::Attribute {
            mesh: mesh_index,
            primitive: primitive_index,
            semantic: semantic.clone(),
        };

        let Some(attribute) = AttributeType::from_semantic(semantic) else {
            diagnostics.report(scope(), DiagnosticKind::UnsupportedAttribute);
            continue;
        };
        let Some(layout) = table.lookup(attribute, variant) else {
            continue;
        };

        let view = match document.accessor_view(accessor) {
            Ok(view) => view,
            Err(AccessorError::UnknownComponentType(tag)) => {
                diagnostics.report(scope(), DiagnosticKind::UnsupportedComponentType(tag));
                continue;
            }
            Err(e) => {
                diagnostics.report(scope(), DiagnosticKind::Accessor(e));
                continue;
            }
        };

        if let Err(kind) = builder.write_attribute(layout, &view) {
            diagnostics.report(scope(), kind);
        }
    }

    builder.build()
}
