//! Skin conversion

use scene_common::{Matrix, Skin};

use crate::diagnostics::{DiagnosticKind, Diagnostics, Scope};
use crate::mesh::codec::ComponentType;
use crate::source::{AccessorType, SourceDocument};

/// Build the skin record for a node
///
/// Returns `None` (with a diagnostic) when a joint is out of range or the
/// inverse bind matrix accessor is unusable. Without an inverse bind matrix
/// accessor every joint gets the identity. `skin_index` must be in range.
pub fn convert_skin(
    document: &SourceDocument,
    skin_index: usize,
    node_index: usize,
    diagnostics: &mut Diagnostics,
) -> Option<Skin> {
    let source = &document.skins[skin_index];
    let scope = Scope::Skin {
        node: node_index,
        skin: skin_index,
    };

    if let Some(&joint) = source.joints.iter().find(|&&j| j >= document.nodes.len()) {
        diagnostics.report(scope, DiagnosticKind::JointOutOfRange(joint));
        return None;
    }
    let joints: Vec<u32> = source.joints.iter().map(|&j| j as u32).collect();

    let inverse_bind_matrices = match source.inverse_bind_matrices {
        None => vec![Matrix::IDENTITY; joints.len()],
        Some(accessor) => {
            let view = match document.accessor_view(accessor) {
                Ok(view) => view,
                Err(e) => {
                    diagnostics.report(scope, DiagnosticKind::Accessor(e));
                    return None;
                }
            };
            if view.component_type() != ComponentType::Float
                || view.accessor_type() != AccessorType::Mat4
            {
                diagnostics.report(
                    scope,
                    DiagnosticKind::InvalidInverseBindMatrices {
                        component_type: view.component_type().tag(),
                        accessor_type: view.accessor_type(),
                    },
                );
                return None;
            }
            view.read_floats::<16>()
                .into_iter()
                .map(Matrix::from_array)
                .collect()
        }
    };

    let skeleton = match source.skeleton {
        Some(root) if root < document.nodes.len() => Some(root as u32),
        Some(root) => {
            diagnostics.report(scope, DiagnosticKind::SkeletonOutOfRange(root));
            None
        }
        None => None,
    };

    Some(Skin {
        joints,
        inverse_bind_matrices,
        skeleton,
    })
}
