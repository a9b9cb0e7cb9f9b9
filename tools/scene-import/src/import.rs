//! Conversion pipeline entry points

use std::path::Path;

use scene_common::{Matrix, SceneDocument};
use thiserror::Error;

use crate::animation::convert_animation;
use crate::config::ImportConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics, Scope};
use crate::mesh::AttributeTable;
use crate::node::convert_node;
use crate::source::{self, SourceDocument};
use crate::texture::convert_texture;

/// Conditions that abort the whole conversion
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to parse glTF: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("document has no default scene")]
    NoDefaultScene,

    #[error("scene {index} out of range ({count} scenes)")]
    SceneOutOfRange { index: usize, count: usize },
}

/// A converted scene and everything that was skipped on the way
#[derive(Debug, Clone)]
pub struct ImportOutput {
    pub scene: SceneDocument,
    pub diagnostics: Diagnostics,
}

/// Flips the source's right-handed Z axis for the engine
pub const ROOT_TRANSFORM_SCALE: [f32; 3] = [1.0, 1.0, -1.0];

/// Reusable converter holding the attribute table and configuration
#[derive(Debug, Clone)]
pub struct Importer {
    config: ImportConfig,
    attributes: AttributeTable,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            attributes: AttributeTable::new(),
        }
    }

    /// Convert a parsed source document
    pub fn import(&self, document: &SourceDocument) -> Result<ImportOutput, ImportError> {
        let scene_index = self
            .config
            .scene
            .or(document.default_scene)
            .ok_or(ImportError::NoDefaultScene)?;
        let source_scene = document
            .scenes
            .get(scene_index)
            .ok_or(ImportError::SceneOutOfRange {
                index: scene_index,
                count: document.scenes.len(),
            })?;

        let mut diagnostics = Diagnostics::new();
        let mut scene = SceneDocument {
            transform: Matrix::from_scale(ROOT_TRANSFORM_SCALE),
            ..Default::default()
        };

        for &node in &source_scene.nodes {
            if node < document.nodes.len() {
                scene.children.push(node as u32);
            } else {
                diagnostics.report(Scope::Scene, DiagnosticKind::ChildOutOfRange(node));
            }
        }

        tracing::debug!("Processing {} textures", document.textures.len());
        scene.textures = (0..document.textures.len())
            .map(|index| convert_texture(document, index, &mut diagnostics))
            .collect();

        tracing::debug!("Processing {} nodes", document.nodes.len());
        scene.nodes = (0..document.nodes.len())
            .map(|index| convert_node(document, index, &self.attributes, &mut diagnostics))
            .collect();

        tracing::debug!("Processing {} animations", document.animations.len());
        scene.animations = (0..document.animations.len())
            .map(|index| {
                convert_animation(document, index, &self.config.animation, &mut diagnostics)
            })
            .collect();

        Ok(ImportOutput { scene, diagnostics })
    }
}

/// Convert a parsed source document with `config`
pub fn import_document(
    document: &SourceDocument,
    config: &ImportConfig,
) -> Result<ImportOutput, ImportError> {
    Importer::new(config.clone()).import(document)
}

/// Parse and convert a `.gltf`/`.glb` file
pub fn import_gltf(path: &Path, config: &ImportConfig) -> Result<ImportOutput, ImportError> {
    let document = source::gltf::load(path)?;
    import_document(&document, config)
}

/// Parse and convert a self-contained glTF held in memory
pub fn import_gltf_slice(bytes: &[u8], config: &ImportConfig) -> Result<ImportOutput, ImportError> {
    let document = source::gltf::load_slice(bytes)?;
    import_document(&document, config)
}
