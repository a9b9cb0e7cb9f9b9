//! scene-import library
//!
//! Converts glTF 2.0 assets into NSCN scene documents. The pipeline works on
//! a parsed [`SourceDocument`] and degrades gracefully: a bad attribute,
//! primitive, skin, texture or animation channel is skipped and recorded in
//! [`Diagnostics`] while everything else is still converted.

pub mod animation;
pub mod config;
pub mod diagnostics;
pub mod import;
pub mod material;
pub mod mesh;
pub mod node;
pub mod skeleton;
pub mod source;
pub mod texture;

pub use config::{AnimationConfig, ImportConfig};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Scope};
pub use import::{import_document, import_gltf, import_gltf_slice, ImportError, ImportOutput, Importer};
pub use source::{AccessorError, SourceDocument};

// Re-export the output format so callers need only one dependency
pub use scene_common::{SceneDocument, SCENE_FORMAT};
