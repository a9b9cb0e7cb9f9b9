//! Shared scene types for the Nethercore scene pipeline
//!
//! This crate provides the target side of scene conversion, shared between:
//! - `scene-import` (glTF -> scene document conversion)
//! - scene consumers that load `.nscene` files
//!
//! # Modules
//!
//! - [`math`] - POD 4x4 matrix with glam-backed composition
//! - [`formats`] - Scene document value tree and the `.nscene` container

pub mod formats;
pub mod math;

pub use formats::{
    Animation, Channel, EmbeddedImage, ImageComponentType, IndexType, Indices, Keyframes,
    Material, MaterialType, MeshPrimitive, Node, SceneDocument, SceneFormat, SceneFormatError,
    SceneSummary, Skin, SkinnedVertex, Texture, UnskinnedVertex, Vertices, SCENE_FORMAT,
};
pub use math::Matrix;
