//! Scene file formats
//!
//! - [`scene`] - the scene document value tree produced by importers
//! - [`container`] - the `.nscene` container (magic + version + bitcode payload)

pub mod container;
pub mod scene;

pub use container::{SceneFormat, SceneFormatError, SCENE_FORMAT};
pub use scene::*;
