//! NSCN scene container (`.nscene`)
//!
//! Binary container for converted scenes using bitcode serialization.
//!
//! # Layout
//! ```text
//! 0x00: magic   "NSCN"
//! 0x04: version u32 (little-endian)
//! 0x08: SceneDocument (bitcode encoded)
//! ```

use thiserror::Error;

use super::scene::SceneDocument;

/// Scene container format specification.
///
/// Single source of truth for the container's file constants.
#[derive(Debug, Clone, Copy)]
pub struct SceneFormat {
    /// File extension without dot
    pub extension: &'static str,

    /// Magic bytes at start of file (4 bytes)
    pub magic: &'static [u8; 4],

    /// Format version for backward compatibility
    pub version: u32,
}

/// NSCN container constants
pub const SCENE_FORMAT: SceneFormat = SceneFormat {
    extension: "nscene",
    magic: b"NSCN",
    version: 1,
};

/// Size of magic + version
const HEADER_SIZE: usize = 8;

/// Errors decoding a scene container
#[derive(Debug, Error)]
pub enum SceneFormatError {
    #[error("scene data too small ({0} bytes)")]
    TooSmall(usize),

    #[error("invalid NSCN magic bytes")]
    InvalidMagic,

    #[error("unsupported NSCN version: {found} (max supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("failed to decode scene: {0}")]
    Decode(String),
}

impl SceneDocument {
    /// Serialize to a complete `.nscene` file image
    pub fn to_bytes(&self) -> Vec<u8> {
        let encoded = bitcode::encode(self);
        let mut bytes = Vec::with_capacity(HEADER_SIZE + encoded.len());
        bytes.extend_from_slice(SCENE_FORMAT.magic);
        bytes.extend_from_slice(&SCENE_FORMAT.version.to_le_bytes());
        bytes.extend(encoded);
        bytes
    }

    /// Deserialize from a `.nscene` file image
    ///
    /// Checks magic and version before decoding the payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SceneFormatError> {
        if bytes.len() < HEADER_SIZE {
            return Err(SceneFormatError::TooSmall(bytes.len()));
        }
        if &bytes[0..4] != SCENE_FORMAT.magic {
            return Err(SceneFormatError::InvalidMagic);
        }

        let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if version > SCENE_FORMAT.version {
            return Err(SceneFormatError::UnsupportedVersion {
                found: version,
                supported: SCENE_FORMAT.version,
            });
        }

        bitcode::decode(&bytes[HEADER_SIZE..]).map_err(|e| SceneFormatError::Decode(e.to_string()))
    }
}
