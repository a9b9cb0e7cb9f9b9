//! Import diagnostics
//!
//! Every non-fatal problem found while converting is recorded here instead of
//! being printed. Each diagnostic names the unit it affected; the unit is
//! skipped or degraded and conversion continues.

use std::fmt;

use thiserror::Error;

use crate::source::{AccessorError, AccessorType};

/// The unit a diagnostic applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Scene,
    Texture(usize),
    Node(usize),
    Skin { node: usize, skin: usize },
    Primitive { mesh: usize, primitive: usize },
    Attribute {
        mesh: usize,
        primitive: usize,
        semantic: String,
    },
    Channel { animation: usize, channel: usize },
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Scene => write!(f, "scene"),
            Scope::Texture(index) => write!(f, "texture {}", index),
            Scope::Node(index) => write!(f, "node {}", index),
            Scope::Skin { node, skin } => write!(f, "skin {} (node {})", skin, node),
            Scope::Primitive { mesh, primitive } => {
                write!(f, "mesh {} primitive {}", mesh, primitive)
            }
            Scope::Attribute {
                mesh,
                primitive,
                semantic,
            } => write!(f, "mesh {} primitive {} attribute {}", mesh, primitive, semantic),
            Scope::Channel { animation, channel } => {
                write!(f, "animation {} channel {}", animation, channel)
            }
        }
    }
}

/// What went wrong
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagnosticKind {
    // ===== Vertex attributes =====
    #[error("unsupported vertex attribute, skipped")]
    UnsupportedAttribute,

    #[error("unsupported component type {0}, attribute skipped")]
    UnsupportedComponentType(u32),

    #[error("attribute has {found} elements but the primitive has {expected}, attribute skipped")]
    AttributeCountMismatch { expected: usize, found: usize },

    #[error("{0}")]
    Accessor(AccessorError),

    // ===== Primitives =====
    #[error("primitive has no index accessor, primitive dropped")]
    MissingIndices,

    #[error(
        "index accessor must be SCALAR unsigned 16/32-bit, found {accessor_type} with component type {component_type}, primitive dropped"
    )]
    UnsupportedIndexFormat {
        component_type: u32,
        accessor_type: AccessorType,
    },

    // ===== Nodes =====
    #[error("{field} has {len} components, ignored")]
    InvalidTransformLength { field: &'static str, len: usize },

    #[error("raw matrix overrides non-identity translation/rotation/scale")]
    MatrixOverridesTrs,

    #[error("child node {0} out of range, dropped")]
    ChildOutOfRange(usize),

    // ===== Skins =====
    #[error("joint node {0} out of range, skin omitted")]
    JointOutOfRange(usize),

    #[error("skeleton node {0} out of range, treated as absent")]
    SkeletonOutOfRange(usize),

    #[error(
        "inverse bind matrices must be MAT4 float, found {accessor_type} with component type {component_type}, skin omitted"
    )]
    InvalidInverseBindMatrices {
        component_type: u32,
        accessor_type: AccessorType,
    },

    // ===== Textures =====
    #[error("image {0} out of range, texture left empty")]
    ImageOutOfRange(usize),

    #[error("unsupported pixel type {0}, texture left empty")]
    UnsupportedPixelType(u32),

    #[error("image has {found} bytes, expected {expected}, texture left empty")]
    ImageSizeMismatch { expected: usize, found: usize },

    // ===== Animation channels =====
    #[error("sampler {0} out of range, channel skipped")]
    SamplerOutOfRange(usize),

    #[error("channel has no target node, skipped")]
    MissingTargetNode,

    #[error("target node {0} out of range, channel skipped")]
    TargetNodeOutOfRange(usize),

    #[error(
        "keyframe times must be SCALAR float, found {accessor_type} with component type {component_type}, channel skipped"
    )]
    InvalidTimeAccessor {
        component_type: u32,
        accessor_type: AccessorType,
    },

    #[error("{times} keyframe times but {values} values, channel skipped")]
    KeyframeCountMismatch { times: usize, values: usize },

    #[error("keyframe values must be float, found component type {0}, channel skipped")]
    InvalidValueComponentType(u32),

    #[error("{path} keyframes must be {expected}, found {found}, channel skipped")]
    InvalidValueType {
        path: &'static str,
        expected: AccessorType,
        found: AccessorType,
    },

    #[error("unsupported target property '{0}', channel skipped")]
    UnsupportedTargetPath(String),

    #[error("keyframe times are not ascending")]
    TimelineNotAscending,

    #[error("keyframe times are not ascending, channel skipped")]
    UnsortedTimelineRejected,
}

/// One recorded problem
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub scope: Scope,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.scope, self.kind)
    }
}

/// Ordered diagnostic collector
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, scope: Scope, kind: DiagnosticKind) {
        tracing::debug!("{}: {}", scope, kind);
        self.entries.push(Diagnostic { scope, kind });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
