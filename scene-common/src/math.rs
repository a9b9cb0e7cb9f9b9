//! Math types for scene documents
//!
//! Provides a POD 4x4 matrix that is serializable and can be shared between
//! the importer and scene consumers. Composition goes through `glam`; storage
//! stays a flat array so the encoded form does not depend on glam's layout.

use bitcode::{Decode, Encode};
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// 4x4 transform matrix (column-major storage, POD type)
///
/// Memory layout (64 bytes): four columns of four floats each.
/// Translation is stored in elements 12, 13 and 14.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[repr(C)]
pub struct Matrix {
    pub m: [f32; 16],
}

impl Matrix {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Create from 16 floats in storage order
    pub const fn from_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Flat f32 array in storage order
    pub const fn to_array(&self) -> [f32; 16] {
        self.m
    }

    /// Non-uniform scale
    pub fn from_scale(s: [f32; 3]) -> Self {
        Mat4::from_scale(Vec3::from_array(s)).into()
    }

    /// Translation
    pub fn from_translation(t: [f32; 3]) -> Self {
        Mat4::from_translation(Vec3::from_array(t)).into()
    }

    /// Rotation from a quaternion stored as `[x, y, z, w]`
    ///
    /// The quaternion is used as given; callers that need a pure rotation
    /// must pass a unit quaternion.
    pub fn from_quaternion(q: [f32; 4]) -> Self {
        Mat4::from_quat(Quat::from_array(q)).into()
    }

    /// Exact comparison against [`Matrix::IDENTITY`]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Transform a direction (w = 0)
    pub fn transform_vector3(&self, v: [f32; 3]) -> [f32; 3] {
        Mat4::from(*self)
            .transform_vector3(Vec3::from_array(v))
            .to_array()
    }

    /// Transform a point (w = 1)
    pub fn transform_point3(&self, p: [f32; 3]) -> [f32; 3] {
        Mat4::from(*self)
            .transform_point3(Vec3::from_array(p))
            .to_array()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for Matrix {
    fn from(m: Mat4) -> Self {
        Self {
            m: m.to_cols_array(),
        }
    }
}

impl From<Matrix> for Mat4 {
    fn from(m: Matrix) -> Self {
        Mat4::from_cols_array(&m.m)
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        (Mat4::from(self) * Mat4::from(rhs)).into()
    }
}
