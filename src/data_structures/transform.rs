//! Model-matrix composition for a single draw.
//!
//! A [`Transform`] only lives for the duration of one draw call. The matrix
//! is always built as
//!
//! `Translate(position) · RotateX(rx) · RotateY(ry) · RotateZ(rz) · Scale(scale)`
//!
//! so a vertex is scaled first, then rotated about Z, Y and X (in that
//! order, each about the world axis) and finally moved into place. The order
//! is fixed: existing scene scripts depend on it.

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, per-axis rotation in degrees and position of one draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation_degrees: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Transform {
    /// Identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_degrees: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        compose(self.scale, self.rotation_degrees, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vector3<f32>> for Transform {
    fn from(position: Vector3<f32>) -> Self {
        Transform {
            position,
            ..Default::default()
        }
    }
}

/// Compose a model matrix from scale, rotation (degrees about X, Y, Z) and
/// position. Pure; no shared state.
pub fn compose(
    scale: Vector3<f32>,
    rotation_degrees: Vector3<f32>,
    position: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_translation(position)
        * Matrix4::from_angle_x(Deg(rotation_degrees.x))
        * Matrix4::from_angle_y(Deg(rotation_degrees.y))
        * Matrix4::from_angle_z(Deg(rotation_degrees.z))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}
