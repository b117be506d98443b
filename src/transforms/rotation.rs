//! Rotation matrix reflection
//!
//! A mirrored world needs `R' = S·R·S` with `S = diag(sx, sy, sz)`. The
//! similarity keeps `det(R') = det(R)`, so a proper rotation stays proper
//! whichever axes are flipped. Element `(i, j)` is scaled
//! by `s_i·s_j`, so it is negated exactly when one of axis `i` and axis `j` is
//! flipped and the other is not.

use glam::{Mat3, Vec3};

use super::types::{negate_if, AxisFlip};
use crate::hexfloat::{self, HexFloatError, HEX_CHARS_PER_FLOAT};

/// Number of hex characters in a `trafoOSToWSRot` blob (9 floats)
pub const ROTATION_HEX_LEN: usize = 9 * HEX_CHARS_PER_FLOAT;

/// 3x3 rotation matrix, row-major `rows[row][col]`, as stored in world files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix {
    pub rows: [[f32; 3]; 3],
}

impl RotationMatrix {
    pub const IDENTITY: RotationMatrix =
        RotationMatrix { rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] };

    pub fn from_row_major(values: &[f32; 9]) -> Self {
        Self {
            rows: [
                [values[0], values[1], values[2]],
                [values[3], values[4], values[5]],
                [values[6], values[7], values[8]],
            ],
        }
    }

    pub fn to_row_major(&self) -> [f32; 9] {
        let r = &self.rows;
        [r[0][0], r[0][1], r[0][2], r[1][0], r[1][1], r[1][2], r[2][0], r[2][1], r[2][2]]
    }

    /// Decode a 72-character hex blob.
    pub fn from_hex(hex: &str) -> Result<Self, HexFloatError> {
        let values = hexfloat::decode_floats(hex)?;
        let values: [f32; 9] = values.try_into().map_err(|v: Vec<f32>| {
            HexFloatError::InvalidLength {
                expected: ROTATION_HEX_LEN,
                found: v.len() * HEX_CHARS_PER_FLOAT,
            }
        })?;
        Ok(Self::from_row_major(&values))
    }

    /// Encode as a 72-character lowercase hex blob.
    pub fn to_hex(&self) -> String {
        hexfloat::encode_floats(&self.to_row_major())
    }

    /// Convert to a column-major `glam::Mat3`.
    pub fn to_mat3(&self) -> Mat3 {
        let r = &self.rows;
        Mat3::from_cols(
            Vec3::new(r[0][0], r[1][0], r[2][0]),
            Vec3::new(r[0][1], r[1][1], r[2][1]),
            Vec3::new(r[0][2], r[1][2], r[2][2]),
        )
    }

    pub fn from_mat3(m: Mat3) -> Self {
        Self::from_row_major(&m.transpose().to_cols_array())
    }

    pub fn determinant(&self) -> f32 {
        self.to_mat3().determinant()
    }

    /// Largest absolute entry of `RᵀR - I`; zero for an exactly orthogonal matrix.
    pub fn orthogonality_error(&self) -> f32 {
        let m = self.to_mat3();
        let gram = m.transpose() * m - Mat3::IDENTITY;
        gram.to_cols_array().iter().fold(0.0f32, |acc, v| acc.max(v.abs()))
    }
}

/// Mirror a rotation with the similarity `S·R·S`.
///
/// ```
/// use zenflip::transforms::{reflect_rotation, AxisFlip, RotationMatrix};
///
/// let r = RotationMatrix::from_row_major(&[0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
/// let mirrored = reflect_rotation(&r, &AxisFlip::X);
/// assert_eq!(mirrored.to_row_major(), [0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
/// assert_eq!(mirrored.determinant(), 1.0);
/// ```
pub fn reflect_rotation(matrix: &RotationMatrix, flip: &AxisFlip) -> RotationMatrix {
    let flags = flip.flags();
    let mut out = *matrix;
    for (i, row) in out.rows.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = negate_if(*value, flags[i] != flags[j]);
        }
    }
    out
}
