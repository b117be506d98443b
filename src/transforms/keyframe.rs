//! Keyframe block mirroring
//!
//! A `keyframes=raw:` blob is a run of 7-float records: position `(x, y, z)`
//! followed by rotation quaternion `(qx, qy, qz, qw)`.

use glam::{Quat, Vec3};

use super::types::{negate_if, AxisFlip};
use super::vector::flip_vec3;
use crate::hexfloat::{self, HexFloatError, HEX_CHARS_PER_FLOAT};

/// Floats per keyframe record
pub const FLOATS_PER_KEYFRAME: usize = 7;

/// Hex characters per keyframe record
pub const KEYFRAME_HEX_LEN: usize = FLOATS_PER_KEYFRAME * HEX_CHARS_PER_FLOAT;

/// One position + orientation sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Keyframe {
    pub fn from_floats(v: &[f32; FLOATS_PER_KEYFRAME]) -> Self {
        Self {
            position: Vec3::new(v[0], v[1], v[2]),
            rotation: Quat::from_xyzw(v[3], v[4], v[5], v[6]),
        }
    }

    pub fn to_floats(&self) -> [f32; FLOATS_PER_KEYFRAME] {
        let p = self.position;
        let q = self.rotation;
        [p.x, p.y, p.z, q.x, q.y, q.z, q.w]
    }
}

/// A rewritten keyframe blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyframeBlock {
    /// Lowercase hex of every transformed record
    pub hex: String,
    /// Number of records in the block
    pub records: usize,
}

/// Mirror a quaternion the same way `S·R·S` mirrors its matrix.
///
/// Gives `(qx·sx, qy·sy, qz·sz, qw·sx·sy·sz)`. Only signs change, so the norm
/// is untouched.
pub fn reflect_quat(q: Quat, flip: &AxisFlip) -> Quat {
    Quat::from_xyzw(
        negate_if(q.x, flip.x),
        negate_if(q.y, flip.y),
        negate_if(q.z, flip.z),
        negate_if(q.w, flip.is_improper()),
    )
}

/// Mirror one keyframe. The quaternion only follows when `flip.rotation` is set.
pub fn flip_keyframe(keyframe: &Keyframe, flip: &AxisFlip) -> Keyframe {
    Keyframe {
        position: flip_vec3(keyframe.position, flip),
        rotation: if flip.rotation {
            reflect_quat(keyframe.rotation, flip)
        } else {
            keyframe.rotation
        },
    }
}

/// Mirror every record of a keyframe blob.
///
/// Returns `Ok(None)` when the blob is empty or its length is not a multiple of
/// 56; such a blob is not a keyframe block and stays as it is. A non-hex
/// character is an error.
pub fn flip_keyframe_block(
    hex: &str,
    flip: &AxisFlip,
) -> Result<Option<KeyframeBlock>, HexFloatError> {
    if hex.is_empty() || hex.len() % KEYFRAME_HEX_LEN != 0 {
        return Ok(None);
    }

    let floats = hexfloat::decode_floats(hex)?;
    let mut out = Vec::with_capacity(floats.len());
    for record in floats.chunks_exact(FLOATS_PER_KEYFRAME) {
        let mut values = [0.0f32; FLOATS_PER_KEYFRAME];
        values.copy_from_slice(record);
        let flipped = flip_keyframe(&Keyframe::from_floats(&values), flip);
        out.extend_from_slice(&flipped.to_floats());
    }

    Ok(Some(KeyframeBlock {
        hex: hexfloat::encode_floats(&out),
        records: floats.len() / FLOATS_PER_KEYFRAME,
    }))
}
