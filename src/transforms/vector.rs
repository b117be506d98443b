//! Position and direction mirroring

use glam::Vec3;

use super::types::{negate_if, AxisFlip};

/// Negate the selected components of a position or direction.
///
/// Directions reflect exactly like position deltas under axis negation, so the
/// same function serves both field kinds.
///
/// ```
/// use glam::Vec3;
/// use zenflip::transforms::{flip_vec3, AxisFlip};
///
/// let v = flip_vec3(Vec3::new(10.0, -5.0, 2.0), &AxisFlip::X);
/// assert_eq!(v, Vec3::new(-10.0, -5.0, 2.0));
/// ```
pub fn flip_vec3(v: Vec3, flip: &AxisFlip) -> Vec3 {
    Vec3::new(negate_if(v.x, flip.x), negate_if(v.y, flip.y), negate_if(v.z, flip.z))
}
