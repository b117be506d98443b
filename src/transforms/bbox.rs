//! Axis-aligned bounding box mirroring

use glam::Vec3;

use super::types::{Axis, AxisFlip};

/// World-space box as stored in `bbox3DWS=rawFloat:minx miny minz maxx maxy maxz`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_floats(v: &[f32; 6]) -> Self {
        Self { min: Vec3::new(v[0], v[1], v[2]), max: Vec3::new(v[3], v[4], v[5]) }
    }

    pub fn to_floats(&self) -> [f32; 6] {
        [self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z]
    }

    /// `min <= max` on every axis.
    pub fn is_ordered(&self) -> bool {
        self.min.cmple(self.max).all()
    }
}

/// Mirror a bounding box, swapping bounds on flipped axes.
///
/// Negating both bounds of an axis reverses their order, so the new minimum is
/// the negated old maximum and vice versa.
///
/// ```
/// use glam::Vec3;
/// use zenflip::transforms::{flip_bbox, AxisFlip, BoundingBox};
///
/// let b = BoundingBox::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(4.0, 5.0, 6.0));
/// let f = flip_bbox(&b, &AxisFlip::X);
/// assert_eq!(f.min, Vec3::new(-4.0, -2.0, -3.0));
/// assert_eq!(f.max, Vec3::new(1.0, 5.0, 6.0));
/// ```
pub fn flip_bbox(bbox: &BoundingBox, flip: &AxisFlip) -> BoundingBox {
    let mut min = bbox.min.to_array();
    let mut max = bbox.max.to_array();
    for axis in Axis::ALL {
        if flip.is_flipped(axis) {
            let i = axis.index();
            let old_min = min[i];
            min[i] = -max[i];
            max[i] = -old_min;
        }
    }
    BoundingBox { min: Vec3::from_array(min), max: Vec3::from_array(max) }
}
