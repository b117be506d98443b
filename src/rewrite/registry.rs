//! Field registry: which tags are rewritten, and how
//!
//! Each rule pairs a [`FieldKind`] with the [`FieldAction`] that transforms its
//! value. Adding a field kind means adding a rule; the driver does not change.

use glam::Vec3;

use crate::hexfloat::HexFloatError;
use crate::locator::{FieldKind, FieldShape, FieldValue};
use crate::numeric::format_decimal;
use crate::transforms::{
    flip_bbox, flip_keyframe_block, flip_vec3, reflect_rotation, AxisFlip, BoundingBox,
    RotationMatrix, KEYFRAME_HEX_LEN, ROTATION_HEX_LEN,
};

pub const OBJECT_POSITION: &str = "object-position";
pub const WAYPOINT_POSITION: &str = "waypoint-position";
pub const WAYPOINT_DIRECTION: &str = "waypoint-direction";
pub const ROTATION_MATRIX: &str = "rotation-matrix";
pub const KEYFRAMES: &str = "keyframes";
pub const BOUNDING_BOX: &str = "bounding-box";

/// Names of the standard field kinds, in pass order
pub const STANDARD_KINDS: [&str; 6] = [
    OBJECT_POSITION,
    WAYPOINT_POSITION,
    WAYPOINT_DIRECTION,
    ROTATION_MATRIX,
    KEYFRAMES,
    BOUNDING_BOX,
];

/// How a located value is transformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// 3 decimals, mirrored per axis
    Position,
    /// 3 decimals, mirrored per axis like a position delta
    Direction,
    /// 72-character hex blob, similarity reflection
    RotationMatrix,
    /// Hex blob of 7-float records; quaternions follow `AxisFlip::rotation`
    Keyframes,
    /// 6 decimals, bounds swapped on flipped axes
    BoundingBox,
}

/// Replacement text for one field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Records covered by this value (1 except for keyframe blocks)
    pub records: usize,
}

impl Rewrite {
    fn single(text: String) -> Self {
        Self { text, records: 1 }
    }
}

fn format_decimals(values: &[f32]) -> String {
    values.iter().map(|v| format_decimal(*v)).collect::<Vec<_>>().join(" ")
}

impl FieldAction {
    /// Only runs when orientations are mirrored too.
    pub fn requires_rotation(self) -> bool {
        matches!(self, FieldAction::RotationMatrix)
    }

    /// Transform one value.
    ///
    /// `Ok(None)` leaves the value untouched and uncounted: a hex blob of the
    /// wrong length, or a value whose shape does not belong to this action.
    pub fn apply(
        self,
        value: &FieldValue<'_>,
        flip: &AxisFlip,
    ) -> Result<Option<Rewrite>, HexFloatError> {
        let rewrite = match (self, value) {
            (FieldAction::Position | FieldAction::Direction, FieldValue::Decimals(v))
                if v.len() == 3 =>
            {
                let out = flip_vec3(Vec3::new(v[0], v[1], v[2]), flip);
                Some(Rewrite::single(format_decimals(&out.to_array())))
            }
            (FieldAction::BoundingBox, FieldValue::Decimals(v)) if v.len() == 6 => {
                let bbox = BoundingBox::from_floats(&[v[0], v[1], v[2], v[3], v[4], v[5]]);
                Some(Rewrite::single(format_decimals(&flip_bbox(&bbox, flip).to_floats())))
            }
            (FieldAction::RotationMatrix, FieldValue::Hex(hex)) => {
                if hex.len() != ROTATION_HEX_LEN {
                    return Ok(None);
                }
                let matrix = RotationMatrix::from_hex(hex)?;
                Some(Rewrite::single(reflect_rotation(&matrix, flip).to_hex()))
            }
            (FieldAction::Keyframes, FieldValue::Hex(hex)) => flip_keyframe_block(hex, flip)?
                .map(|block| Rewrite { text: block.hex, records: block.records }),
            _ => None,
        };
        Ok(rewrite)
    }
}

/// A field kind and its transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub action: FieldAction,
}

impl FieldRule {
    pub fn new(kind: FieldKind, action: FieldAction) -> Self {
        Self { kind, action }
    }

    /// Whether this rule runs for `flip`.
    pub fn is_active(&self, flip: &AxisFlip) -> bool {
        flip.rotation || !self.action.requires_rotation()
    }
}

/// Ordered set of rules; passes run in this order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRegistry {
    rules: Vec<FieldRule>,
}

impl FieldRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The six field kinds of Gothic world files.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.push(FieldRule::new(
            FieldKind::new(OBJECT_POSITION, "trafoOSToWSPos=vec3:", FieldShape::Decimals(3)),
            FieldAction::Position,
        ));
        registry.push(FieldRule::new(
            FieldKind::new(WAYPOINT_POSITION, "position=vec3:", FieldShape::Decimals(3)),
            FieldAction::Position,
        ));
        registry.push(FieldRule::new(
            FieldKind::new(WAYPOINT_DIRECTION, "direction=vec3:", FieldShape::Decimals(3)),
            FieldAction::Direction,
        ));
        registry.push(FieldRule::new(
            FieldKind::new(
                ROTATION_MATRIX,
                "trafoOSToWSRot=raw:",
                FieldShape::HexFixed(ROTATION_HEX_LEN),
            ),
            FieldAction::RotationMatrix,
        ));
        registry.push(FieldRule::new(
            FieldKind::new(KEYFRAMES, "keyframes=raw:", FieldShape::HexRecords(KEYFRAME_HEX_LEN)),
            FieldAction::Keyframes,
        ));
        registry.push(FieldRule::new(
            FieldKind::new(BOUNDING_BOX, "bbox3DWS=rawFloat:", FieldShape::Decimals(6)),
            FieldAction::BoundingBox,
        ));
        registry
    }

    /// Append a rule. A rule with the name of an existing one replaces it in place.
    pub fn push(&mut self, rule: FieldRule) {
        match self.rules.iter_mut().find(|r| r.kind.name == rule.kind.name) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    /// Drop every rule whose name is listed.
    pub fn without<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.rules.retain(|r| !names.iter().any(|n| n.as_ref() == r.kind.name));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.kind.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.kind.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
