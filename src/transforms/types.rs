//! Core flip types and error definitions
//!
//! Contains `AxisFlip`, the set of toggles every field transform is driven by,
//! and `TransformError` for parsing flip selections.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors that can occur while building a flip selection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TransformError {
    /// Empty axis selection
    #[error("no axis selected (use a combination of x, y, z)")]
    NoAxis,

    /// Character that is not an axis letter
    #[error("unknown axis '{0}' (use a combination of x, y, z)")]
    UnknownAxis(char),

    /// Same axis listed twice
    #[error("axis '{0}' listed more than once")]
    DuplicateAxis(char),
}

/// One of the three coordinate axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in component order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index (x = 0, y = 1, z = 2)
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Which axes to mirror, and whether orientations follow.
///
/// `rotation` gates the rotation-matrix field and the quaternion half of
/// keyframe records; positions, directions and bounding boxes are always
/// mirrored on the selected axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisFlip {
    pub x: bool,
    pub y: bool,
    pub z: bool,
    pub rotation: bool,
}

impl AxisFlip {
    /// Flip the X axis only, the tool's default selection.
    pub const X: AxisFlip = AxisFlip { x: true, y: false, z: false, rotation: false };

    /// Create a selection from explicit axis toggles, rotation off.
    pub fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z, rotation: false }
    }

    /// Parse an axis string such as `"x"`, `"yz"` or `"XYZ"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zenflip::transforms::AxisFlip;
    ///
    /// let flip = AxisFlip::from_axes("xz").unwrap();
    /// assert!(flip.x && !flip.y && flip.z);
    /// assert!(AxisFlip::from_axes("xw").is_err());
    /// ```
    pub fn from_axes(axes: &str) -> Result<Self, TransformError> {
        let mut flip = AxisFlip::default();
        for c in axes.trim().chars() {
            let slot = match c.to_ascii_lowercase() {
                'x' => &mut flip.x,
                'y' => &mut flip.y,
                'z' => &mut flip.z,
                _ => return Err(TransformError::UnknownAxis(c)),
            };
            if *slot {
                return Err(TransformError::DuplicateAxis(c.to_ascii_lowercase()));
            }
            *slot = true;
        }
        if !flip.any_axis() {
            return Err(TransformError::NoAxis);
        }
        Ok(flip)
    }

    /// Same axes with the rotation toggle set to `rotation`.
    pub fn with_rotation(mut self, rotation: bool) -> Self {
        self.rotation = rotation;
        self
    }

    /// Whether `axis` is mirrored.
    pub fn is_flipped(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Per-axis flags in component order.
    pub fn flags(&self) -> [bool; 3] {
        [self.x, self.y, self.z]
    }

    /// `-1.0` for a mirrored axis, `1.0` otherwise.
    pub fn sign(&self, axis: Axis) -> f32 {
        if self.is_flipped(axis) {
            -1.0
        } else {
            1.0
        }
    }

    /// Diagonal of the reflection matrix `S = diag(sx, sy, sz)`.
    pub fn signs(&self) -> Vec3 {
        Vec3::new(self.sign(Axis::X), self.sign(Axis::Y), self.sign(Axis::Z))
    }

    /// True when an odd number of axes is mirrored (`det S = -1`).
    pub fn is_improper(&self) -> bool {
        self.flags().iter().filter(|&&f| f).count() % 2 == 1
    }

    /// At least one axis selected.
    pub fn any_axis(&self) -> bool {
        self.x || self.y || self.z
    }

    /// Axis letters, e.g. `"xz"`; `"-"` when nothing is selected.
    pub fn axes_label(&self) -> String {
        let label: String = Axis::ALL
            .iter()
            .filter(|&&a| self.is_flipped(a))
            .map(|a| match a {
                Axis::X => 'x',
                Axis::Y => 'y',
                Axis::Z => 'z',
            })
            .collect();
        if label.is_empty() {
            "-".to_string()
        } else {
            label
        }
    }

    /// Every axis combination (including none) with rotation set, for exhaustive checks.
    pub fn all_combinations() -> impl Iterator<Item = AxisFlip> {
        (0u8..8).map(|bits| AxisFlip {
            x: bits & 1 != 0,
            y: bits & 2 != 0,
            z: bits & 4 != 0,
            rotation: true,
        })
    }
}

impl FromStr for AxisFlip {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AxisFlip::from_axes(s)
    }
}

impl fmt::Display for AxisFlip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X={}, Y={}, Z={}, rotation={}",
            self.x, self.y, self.z, self.rotation
        )
    }
}

/// Negate `value` when `flip` is set.
///
/// Uses IEEE negation, which only toggles the sign bit, so NaN payloads and
/// infinities survive and a second flip restores the exact bits.
#[inline]
pub fn negate_if(value: f32, flip: bool) -> f32 {
    if flip {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_axes() {
        assert_eq!(AxisFlip::from_axes("x").unwrap(), AxisFlip::new(true, false, false));
        assert_eq!(AxisFlip::from_axes("y").unwrap(), AxisFlip::new(false, true, false));
        assert_eq!(AxisFlip::from_axes("z").unwrap(), AxisFlip::new(false, false, true));
    }

    #[test]
    fn test_parse_combinations_any_order() {
        assert_eq!(AxisFlip::from_axes("zx").unwrap(), AxisFlip::new(true, false, true));
        assert_eq!(AxisFlip::from_axes("XYZ").unwrap(), AxisFlip::new(true, true, true));
        assert_eq!("yz".parse::<AxisFlip>().unwrap(), AxisFlip::new(false, true, true));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(AxisFlip::from_axes(""), Err(TransformError::NoAxis));
        assert_eq!(AxisFlip::from_axes("xw"), Err(TransformError::UnknownAxis('w')));
        assert_eq!(AxisFlip::from_axes("xX"), Err(TransformError::DuplicateAxis('x')));
    }

    #[test]
    fn test_signs_are_unit() {
        for flip in AxisFlip::all_combinations() {
            for axis in Axis::ALL {
                let s = flip.sign(axis);
                assert!(s == 1.0 || s == -1.0);
                assert_eq!(s < 0.0, flip.is_flipped(axis));
            }
        }
    }

    #[test]
    fn test_improper_parity() {
        assert!(AxisFlip::new(true, false, false).is_improper());
        assert!(!AxisFlip::new(true, true, false).is_improper());
        assert!(AxisFlip::new(true, true, true).is_improper());
        assert!(!AxisFlip::default().is_improper());
    }

    #[test]
    fn test_axes_label() {
        assert_eq!(AxisFlip::new(true, false, true).axes_label(), "xz");
        assert_eq!(AxisFlip::default().axes_label(), "-");
    }

    #[test]
    fn test_negate_if_toggles_sign_bit_only() {
        let nan = f32::from_bits(0x7fc0_1234);
        assert_eq!(negate_if(nan, true).to_bits(), 0xffc0_1234);
        assert_eq!(negate_if(negate_if(nan, true), true).to_bits(), nan.to_bits());
        assert_eq!(negate_if(0.0, true).to_bits(), (-0.0f32).to_bits());
        assert_eq!(negate_if(3.5, false), 3.5);
    }
}
