//! Reflection transforms for world-space fields
//!
//! Every transform is a pure function of a decoded value and an [`AxisFlip`].
//!
//! # Module Structure
//!
//! - [`types`] - `AxisFlip`, axes and error definitions
//! - [`vector`] - Positions and directions
//! - [`rotation`] - 3x3 rotation matrices (similarity reflection)
//! - [`keyframe`] - Position + quaternion records in keyframe blobs
//! - [`bbox`] - Axis-aligned bounding boxes

pub mod bbox;
pub mod keyframe;
pub mod rotation;
pub mod types;
pub mod vector;

// Re-export main types at the module level for convenience
pub use bbox::{flip_bbox, BoundingBox};
pub use keyframe::{
    flip_keyframe, flip_keyframe_block, reflect_quat, Keyframe, KeyframeBlock,
    FLOATS_PER_KEYFRAME, KEYFRAME_HEX_LEN,
};
pub use rotation::{reflect_rotation, RotationMatrix, ROTATION_HEX_LEN};
pub use types::{negate_if, Axis, AxisFlip, TransformError};
pub use vector::flip_vec3;
