//! zenflip - Mirror Gothic world (.zen) files along chosen axes
//!
//! This library provides functionality to:
//! - Locate position, direction, rotation, keyframe and bounding-box fields
//!   in ASCII world archives
//! - Reflect each of them so the world stays geometrically consistent
//! - Rewrite only the values, leaving every other byte of the file alone

pub mod cli;
pub mod codepage;
pub mod config;
pub mod hexfloat;
pub mod inspect;
pub mod locator;
pub mod numeric;
pub mod rewrite;
pub mod transforms;
