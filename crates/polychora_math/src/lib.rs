//! 4D Mathematics Library
//!
//! Numeric utilities for the polychora engine.
//!
//! ## Core Types
//!
//! - [`Vec4`] - 4D vector with x, y, z, w components
//! - [`Mat4`] - 4x4 matrix (row-major) with inversion and orthonormalization
//!
//! ## Utilities
//!
//! - [`cross4`] - 4-dimensional analogue of the cross product
//! - [`stereographic`] - projection of points on the 3-sphere down to R^3

mod vec4;
pub mod mat4;
mod projection;

pub use vec4::{cross4, Vec4};
pub use mat4::Mat4;
pub use projection::stereographic;
