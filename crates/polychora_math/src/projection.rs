//! Stereographic projection from the 3-sphere to R^3

use crate::Vec4;

/// Project a point on (or near) the unit 3-sphere down to R^3.
///
/// `w0` is the distance from the projection center to the hyperplane; the
/// classic projection from the south pole uses `w0 = 1.0`. The scale is
/// taken as an absolute value so points behind the pole fold back instead
/// of exploding with a sign flip.
pub fn stereographic(p: Vec4, w0: f32) -> [f32; 3] {
    let scale = (1.0 / (w0 + p.w)).abs();
    [p.x * scale, p.y * scale, p.z * scale]
}
