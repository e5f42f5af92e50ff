//! Mathematical utilities for weld group calculations

use nalgebra::{Point2 as NaPoint2, Rotation2, Vector2};

/// 2D point in the weld plane
pub type Point2 = NaPoint2<f64>;
/// 2D vector in the weld plane
pub type Vec2 = Vector2<f64>;
/// 2D rotation (counter-clockwise positive)
pub type Rot2 = Rotation2<f64>;

/// Midpoint of two points
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Build a rotation about the global origin from an angle in degrees
/// (counter-clockwise positive)
pub fn rotation_about_origin(angle_degrees: f64) -> Rot2 {
    Rot2::new(angle_degrees.to_radians())
}

/// Principal-axis angle in degrees from the centroidal moments of inertia
///
/// Uses the double-angle relation `theta_p = 0.5 * atan(Ixy / ((Ix - Iy) / 2))`.
/// Degenerate cases are resolved with an absolute tolerance scaled by the
/// dominant inertia magnitude: `Ixy ~ 0` gives 0 degrees, and `Ix ~ Iy` with a
/// non-negligible `Ixy` gives 45 degrees (the Mohr's-circle limit).
pub fn principal_angle_deg(ix: f64, iy: f64, ixy: f64, tolerance: f64) -> f64 {
    let tol = tolerance * ix.abs().max(iy.abs()).max(1.0);
    if ixy.abs() <= tol {
        0.0
    } else if (ix - iy).abs() <= tol {
        45.0
    } else {
        (0.5 * (ixy / ((ix - iy) / 2.0)).atan()).to_degrees()
    }
}

/// Magnitude of a three-component demand vector
pub fn resultant(x: f64, y: f64, z: f64) -> f64 {
    (x.powi(2) + y.powi(2) + z.powi(2)).sqrt()
}
