use super::{Point3, Vector3, TOLERANCE};

/// Projects a vector onto the ground plane by dropping its vertical component.
#[must_use]
pub fn flatten(v: &Vector3) -> Vector3 {
    Vector3::new(v.x, 0.0, v.z)
}

/// Projects a point onto the ground plane.
#[must_use]
pub fn flatten_point(p: &Point3) -> Point3 {
    Point3::new(p.x, 0.0, p.z)
}

/// Unsigned angle between two vectors in degrees.
///
/// Returns `0.0` when either vector is (near) zero-length, so a missing
/// direction never fails an angle threshold.
#[must_use]
pub fn angle_between_deg(a: &Vector3, b: &Vector3) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < TOLERANCE {
        return 0.0;
    }
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Angle between `dir` and its ground projection, in degrees.
///
/// A purely vertical direction is 90 degrees; a zero-length direction is 0.
#[must_use]
pub fn slope_deg(dir: &Vector3) -> f64 {
    let rise = dir.y.abs();
    let run = flatten(dir).norm();
    if rise < TOLERANCE && run < TOLERANCE {
        return 0.0;
    }
    rise.atan2(run).to_degrees()
}

/// Horizontal turn angle at `current` when travelling `previous -> current -> next`.
///
/// All three points are flattened to the ground plane first.
#[must_use]
pub fn horizontal_turn_deg(previous: &Point3, current: &Point3, next: &Point3) -> f64 {
    let incoming = flatten_point(current) - flatten_point(previous);
    let outgoing = flatten_point(next) - flatten_point(current);
    angle_between_deg(&outgoing, &incoming)
}
