use super::Vector3;

/// World up (+Y).
#[must_use]
pub fn up() -> Vector3 {
    Vector3::y()
}

/// World down (-Y).
#[must_use]
pub fn down() -> Vector3 {
    -Vector3::y()
}

/// World forward (+Z).
#[must_use]
pub fn forward() -> Vector3 {
    Vector3::z()
}

/// World back (-Z).
#[must_use]
pub fn back() -> Vector3 {
    -Vector3::z()
}

/// World right (+X).
#[must_use]
pub fn right() -> Vector3 {
    Vector3::x()
}

/// World left (-X).
#[must_use]
pub fn left() -> Vector3 {
    -Vector3::x()
}

/// The four horizontal probe directions in the order they are tested.
#[must_use]
pub fn horizontal() -> [Vector3; 4] {
    [forward(), back(), left(), right()]
}
