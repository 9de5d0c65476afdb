use super::{Point3, VERTEX_EPSILON};

/// Quantized vertex identity.
///
/// Coordinates are snapped to a grid of [`VERTEX_EPSILON`] so that positions
/// which differ only by floating-point noise compare equal and hash alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey {
    x: i64,
    y: i64,
    z: i64,
}

impl VertexKey {
    /// Quantizes a point into its key.
    #[must_use]
    pub fn from_point(p: &Point3) -> Self {
        Self {
            x: quantize(p.x),
            y: quantize(p.y),
            z: quantize(p.z),
        }
    }
}

impl From<&Point3> for VertexKey {
    fn from(p: &Point3) -> Self {
        Self::from_point(p)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn quantize(value: f64) -> i64 {
    (value / VERTEX_EPSILON).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_below_epsilon_collapses() {
        let a = VertexKey::from_point(&Point3::new(1.0, 2.0, 3.0));
        let b = VertexKey::from_point(&Point3::new(1.0 + 1e-9, 2.0 - 1e-9, 3.0));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_points_have_distinct_keys() {
        let a = VertexKey::from_point(&Point3::new(0.0, 0.0, 0.0));
        let b = VertexKey::from_point(&Point3::new(0.001, 0.0, 0.0));
        assert_ne!(a, b);
    }

    #[test]
    fn negative_zero_matches_zero() {
        let a = VertexKey::from_point(&Point3::new(-0.0, 0.0, 0.0));
        let b = VertexKey::from_point(&Point3::new(0.0, 0.0, 0.0));
        assert_eq!(a, b);
    }
}
