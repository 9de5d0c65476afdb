use crate::math::{axis, Point3};
use crate::oracle::OccupancyOracle;

use super::GenerationParams;

/// Decides whether a vertex sits on a ledge-like edge.
///
/// A vertex is admitted when the space directly above it is open and at
/// least one of the four horizontal directions is open as well.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionFilter {
    offset: f64,
    radius: f64,
}

impl AdmissionFilter {
    #[must_use]
    pub fn new(params: &GenerationParams) -> Self {
        Self {
            offset: params.point_test_offset,
            radius: params.point_test_radius,
        }
    }

    /// Tests a single vertex.
    #[must_use]
    pub fn admits<O: OccupancyOracle + ?Sized>(&self, oracle: &O, v: &Point3) -> bool {
        if !self.is_open(oracle, v, &axis::up()) {
            return false;
        }
        axis::horizontal()
            .iter()
            .any(|dir| self.is_open(oracle, v, dir))
    }

    /// Returns the admitted subset of `points`, preserving order.
    #[must_use]
    pub fn filter<O: OccupancyOracle + ?Sized>(&self, oracle: &O, points: &[Point3]) -> Vec<Point3> {
        points
            .iter()
            .filter(|p| self.admits(oracle, p))
            .copied()
            .collect()
    }

    /// Returns `true` if the segment `a -> b` has solid support under its midpoint.
    #[must_use]
    pub fn midpoint_supported<O: OccupancyOracle + ?Sized>(
        &self,
        oracle: &O,
        a: &Point3,
        b: &Point3,
    ) -> bool {
        let mid = nalgebra::center(a, b);
        oracle.probe(&mid, &(axis::down() * self.offset), self.radius)
    }

    fn is_open<O: OccupancyOracle + ?Sized>(
        &self,
        oracle: &O,
        v: &Point3,
        dir: &crate::math::Vector3,
    ) -> bool {
        !oracle.probe(v, &(dir * self.offset), self.radius)
    }
}
