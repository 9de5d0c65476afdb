use crate::math::{Point3, VertexKey};

/// An ordered polyline of 3D points describing a grindable edge.
///
/// Point order defines the direction of travel. Points are only ever
/// appended; a chain with fewer than two points has no segments and is not
/// considered complete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chain {
    pub points: Vec<Point3>,
}

impl Chain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chain from an ordered list of points.
    #[must_use]
    pub fn from_points(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Appends a point to the end of the chain.
    pub fn push(&mut self, point: Point3) {
        self.points.push(point);
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the chain has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` once the chain has at least one segment.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.points.len() >= 2
    }

    #[must_use]
    pub fn first(&self) -> Option<&Point3> {
        self.points.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Point3> {
        self.points.last()
    }

    /// Returns `true` if the chain has a point with the same vertex identity as `point`.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        let key = VertexKey::from_point(point);
        self.points.iter().any(|p| VertexKey::from_point(p) == key)
    }

    /// Iterates over consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point3, &Point3)> {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Total polyline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| (b - a).norm()).sum()
    }

    /// Returns a new chain traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn l_shape() -> Chain {
        Chain::from_points(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 4.0),
        ])
    }

    #[test]
    fn single_point_is_not_complete() {
        let mut chain = Chain::new();
        chain.push(Point3::origin());
        assert!(!chain.is_complete());
        assert_eq!(chain.segment_count(), 0);
        assert_eq!(chain.segments().count(), 0);
    }

    #[test]
    fn length_sums_segments() {
        let chain = l_shape();
        assert!(chain.is_complete());
        assert_eq!(chain.segment_count(), 2);
        assert_relative_eq!(chain.length(), 7.0);
    }

    #[test]
    fn contains_uses_vertex_identity() {
        let chain = l_shape();
        assert!(chain.contains(&Point3::new(3.0 + 1e-9, 0.0, 0.0)));
        assert!(!chain.contains(&Point3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn reversed_flips_endpoints() {
        let chain = l_shape();
        let rev = chain.reversed();
        assert_eq!(rev.first(), chain.last());
        assert_eq!(rev.last(), chain.first());
        assert_relative_eq!(rev.length(), chain.length());
    }
}
