use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

/// A ray hit against a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the (normalized) ray direction.
    pub distance: f64,
    /// World-space hit point.
    pub point: Point3,
}

impl Aabb {
    /// Creates a box from two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates a cube centred on `center` with the given half-extent.
    #[must_use]
    pub fn cube(center: &Point3, half_extent: f64) -> Self {
        let h = Vector3::repeat(half_extent);
        Self {
            min: center - h,
            max: center + h,
        }
    }

    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns `true` if the interiors of the two boxes overlap.
    ///
    /// Boxes that merely touch along a face do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] < other.max[i] && other.min[i] < self.max[i])
    }

    /// Returns `true` if `p` lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, p: &Point3) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }

    /// Casts a ray against the box using the slab method.
    ///
    /// Returns the first hit within `max_distance`. A ray starting inside
    /// the box hits at distance zero.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if `direction` has no length.
    pub fn raycast(
        &self,
        origin: &Point3,
        direction: &Vector3,
        max_distance: f64,
    ) -> Result<Option<RayHit>> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let dir = direction / len;

        let mut t_min = 0.0_f64;
        let mut t_max = max_distance;
        for i in 0..3 {
            if dir[i].abs() < TOLERANCE {
                // Parallel to this slab: must already be between its planes.
                if origin[i] < self.min[i] || origin[i] > self.max[i] {
                    return Ok(None);
                }
                continue;
            }
            let inv = 1.0 / dir[i];
            let mut t0 = (self.min[i] - origin[i]) * inv;
            let mut t1 = (self.max[i] - origin[i]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return Ok(None);
            }
        }

        Ok(Some(RayHit {
            distance: t_min,
            point: origin + dir * t_min,
        }))
    }
}
