use slotmap::SlotMap;

use crate::error::Result;
use crate::geometry::{Aabb, RayHit};
use crate::math::{Point3, Vector3};

use super::{OccupancyOracle, RaycastOracle};

slotmap::new_key_type! {
    /// Unique identifier for a solid in a [`BoxScene`].
    pub struct SolidId;
}

/// Static scene made of axis-aligned solid boxes.
///
/// Acts as the reference occupancy and raycast oracle: occupancy is a
/// box-overlap test and raycasts use the slab method against every solid.
#[derive(Debug, Default)]
pub struct BoxScene {
    solids: SlotMap<SolidId, Aabb>,
}

impl BoxScene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, solid: Aabb) -> SolidId {
        self.solids.insert(solid)
    }

    /// Removes a solid, returning it if it was present.
    pub fn remove_solid(&mut self, id: SolidId) -> Option<Aabb> {
        self.solids.remove(id)
    }

    #[must_use]
    pub fn solid(&self, id: SolidId) -> Option<&Aabb> {
        self.solids.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// Returns the nearest solid hit along the ray, with the solid's ID.
    ///
    /// # Errors
    ///
    /// Returns an error if `direction` has zero length.
    pub fn raycast_solid(
        &self,
        origin: &Point3,
        direction: &Vector3,
        max_distance: f64,
    ) -> Result<Option<(SolidId, RayHit)>> {
        let mut best: Option<(SolidId, RayHit)> = None;
        for (id, solid) in &self.solids {
            if let Some(hit) = solid.raycast(origin, direction, max_distance)? {
                if best.is_none_or(|(_, b)| hit.distance < b.distance) {
                    best = Some((id, hit));
                }
            }
        }
        Ok(best)
    }
}

impl OccupancyOracle for BoxScene {
    fn is_occupied(&self, center: &Point3, half_extent: f64) -> bool {
        let query = Aabb::cube(center, half_extent);
        self.solids.values().any(|s| s.overlaps(&query))
    }
}

impl RaycastOracle for BoxScene {
    fn raycast(
        &self,
        origin: &Point3,
        direction: &Vector3,
        max_distance: f64,
    ) -> Result<Option<RayHit>> {
        Ok(self
            .raycast_solid(origin, direction, max_distance)?
            .map(|(_, hit)| hit))
    }
}
