mod box_scene;

pub use box_scene::{BoxScene, SolidId};

use crate::error::Result;
use crate::geometry::RayHit;
use crate::math::{Point3, Vector3};

/// Answers "is there solid geometry inside this box?".
pub trait OccupancyOracle {
    /// Returns `true` if any solid overlaps the axis-aligned cube centred on
    /// `center` with the given half-extent.
    fn is_occupied(&self, center: &Point3, half_extent: f64) -> bool;

    /// Probes the cube at `point + offset`.
    fn probe(&self, point: &Point3, offset: &Vector3, radius: f64) -> bool {
        self.is_occupied(&(point + offset), radius)
    }
}

impl<F> OccupancyOracle for F
where
    F: Fn(&Point3, f64) -> bool,
{
    fn is_occupied(&self, center: &Point3, half_extent: f64) -> bool {
        self(center, half_extent)
    }
}

/// Casts rays against the static scene.
pub trait RaycastOracle {
    /// Returns the nearest hit along `direction` within `max_distance`.
    ///
    /// # Errors
    ///
    /// Returns an error if `direction` has zero length.
    fn raycast(
        &self,
        origin: &Point3,
        direction: &Vector3,
        max_distance: f64,
    ) -> Result<Option<RayHit>>;
}
