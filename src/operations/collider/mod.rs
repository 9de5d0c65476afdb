mod settings;

pub use settings::{ColliderSettings, ColliderType};

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::Chain;
use crate::math::{axis, Point3, Rotation, Vector3, TOLERANCE};
use crate::oracle::RaycastOracle;

/// Maximum distance of the downward probe used to find the solid side of an edge.
const EDGE_PROBE_DISTANCE: f64 = 3.0;

/// Physics layer a generated collider belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColliderLayer {
    #[default]
    Grindable,
    Coping,
}

impl ColliderLayer {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Grindable => "Grindable",
            Self::Coping => "Coping",
        }
    }
}

/// Collider geometry in its local frame.
///
/// Local +Z runs along the segment, +Y is up and +X is right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Box with full extents `(width, depth, length)`.
    Box { size: Vector3 },
    /// Capsule along local Z.
    Capsule { radius: f64, height: f64 },
}

/// A collider placed in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCollider {
    pub center: Point3,
    pub rotation: Rotation,
    pub shape: ColliderShape,
    pub tag: String,
    pub layer: ColliderLayer,
    /// Signed shift of the centre along local +X, away from the segment.
    pub lateral_offset: f64,
}

impl GeneratedCollider {
    /// Mirrors the sideways inset onto the other side of the segment.
    pub fn flip_edge(&mut self) {
        let right = self.rotation * Vector3::x();
        self.center -= right * (2.0 * self.lateral_offset);
        self.lateral_offset = -self.lateral_offset;
    }
}

/// Builds one collider per consecutive point pair of a chain.
#[derive(Debug)]
pub struct GenerateColliders<'a> {
    chain: &'a Chain,
    settings: ColliderSettings,
    tag: String,
    layer: ColliderLayer,
}

impl<'a> GenerateColliders<'a> {
    /// Creates a new `GenerateColliders` operation.
    #[must_use]
    pub fn new(chain: &'a Chain, settings: ColliderSettings) -> Self {
        Self {
            chain,
            settings,
            tag: "Grind_Concrete".to_owned(),
            layer: ColliderLayer::Grindable,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: ColliderLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Executes collider generation.
    ///
    /// `oracle` is only consulted for edge boxes with auto-detected alignment.
    /// A chain with fewer than two points produces no colliders.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError` for invalid settings, `GeometryError::Degenerate`
    /// for a zero-length segment, and `OperationError::InvalidInput` when
    /// auto-detection is requested without an oracle.
    pub fn execute(&self, oracle: Option<&dyn RaycastOracle>) -> Result<Vec<GeneratedCollider>> {
        self.settings.validate()?;

        let auto_detect = self.settings.collider_type == ColliderType::Box
            && self.settings.is_edge
            && self.settings.auto_detect_edge_alignment;
        if auto_detect && oracle.is_none() {
            return Err(OperationError::InvalidInput(
                "edge alignment auto-detection needs a raycast oracle".to_owned(),
            )
            .into());
        }

        self.chain
            .segments()
            .map(|(a, b)| self.between(a, b, oracle))
            .collect()
    }

    fn between(
        &self,
        a: &Point3,
        b: &Point3,
        oracle: Option<&dyn RaycastOracle>,
    ) -> Result<GeneratedCollider> {
        let length = (b - a).norm();
        if length < TOLERANCE {
            return Err(GeometryError::Degenerate(format!("zero-length segment at {a}")).into());
        }

        let mid = nalgebra::center(a, b);
        let rotation = look_rotation(&(a - mid))?;
        let down = rotation * -Vector3::y();

        let mut lateral_offset = 0.0;
        let (center, shape) = match self.settings.collider_type {
            ColliderType::Capsule => {
                let r = self.settings.radius;
                (
                    mid + down * r,
                    ColliderShape::Capsule {
                        radius: r,
                        height: length + 2.0 * r,
                    },
                )
            }
            ColliderType::Box => {
                let s = &self.settings;
                let mut center = mid;
                if s.is_edge {
                    lateral_offset = self.inset_side(&mid, &rotation, oracle)? * (s.width / 2.0);
                    center += rotation * Vector3::x() * lateral_offset;
                    center += down * (s.depth / 2.0);
                }
                (
                    center,
                    ColliderShape::Box {
                        size: Vector3::new(s.width, s.depth, length),
                    },
                )
            }
        };

        Ok(GeneratedCollider {
            center,
            rotation,
            shape,
            tag: self.tag.clone(),
            layer: self.layer,
            lateral_offset,
        })
    }

    /// Side of the segment holding the solid ledge: `1.0` for local right,
    /// `-1.0` for local left.
    fn inset_side(
        &self,
        mid: &Point3,
        rotation: &Rotation,
        oracle: Option<&dyn RaycastOracle>,
    ) -> Result<f64> {
        let right = rotation * Vector3::x();

        let on_right = match oracle {
            Some(oracle) if self.settings.auto_detect_edge_alignment => {
                let origin = mid + right * self.settings.width + axis::up();
                let hit = oracle.raycast(&origin, &axis::down(), EDGE_PROBE_DISTANCE)?;
                tracing::trace!(?origin, hit = hit.is_some(), "edge alignment probe");
                hit.is_some()
            }
            _ => !self.settings.flip_edge,
        };
        Ok(if on_right { 1.0 } else { -1.0 })
    }
}

/// Rotation whose local +Z points along `forward`, keeping local +Y near world up.
fn look_rotation(forward: &Vector3) -> Result<Rotation> {
    let len = forward.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    let dir = forward / len;
    let up = if dir.dot(&axis::up()).abs() > 1.0 - 1e-9 {
        axis::forward()
    } else {
        axis::up()
    };
    Ok(Rotation::face_towards(&dir, &up))
}
