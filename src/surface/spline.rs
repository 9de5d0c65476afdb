use std::fmt;

use crate::error::Result;
use crate::geometry::Chain;
use crate::operations::collider::{
    ColliderLayer, ColliderSettings, ColliderType, GenerateColliders, GeneratedCollider,
};
use crate::oracle::RaycastOracle;

/// Material of a grindable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceType {
    #[default]
    Concrete,
    Metal,
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Concrete => "Concrete",
            Self::Metal => "Metal",
        })
    }
}

/// A grind spline: a chain plus the metadata its colliders are built from.
#[derive(Debug, Clone, PartialEq)]
pub struct GrindSpline {
    pub chain: Chain,
    pub surface_type: SurfaceType,
    /// Round rails (pipes, bars) always use capsule colliders.
    pub is_round: bool,
    /// Coping colliders go on their own physics layer.
    pub is_coping: bool,
    pub collider_settings: ColliderSettings,
}

impl GrindSpline {
    /// Creates a concrete, non-round spline with default collider settings.
    #[must_use]
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            surface_type: SurfaceType::default(),
            is_round: false,
            is_coping: false,
            collider_settings: ColliderSettings::default(),
        }
    }

    /// Scene name, e.g. `GrindSpline_Grind_Metal_Round`.
    #[must_use]
    pub fn name(&self) -> String {
        let round = if self.is_round { "_Round" } else { "" };
        format!("GrindSpline_Grind_{}{round}", self.surface_type)
    }

    /// Collider tag, e.g. `Grind_Concrete`.
    #[must_use]
    pub fn tag(&self) -> String {
        format!("Grind_{}", self.surface_type)
    }

    #[must_use]
    pub fn layer(&self) -> ColliderLayer {
        if self.is_coping {
            ColliderLayer::Coping
        } else {
            ColliderLayer::Grindable
        }
    }

    /// Normalizes settings that conflict with the spline's flags.
    pub fn validate(&mut self) {
        if self.is_round && self.collider_settings.collider_type == ColliderType::Box {
            self.collider_settings.collider_type = ColliderType::Capsule;
        }
    }

    /// Builds this spline's colliders.
    ///
    /// `settings` replaces the spline's own collider settings when given.
    /// Round splines still get capsules.
    ///
    /// # Errors
    ///
    /// See [`GenerateColliders::execute`].
    pub fn generate_colliders(
        &self,
        settings: Option<ColliderSettings>,
        oracle: Option<&dyn RaycastOracle>,
    ) -> Result<Vec<GeneratedCollider>> {
        let mut settings = settings.unwrap_or(self.collider_settings);
        if self.is_round {
            settings.collider_type = ColliderType::Capsule;
        }
        GenerateColliders::new(&self.chain, settings)
            .with_tag(self.tag())
            .with_layer(self.layer())
            .execute(oracle)
    }
}
