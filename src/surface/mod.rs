mod spline;

pub use spline::{GrindSpline, SurfaceType};

use crate::error::Result;
use crate::geometry::Chain;
use crate::operations::collect::{CollectVertices, MeshInstance};
use crate::operations::collider::{ColliderSettings, GeneratedCollider};
use crate::operations::generate::{GenerateSplines, GenerationParams};
use crate::oracle::{OccupancyOracle, RaycastOracle};

/// Metadata applied to every spline a surface generates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SplineDefaults {
    pub surface_type: SurfaceType,
    pub is_round: bool,
    pub is_coping: bool,
    pub collider_settings: ColliderSettings,
}

impl SplineDefaults {
    /// Wraps `chain` in a spline carrying these defaults.
    #[must_use]
    pub fn spline(&self, chain: Chain) -> GrindSpline {
        let mut spline = GrindSpline {
            chain,
            surface_type: self.surface_type,
            is_round: self.is_round,
            is_coping: self.is_coping,
            collider_settings: self.collider_settings,
        };
        spline.validate();
        spline
    }
}

/// A set of grind splines belonging to one piece of geometry.
#[derive(Debug, Clone, Default)]
pub struct GrindSurface {
    pub splines: Vec<GrindSpline>,
    pub defaults: SplineDefaults,
}

impl GrindSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_defaults(defaults: SplineDefaults) -> Self {
        Self {
            splines: Vec::new(),
            defaults,
        }
    }

    /// Wraps `chain` in a spline carrying this surface's defaults and adds it.
    pub fn add_chain(&mut self, chain: Chain) -> &mut GrindSpline {
        self.splines.push(self.defaults.spline(chain));
        let last = self.splines.len() - 1;
        &mut self.splines[last]
    }

    /// Replaces this surface's splines with ones generated from `meshes`.
    ///
    /// Returns the number of splines created.
    ///
    /// # Errors
    ///
    /// Propagates errors from vertex collection and spline generation.
    pub fn generate<O: OccupancyOracle + ?Sized>(
        &mut self,
        meshes: &[MeshInstance],
        oracle: &O,
        params: GenerationParams,
    ) -> Result<usize> {
        let vertices = CollectVertices::new(meshes).execute()?;
        let chains = GenerateSplines::new(vertices, params).execute(oracle)?;

        self.destroy_splines();
        for chain in chains {
            self.add_chain(chain);
        }

        tracing::info!(splines = self.splines.len(), "generated grind surface");
        Ok(self.splines.len())
    }

    /// Builds colliders for every spline that has at least one segment.
    ///
    /// With `settings`, every spline uses them instead of its own.
    ///
    /// # Errors
    ///
    /// Propagates the first collider generation error.
    pub fn generate_colliders(
        &self,
        settings: Option<ColliderSettings>,
        oracle: Option<&dyn RaycastOracle>,
    ) -> Result<Vec<GeneratedCollider>> {
        let mut colliders = Vec::new();
        for spline in self.splines.iter().filter(|s| s.chain.is_complete()) {
            colliders.extend(spline.generate_colliders(settings, oracle)?);
        }
        Ok(colliders)
    }

    /// Removes every spline from the surface.
    pub fn destroy_splines(&mut self) {
        self.splines.clear();
    }
}
