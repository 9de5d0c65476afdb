use crate::error::{ParamsError, Result};

/// Collider primitive emitted per chain segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColliderType {
    #[default]
    Box,
    Capsule,
}

/// Shape and placement options for generated colliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderSettings {
    pub collider_type: ColliderType,
    /// Capsule radius.
    pub radius: f64,
    /// Box width, across the segment.
    pub width: f64,
    /// Box depth, below the segment.
    pub depth: f64,
    /// Shift boxes sideways so they sit on the ledge top instead of
    /// straddling the edge.
    pub is_edge: bool,
    /// Raycast to find the solid side of an edge instead of using `flip_edge`.
    pub auto_detect_edge_alignment: bool,
    /// Inset to the left instead of the right.
    pub flip_edge: bool,
}

impl Default for ColliderSettings {
    fn default() -> Self {
        Self {
            collider_type: ColliderType::Box,
            radius: 0.1,
            width: 0.1,
            depth: 0.05,
            is_edge: false,
            auto_detect_edge_alignment: false,
            flip_edge: false,
        }
    }
}

impl ColliderSettings {
    /// Capsule settings with the given radius.
    #[must_use]
    pub fn capsule(radius: f64) -> Self {
        Self {
            collider_type: ColliderType::Capsule,
            radius,
            ..Self::default()
        }
    }

    /// Edge box settings with the given cross-section.
    #[must_use]
    pub fn edge_box(width: f64, depth: f64) -> Self {
        Self {
            collider_type: ColliderType::Box,
            width,
            depth,
            is_edge: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_auto_detect(mut self, enabled: bool) -> Self {
        self.auto_detect_edge_alignment = enabled;
        self
    }

    #[must_use]
    pub fn with_flip_edge(mut self, flip: bool) -> Self {
        self.flip_edge = flip;
        self
    }

    /// Checks that the dimensions used by the selected collider type are positive.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::NotPositive` naming the offending dimension.
    pub fn validate(&self) -> Result<()> {
        match self.collider_type {
            ColliderType::Capsule => positive("radius", self.radius),
            ColliderType::Box => {
                positive("width", self.width)?;
                positive("depth", self.depth)
            }
        }
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NotPositive { parameter, value }.into())
    }
}
