use crate::error::{ParamsError, Result};

/// Tunable thresholds for automatic spline generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Distance from a vertex at which occupancy probes are centred.
    pub point_test_offset: f64,
    /// Half-extent of each occupancy probe box.
    pub point_test_radius: f64,
    /// Largest allowed horizontal turn between consecutive segments, in degrees.
    pub max_horizontal_angle_deg: f64,
    /// Largest allowed segment slope relative to the ground plane, in degrees.
    pub max_slope_deg: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            point_test_offset: 0.1,
            point_test_radius: 0.05,
            max_horizontal_angle_deg: 15.0,
            max_slope_deg: 60.0,
        }
    }
}

impl GenerationParams {
    #[must_use]
    pub fn with_point_test_offset(mut self, offset: f64) -> Self {
        self.point_test_offset = offset;
        self
    }

    #[must_use]
    pub fn with_point_test_radius(mut self, radius: f64) -> Self {
        self.point_test_radius = radius;
        self
    }

    #[must_use]
    pub fn with_max_horizontal_angle(mut self, degrees: f64) -> Self {
        self.max_horizontal_angle_deg = degrees;
        self
    }

    #[must_use]
    pub fn with_max_slope(mut self, degrees: f64) -> Self {
        self.max_slope_deg = degrees;
        self
    }

    /// Checks that every parameter is within its valid range.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::NotPositive` for a non-positive or non-finite
    /// offset/radius, and `ParamsError::OutOfRange` for an angle outside
    /// `[0, 180]`.
    pub fn validate(&self) -> Result<()> {
        positive("point_test_offset", self.point_test_offset)?;
        positive("point_test_radius", self.point_test_radius)?;
        degrees("max_horizontal_angle_deg", self.max_horizontal_angle_deg)?;
        degrees("max_slope_deg", self.max_slope_deg)?;
        Ok(())
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NotPositive { parameter, value }.into())
    }
}

fn degrees(parameter: &'static str, value: f64) -> Result<()> {
    if (0.0..=180.0).contains(&value) {
        Ok(())
    } else {
        Err(ParamsError::OutOfRange {
            parameter,
            value,
            min: 0.0,
            max: 180.0,
        }
        .into())
    }
}
