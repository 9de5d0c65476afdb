//! Grind spline generation for level geometry.
//!
//! Finds grindable ledge edges in a point cloud using local occupancy probes,
//! links them into polylines, and builds box or capsule colliders along them.

pub mod authoring;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod oracle;
pub mod surface;

pub use error::{GrindError, Result};
