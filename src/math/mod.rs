pub mod angle;
pub mod axis;
pub mod vertex_key;

pub use vertex_key::VertexKey;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Unit quaternion used for collider orientations.
pub type Rotation = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Grid spacing used to quantize vertex positions into [`VertexKey`]s.
///
/// Positions closer than this along every axis collapse to the same vertex.
pub const VERTEX_EPSILON: f64 = 1e-5;

/// Slack, in degrees, applied when comparing angles against thresholds.
pub const ANGLE_TOLERANCE_DEG: f64 = 1e-4;
