pub mod aabb;
pub mod chain;

pub use aabb::{Aabb, RayHit};
pub use chain::Chain;
