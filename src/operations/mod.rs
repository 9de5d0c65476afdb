pub mod collect;
pub mod collider;
pub mod generate;

pub use collect::{CollectVertices, MeshInstance};
pub use collider::{ColliderSettings, GenerateColliders, GeneratedCollider};
pub use generate::{GenerateSplines, GenerationParams};
