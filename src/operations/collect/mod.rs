use std::collections::HashSet;

use crate::error::{GeometryError, OperationError, Result};
use crate::math::{Matrix4, Point3, VertexKey, TOLERANCE};

/// A mesh's vertex positions together with its local-to-world transform.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    /// Vertex positions in mesh-local space.
    pub vertices: Vec<Point3>,
    /// Local-to-world transform.
    pub transform: Matrix4,
}

impl MeshInstance {
    /// Creates a mesh instance.
    #[must_use]
    pub fn new(vertices: Vec<Point3>, transform: Matrix4) -> Self {
        Self {
            vertices,
            transform,
        }
    }

    /// Creates a mesh instance that is already in world space.
    #[must_use]
    pub fn in_world(vertices: Vec<Point3>) -> Self {
        Self::new(vertices, Matrix4::identity())
    }
}

/// Flattens a group of meshes into a deduplicated world-space point cloud.
///
/// Vertices are deduplicated per mesh in local space, transformed to world
/// space, and then deduplicated again across meshes. First-seen order is
/// preserved so that downstream generation stays deterministic.
#[derive(Debug)]
pub struct CollectVertices<'a> {
    meshes: &'a [MeshInstance],
}

impl<'a> CollectVertices<'a> {
    /// Creates a new `CollectVertices` operation.
    #[must_use]
    pub fn new(meshes: &'a [MeshInstance]) -> Self {
        Self { meshes }
    }

    /// Executes the collection.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if a mesh transform is singular or
    /// not affine, and `OperationError::InvalidInput` if a vertex has a
    /// non-finite coordinate.
    pub fn execute(&self) -> Result<Vec<Point3>> {
        let mut seen = HashSet::new();
        let mut world = Vec::new();

        for (mesh_index, mesh) in self.meshes.iter().enumerate() {
            check_transform(&mesh.transform)?;

            let mut local_seen = HashSet::new();
            for v in &mesh.vertices {
                if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) {
                    return Err(OperationError::InvalidInput(format!(
                        "mesh {mesh_index} has a non-finite vertex"
                    ))
                    .into());
                }
                if !local_seen.insert(VertexKey::from_point(v)) {
                    continue;
                }
                let w = mesh.transform.transform_point(v);
                if seen.insert(VertexKey::from_point(&w)) {
                    world.push(w);
                }
            }
        }

        tracing::debug!(
            meshes = self.meshes.len(),
            vertices = world.len(),
            "collected world-space vertices"
        );

        Ok(world)
    }
}

fn check_transform(m: &Matrix4) -> Result<()> {
    if m.iter().any(|v| !v.is_finite()) {
        return Err(GeometryError::Degenerate("transform has non-finite entries".into()).into());
    }
    let bottom = m.row(3);
    if bottom[0].abs() > TOLERANCE
        || bottom[1].abs() > TOLERANCE
        || bottom[2].abs() > TOLERANCE
        || (bottom[3] - 1.0).abs() > TOLERANCE
    {
        return Err(GeometryError::Degenerate("transform is not affine".into()).into());
    }
    if m.fixed_view::<3, 3>(0, 0).determinant().abs() < TOLERANCE {
        return Err(GeometryError::Degenerate("transform is singular".into()).into());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GrindError;
    use crate::math::Vector3;

    fn quad() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
            // shared corners repeated, as in split-normal meshes
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn deduplicates_within_mesh() {
        let meshes = [MeshInstance::in_world(quad())];
        let points = CollectVertices::new(&meshes).execute().unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Point3::origin());
    }

    #[test]
    fn applies_transform_before_global_dedup() {
        let shifted = Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0));
        let meshes = [
            MeshInstance::in_world(quad()),
            MeshInstance::new(quad(), shifted),
        ];
        let points = CollectVertices::new(&meshes).execute().unwrap();
        // Second quad shares its x=1 edge with the first.
        assert_eq!(points.len(), 6);
        assert!(points.contains(&Point3::new(2.0, 0.0, 1.0)));
    }

    #[test]
    fn scaled_transform_moves_vertices() {
        let meshes = [MeshInstance::new(
            vec![Point3::new(1.0, 2.0, 3.0)],
            Matrix4::new_scaling(2.0),
        )];
        let points = CollectVertices::new(&meshes).execute().unwrap();
        assert_eq!(points, vec![Point3::new(2.0, 4.0, 6.0)]);
    }

    #[test]
    fn singular_transform_is_rejected() {
        let meshes = [MeshInstance::new(quad(), Matrix4::new_scaling(0.0))];
        let err = CollectVertices::new(&meshes).execute().unwrap_err();
        assert!(matches!(err, GrindError::Geometry(GeometryError::Degenerate(_))));
    }

    #[test]
    fn non_finite_vertex_is_rejected() {
        let meshes = [MeshInstance::in_world(vec![Point3::new(f64::NAN, 0.0, 0.0)])];
        let err = CollectVertices::new(&meshes).execute().unwrap_err();
        assert!(matches!(err, GrindError::Operation(OperationError::InvalidInput(_))));
    }

    #[test]
    fn empty_input_yields_no_points() {
        let points = CollectVertices::new(&[]).execute().unwrap();
        assert!(points.is_empty());
    }
}
