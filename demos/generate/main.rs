//! Generates grind splines and colliders for a small box scene.
//!
//! Usage:
//! ```text
//! cargo run --example generate
//! RUST_LOG=grindspline=trace cargo run --example generate
//! ```

use grindspline::geometry::Aabb;
use grindspline::math::{Matrix4, Point3, Vector3};
use grindspline::operations::collect::MeshInstance;
use grindspline::operations::collider::{ColliderSettings, ColliderShape};
use grindspline::operations::generate::GenerationParams;
use grindspline::oracle::BoxScene;
use grindspline::surface::{GrindSurface, SplineDefaults, SurfaceType};

/// Corner vertices of a 1m grid over the box `[0, size]`, in local space.
fn block_vertices(size: &Vector3) -> Vec<Point3> {
    let steps = |extent: f64| (0_i32..).map(f64::from).take_while(move |&v| v <= extent);
    let mut vertices = Vec::new();
    for x in steps(size.x) {
        for y in [0.0, size.y] {
            for z in steps(size.z) {
                vertices.push(Point3::new(x, y, z));
            }
        }
    }
    vertices
}

fn main() -> grindspline::Result<()> {
    // Default: WARN for everything, INFO for grindspline.
    // Override with RUST_LOG env var (e.g. RUST_LOG=grindspline=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("grindspline=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // A 6m x 0.5m x 1m ledge and a 2m x 1m x 2m box beside it.
    let blocks = [
        (Vector3::new(0.0, 0.0, 0.0), Vector3::new(6.0, 0.5, 1.0)),
        (Vector3::new(8.0, 0.0, 0.0), Vector3::new(2.0, 1.0, 2.0)),
    ];

    let mut scene = BoxScene::new();
    let mut meshes = Vec::new();
    for (offset, size) in &blocks {
        let min = Point3::from(*offset);
        scene.add_solid(Aabb::from_corners(min, min + size));
        meshes.push(MeshInstance::new(
            block_vertices(size),
            Matrix4::new_translation(offset),
        ));
    }

    let mut surface = GrindSurface::with_defaults(SplineDefaults {
        surface_type: SurfaceType::Metal,
        collider_settings: ColliderSettings::edge_box(0.1, 0.05).with_auto_detect(true),
        ..SplineDefaults::default()
    });
    surface.generate(&meshes, &scene, GenerationParams::default())?;

    for spline in &surface.splines {
        println!(
            "{} ({} points, {:.2}m)",
            spline.name(),
            spline.chain.len(),
            spline.chain.length()
        );
    }

    let colliders = surface.generate_colliders(None, Some(&scene))?;
    for collider in &colliders {
        if let ColliderShape::Box { size } = collider.shape {
            println!(
                "  {} box at {:.3?} size {:.3?}",
                collider.layer.name(),
                collider.center.coords.as_slice(),
                size.as_slice()
            );
        }
    }
    println!("{} colliders", colliders.len());

    Ok(())
}
