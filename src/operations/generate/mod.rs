mod admission;
mod params;
mod pool;

pub use admission::AdmissionFilter;
pub use params::GenerationParams;

use std::collections::HashSet;

use crate::error::{OperationError, Result};
use crate::geometry::Chain;
use crate::math::{angle, Point3, VertexKey, ANGLE_TOLERANCE_DEG};
use crate::oracle::OccupancyOracle;

use pool::{ChainId, ChainStore, PointPool};

/// Grows grind chains over a point cloud.
///
/// Vertices that pass the [`AdmissionFilter`] are linked greedily: each chain
/// repeatedly steps to the nearest available vertex that keeps within the
/// slope and turn limits and has solid support under the segment midpoint.
/// When a chain dead-ends, a new one is seeded from an unused vertex or an
/// existing endpoint, until no seed can connect to anything new.
///
/// Output chains always have at least two points, and no two chains share a
/// pair of vertices.
#[derive(Debug, Clone)]
pub struct GenerateSplines {
    points: Vec<Point3>,
    params: GenerationParams,
    admission: bool,
}

/// The chain currently being extended.
struct Growing {
    id: ChainId,
    /// Other chains that contain any vertex of this one.
    touched: HashSet<ChainId>,
}

impl GenerateSplines {
    /// Creates a new `GenerateSplines` operation over raw world-space vertices.
    #[must_use]
    pub fn new(points: Vec<Point3>, params: GenerationParams) -> Self {
        Self {
            points,
            params,
            admission: true,
        }
    }

    /// Treats every input vertex as already admitted.
    #[must_use]
    pub fn skip_admission(mut self) -> Self {
        self.admission = false;
        self
    }

    /// Executes generation against the given occupancy oracle.
    ///
    /// An input with no admissible vertices yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError` if the generation parameters are invalid and
    /// `OperationError::InvalidInput` if a point has a non-finite coordinate.
    pub fn execute<O: OccupancyOracle + ?Sized>(&self, oracle: &O) -> Result<Vec<Chain>> {
        self.params.validate()?;
        if let Some(index) = self.points.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(OperationError::InvalidInput(format!(
                "point {index} has a non-finite coordinate"
            ))
            .into());
        }

        let filter = AdmissionFilter::new(&self.params);
        let unique = dedup(&self.points);
        let vertices = if self.admission {
            filter.filter(oracle, &unique)
        } else {
            unique
        };

        tracing::debug!(
            input = self.points.len(),
            admitted = vertices.len(),
            "found potential grind vertices"
        );

        if vertices.is_empty() {
            return Ok(Vec::new());
        }

        let mut pool = PointPool::new(vertices.len());
        let mut store = ChainStore::new(vertices.len());
        let mut growing = seed(0, &mut pool, &mut store);

        loop {
            if let Some(next) = self.advance(oracle, &filter, &vertices, &pool, &store, &growing) {
                tracing::trace!(point = ?vertices[next], "add spline point");
                pool.take(next);
                pool.activate(next);
                growing
                    .touched
                    .extend(store.chains_of(next).iter().copied());
                store.push(growing.id, next);
                continue;
            }

            let finished = store.points(growing.id);
            let len = finished.len();
            if let Some(&last) = finished.last() {
                pool.record_endpoint(last);
            }
            pool.clear_active();

            if len < 2 {
                tracing::trace!("discarding single-point chain");
                store.discard(growing.id);
            } else {
                tracing::debug!(points = len, "finished spline");
            }

            match find_start(&pool, &store) {
                Some(start) => {
                    tracing::debug!(start = ?vertices[start], "creating new spline");
                    growing = seed(start, &mut pool, &mut store);
                }
                None => break,
            }
        }

        let chains = store.into_chains(&vertices);
        tracing::debug!(splines = chains.len(), "generation complete");
        Ok(chains)
    }

    /// Picks the next vertex for the growing chain, if any qualifies.
    fn advance<O: OccupancyOracle + ?Sized>(
        &self,
        oracle: &O,
        filter: &AdmissionFilter,
        vertices: &[Point3],
        pool: &PointPool,
        store: &ChainStore,
        growing: &Growing,
    ) -> Option<usize> {
        let chain = store.points(growing.id);
        let &cur_index = chain.last()?;
        let cur = &vertices[cur_index];
        let prev = chain
            .len()
            .checked_sub(2)
            .map(|i| &vertices[chain[i]]);

        let mut best: Option<(usize, f64)> = None;
        for other_index in pool.available() {
            if other_index == cur_index {
                continue;
            }
            if store
                .chains_of(other_index)
                .iter()
                .any(|c| growing.touched.contains(c))
            {
                continue;
            }

            let other = &vertices[other_index];
            if !self.within_limits(prev, cur, other) {
                continue;
            }
            if !filter.midpoint_supported(oracle, cur, other) {
                continue;
            }

            let distance = (other - cur).norm();
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((other_index, distance));
            }
        }

        best.map(|(i, _)| i)
    }

    fn within_limits(&self, prev: Option<&Point3>, cur: &Point3, other: &Point3) -> bool {
        let slope = angle::slope_deg(&(other - cur));
        if slope > self.params.max_slope_deg + ANGLE_TOLERANCE_DEG {
            return false;
        }
        match prev {
            Some(prev) => {
                angle::horizontal_turn_deg(prev, cur, other)
                    <= self.params.max_horizontal_angle_deg + ANGLE_TOLERANCE_DEG
            }
            None => true,
        }
    }
}

/// Starts a chain at `start`, updating its role.
fn seed(start: usize, pool: &mut PointPool, store: &mut ChainStore) -> Growing {
    if pool.is_unused(start) {
        pool.take(start);
    }
    pool.record_endpoint(start);
    pool.activate(start);

    let id = store.create(start);
    let touched = store
        .chains_of(start)
        .iter()
        .copied()
        .filter(|&c| c != id)
        .collect();
    Growing { id, touched }
}

/// First available vertex that still has some available partner it does not
/// already share a chain with.
fn find_start(pool: &PointPool, store: &ChainStore) -> Option<usize> {
    let available = pool.available();
    let others = available.len().checked_sub(1)?;
    available.iter().copied().find(|&p| {
        let partners = store.partners(p);
        // More candidates than partners means at least one is unconnected.
        others > partners.len()
            || available
                .iter()
                .any(|&q| q != p && !partners.contains(&q))
    })
}

/// Removes positional duplicates, keeping first occurrences.
fn dedup(points: &[Point3]) -> Vec<Point3> {
    let mut seen = HashSet::new();
    points
        .iter()
        .filter(|p| seen.insert(VertexKey::from_point(p)))
        .copied()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GrindError;
    use crate::geometry::Aabb;
    use crate::oracle::BoxScene;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn ledge(scene: &mut BoxScene, min: Point3, max: Point3) {
        scene.add_solid(Aabb::from_corners(min, max));
    }

    /// Everything below y = -0.05 is solid ground.
    fn ground(c: &Point3, _half_extent: f64) -> bool {
        c.y < -0.05
    }

    fn scenario_params() -> GenerationParams {
        GenerationParams::default()
            .with_max_horizontal_angle(15.0)
            .with_max_slope(60.0)
    }

    fn assert_no_shared_pairs(chains: &[Chain]) {
        for (i, a) in chains.iter().enumerate() {
            for b in &chains[i + 1..] {
                let shared = a.points.iter().filter(|p| b.contains(p)).count();
                assert!(shared < 2, "chains {a:?} and {b:?} share {shared} points");
            }
        }
    }

    fn assert_within_limits(chains: &[Chain], params: &GenerationParams) {
        for chain in chains {
            assert!(chain.is_complete());
            for (a, b) in chain.segments() {
                assert!(angle::slope_deg(&(b - a)) <= params.max_slope_deg + 1e-4);
            }
            for w in chain.points.windows(3) {
                assert!(
                    angle::horizontal_turn_deg(&w[0], &w[1], &w[2])
                        <= params.max_horizontal_angle_deg + 1e-4
                );
            }
        }
    }

    #[test]
    fn empty_input_yields_no_chains() {
        let chains = GenerateSplines::new(Vec::new(), GenerationParams::default())
            .execute(&ground)
            .unwrap();
        assert!(chains.is_empty());
    }

    #[test]
    fn nothing_admitted_yields_no_chains() {
        // Solid everywhere: no vertex has open air above it.
        let solid = |_: &Point3, _: f64| true;
        let points = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)];
        let chains = GenerateSplines::new(points, scenario_params())
            .execute(&solid)
            .unwrap();
        assert!(chains.is_empty());
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = GenerationParams::default().with_point_test_radius(-1.0);
        let err = GenerateSplines::new(vec![p(0.0, 0.0, 0.0)], params)
            .execute(&ground)
            .unwrap_err();
        assert!(matches!(err, GrindError::Params(_)));
    }

    #[test]
    fn non_finite_points_are_rejected() {
        let points = vec![p(f64::NAN, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)];
        let err = GenerateSplines::new(points, scenario_params())
            .skip_admission()
            .execute(&ground)
            .unwrap_err();
        assert!(matches!(err, GrindError::Operation(OperationError::InvalidInput(_))));

        let points = vec![p(0.0, 0.0, 0.0), p(f64::INFINITY, 0.0, 0.0)];
        assert!(GenerateSplines::new(points, scenario_params())
            .execute(&ground)
            .is_err());
    }

    #[test]
    fn start_needs_an_unconnected_partner() {
        let mut pool = PointPool::new(3);
        let mut store = ChainStore::new(3);
        let growing = seed(0, &mut pool, &mut store);
        pool.take(1);
        store.push(growing.id, 1);
        pool.record_endpoint(1);
        pool.clear_active();
        assert_eq!(find_start(&pool, &store), Some(2));

        pool.take(2);
        pool.record_endpoint(2);
        store.discard(growing.id);
        let id = store.create(0);
        store.push(id, 1);
        store.push(id, 2);
        assert_eq!(find_start(&pool, &store), None);
    }

    #[test]
    fn collinear_points_form_one_chain() {
        let points = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0)];
        let chains = GenerateSplines::new(points.clone(), scenario_params())
            .skip_admission()
            .execute(&ground)
            .unwrap();
        assert_eq!(chains, vec![Chain::from_points(points)]);
    }

    #[test]
    fn collinear_ledge_edge_forms_one_chain() {
        let mut scene = BoxScene::new();
        ledge(&mut scene, p(-0.5, -1.0, -1.0), p(3.5, 0.0, 0.0));
        let edge = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0)];
        let mut points = edge.clone();
        // Bottom vertices are buried and never admitted.
        points.push(p(0.0, -1.0, -1.0));
        points.push(p(3.0, -1.0, -1.0));

        let chains = GenerateSplines::new(points, scenario_params())
            .execute(&scene)
            .unwrap();
        assert_eq!(chains, vec![Chain::from_points(edge)]);
    }

    #[test]
    fn gap_between_ledges_splits_chains() {
        let mut scene = BoxScene::new();
        ledge(&mut scene, p(-0.2, -1.0, -1.0), p(1.2, 0.0, 0.0));
        ledge(&mut scene, p(2.8, -1.0, -1.0), p(4.2, 0.0, 0.0));
        let points = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(4.0, 0.0, 0.0)];

        let chains = GenerateSplines::new(points, scenario_params())
            .execute(&scene)
            .unwrap();
        assert_eq!(
            chains,
            vec![
                Chain::from_points(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]),
                Chain::from_points(vec![p(3.0, 0.0, 0.0), p(4.0, 0.0, 0.0)]),
            ]
        );
    }

    #[test]
    fn sharp_corner_splits_and_bridges() {
        let mut scene = BoxScene::new();
        ledge(&mut scene, p(-0.5, -1.0, -1.0), p(2.0, 0.0, 0.0));
        ledge(&mut scene, p(1.5, -1.0, -1.0), p(2.0, 0.0, 3.0));
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(2.0, 0.0, 1.0),
            p(2.0, 0.0, 2.0),
        ];

        let chains = GenerateSplines::new(points, scenario_params())
            .execute(&scene)
            .unwrap();
        assert_eq!(
            chains,
            vec![
                Chain::from_points(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]),
                Chain::from_points(vec![p(2.0, 0.0, 1.0), p(2.0, 0.0, 2.0)]),
                Chain::from_points(vec![p(2.0, 0.0, 0.0), p(2.0, 0.0, 1.0)]),
            ]
        );
        assert_no_shared_pairs(&chains);
    }

    #[test]
    fn steep_vertices_are_left_out() {
        let points = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.5, 2.0, 0.0)];
        let chains = GenerateSplines::new(points, scenario_params())
            .skip_admission()
            .execute(&ground)
            .unwrap();
        assert_eq!(
            chains,
            vec![Chain::from_points(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)])]
        );
    }

    #[test]
    fn duplicate_input_vertices_are_merged() {
        let points = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0 + 1e-9),
        ];
        let chains = GenerateSplines::new(points, scenario_params())
            .skip_admission()
            .execute(&ground)
            .unwrap();
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].len(), 3);
    }

    #[test]
    fn box_corners_respect_all_limits() {
        let mut scene = BoxScene::new();
        ledge(&mut scene, p(0.0, -1.0, -1.0), p(4.0, 0.0, 0.0));
        let mut points = Vec::new();
        for x in [0.0, 4.0] {
            for y in [-1.0, 0.0] {
                for z in [-1.0, 0.0] {
                    points.push(p(x, y, z));
                }
            }
        }
        let params = scenario_params();
        let chains = GenerateSplines::new(points, params).execute(&scene).unwrap();
        assert!(!chains.is_empty());
        assert_within_limits(&chains, &params);
        assert_no_shared_pairs(&chains);
    }

    #[test]
    fn dense_grid_terminates_within_limits() {
        let mut points = Vec::new();
        for i in 0..8 {
            for j in 0..8 {
                points.push(p(f64::from(i) * 0.5, 0.0, f64::from(j) * 0.5));
            }
        }
        let params = scenario_params();
        let chains = GenerateSplines::new(points, params)
            .skip_admission()
            .execute(&ground)
            .unwrap();
        assert!(!chains.is_empty());
        assert_within_limits(&chains, &params);
        assert_no_shared_pairs(&chains);
    }

    #[test]
    fn generation_is_deterministic() {
        let mut scene = BoxScene::new();
        ledge(&mut scene, p(0.0, -1.0, -1.0), p(4.0, 0.0, 0.0));
        ledge(&mut scene, p(3.0, -1.0, 0.0), p(4.0, 0.0, 3.0));
        let mut points = Vec::new();
        for i in 0..=8 {
            points.push(p(f64::from(i) * 0.5, 0.0, 0.0));
            points.push(p(4.0, 0.0, f64::from(i) * 0.375));
        }
        let op = GenerateSplines::new(points, scenario_params());
        let first = op.execute(&scene).unwrap();
        let second = op.execute(&scene).unwrap();
        assert_eq!(first, second);
        assert_no_shared_pairs(&first);
    }
}
