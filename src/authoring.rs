use crate::geometry::Chain;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::surface::{GrindSpline, GrindSurface, SplineDefaults};

/// Returns the vertex closest to the ray `origin + t * direction`, `t >= 0`.
///
/// Vertices behind the ray origin are ignored. Ties keep the first vertex.
#[must_use]
pub fn nearest_vertex_to_ray(
    vertices: &[Point3],
    origin: &Point3,
    direction: &Vector3,
) -> Option<Point3> {
    let len = direction.norm();
    if len < TOLERANCE {
        return None;
    }
    let dir = direction / len;

    let mut best: Option<(Point3, f64)> = None;
    for v in vertices {
        let to_v = v - origin;
        let t = to_v.dot(&dir);
        if t < 0.0 {
            continue;
        }
        let distance = (to_v - dir * t).norm();
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((*v, distance));
        }
    }
    best.map(|(v, _)| v)
}

/// An in-progress manually drawn spline.
///
/// Picks snap to mesh vertices. Confirming turns the points into a
/// [`GrindSpline`]; cancelling throws them away.
#[derive(Debug, Default)]
pub struct SplineDrawing {
    active: Option<Chain>,
    defaults: SplineDefaults,
}

impl SplineDrawing {
    /// Creates a session whose confirmed splines carry `defaults`.
    #[must_use]
    pub fn new(defaults: SplineDefaults) -> Self {
        Self {
            active: None,
            defaults,
        }
    }

    /// Returns `true` while a spline is being drawn.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Points placed so far.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        self.active.as_ref().map(|c| c.points.as_slice()).unwrap_or_default()
    }

    /// Appends `point`, starting a new spline if none is active.
    ///
    /// Placing the same vertex twice in a row is ignored. Returns the number
    /// of points in the active spline.
    pub fn add_point(&mut self, point: Point3) -> usize {
        let chain = self.active.get_or_insert_with(Chain::new);
        if chain.last().is_none_or(|last| (last - point).norm() >= TOLERANCE) {
            chain.push(point);
        }
        chain.len()
    }

    /// Snaps a pick ray to the nearest vertex and appends it.
    ///
    /// Returns the vertex that was picked.
    pub fn pick(
        &mut self,
        vertices: &[Point3],
        origin: &Point3,
        direction: &Vector3,
    ) -> Option<Point3> {
        let picked = nearest_vertex_to_ray(vertices, origin, direction)?;
        self.add_point(picked);
        Some(picked)
    }

    /// Segment from the last placed point to `cursor`, for previewing.
    #[must_use]
    pub fn preview_segment(&self, cursor: &Point3) -> Option<(Point3, Point3)> {
        self.active
            .as_ref()
            .and_then(Chain::last)
            .map(|last| (*last, *cursor))
    }

    /// Finishes the active spline.
    ///
    /// Returns `None` and discards the spline if it has fewer than two points.
    pub fn confirm(&mut self) -> Option<GrindSpline> {
        let chain = self.active.take()?;
        if !chain.is_complete() {
            tracing::debug!(points = chain.len(), "discarding incomplete drawn spline");
            return None;
        }
        Some(self.defaults.spline(chain))
    }

    /// Finishes the active spline and adds it to `surface` if it is valid.
    ///
    /// Returns `true` if a spline was added.
    pub fn confirm_into(&mut self, surface: &mut GrindSurface) -> bool {
        match self.confirm() {
            Some(spline) => {
                surface.splines.push(spline);
                true
            }
            None => false,
        }
    }

    /// Abandons the active spline.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}
