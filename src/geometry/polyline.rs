//! The geometry kernel (§4.B): arclength operations over a single chain of
//! vertices, plus line/line intersection. Polygon-polygon differencing
//! lives in `geometry::polygon` since it is delegated to `geo`'s planar
//! Boolean algebra rather than hand-rolled here.

use super::{LineSegment, Point2D};

/// A single open chain of vertices. Closed rings are represented by
/// repeating the first vertex as the last, matching how this engine's
/// WhiteboxTools ancestor represents closed contours (`Contour::closed`
/// combined with `points[0] == points[n-1]`).
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Polyline {
    pub vertices: Vec<Point2D>,
}

impl Polyline {
    pub fn new(vertices: Vec<Point2D>) -> Polyline {
        Polyline { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 2
    }

    pub fn first(&self) -> Point2D {
        self.vertices[0]
    }

    pub fn last(&self) -> Point2D {
        self.vertices[self.vertices.len() - 1]
    }

    /// Cumulative arclength at each vertex; `cumulative[0] == 0.0` and
    /// `cumulative[n-1] == length()`.
    pub fn cumulative_lengths(&self) -> Vec<f64> {
        let mut acc = vec![0.0; self.vertices.len()];
        let mut total = 0.0;
        for i in 1..self.vertices.len() {
            total += self.vertices[i - 1].distance(&self.vertices[i]);
            acc[i] = total;
        }
        acc
    }
}

/// A (possibly multi-part) polyline: a contour's `line(Cᵢ)`, or the
/// collection of rings a closed contour decomposes into (§3, §4.B).
#[derive(Default, Clone, Debug)]
pub struct MultiPolyline {
    pub parts: Vec<Polyline>,
}

impl MultiPolyline {
    pub fn new(parts: Vec<Polyline>) -> MultiPolyline {
        MultiPolyline { parts }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| p.is_empty())
    }
}

/// `length(L)` (§4.B).
pub fn length(line: &Polyline) -> f64 {
    let mut total = 0.0;
    for i in 1..line.vertices.len() {
        total += line.vertices[i - 1].distance(&line.vertices[i]);
    }
    total
}

/// `interpolate(L, s)` — point at arclength `s` (§4.B). `s` is clamped to
/// `[0, length(L)]`.
pub fn interpolate(line: &Polyline, s: f64) -> Point2D {
    let cum = line.cumulative_lengths();
    let total = *cum.last().unwrap_or(&0.0);
    let s = s.clamp(0.0, total);
    if line.vertices.len() < 2 {
        return line.vertices.first().copied().unwrap_or_default();
    }
    let mut j = 1;
    while j < cum.len() - 1 && cum[j] < s {
        j += 1;
    }
    let seg_len = cum[j] - cum[j - 1];
    let t = if seg_len > 0.0 { (s - cum[j - 1]) / seg_len } else { 0.0 };
    let p0 = line.vertices[j - 1];
    let p1 = line.vertices[j];
    Point2D::new((1.0 - t) * p0.x + t * p1.x, (1.0 - t) * p0.y + t * p1.y)
}

/// `substring(L, s0, s1)` — sub-arc by arclength (§4.B). Requires
/// `0 <= s0 < s1 <= length(L)`.
pub fn substring(line: &Polyline, s0: f64, s1: f64) -> Polyline {
    debug_assert!(s0 < s1);
    let cum = line.cumulative_lengths();
    let mut vertices = vec![interpolate(line, s0)];
    for (i, &s) in cum.iter().enumerate() {
        if s > s0 && s < s1 {
            vertices.push(line.vertices[i]);
        }
    }
    vertices.push(interpolate(line, s1));
    Polyline::new(vertices)
}

/// `densify(L, step)` — insert vertices so consecutive vertices are at most
/// `step` apart (§4.B).
pub fn densify(line: &Polyline, step: f64) -> Polyline {
    if step <= 0.0 || line.vertices.len() < 2 {
        return line.clone();
    }
    let mut out = vec![line.vertices[0]];
    for i in 1..line.vertices.len() {
        let p0 = line.vertices[i - 1];
        let p1 = line.vertices[i];
        let seg_len = p0.distance(&p1);
        let n = (seg_len / step).ceil() as usize;
        for k in 1..=n {
            let t = k as f64 / n as f64;
            out.push(Point2D::new(
                (1.0 - t) * p0.x + t * p1.x,
                (1.0 - t) * p0.y + t * p1.y,
            ));
        }
    }
    Polyline::new(out)
}

/// `locate_point(L, P)` — arclength of the orthogonal projection of `P`
/// onto `L` (§4.B). For a multi-segment line this is the arclength to the
/// closest point on the closest segment.
pub fn locate_point(line: &Polyline, p: Point2D) -> f64 {
    if line.vertices.len() < 2 {
        return 0.0;
    }
    let cum = line.cumulative_lengths();
    let mut best_dist = f64::INFINITY;
    let mut best_s = 0.0;
    for i in 1..line.vertices.len() {
        let seg = LineSegment::new(line.vertices[i - 1], line.vertices[i]);
        let (dist_sq, t) = seg.closest_point_fraction(p);
        if dist_sq < best_dist {
            best_dist = dist_sq;
            let seg_len = cum[i] - cum[i - 1];
            best_s = cum[i - 1] + t * seg_len;
        }
    }
    best_s
}

/// `intersection(L, L')` — the points at which two polylines cross (§4.B).
/// Returns an empty vector, a single point, or a multipoint as a `Vec`;
/// the caller treats all three uniformly (geometry-collection results,
/// which cannot arise from two simple polylines, are never produced).
pub fn intersection(a: &Polyline, b: &Polyline) -> Vec<Point2D> {
    let mut points = Vec::new();
    if a.vertices.len() < 2 || b.vertices.len() < 2 {
        return points;
    }
    for i in 1..a.vertices.len() {
        let seg_a = LineSegment::new(a.vertices[i - 1], a.vertices[i]);
        for j in 1..b.vertices.len() {
            let seg_b = LineSegment::new(b.vertices[j - 1], b.vertices[j]);
            if let Some(p) = seg_a.get_intersection_point(&seg_b) {
                points.push(p);
            }
        }
    }
    points
}

/// Arclengths along `line` at which it crosses any of `rings` (closed
/// boundary polylines). Used by `geometry::polygon::difference` to find the
/// cut points before reassembling the kept sub-arcs.
pub fn cut_points_against_rings(line: &Polyline, rings: &[Polyline]) -> Vec<f64> {
    let mut cuts = Vec::new();
    for ring in rings {
        for p in intersection(line, ring) {
            cuts.push(locate_point(line, p));
        }
    }
    cuts
}
